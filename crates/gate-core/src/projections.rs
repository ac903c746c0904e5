//! Read-only views over a visitor collection.
//!
//! Every projection keeps the input order and clones the matching records.
//! None of them sort, cache, or touch the network, so they can be re-run on
//! a freshly fetched collection at any time.

use chrono::{DateTime, Local, TimeZone, Utc};

use crate::entities::VisitSession;
use crate::errors::CoreError;

/// Visits whose check-in falls on today's local calendar date.
#[must_use]
pub fn today(sessions: &[VisitSession]) -> Vec<VisitSession> {
    today_at(sessions, &Local::now())
}

/// Visits whose check-in falls on the same calendar date as `now`, judged in
/// `now`'s time zone.
#[must_use]
pub fn today_at<Tz: TimeZone>(sessions: &[VisitSession], now: &DateTime<Tz>) -> Vec<VisitSession> {
    let tz = now.timezone();
    let date = now.date_naive();
    sessions
        .iter()
        .filter(|s| s.checked_in_at.with_timezone(&tz).date_naive() == date)
        .cloned()
        .collect()
}

/// Visits checked in within `[start, end]`, both ends inclusive.
///
/// A range with `start > end` matches nothing.
///
/// # Errors
///
/// Returns [`CoreError::Validation`] when either bound is missing.
pub fn by_date_range(
    sessions: &[VisitSession],
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> Result<Vec<VisitSession>, CoreError> {
    let (Some(start), Some(end)) = (start, end) else {
        return Err(CoreError::validation("both start and end dates are required"));
    };
    Ok(sessions
        .iter()
        .filter(|s| s.checked_in_at >= start && s.checked_in_at <= end)
        .cloned()
        .collect())
}

/// Case-insensitive substring match on visitor name, visitor phone, or the
/// visited member's name. An empty term matches everything.
#[must_use]
pub fn by_search_term(sessions: &[VisitSession], term: &str) -> Vec<VisitSession> {
    let needle = term.to_lowercase();
    sessions
        .iter()
        .filter(|s| {
            s.name.to_lowercase().contains(&needle)
                || s.phone.to_lowercase().contains(&needle)
                || s
                    .member_name
                    .as_deref()
                    .is_some_and(|m| m.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

/// Visits that have not been checked out.
#[must_use]
pub fn open_visits(sessions: &[VisitSession]) -> Vec<VisitSession> {
    sessions.iter().filter(|s| s.is_open()).cloned().collect()
}
