//! Check-in and check-out rules for a single visit.
//!
//! ```text
//! check_in ──▶ open ──check_out──▶ closed
//! ```
//!
//! These functions do no I/O. Stores call them to build or close a record;
//! the desk calls [`ensure_open`] before asking a remote store to close one.

use chrono::{DateTime, Utc};

use crate::entities::{CheckInRequest, Member, VisitSession};
use crate::enums::{VisitPurpose, VisitState};
use crate::errors::CoreError;
use crate::validation::validate_check_in;

const VISITOR: &str = "Visitor";

/// Build a new open visit from a validated request.
///
/// `member` is the resolved record for `request.member_id`; a request that
/// references an unknown member fails with `NotFound`.
///
/// # Errors
///
/// Returns [`CoreError::Validation`] when a required field or the selfie is
/// missing, and [`CoreError::NotFound`] when the member does not resolve.
pub fn check_in(
    id: i64,
    request: &CheckInRequest,
    member: Option<&Member>,
    now: DateTime<Utc>,
) -> Result<VisitSession, CoreError> {
    validate_check_in(request)?;
    let member_id = request
        .member_id
        .ok_or_else(|| CoreError::validation("member is required"))?;
    let member = member
        .filter(|m| m.id == member_id)
        .ok_or_else(|| CoreError::not_found("Member", member_id))?;

    Ok(VisitSession {
        id,
        name: request.name.trim().to_string(),
        phone: request.phone.trim().to_string(),
        vehicle: request
            .vehicle
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string),
        purpose: VisitPurpose::from(request.purpose.trim()),
        member_id: Some(member.id),
        member_name: Some(member.name.clone()),
        selfie_url: request.selfie_url.clone(),
        checked_in_at: now,
        checked_out_at: None,
    })
}

/// Close an open visit.
///
/// The check-out time is `now`, clamped so it never precedes check-in.
///
/// # Errors
///
/// Returns [`CoreError::NotFound`] when the visit is already closed. A closed
/// visit is never modified.
pub fn check_out(session: &VisitSession, now: DateTime<Utc>) -> Result<VisitSession, CoreError> {
    if !session.state().can_transition_to(VisitState::Closed) {
        return Err(CoreError::not_found(VISITOR, session.id));
    }
    Ok(VisitSession {
        checked_out_at: Some(now.max(session.checked_in_at)),
        ..session.clone()
    })
}

/// Resolve `id` to an open visit in `sessions`.
///
/// # Errors
///
/// Returns [`CoreError::NotFound`] when no visit has that id or the visit is
/// already closed.
pub fn ensure_open(sessions: &[VisitSession], id: i64) -> Result<&VisitSession, CoreError> {
    sessions
        .iter()
        .find(|s| s.id == id && s.is_open())
        .ok_or_else(|| CoreError::not_found(VISITOR, id))
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    use super::*;

    fn asha() -> Member {
        Member {
            id: 1,
            name: "Asha".into(),
            email: "a@x.com".into(),
            phone: "+911234567890".into(),
            apartment: "203".into(),
        }
    }

    fn request() -> CheckInRequest {
        CheckInRequest {
            name: " Ravi ".into(),
            phone: "+919999999999".into(),
            vehicle: Some("  ".into()),
            purpose: "Guest".into(),
            member_id: Some(1),
            selfie_url: Some("https://img/host/1.jpg".into()),
        }
    }

    #[test]
    fn check_in_opens_a_visit() {
        let now = Utc::now();
        let visit = check_in(10, &request(), Some(&asha()), now).unwrap();
        assert_eq!(visit.name, "Ravi");
        assert_eq!(visit.vehicle, None);
        assert_eq!(visit.member_name.as_deref(), Some("Asha"));
        assert_eq!(visit.checked_in_at, now);
        assert!(visit.is_open());
    }

    #[test]
    fn check_in_with_unknown_member_is_not_found() {
        let err = check_in(10, &request(), None, Utc::now()).unwrap_err();
        assert!(matches!(err, CoreError::NotFound { .. }));
    }

    #[test]
    fn check_in_with_mismatched_member_is_not_found() {
        let other = Member { id: 2, ..asha() };
        let err = check_in(10, &request(), Some(&other), Utc::now()).unwrap_err();
        assert!(matches!(err, CoreError::NotFound { .. }));
    }

    #[test]
    fn check_out_closes_once() {
        let opened = check_in(1, &request(), Some(&asha()), Utc::now()).unwrap();
        let closed = check_out(&opened, Utc::now()).unwrap();
        assert!(!closed.is_open());

        let err = check_out(&closed, Utc::now() + Duration::hours(1)).unwrap_err();
        assert!(matches!(err, CoreError::NotFound { .. }));
    }

    #[test]
    fn check_out_never_precedes_check_in() {
        let now = Utc::now();
        let opened = check_in(1, &request(), Some(&asha()), now).unwrap();
        let closed = check_out(&opened, now - Duration::minutes(5)).unwrap();
        assert_eq!(closed.checked_out_at, Some(now));
    }

    #[test]
    fn ensure_open_skips_closed_visits() {
        let opened = check_in(1, &request(), Some(&asha()), Utc::now()).unwrap();
        let closed = check_out(&check_in(2, &request(), Some(&asha()), Utc::now()).unwrap(), Utc::now())
            .unwrap();
        let sessions = vec![opened, closed];

        assert_eq!(ensure_open(&sessions, 1).unwrap().id, 1);
        assert!(ensure_open(&sessions, 2).is_err());
        assert!(ensure_open(&sessions, 99).is_err());
    }
}
