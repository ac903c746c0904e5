use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

use crate::enums::{VisitPurpose, VisitState};

/// One visitor's stay, from check-in to (optional) check-out.
///
/// Invariant: `checked_out_at`, when set, is never earlier than `checked_in_at`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct VisitSession {
    pub id: i64,
    pub name: String,
    pub phone: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    #[schemars(with = "Option<String>")]
    pub vehicle: Option<String>,
    #[schemars(with = "String")]
    pub purpose: VisitPurpose,
    #[serde(default)]
    pub member_id: Option<i64>,
    #[serde(default)]
    pub member_name: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    #[schemars(with = "Option<String>")]
    pub selfie_url: Option<String>,
    #[serde(
        rename = "checkin_time",
        alias = "check_in_time",
        deserialize_with = "wire_time"
    )]
    #[schemars(with = "DateTime<Utc>")]
    pub checked_in_at: DateTime<Utc>,
    #[serde(
        rename = "checkout_time",
        alias = "check_out_time",
        default,
        deserialize_with = "optional_wire_time"
    )]
    #[schemars(with = "Option<DateTime<Utc>>")]
    pub checked_out_at: Option<DateTime<Utc>>,
}

impl VisitSession {
    #[must_use]
    pub const fn state(&self) -> VisitState {
        if self.checked_out_at.is_some() {
            VisitState::Closed
        } else {
            VisitState::Open
        }
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.checked_out_at.is_none()
    }
}

/// Fields a guard submits to register a visitor.
///
/// `selfie_url` must point at an image that has already been uploaded;
/// the visitor log never carries raw image bytes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CheckInRequest {
    pub name: String,
    pub phone: String,
    pub vehicle: Option<String>,
    pub purpose: String,
    pub member_id: Option<i64>,
    pub selfie_url: Option<String>,
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// Offset-less layouts some backends emit for datetime columns.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// RFC 3339, or a naive `YYYY-MM-DD HH:MM:SS` read as local wall-clock time.
fn parse_wire_time(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(stamped) = DateTime::parse_from_rfc3339(text) {
        return Some(stamped.with_timezone(&Utc));
    }
    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())?;
    // A wall-clock time skipped by a DST jump has no local reading; take it as UTC.
    Some(
        Local
            .from_local_datetime(&naive)
            .earliest()
            .map_or_else(|| naive.and_utc(), |local| local.with_timezone(&Utc)),
    )
}

fn wire_time<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    parse_wire_time(&text)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{text}'")))
}

fn optional_wire_time<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(text) if !text.trim().is_empty() => parse_wire_time(&text)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{text}'"))),
        _ => Ok(None),
    }
}
