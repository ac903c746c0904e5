//! Wire envelopes and response payloads.
//!
//! [`ApiEnvelope`] is what the directory API sends back. [`Outcome`] is the
//! flattened `{ ok, data | message }` shape handed to callers and printed by
//! the CLI.

use std::collections::BTreeMap;
use std::fmt::Display;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::User;

/// `{ success, data?, message?, errors? }` as returned by every API route.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}

/// Uniform result of a user action: either data or a message to show.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Outcome<T> {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Outcome<T> {
    #[must_use]
    pub const fn success(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            message: None,
        }
    }

    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            message: Some(message.into()),
        }
    }
}

impl<T, E: Display> From<Result<T, E>> for Outcome<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(error) => Self::failure(error.to_string()),
        }
    }
}

/// Body of a successful `/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// Body of `/auth/me`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct MeResponse {
    pub user: User,
}

/// What a store reports after closing a visit.
///
/// Some servers answer with the full visitor record, others with only the id
/// and the new check-out time. Both shapes parse into this.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CheckOutReceipt {
    pub id: i64,
    #[serde(default, rename = "checkout_time", alias = "check_out_time")]
    pub checked_out_at: Option<DateTime<Utc>>,
}

/// Admin dashboard counters from `/admin/stats`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Stats {
    pub total_visitors: u64,
    pub today_visitors: u64,
    pub active_visitors: u64,
    pub total_members: u64,
}
