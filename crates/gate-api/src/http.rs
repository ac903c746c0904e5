//! Shared response handling for the directory API.
//!
//! Every route answers `{ success, data?, message?, errors? }`. This module
//! turns a raw response into either the payload (`data`, or the whole body
//! when `data` is absent) or an [`ApiError`] keyed by status. A 401 clears
//! the caller's [`SessionContext`] before the error is returned.

use gate_core::responses::ApiEnvelope;
use gate_core::session::SessionContext;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ApiError, ApiResult, DEFAULT_MESSAGE};

/// Read a response body and unwrap its envelope.
pub async fn read_envelope(ctx: &mut SessionContext, resp: reqwest::Response) -> ApiResult<Value> {
    let status = resp.status().as_u16();
    let body = resp.text().await.map_err(ApiError::Network)?;
    interpret(ctx, status, &body)
}

/// Map a status and body to the envelope payload or an error.
pub fn interpret(ctx: &mut SessionContext, status: u16, body: &str) -> ApiResult<Value> {
    let parsed: Option<Value> = if body.trim().is_empty() {
        Some(Value::Null)
    } else {
        serde_json::from_str(body).ok()
    };

    if !(200..300).contains(&status) {
        if status == 401 {
            tracing::warn!("api rejected the credential; clearing session");
            ctx.invalidate();
        }
        let message = failure_message(parsed.as_ref(), body);
        return Err(match status {
            400 | 422 => ApiError::Validation(message),
            401 => ApiError::Unauthorized(message),
            403 => ApiError::Forbidden(message),
            404 => ApiError::NotFound(message),
            _ => ApiError::Api { status, message },
        });
    }

    let value = parsed.ok_or_else(|| ApiError::Parse("response body is not JSON".into()))?;
    Ok(payload(value))
}

/// Deserialize an unwrapped payload.
pub fn decode<T: DeserializeOwned>(value: Value) -> ApiResult<T> {
    serde_json::from_value(value).map_err(|e| ApiError::Parse(e.to_string()))
}

/// Deserialize a created/updated record, or rebuild it from the echoed id
/// when the server only acknowledges the write.
pub fn record_or<T, F>(value: Value, build: F) -> ApiResult<T>
where
    T: DeserializeOwned,
    F: FnOnce(i64) -> T,
{
    let id = value.get("id").and_then(Value::as_i64);
    match serde_json::from_value::<T>(value) {
        Ok(record) => Ok(record),
        Err(error) => id.map(build).ok_or_else(|| ApiError::Parse(error.to_string())),
    }
}

fn payload(value: Value) -> Value {
    match value {
        Value::Object(mut map) => match map.remove("data") {
            Some(data) if !data.is_null() => data,
            Some(data) => {
                map.insert("data".into(), data);
                Value::Object(map)
            }
            None => Value::Object(map),
        },
        other => other,
    }
}

fn failure_message(parsed: Option<&Value>, raw: &str) -> String {
    let envelope = parsed
        .cloned()
        .and_then(|v| serde_json::from_value::<ApiEnvelope<Value>>(v).ok());

    let Some(envelope) = envelope else {
        let raw = raw.trim();
        return if raw.is_empty() || parsed.is_some() {
            DEFAULT_MESSAGE.to_string()
        } else {
            raw.to_string()
        };
    };

    let message = envelope
        .message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_MESSAGE.to_string());

    match envelope.errors {
        Some(errors) if !errors.is_empty() => {
            let details = errors
                .iter()
                .map(|(field, problems)| format!("{field}: {}", problems.join(", ")))
                .collect::<Vec<_>>()
                .join("; ");
            format!("{message} ({details})")
        }
        _ => message,
    }
}

#[cfg(test)]
mod tests {
    use gate_core::entities::User;
    use gate_core::enums::Role;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn signed_in() -> SessionContext {
        SessionContext::authenticated(
            "tok",
            User {
                id: 1,
                name: "Admin User".into(),
                email: "admin@gmail.com".into(),
                role: Role::Admin,
            },
        )
    }

    fn mock_response(status: u16, body: &'static str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(body)
                .unwrap(),
        )
    }

    #[test]
    fn data_key_is_unwrapped() {
        let mut ctx = signed_in();
        let value = interpret(&mut ctx, 200, r#"{"success": true, "data": [1, 2]}"#).unwrap();
        assert_eq!(value, json!([1, 2]));
    }

    #[test]
    fn body_without_data_is_the_payload() {
        let mut ctx = signed_in();
        let value = interpret(&mut ctx, 200, r#"{"token": "t", "user": null}"#).unwrap();
        assert_eq!(value["token"], "t");
    }

    #[test]
    fn failure_without_message_uses_default() {
        let mut ctx = signed_in();
        let err = interpret(&mut ctx, 500, r#"{"success": false}"#).unwrap_err();
        assert!(matches!(err, ApiError::Api { status: 500, ref message } if message == DEFAULT_MESSAGE));
    }

    #[test]
    fn validation_errors_list_fields() {
        let mut ctx = signed_in();
        let err = interpret(
            &mut ctx,
            422,
            r#"{"message": "Invalid data", "errors": {"email": ["is taken"]}}"#,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Invalid data (email: is taken)");
    }

    #[test]
    fn not_found_and_forbidden_map_by_status() {
        let mut ctx = signed_in();
        assert!(matches!(
            interpret(&mut ctx, 404, r#"{"message": "Visitor not found"}"#),
            Err(ApiError::NotFound(_))
        ));
        assert!(matches!(
            interpret(&mut ctx, 403, "{}"),
            Err(ApiError::Forbidden(_))
        ));
        assert!(ctx.has_token());
    }

    #[test]
    fn record_or_rebuilds_from_id() {
        #[derive(serde::Deserialize, Debug, PartialEq)]
        struct Named {
            id: i64,
            name: String,
        }

        let full = record_or(json!({"id": 2, "name": "Asha"}), |id| Named {
            id,
            name: String::new(),
        })
        .unwrap();
        assert_eq!(full.name, "Asha");

        let ack = record_or(json!({"id": 9, "created_at": "now"}), |id| Named {
            id,
            name: "local".into(),
        })
        .unwrap();
        assert_eq!(ack, Named { id: 9, name: "local".into() });

        assert!(record_or(json!({"ok": true}), |id| Named { id, name: String::new() }).is_err());
    }

    #[tokio::test]
    async fn unauthorized_invalidates_the_session() {
        let mut ctx = signed_in();
        let resp = mock_response(401, r#"{"message": "Unauthenticated."}"#);

        let err = read_envelope(&mut ctx, resp).await.unwrap_err();
        assert!(err.requires_login());
        assert_eq!(err.to_string(), "Unauthenticated.");
        assert!(!ctx.has_token());
        assert!(ctx.user().is_none());
    }

    #[tokio::test]
    async fn non_json_failure_surfaces_raw_text() {
        let mut ctx = signed_in();
        let resp = mock_response(502, "Bad Gateway");
        let err = read_envelope(&mut ctx, resp).await.unwrap_err();
        assert!(matches!(err, ApiError::Api { status: 502, ref message } if message == "Bad Gateway"));
    }
}
