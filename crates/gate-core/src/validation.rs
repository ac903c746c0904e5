//! Presence checks run before any payload leaves the client.
//!
//! These are deliberately shallow: the directory store is the source of truth
//! for uniqueness and format rules. A field counts as present when it has at
//! least one non-whitespace character.

use crate::entities::{CheckInRequest, MemberFields, StaffFields};
use crate::errors::CoreError;

/// Fail with `Validation("<field> is required")` when `value` is blank.
///
/// # Errors
///
/// Returns [`CoreError::Validation`] naming the missing field.
pub fn require(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::validation(format!("{field} is required")));
    }
    Ok(())
}

/// # Errors
///
/// Returns [`CoreError::Validation`] for the first blank field.
pub fn validate_member(fields: &MemberFields) -> Result<(), CoreError> {
    require("name", &fields.name)?;
    require("email", &fields.email)?;
    require("phone", &fields.phone)?;
    require("apartment", &fields.apartment)
}

/// # Errors
///
/// Returns [`CoreError::Validation`] for the first blank field.
pub fn validate_staff(fields: &StaffFields) -> Result<(), CoreError> {
    require("name", &fields.name)?;
    require("email", &fields.email)?;
    require("phone", &fields.phone)?;
    require("shift", &fields.shift)
}

/// Check a check-in submission. The selfie reference is checked first, since
/// the entry form refuses to submit without a captured photo.
///
/// # Errors
///
/// Returns [`CoreError::Validation`] for a missing selfie, a blank field, or
/// an absent member reference.
pub fn validate_check_in(request: &CheckInRequest) -> Result<(), CoreError> {
    if request
        .selfie_url
        .as_deref()
        .is_none_or(|url| url.trim().is_empty())
    {
        return Err(CoreError::validation("selfie is required"));
    }
    validate_visitor_fields(request)
}

/// The text fields and member reference of a check-in, without the selfie.
///
/// # Errors
///
/// Returns [`CoreError::Validation`] for a blank field or an absent member.
pub fn validate_visitor_fields(request: &CheckInRequest) -> Result<(), CoreError> {
    require("name", &request.name)?;
    require("phone", &request.phone)?;
    require("purpose", &request.purpose)?;
    if request.member_id.is_none() {
        return Err(CoreError::validation("member is required"));
    }
    Ok(())
}
