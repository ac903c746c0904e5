//! Roles, visit states, and visit purposes.
//!
//! `Role` and `VisitState` serialize in lowercase. `VisitPurpose` serializes
//! as its display label so it round-trips through the store's free-text field.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// The three actor kinds that can sign in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Security,
    Member,
    Admin,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Security => "security",
            Self::Member => "member",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "security" => Ok(Self::Security),
            "member" => Ok(Self::Member),
            "admin" => Ok(Self::Admin),
            other => Err(CoreError::validation(format!("unknown role '{other}'"))),
        }
    }
}

// ---------------------------------------------------------------------------
// VisitState
// ---------------------------------------------------------------------------

/// State of a single visit.
///
/// ```text
/// open → closed
/// ```
///
/// `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum VisitState {
    Open,
    Closed,
}

impl VisitState {
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Open => &[Self::Closed],
            Self::Closed => &[],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// VisitPurpose
// ---------------------------------------------------------------------------

/// Why a visitor came in.
///
/// The fixed set mirrors the entry form. Anything else the store returns is
/// kept verbatim in `Custom`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VisitPurpose {
    Guest,
    Visit,
    ParcelDelivery,
    CourierDelivery,
    FoodDelivery,
    GroceryDelivery,
    EcommerceDelivery,
    Pickup,
    Emergency,
    EventFunction,
    Other,
    Custom(String),
}

impl VisitPurpose {
    /// Every purpose offered on the entry form, in form order.
    pub const ALL: [Self; 11] = [
        Self::Guest,
        Self::Visit,
        Self::ParcelDelivery,
        Self::CourierDelivery,
        Self::FoodDelivery,
        Self::GroceryDelivery,
        Self::EcommerceDelivery,
        Self::Pickup,
        Self::Emergency,
        Self::EventFunction,
        Self::Other,
    ];

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Guest => "Guest",
            Self::Visit => "Visit",
            Self::ParcelDelivery => "Parcel Delivery",
            Self::CourierDelivery => "Courier Delivery",
            Self::FoodDelivery => "Food Delivery",
            Self::GroceryDelivery => "Grocery Delivery",
            Self::EcommerceDelivery => "E-commerce Delivery",
            Self::Pickup => "Pickup",
            Self::Emergency => "Emergency",
            Self::EventFunction => "Event/Function",
            Self::Other => "Other",
            Self::Custom(text) => text,
        }
    }

    /// Whether this purpose is one of the form's fixed choices.
    #[must_use]
    pub const fn is_listed(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.label().trim().is_empty()
    }
}

impl From<String> for VisitPurpose {
    fn from(value: String) -> Self {
        Self::ALL
            .into_iter()
            .find(|known| known.label().eq_ignore_ascii_case(value.trim()))
            .unwrap_or(Self::Custom(value))
    }
}

impl From<&str> for VisitPurpose {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<VisitPurpose> for String {
    fn from(value: VisitPurpose) -> Self {
        match value {
            VisitPurpose::Custom(text) => text,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for VisitPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visit_state_open_closes_once() {
        assert!(VisitState::Open.can_transition_to(VisitState::Closed));
        assert!(!VisitState::Closed.can_transition_to(VisitState::Open));
        assert!(VisitState::Closed.allowed_next_states().is_empty());
    }

    #[test]
    fn purpose_parses_form_labels_case_insensitively() {
        assert_eq!(VisitPurpose::from("food delivery"), VisitPurpose::FoodDelivery);
        assert_eq!(
            VisitPurpose::from("E-commerce Delivery"),
            VisitPurpose::EcommerceDelivery
        );
        assert_eq!(VisitPurpose::from("Event/Function"), VisitPurpose::EventFunction);
    }

    #[test]
    fn purpose_keeps_free_text() {
        let purpose = VisitPurpose::from("Plumber");
        assert_eq!(purpose, VisitPurpose::Custom("Plumber".into()));
        assert!(!purpose.is_listed());
        assert_eq!(String::from(purpose), "Plumber");
    }

    #[test]
    fn purpose_serializes_as_label() {
        let json = serde_json::to_string(&VisitPurpose::ParcelDelivery).unwrap();
        assert_eq!(json, "\"Parcel Delivery\"");
        let back: VisitPurpose = serde_json::from_str(&json).unwrap();
        assert_eq!(back, VisitPurpose::ParcelDelivery);
    }

    #[test]
    fn role_parses_and_displays() {
        assert_eq!("Admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!(Role::Security.to_string(), "security");
        assert!("janitor".parse::<Role>().is_err());
    }
}
