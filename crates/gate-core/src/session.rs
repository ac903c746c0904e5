//! Explicit per-caller session state.
//!
//! Every directory call takes a `&mut SessionContext` instead of reading a
//! process-wide "current user". A store that sees an expired credential calls
//! [`SessionContext::invalidate`]; the caller then routes back to login.

use crate::entities::User;
use crate::enums::Role;
use crate::routing;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    token: Option<String>,
    user: Option<User>,
}

impl SessionContext {
    /// A context with no credential.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A context holding a bearer token whose user is not yet known.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            user: None,
        }
    }

    #[must_use]
    pub fn authenticated(token: impl Into<String>, user: User) -> Self {
        Self {
            token: Some(token.into()),
            user: Some(user),
        }
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }

    #[must_use]
    pub const fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn set_user(&mut self, user: User) {
        self.user = Some(user);
    }

    /// Drop the credential and the cached user.
    pub fn invalidate(&mut self) {
        self.token = None;
        self.user = None;
    }

    /// Where this caller should land.
    #[must_use]
    pub fn landing_path(&self) -> &'static str {
        routing::landing_path(self.role())
    }
}
