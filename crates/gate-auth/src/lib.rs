//! # gate-auth
//!
//! Persists the directory API's bearer token between CLI runs and turns a
//! stored token into a [`SessionContext`]. The login exchange itself lives in
//! `gate-api`; this crate only keeps and forgets credentials.

pub mod error;
pub mod token_store;

pub use error::AuthError;
pub use token_store::{CredentialStore, TokenSource};

use gate_core::session::SessionContext;

/// Build the caller's session from a store. The user is filled in later by
/// `auth/me` or a login.
#[must_use]
pub fn restore_session(store: &CredentialStore) -> SessionContext {
    store
        .load()
        .map_or_else(SessionContext::anonymous, SessionContext::with_token)
}

/// Persist a freshly issued token.
///
/// # Errors
///
/// Returns `AuthError::TokenStoreError` if neither keyring nor file accepts it.
pub fn remember(store: &CredentialStore, token: &str) -> Result<(), AuthError> {
    store.store(token)?;
    tracing::debug!("stored api token");
    Ok(())
}

/// Clear stored credentials and the in-memory session.
///
/// Used by `auth logout` and whenever the API answers 401.
///
/// # Errors
///
/// Returns `AuthError::TokenStoreError` if the credentials file cannot be removed.
pub fn logout(store: &CredentialStore, session: &mut SessionContext) -> Result<(), AuthError> {
    session.invalidate();
    store.delete()
}
