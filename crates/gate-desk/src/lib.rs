//! # gate-desk
//!
//! The workflows a gate operator or admin runs, built on the
//! [`DirectoryStore`], [`ImageHost`], and [`Notifier`] seams.
//!
//! Every mutation is followed by a fresh read of the affected collection,
//! and the refreshed collection comes back with the result. Deletes ask a
//! [`Confirm`] first.

mod confirm;
mod directory;
mod error;
mod visits;

pub use confirm::{AssumeYes, Confirm};
pub use error::{DeskError, DeskResult};
pub use visits::{AlertStatus, CheckInOutcome, CheckInSubmission, selfie_file_name};

use std::sync::Arc;

use gate_api::DirectoryStore;
use gate_core::entities::User;
use gate_core::enums::Role;
use gate_core::session::SessionContext;
use gate_media::ImageHost;
use gate_notify::Notifier;
use serde::Serialize;

/// A mutated record together with the collection it belongs to, as re-read
/// after the mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Refreshed<R, C = R> {
    pub record: R,
    pub all: Vec<C>,
}

pub struct Desk {
    store: Arc<dyn DirectoryStore>,
    images: Arc<dyn ImageHost>,
    notifier: Option<Arc<dyn Notifier>>,
}

impl Desk {
    #[must_use]
    pub fn new(store: Arc<dyn DirectoryStore>, images: Arc<dyn ImageHost>) -> Self {
        Self {
            store,
            images,
            notifier: None,
        }
    }

    /// Alert members on check-in through `notifier`.
    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    #[must_use]
    pub fn store(&self) -> &dyn DirectoryStore {
        self.store.as_ref()
    }

    /// Sign in and return the user.
    ///
    /// # Errors
    ///
    /// Propagates the store's login failure.
    pub async fn login(
        &self,
        ctx: &mut SessionContext,
        email: &str,
        password: &str,
    ) -> DeskResult<User> {
        let auth = self.store.login(ctx, email, password).await?;
        tracing::info!(email, role = %auth.user.role, "signed in");
        Ok(auth.user)
    }

    /// The caller's role, asking the store when the context does not know it.
    ///
    /// # Errors
    ///
    /// Returns the store error from `me`, typically `Unauthorized`.
    pub async fn role(&self, ctx: &mut SessionContext) -> DeskResult<Role> {
        if let Some(role) = ctx.role() {
            return Ok(role);
        }
        let user = self.store.me(ctx).await?;
        let role = user.role;
        ctx.set_user(user);
        Ok(role)
    }
}
