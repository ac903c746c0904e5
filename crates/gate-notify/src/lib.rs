//! # gate-notify
//!
//! Tells a member that a visitor has arrived for them.
//!
//! Alerts are best-effort: the check-in that triggers one is already stored,
//! so callers log a [`NotifyError`] and move on.

mod error;
pub mod whatsapp;

pub use error::NotifyError;
pub use whatsapp::WhatsAppNotifier;

use async_trait::async_trait;
use serde::Serialize;

/// One "your visitor is at the gate" message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisitAlert {
    /// Member's phone number.
    pub phone: String,
    /// Visitor's name.
    pub name: String,
    pub purpose: String,
    /// House the visitor is headed to.
    pub house: String,
}

/// Delivery receipt from the messaging provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Delivery {
    pub message_id: Option<String>,
}

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Whether alerts can be sent at all.
    fn is_configured(&self) -> bool;

    async fn notify(&self, alert: &VisitAlert) -> Result<Delivery, NotifyError>;
}
