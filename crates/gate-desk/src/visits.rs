//! Visitor check-in, check-out, and deletion.

use chrono::{DateTime, Utc};
use gate_core::entities::{CheckInRequest, VisitSession};
use gate_core::enums::Role;
use gate_core::errors::CoreError;
use gate_core::lifecycle;
use gate_core::session::SessionContext;
use gate_core::validation::validate_visitor_fields;
use gate_media::SelfieCapture;
use gate_notify::VisitAlert;
use serde::Serialize;

use crate::{Confirm, Desk, DeskError, DeskResult, Refreshed};

/// A check-in as the operator filled it in.
///
/// After the selfie is uploaded, `fields.selfie_url` holds the hosted URL
/// and `selfie` is cleared, so submitting the same value again after a
/// store failure does not upload a second copy.
#[derive(Debug, Clone, Default)]
pub struct CheckInSubmission {
    pub fields: CheckInRequest,
    pub selfie: Option<SelfieCapture>,
}

impl CheckInSubmission {
    #[must_use]
    pub const fn new(fields: CheckInRequest, selfie: Option<SelfieCapture>) -> Self {
        Self { fields, selfie }
    }

    fn uploaded_url(&self) -> Option<&str> {
        self.fields
            .selfie_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
    }

    fn has_selfie(&self) -> bool {
        self.uploaded_url().is_some() || self.selfie.as_ref().is_some_and(|s| !s.bytes.is_empty())
    }
}

/// What happened to the member alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum AlertStatus {
    Sent,
    Skipped(&'static str),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckInOutcome {
    pub visit: VisitSession,
    pub alert: AlertStatus,
    pub visitors: Vec<VisitSession>,
}

/// Upload name for a selfie taken at `now`.
#[must_use]
pub fn selfie_file_name(now: DateTime<Utc>) -> String {
    format!("visitor-{}.jpg", now.timestamp_millis())
}

impl Desk {
    /// The visitor collection the caller's role sees: everything for admins,
    /// today's log for security, and their own visitors for members.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn visitors(&self, ctx: &mut SessionContext) -> DeskResult<Vec<VisitSession>> {
        let visitors = match self.role(ctx).await? {
            Role::Admin => self.store.list_visitors(ctx).await?,
            Role::Security => self.store.today_visitors(ctx).await?,
            Role::Member => self.store.my_visitors(ctx).await?,
        };
        Ok(visitors)
    }

    /// Register a visitor: validate, upload the selfie, create the record,
    /// then alert the member.
    ///
    /// Nothing touches the network until the fields and the selfie pass
    /// validation. No record is created unless the upload succeeds. A failed
    /// alert is reported in the outcome and never fails the check-in.
    ///
    /// # Errors
    ///
    /// Returns [`DeskError::Core`] for invalid input, [`DeskError::Media`]
    /// when the upload fails, and [`DeskError::Api`] when the store rejects
    /// the record.
    pub async fn check_in(
        &self,
        ctx: &mut SessionContext,
        submission: &mut CheckInSubmission,
    ) -> DeskResult<CheckInOutcome> {
        if !submission.has_selfie() {
            return Err(CoreError::validation("selfie is required").into());
        }
        validate_visitor_fields(&submission.fields)?;

        if submission.uploaded_url().is_none()
            && let Some(selfie) = &submission.selfie
        {
            let file_name = selfie_file_name(Utc::now());
            let uploaded = self.images.upload(selfie.bytes.clone(), &file_name).await?;
            tracing::debug!(file_id = %uploaded.file_id, "selfie stored");
            submission.fields.selfie_url = Some(uploaded.url);
            submission.selfie = None;
        }

        let visit = self.store.check_in(ctx, &submission.fields).await?;
        tracing::info!(id = visit.id, name = %visit.name, "visitor checked in");

        let alert = self.alert_member(ctx, &visit).await;
        let visitors = self.visitors(ctx).await?;
        Ok(CheckInOutcome {
            visit,
            alert,
            visitors,
        })
    }

    /// Close an open visit.
    ///
    /// The visit is resolved against a fresh read of the caller's collection
    /// first; a closed or unknown id fails there without calling the store.
    ///
    /// # Errors
    ///
    /// Returns [`DeskError::Core`] with `NotFound` when the visit is missing
    /// or already closed, or the store's error.
    pub async fn check_out(
        &self,
        ctx: &mut SessionContext,
        id: i64,
    ) -> DeskResult<Refreshed<VisitSession>> {
        let current = self.visitors(ctx).await?;
        let open = lifecycle::ensure_open(&current, id)?.clone();

        let receipt = self.store.check_out(ctx, id).await?;
        let all = self.visitors(ctx).await?;
        let record = match all.iter().find(|s| s.id == id) {
            Some(s) if !s.is_open() => s.clone(),
            _ => lifecycle::check_out(&open, receipt.checked_out_at.unwrap_or_else(Utc::now))?,
        };
        tracing::info!(id, "visitor checked out");
        Ok(Refreshed { record, all })
    }

    /// Delete a visitor record after confirmation.
    ///
    /// # Errors
    ///
    /// Returns [`DeskError::Cancelled`] if the operator declines.
    pub async fn delete_visitor(
        &self,
        ctx: &mut SessionContext,
        id: i64,
        confirm: &dyn Confirm,
    ) -> DeskResult<Vec<VisitSession>> {
        if !confirm.confirm(&format!("Delete visitor {id}?")) {
            return Err(DeskError::Cancelled);
        }
        self.store.delete_visitor(ctx, id).await?;
        tracing::info!(id, "visitor deleted");
        self.visitors(ctx).await
    }

    async fn alert_member(&self, ctx: &mut SessionContext, visit: &VisitSession) -> AlertStatus {
        let Some(notifier) = self.notifier.as_deref().filter(|n| n.is_configured()) else {
            return AlertStatus::Skipped("notifier not configured");
        };
        let Some(member_id) = visit.member_id else {
            return AlertStatus::Skipped("visit has no member");
        };
        let member = match self.store.list_members(ctx).await {
            Ok(members) => members.into_iter().find(|m| m.id == member_id),
            Err(error) => {
                tracing::warn!(%error, member_id, "could not look up member for alert");
                return AlertStatus::Failed(error.to_string());
            }
        };
        let Some(member) = member.filter(|m| !m.phone.trim().is_empty()) else {
            return AlertStatus::Skipped("member has no phone");
        };

        let alert = VisitAlert {
            phone: member.phone,
            name: visit.name.clone(),
            purpose: visit.purpose.label().to_string(),
            house: member.apartment,
        };
        match notifier.notify(&alert).await {
            Ok(_) => AlertStatus::Sent,
            Err(error) => {
                tracing::warn!(%error, member_id, "visitor alert failed");
                AlertStatus::Failed(error.to_string())
            }
        }
    }
}
