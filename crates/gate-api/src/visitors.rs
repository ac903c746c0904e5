//! Visitor routes: listings, multipart check-in, check-out, delete.

use chrono::Utc;
use gate_core::entities::{CheckInRequest, VisitSession};
use gate_core::enums::VisitPurpose;
use gate_core::responses::CheckOutReceipt;
use gate_core::session::SessionContext;
use gate_core::validation::validate_check_in;
use reqwest::multipart::Form;

use crate::ApiClient;
use crate::error::ApiResult;
use crate::http::{decode, record_or};

/// Multipart body for `POST /visitors`.
///
/// `selfie` carries the uploaded image URL, never bytes.
pub(crate) fn check_in_form(request: &CheckInRequest) -> Form {
    Form::new()
        .text("name", request.name.trim().to_string())
        .text("phone", request.phone.trim().to_string())
        .text("vehicle", request.vehicle.clone().unwrap_or_default())
        .text("purpose", request.purpose.trim().to_string())
        .text(
            "member_id",
            request.member_id.map(|id| id.to_string()).unwrap_or_default(),
        )
        .text("selfie", request.selfie_url.clone().unwrap_or_default())
}

/// Local view of a visit the server only acknowledged by id.
fn echoed_visit(id: i64, request: &CheckInRequest) -> VisitSession {
    VisitSession {
        id,
        name: request.name.trim().to_string(),
        phone: request.phone.trim().to_string(),
        vehicle: request
            .vehicle
            .clone()
            .filter(|v| !v.trim().is_empty()),
        purpose: VisitPurpose::from(request.purpose.as_str()),
        member_id: request.member_id,
        member_name: None,
        selfie_url: request.selfie_url.clone(),
        checked_in_at: Utc::now(),
        checked_out_at: None,
    }
}

impl ApiClient {
    /// Every visit (admin).
    pub async fn list_visitors(&self, ctx: &mut SessionContext) -> ApiResult<Vec<VisitSession>> {
        decode(self.get(ctx, "/admin/visitors").await?)
    }

    pub async fn today_visitors(&self, ctx: &mut SessionContext) -> ApiResult<Vec<VisitSession>> {
        decode(self.get(ctx, "/visitors/today").await?)
    }

    /// Visits to the signed-in member.
    pub async fn my_visitors(&self, ctx: &mut SessionContext) -> ApiResult<Vec<VisitSession>> {
        decode(self.get(ctx, "/visitors/my-visitors").await?)
    }

    /// Register a visitor. The selfie must already be uploaded.
    ///
    /// # Errors
    ///
    /// [`crate::ApiError::Validation`] before any request is made when a
    /// required field or the selfie URL is missing.
    pub async fn check_in(
        &self,
        ctx: &mut SessionContext,
        request: &CheckInRequest,
    ) -> ApiResult<VisitSession> {
        validate_check_in(request)?;
        let value = self
            .post_form(ctx, "/visitors", check_in_form(request))
            .await?;
        let visit = record_or(value, |id| echoed_visit(id, request))?;
        tracing::info!(id = visit.id, "visitor checked in");
        Ok(visit)
    }

    pub async fn check_out(&self, ctx: &mut SessionContext, id: i64) -> ApiResult<CheckOutReceipt> {
        let value = self
            .post_empty(ctx, &format!("/visitors/{id}/checkout"))
            .await?;
        let receipt = decode::<CheckOutReceipt>(value).unwrap_or(CheckOutReceipt {
            id,
            checked_out_at: None,
        });
        tracing::info!(id, "visitor checked out");
        Ok(receipt)
    }

    pub async fn delete_visitor(&self, ctx: &mut SessionContext, id: i64) -> ApiResult<()> {
        self.delete(ctx, &format!("/visitors/{id}")).await?;
        tracing::info!(id, "visitor deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CheckInRequest {
        CheckInRequest {
            name: "Ravi".into(),
            phone: "+919999999999".into(),
            vehicle: Some(" ".into()),
            purpose: "Food Delivery".into(),
            member_id: Some(1),
            selfie_url: Some("https://img/host/1.jpg".into()),
        }
    }

    #[test]
    fn echoed_visit_is_open_and_keeps_the_selfie() {
        let visit = echoed_visit(12, &request());
        assert_eq!(visit.id, 12);
        assert!(visit.is_open());
        assert_eq!(visit.vehicle, None);
        assert_eq!(visit.purpose, VisitPurpose::FoodDelivery);
        assert_eq!(visit.selfie_url.as_deref(), Some("https://img/host/1.jpg"));
    }

    #[tokio::test]
    async fn check_in_without_selfie_never_sends() {
        // Unroutable base URL: reaching the network would fail with Network.
        let client = ApiClient::new(&gate_config::ApiConfig {
            base_url: "http://127.0.0.1:9".into(),
            timeout_secs: 1,
            use_mock: false,
        })
        .unwrap();
        let mut ctx = SessionContext::with_token("tok");
        let err = client
            .check_in(
                &mut ctx,
                &CheckInRequest {
                    selfie_url: None,
                    ..request()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, crate::ApiError::Validation(ref m) if m == "selfie is required"));
    }
}
