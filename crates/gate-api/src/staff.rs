//! Security staff routes under `/admin/security-staff`.

use gate_core::entities::{SecurityStaff, StaffFields};
use gate_core::session::SessionContext;
use gate_core::validation::validate_staff;

use crate::ApiClient;
use crate::error::ApiResult;
use crate::http::{decode, record_or};

const STAFF_PATH: &str = "/admin/security-staff";

impl ApiClient {
    pub async fn list_staff(&self, ctx: &mut SessionContext) -> ApiResult<Vec<SecurityStaff>> {
        decode(self.get(ctx, STAFF_PATH).await?)
    }

    pub async fn create_staff(
        &self,
        ctx: &mut SessionContext,
        fields: &StaffFields,
    ) -> ApiResult<SecurityStaff> {
        validate_staff(fields)?;
        let value = self.post_json(ctx, STAFF_PATH, fields).await?;
        let staff = record_or(value, |id| fields.clone().into_staff(id))?;
        tracing::info!(id = staff.id, "security staff created");
        Ok(staff)
    }

    pub async fn update_staff(
        &self,
        ctx: &mut SessionContext,
        id: i64,
        fields: &StaffFields,
    ) -> ApiResult<SecurityStaff> {
        validate_staff(fields)?;
        let value = self
            .put_json(ctx, &format!("{STAFF_PATH}/{id}"), fields)
            .await?;
        let staff = record_or(value, |_| fields.clone().into_staff(id))?;
        tracing::info!(id, "security staff updated");
        Ok(staff)
    }

    pub async fn delete_staff(&self, ctx: &mut SessionContext, id: i64) -> ApiResult<()> {
        self.delete(ctx, &format!("{STAFF_PATH}/{id}")).await?;
        tracing::info!(id, "security staff deleted");
        Ok(())
    }
}
