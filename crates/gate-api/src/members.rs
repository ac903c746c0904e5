//! Member routes: `GET /members`, `/admin/members[/:id]`.

use gate_core::entities::{Member, MemberFields};
use gate_core::session::SessionContext;
use gate_core::validation::validate_member;

use crate::ApiClient;
use crate::error::ApiResult;
use crate::http::{decode, record_or};

impl ApiClient {
    pub async fn list_members(&self, ctx: &mut SessionContext) -> ApiResult<Vec<Member>> {
        decode(self.get(ctx, "/members").await?)
    }

    pub async fn create_member(
        &self,
        ctx: &mut SessionContext,
        fields: &MemberFields,
    ) -> ApiResult<Member> {
        validate_member(fields)?;
        let value = self.post_json(ctx, "/admin/members", fields).await?;
        let member = record_or(value, |id| fields.clone().into_member(id))?;
        tracing::info!(id = member.id, "member created");
        Ok(member)
    }

    pub async fn update_member(
        &self,
        ctx: &mut SessionContext,
        id: i64,
        fields: &MemberFields,
    ) -> ApiResult<Member> {
        validate_member(fields)?;
        let value = self
            .put_json(ctx, &format!("/admin/members/{id}"), fields)
            .await?;
        let member = record_or(value, |_| fields.clone().into_member(id))?;
        tracing::info!(id, "member updated");
        Ok(member)
    }

    pub async fn delete_member(&self, ctx: &mut SessionContext, id: i64) -> ApiResult<()> {
        self.delete(ctx, &format!("/admin/members/{id}")).await?;
        tracing::info!(id, "member deleted");
        Ok(())
    }
}
