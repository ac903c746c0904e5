//! Member and security staff maintenance.

use gate_core::entities::{Member, MemberFields, SecurityStaff, StaffFields};
use gate_core::session::SessionContext;
use gate_core::validation::{validate_member, validate_staff};

use crate::{Confirm, Desk, DeskError, DeskResult, Refreshed};

impl Desk {
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn members(&self, ctx: &mut SessionContext) -> DeskResult<Vec<Member>> {
        Ok(self.store.list_members(ctx).await?)
    }

    /// # Errors
    ///
    /// Returns [`DeskError::Core`] for a blank field, otherwise the store's error.
    pub async fn create_member(
        &self,
        ctx: &mut SessionContext,
        fields: &MemberFields,
    ) -> DeskResult<Refreshed<Member>> {
        validate_member(fields)?;
        let record = self.store.create_member(ctx, fields).await?;
        tracing::info!(id = record.id, email = %record.email, "member created");
        let all = self.members(ctx).await?;
        Ok(Refreshed { record, all })
    }

    /// # Errors
    ///
    /// Returns [`DeskError::Core`] for a blank field, otherwise the store's error.
    pub async fn update_member(
        &self,
        ctx: &mut SessionContext,
        id: i64,
        fields: &MemberFields,
    ) -> DeskResult<Refreshed<Member>> {
        validate_member(fields)?;
        let record = self.store.update_member(ctx, id, fields).await?;
        tracing::info!(id, "member updated");
        let all = self.members(ctx).await?;
        Ok(Refreshed { record, all })
    }

    /// Delete a member after confirmation. Their visit history is kept.
    ///
    /// # Errors
    ///
    /// Returns [`DeskError::Cancelled`] if the operator declines.
    pub async fn delete_member(
        &self,
        ctx: &mut SessionContext,
        id: i64,
        confirm: &dyn Confirm,
    ) -> DeskResult<Vec<Member>> {
        if !confirm.confirm(&format!("Delete member {id}?")) {
            return Err(DeskError::Cancelled);
        }
        self.store.delete_member(ctx, id).await?;
        tracing::info!(id, "member deleted");
        self.members(ctx).await
    }

    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn staff(&self, ctx: &mut SessionContext) -> DeskResult<Vec<SecurityStaff>> {
        Ok(self.store.list_staff(ctx).await?)
    }

    /// # Errors
    ///
    /// Returns [`DeskError::Core`] for a blank field, otherwise the store's error.
    pub async fn create_staff(
        &self,
        ctx: &mut SessionContext,
        fields: &StaffFields,
    ) -> DeskResult<Refreshed<SecurityStaff>> {
        validate_staff(fields)?;
        let record = self.store.create_staff(ctx, fields).await?;
        tracing::info!(id = record.id, email = %record.email, "staff created");
        let all = self.staff(ctx).await?;
        Ok(Refreshed { record, all })
    }

    /// # Errors
    ///
    /// Returns [`DeskError::Core`] for a blank field, otherwise the store's error.
    pub async fn update_staff(
        &self,
        ctx: &mut SessionContext,
        id: i64,
        fields: &StaffFields,
    ) -> DeskResult<Refreshed<SecurityStaff>> {
        validate_staff(fields)?;
        let record = self.store.update_staff(ctx, id, fields).await?;
        tracing::info!(id, "staff updated");
        let all = self.staff(ctx).await?;
        Ok(Refreshed { record, all })
    }

    /// # Errors
    ///
    /// Returns [`DeskError::Cancelled`] if the operator declines.
    pub async fn delete_staff(
        &self,
        ctx: &mut SessionContext,
        id: i64,
        confirm: &dyn Confirm,
    ) -> DeskResult<Vec<SecurityStaff>> {
        if !confirm.confirm(&format!("Delete security staff {id}?")) {
            return Err(DeskError::Cancelled);
        }
        self.store.delete_staff(ctx, id).await?;
        tracing::info!(id, "staff deleted");
        self.staff(ctx).await
    }
}
