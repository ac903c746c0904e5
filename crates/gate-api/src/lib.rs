//! # gate-api
//!
//! Typed access to the society directory: members, security staff, visitors,
//! dashboard stats, and sign-in.
//!
//! [`DirectoryStore`] is the seam. [`ApiClient`] talks to the REST API over
//! reqwest; [`memory::InMemoryDirectory`] keeps everything in process and
//! backs `--mock` runs and tests. Every call takes the caller's
//! [`SessionContext`] explicitly, and a rejected credential clears it.

mod auth;
mod client;
mod error;
mod http;
pub mod memory;
mod members;
mod staff;
mod stats;
mod visitors;

pub use client::ApiClient;
pub use error::{ApiError, ApiResult, DEFAULT_MESSAGE, NETWORK_MESSAGE};
pub use memory::InMemoryDirectory;

use async_trait::async_trait;
use gate_core::entities::{
    CheckInRequest, Member, MemberFields, SecurityStaff, StaffFields, User, VisitSession,
};
use gate_core::responses::{AuthResponse, CheckOutReceipt, Stats};
use gate_core::session::SessionContext;

/// Everything the desk and the CLI can ask of the directory.
#[async_trait]
pub trait DirectoryStore: Send + Sync {
    async fn login(
        &self,
        ctx: &mut SessionContext,
        email: &str,
        password: &str,
    ) -> ApiResult<AuthResponse>;
    async fn me(&self, ctx: &mut SessionContext) -> ApiResult<User>;

    async fn list_members(&self, ctx: &mut SessionContext) -> ApiResult<Vec<Member>>;
    async fn create_member(
        &self,
        ctx: &mut SessionContext,
        fields: &MemberFields,
    ) -> ApiResult<Member>;
    async fn update_member(
        &self,
        ctx: &mut SessionContext,
        id: i64,
        fields: &MemberFields,
    ) -> ApiResult<Member>;
    async fn delete_member(&self, ctx: &mut SessionContext, id: i64) -> ApiResult<()>;

    async fn list_staff(&self, ctx: &mut SessionContext) -> ApiResult<Vec<SecurityStaff>>;
    async fn create_staff(
        &self,
        ctx: &mut SessionContext,
        fields: &StaffFields,
    ) -> ApiResult<SecurityStaff>;
    async fn update_staff(
        &self,
        ctx: &mut SessionContext,
        id: i64,
        fields: &StaffFields,
    ) -> ApiResult<SecurityStaff>;
    async fn delete_staff(&self, ctx: &mut SessionContext, id: i64) -> ApiResult<()>;

    async fn list_visitors(&self, ctx: &mut SessionContext) -> ApiResult<Vec<VisitSession>>;
    async fn today_visitors(&self, ctx: &mut SessionContext) -> ApiResult<Vec<VisitSession>>;
    async fn my_visitors(&self, ctx: &mut SessionContext) -> ApiResult<Vec<VisitSession>>;
    async fn check_in(
        &self,
        ctx: &mut SessionContext,
        request: &CheckInRequest,
    ) -> ApiResult<VisitSession>;
    async fn check_out(&self, ctx: &mut SessionContext, id: i64) -> ApiResult<CheckOutReceipt>;
    async fn delete_visitor(&self, ctx: &mut SessionContext, id: i64) -> ApiResult<()>;

    async fn stats(&self, ctx: &mut SessionContext) -> ApiResult<Stats>;

    fn backend_name(&self) -> &'static str;
}

#[async_trait]
impl DirectoryStore for ApiClient {
    async fn login(
        &self,
        ctx: &mut SessionContext,
        email: &str,
        password: &str,
    ) -> ApiResult<AuthResponse> {
        Self::login(self, ctx, email, password).await
    }

    async fn me(&self, ctx: &mut SessionContext) -> ApiResult<User> {
        Self::me(self, ctx).await
    }

    async fn list_members(&self, ctx: &mut SessionContext) -> ApiResult<Vec<Member>> {
        Self::list_members(self, ctx).await
    }

    async fn create_member(
        &self,
        ctx: &mut SessionContext,
        fields: &MemberFields,
    ) -> ApiResult<Member> {
        Self::create_member(self, ctx, fields).await
    }

    async fn update_member(
        &self,
        ctx: &mut SessionContext,
        id: i64,
        fields: &MemberFields,
    ) -> ApiResult<Member> {
        Self::update_member(self, ctx, id, fields).await
    }

    async fn delete_member(&self, ctx: &mut SessionContext, id: i64) -> ApiResult<()> {
        Self::delete_member(self, ctx, id).await
    }

    async fn list_staff(&self, ctx: &mut SessionContext) -> ApiResult<Vec<SecurityStaff>> {
        Self::list_staff(self, ctx).await
    }

    async fn create_staff(
        &self,
        ctx: &mut SessionContext,
        fields: &StaffFields,
    ) -> ApiResult<SecurityStaff> {
        Self::create_staff(self, ctx, fields).await
    }

    async fn update_staff(
        &self,
        ctx: &mut SessionContext,
        id: i64,
        fields: &StaffFields,
    ) -> ApiResult<SecurityStaff> {
        Self::update_staff(self, ctx, id, fields).await
    }

    async fn delete_staff(&self, ctx: &mut SessionContext, id: i64) -> ApiResult<()> {
        Self::delete_staff(self, ctx, id).await
    }

    async fn list_visitors(&self, ctx: &mut SessionContext) -> ApiResult<Vec<VisitSession>> {
        Self::list_visitors(self, ctx).await
    }

    async fn today_visitors(&self, ctx: &mut SessionContext) -> ApiResult<Vec<VisitSession>> {
        Self::today_visitors(self, ctx).await
    }

    async fn my_visitors(&self, ctx: &mut SessionContext) -> ApiResult<Vec<VisitSession>> {
        Self::my_visitors(self, ctx).await
    }

    async fn check_in(
        &self,
        ctx: &mut SessionContext,
        request: &CheckInRequest,
    ) -> ApiResult<VisitSession> {
        Self::check_in(self, ctx, request).await
    }

    async fn check_out(&self, ctx: &mut SessionContext, id: i64) -> ApiResult<CheckOutReceipt> {
        Self::check_out(self, ctx, id).await
    }

    async fn delete_visitor(&self, ctx: &mut SessionContext, id: i64) -> ApiResult<()> {
        Self::delete_visitor(self, ctx, id).await
    }

    async fn stats(&self, ctx: &mut SessionContext) -> ApiResult<Stats> {
        Self::stats(self, ctx).await
    }

    fn backend_name(&self) -> &'static str {
        "rest"
    }
}
