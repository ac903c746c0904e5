//! In-memory implementation of [`DirectoryStore`].
//!
//! Serves `--mock` runs and tests with the same rules the REST API enforces:
//! - calls without a valid token fail with `Unauthorized` and clear the session
//! - `/admin/*` operations require the admin role (`Forbidden` otherwise)
//! - ids are assigned sequentially per collection
//! - a check-out on a missing or closed visit is `NotFound`
//! - deleting a member leaves that member's visits in place
//!
//! Tokens carry only the caller's email (`mock-token:{email}`), so a session
//! survives across processes even though the data does not. Any non-empty
//! email/password signs in. The role is looked up on every call: seeded
//! accounts first, then the member list, and admin otherwise.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use gate_core::entities::{
    CheckInRequest, Member, MemberFields, SecurityStaff, StaffFields, User, VisitSession,
};
use gate_core::enums::{Role, VisitPurpose};
use gate_core::errors::CoreError;
use gate_core::lifecycle;
use gate_core::projections;
use gate_core::responses::{AuthResponse, CheckOutReceipt, Stats};
use gate_core::session::SessionContext;
use gate_core::validation::{require, validate_member, validate_staff};
use tokio::sync::RwLock;

use crate::DirectoryStore;
use crate::error::{ApiError, ApiResult};

const TOKEN_PREFIX: &str = "mock-token:";
const UNAUTHENTICATED: &str = "Unauthenticated.";
const FORBIDDEN: &str = "This action is unauthorized.";
const EMAIL_TAKEN: &str = "The email has already been taken.";

#[derive(Debug, Clone)]
struct Account {
    id: i64,
    name: String,
    email: String,
    role: Role,
}

#[derive(Debug)]
struct State {
    accounts: Vec<Account>,
    members: Vec<Member>,
    staff: Vec<SecurityStaff>,
    visitors: Vec<VisitSession>,
    next_member_id: i64,
    next_staff_id: i64,
    next_visitor_id: i64,
}

impl State {
    fn empty() -> Self {
        Self {
            accounts: vec![
                Account {
                    id: 1,
                    name: "Admin User".into(),
                    email: "admin@gmail.com".into(),
                    role: Role::Admin,
                },
                Account {
                    id: 2,
                    name: "Security Guard".into(),
                    email: "security@gmail.com".into(),
                    role: Role::Security,
                },
            ],
            members: Vec::new(),
            staff: Vec::new(),
            visitors: Vec::new(),
            next_member_id: 1,
            next_staff_id: 1,
            next_visitor_id: 1,
        }
    }

    /// The signed-in user for `email`, as login and `me` report it.
    fn user_for(&self, email: &str) -> User {
        if let Some(account) = self
            .accounts
            .iter()
            .find(|a| a.email.eq_ignore_ascii_case(email))
        {
            return User {
                id: account.id,
                name: account.name.clone(),
                email: account.email.clone(),
                role: account.role,
            };
        }
        if let Some(member) = self
            .members
            .iter()
            .find(|m| m.email.eq_ignore_ascii_case(email))
        {
            return User {
                id: member.id,
                name: member.name.clone(),
                email: member.email.clone(),
                role: Role::Member,
            };
        }
        User {
            id: 1,
            name: "Test User".into(),
            email: email.to_string(),
            role: Role::Admin,
        }
    }

    fn member(&self, id: i64) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.members
            .iter()
            .any(|m| Some(m.id) != except && m.email.eq_ignore_ascii_case(email.trim()))
    }

    fn staff_email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.staff
            .iter()
            .any(|s| Some(s.id) != except && s.email.eq_ignore_ascii_case(email.trim()))
    }
}

fn issue_token(user: &User) -> String {
    format!("{TOKEN_PREFIX}{}", user.email)
}

fn parse_token(token: &str) -> Option<&str> {
    let email = token.strip_prefix(TOKEN_PREFIX)?.trim();
    (!email.is_empty()).then_some(email)
}

/// Directory held entirely in process memory.
#[derive(Debug, Clone)]
pub struct InMemoryDirectory {
    state: Arc<RwLock<State>>,
}

impl Default for InMemoryDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDirectory {
    /// An empty directory with the two built-in accounts
    /// (`admin@gmail.com`, `security@gmail.com`).
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(State::empty())),
        }
    }

    /// A directory with a few members, staff, and today's visits, for demos.
    #[must_use]
    pub fn seeded() -> Self {
        let mut state = State::empty();
        state.members = vec![
            seed_member(1, "Asha Rao", "asha@society.com", "+911234567890", "203"),
            seed_member(2, "Vikram Shah", "vikram@society.com", "+919812345678", "502"),
            seed_member(3, "Neha Iyer", "neha@society.com", "+919900112233", "701"),
        ];
        state.staff = vec![
            seed_staff(1, "Ramesh Kumar", "ramesh@security.com", "+919000000001", "Morning"),
            seed_staff(2, "Suresh Patil", "suresh@security.com", "+919000000002", "Night"),
        ];

        let now = Utc::now();
        let mut delivered = VisitSession {
            id: 1,
            name: "Imran Khan".into(),
            phone: "+919888877777".into(),
            vehicle: Some("MH-12-AB-1234".into()),
            purpose: VisitPurpose::FoodDelivery,
            member_id: Some(2),
            member_name: Some("Vikram Shah".into()),
            selfie_url: Some("https://ui-avatars.com/api/?name=Imran+Khan".into()),
            checked_in_at: now - Duration::hours(2),
            checked_out_at: None,
        };
        delivered.checked_out_at = Some(delivered.checked_in_at + Duration::minutes(10));
        let guest = VisitSession {
            id: 2,
            name: "Meera Nair".into(),
            phone: "+919777766666".into(),
            vehicle: None,
            purpose: VisitPurpose::Guest,
            member_id: Some(1),
            member_name: Some("Asha Rao".into()),
            selfie_url: Some("https://ui-avatars.com/api/?name=Meera+Nair".into()),
            checked_in_at: now - Duration::minutes(30),
            checked_out_at: None,
        };
        state.visitors = vec![delivered, guest];

        state.next_member_id = 4;
        state.next_staff_id = 3;
        state.next_visitor_id = 3;
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Resolve the caller from `ctx`, clearing it if the token is unusable.
    async fn caller(&self, ctx: &mut SessionContext) -> ApiResult<User> {
        let email = ctx.token().and_then(parse_token).map(str::to_string);
        let Some(email) = email else {
            tracing::warn!("mock directory rejected the credential; clearing session");
            ctx.invalidate();
            return Err(ApiError::Unauthorized(UNAUTHENTICATED.into()));
        };
        let user = self.state.read().await.user_for(&email);
        Ok(user)
    }

    async fn caller_with(&self, ctx: &mut SessionContext, roles: &[Role]) -> ApiResult<User> {
        let user = self.caller(ctx).await?;
        if roles.contains(&user.role) {
            Ok(user)
        } else {
            Err(ApiError::Forbidden(FORBIDDEN.into()))
        }
    }
}

fn seed_member(id: i64, name: &str, email: &str, phone: &str, apartment: &str) -> Member {
    Member {
        id,
        name: name.into(),
        email: email.into(),
        phone: phone.into(),
        apartment: apartment.into(),
    }
}

fn seed_staff(id: i64, name: &str, email: &str, phone: &str, shift: &str) -> SecurityStaff {
    SecurityStaff {
        id,
        name: name.into(),
        email: email.into(),
        phone: phone.into(),
        shift: shift.into(),
    }
}

#[async_trait]
impl DirectoryStore for InMemoryDirectory {
    async fn login(
        &self,
        ctx: &mut SessionContext,
        email: &str,
        password: &str,
    ) -> ApiResult<AuthResponse> {
        require("email", email)?;
        require("password", password)?;

        let user = self.state.read().await.user_for(email.trim());
        let token = issue_token(&user);
        *ctx = SessionContext::authenticated(token.clone(), user.clone());
        tracing::info!(role = %user.role, "signed in to mock directory");
        Ok(AuthResponse { token, user })
    }

    async fn me(&self, ctx: &mut SessionContext) -> ApiResult<User> {
        let user = self.caller(ctx).await?;
        ctx.set_user(user.clone());
        Ok(user)
    }

    async fn list_members(&self, ctx: &mut SessionContext) -> ApiResult<Vec<Member>> {
        self.caller(ctx).await?;
        Ok(self.state.read().await.members.clone())
    }

    async fn create_member(
        &self,
        ctx: &mut SessionContext,
        fields: &MemberFields,
    ) -> ApiResult<Member> {
        self.caller_with(ctx, &[Role::Admin]).await?;
        validate_member(fields)?;

        let mut state = self.state.write().await;
        if state.email_taken(&fields.email, None) {
            return Err(ApiError::Validation(EMAIL_TAKEN.into()));
        }
        let member = fields.clone().into_member(state.next_member_id);
        state.next_member_id += 1;
        state.members.push(member.clone());
        tracing::info!(id = member.id, "member created");
        Ok(member)
    }

    async fn update_member(
        &self,
        ctx: &mut SessionContext,
        id: i64,
        fields: &MemberFields,
    ) -> ApiResult<Member> {
        self.caller_with(ctx, &[Role::Admin]).await?;
        validate_member(fields)?;

        let mut state = self.state.write().await;
        if state.email_taken(&fields.email, Some(id)) {
            return Err(ApiError::Validation(EMAIL_TAKEN.into()));
        }
        let slot = state
            .members
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| CoreError::not_found("Member", id))?;
        *slot = fields.clone().into_member(id);
        Ok(slot.clone())
    }

    async fn delete_member(&self, ctx: &mut SessionContext, id: i64) -> ApiResult<()> {
        self.caller_with(ctx, &[Role::Admin]).await?;
        let mut state = self.state.write().await;
        let before = state.members.len();
        state.members.retain(|m| m.id != id);
        if state.members.len() == before {
            return Err(CoreError::not_found("Member", id).into());
        }
        tracing::info!(id, "member deleted");
        Ok(())
    }

    async fn list_staff(&self, ctx: &mut SessionContext) -> ApiResult<Vec<SecurityStaff>> {
        self.caller_with(ctx, &[Role::Admin]).await?;
        Ok(self.state.read().await.staff.clone())
    }

    async fn create_staff(
        &self,
        ctx: &mut SessionContext,
        fields: &StaffFields,
    ) -> ApiResult<SecurityStaff> {
        self.caller_with(ctx, &[Role::Admin]).await?;
        validate_staff(fields)?;

        let mut state = self.state.write().await;
        if state.staff_email_taken(&fields.email, None) {
            return Err(ApiError::Validation(EMAIL_TAKEN.into()));
        }
        let staff = fields.clone().into_staff(state.next_staff_id);
        state.next_staff_id += 1;
        state.staff.push(staff.clone());
        tracing::info!(id = staff.id, "security staff created");
        Ok(staff)
    }

    async fn update_staff(
        &self,
        ctx: &mut SessionContext,
        id: i64,
        fields: &StaffFields,
    ) -> ApiResult<SecurityStaff> {
        self.caller_with(ctx, &[Role::Admin]).await?;
        validate_staff(fields)?;

        let mut state = self.state.write().await;
        if state.staff_email_taken(&fields.email, Some(id)) {
            return Err(ApiError::Validation(EMAIL_TAKEN.into()));
        }
        let slot = state
            .staff
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| CoreError::not_found("Security staff", id))?;
        *slot = fields.clone().into_staff(id);
        Ok(slot.clone())
    }

    async fn delete_staff(&self, ctx: &mut SessionContext, id: i64) -> ApiResult<()> {
        self.caller_with(ctx, &[Role::Admin]).await?;
        let mut state = self.state.write().await;
        let before = state.staff.len();
        state.staff.retain(|s| s.id != id);
        if state.staff.len() == before {
            return Err(CoreError::not_found("Security staff", id).into());
        }
        tracing::info!(id, "security staff deleted");
        Ok(())
    }

    async fn list_visitors(&self, ctx: &mut SessionContext) -> ApiResult<Vec<VisitSession>> {
        self.caller_with(ctx, &[Role::Admin]).await?;
        Ok(self.state.read().await.visitors.clone())
    }

    async fn today_visitors(&self, ctx: &mut SessionContext) -> ApiResult<Vec<VisitSession>> {
        self.caller(ctx).await?;
        Ok(projections::today(&self.state.read().await.visitors))
    }

    async fn my_visitors(&self, ctx: &mut SessionContext) -> ApiResult<Vec<VisitSession>> {
        let user = self.caller(ctx).await?;
        let state = self.state.read().await;
        let mine: Vec<i64> = state
            .members
            .iter()
            .filter(|m| m.email.eq_ignore_ascii_case(&user.email))
            .map(|m| m.id)
            .collect();
        Ok(state
            .visitors
            .iter()
            .filter(|v| v.member_id.is_some_and(|id| mine.contains(&id)))
            .cloned()
            .collect())
    }

    async fn check_in(
        &self,
        ctx: &mut SessionContext,
        request: &CheckInRequest,
    ) -> ApiResult<VisitSession> {
        self.caller_with(ctx, &[Role::Security, Role::Admin]).await?;

        let mut state = self.state.write().await;
        let member = request.member_id.and_then(|id| state.member(id));
        let visit = lifecycle::check_in(state.next_visitor_id, request, member, Utc::now())?;
        state.next_visitor_id += 1;
        state.visitors.push(visit.clone());
        tracing::info!(id = visit.id, "visitor checked in");
        Ok(visit)
    }

    async fn check_out(&self, ctx: &mut SessionContext, id: i64) -> ApiResult<CheckOutReceipt> {
        self.caller_with(ctx, &[Role::Security, Role::Admin]).await?;

        let mut state = self.state.write().await;
        let slot = state
            .visitors
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or_else(|| CoreError::not_found("Visitor", id))?;
        let closed = lifecycle::check_out(slot, Utc::now())?;
        *slot = closed;
        tracing::info!(id, "visitor checked out");
        Ok(CheckOutReceipt {
            id,
            checked_out_at: slot.checked_out_at,
        })
    }

    async fn delete_visitor(&self, ctx: &mut SessionContext, id: i64) -> ApiResult<()> {
        self.caller_with(ctx, &[Role::Admin]).await?;
        let mut state = self.state.write().await;
        let before = state.visitors.len();
        state.visitors.retain(|v| v.id != id);
        if state.visitors.len() == before {
            return Err(CoreError::not_found("Visitor", id).into());
        }
        tracing::info!(id, "visitor deleted");
        Ok(())
    }

    async fn stats(&self, ctx: &mut SessionContext) -> ApiResult<Stats> {
        self.caller_with(ctx, &[Role::Admin]).await?;
        let state = self.state.read().await;
        let count = |n: usize| u64::try_from(n).unwrap_or(u64::MAX);
        Ok(Stats {
            total_visitors: count(state.visitors.len()),
            today_visitors: count(projections::today(&state.visitors).len()),
            active_visitors: count(projections::open_visits(&state.visitors).len()),
            total_members: count(state.members.len()),
        })
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn tokens_round_trip() {
        let user = User {
            id: 1,
            name: "Admin User".into(),
            email: "admin@gmail.com".into(),
            role: Role::Admin,
        };
        let token = issue_token(&user);
        assert_eq!(token, "mock-token:admin@gmail.com");
        assert_eq!(parse_token(&token), Some("admin@gmail.com"));
        assert_eq!(parse_token("Bearer nonsense"), None);
        assert_eq!(parse_token("mock-token:"), None);
    }

    #[tokio::test]
    async fn role_follows_the_directory_not_the_token() {
        let store = InMemoryDirectory::seeded();
        let mut admin = SessionContext::anonymous();
        store.login(&mut admin, "admin@gmail.com", "Admin@123").await.unwrap();

        let mut newcomer = SessionContext::anonymous();
        let issued = store.login(&mut newcomer, "new@x.com", "pw").await.unwrap();
        assert_eq!(issued.user.role, Role::Admin);

        store
            .create_member(
                &mut admin,
                &MemberFields {
                    name: "Newcomer".into(),
                    email: "new@x.com".into(),
                    phone: "+911111111111".into(),
                    apartment: "101".into(),
                },
            )
            .await
            .unwrap();

        let me = store.me(&mut newcomer).await.unwrap();
        assert_eq!(me.role, Role::Member);
        assert!(matches!(
            store.list_staff(&mut newcomer).await,
            Err(ApiError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn login_infers_role_from_accounts_and_members() {
        let store = InMemoryDirectory::seeded();

        let mut ctx = SessionContext::anonymous();
        let auth = store.login(&mut ctx, "security@gmail.com", "x").await.unwrap();
        assert_eq!(auth.user.role, Role::Security);
        assert_eq!(ctx.landing_path(), "/security/dashboard");

        let auth = store.login(&mut ctx, "ASHA@society.com", "x").await.unwrap();
        assert_eq!(auth.user.role, Role::Member);
        assert_eq!(auth.user.id, 1);

        let auth = store.login(&mut ctx, "someone@else.com", "x").await.unwrap();
        assert_eq!(auth.user.role, Role::Admin);
    }

    #[tokio::test]
    async fn blank_password_is_a_validation_error() {
        let store = InMemoryDirectory::new();
        let mut ctx = SessionContext::anonymous();
        let err = store.login(&mut ctx, "admin@gmail.com", " ").await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert!(!ctx.has_token());
    }

    #[tokio::test]
    async fn bad_token_is_cleared() {
        let store = InMemoryDirectory::seeded();
        let mut ctx = SessionContext::with_token("expired");
        let err = store.list_members(&mut ctx).await.unwrap_err();
        assert!(err.requires_login());
        assert!(!ctx.has_token());
    }

    #[tokio::test]
    async fn security_cannot_reach_admin_routes() {
        let store = InMemoryDirectory::seeded();
        let mut ctx = SessionContext::anonymous();
        store.login(&mut ctx, "security@gmail.com", "pw").await.unwrap();

        assert!(matches!(
            store.list_visitors(&mut ctx).await,
            Err(ApiError::Forbidden(_))
        ));
        assert!(matches!(store.stats(&mut ctx).await, Err(ApiError::Forbidden(_))));
        assert_eq!(store.list_members(&mut ctx).await.unwrap().len(), 3);
        assert!(ctx.has_token());
    }

    #[tokio::test]
    async fn duplicate_member_email_is_rejected() {
        let store = InMemoryDirectory::seeded();
        let mut ctx = SessionContext::anonymous();
        store.login(&mut ctx, "admin@gmail.com", "pw").await.unwrap();

        let fields = MemberFields {
            name: "Another Asha".into(),
            email: "asha@society.com".into(),
            phone: "+910000000000".into(),
            apartment: "101".into(),
        };
        let err = store.create_member(&mut ctx, &fields).await.unwrap_err();
        assert_eq!(err.to_string(), EMAIL_TAKEN);
    }

    #[tokio::test]
    async fn stats_count_the_seed() {
        let store = InMemoryDirectory::seeded();
        let mut ctx = SessionContext::anonymous();
        store.login(&mut ctx, "admin@gmail.com", "pw").await.unwrap();

        let stats = store.stats(&mut ctx).await.unwrap();
        assert_eq!(stats.total_visitors, 2);
        assert_eq!(stats.active_visitors, 1);
        assert_eq!(stats.total_members, 3);
    }
}
