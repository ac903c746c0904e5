//! `/auth` routes.

use gate_core::entities::User;
use gate_core::responses::{AuthResponse, MeResponse};
use gate_core::session::SessionContext;
use gate_core::validation::require;
use serde::Serialize;

use crate::ApiClient;
use crate::error::ApiResult;
use crate::http::decode;

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

impl ApiClient {
    /// Exchange credentials for a token and fill `ctx` with the new session.
    ///
    /// # Errors
    ///
    /// [`crate::ApiError::Validation`] for a blank email or password, otherwise
    /// whatever the API answers.
    pub async fn login(
        &self,
        ctx: &mut SessionContext,
        email: &str,
        password: &str,
    ) -> ApiResult<AuthResponse> {
        require("email", email)?;
        require("password", password)?;

        let value = self
            .post_json(ctx, "/auth/login", &LoginBody { email, password })
            .await?;
        let auth: AuthResponse = decode(value)?;
        *ctx = SessionContext::authenticated(auth.token.clone(), auth.user.clone());
        tracing::info!(role = %auth.user.role, "signed in");
        Ok(auth)
    }

    /// Fetch the signed-in user and cache it on `ctx`.
    ///
    /// # Errors
    ///
    /// [`crate::ApiError::Unauthorized`] when the token is missing or rejected.
    pub async fn me(&self, ctx: &mut SessionContext) -> ApiResult<User> {
        let value = self.get(ctx, "/auth/me").await?;
        let user = decode::<MeResponse>(value.clone())
            .map(|me| me.user)
            .or_else(|_| decode::<User>(value))?;
        ctx.set_user(user.clone());
        Ok(user)
    }
}
