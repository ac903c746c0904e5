use gate_core::entities::User;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::AuthLoginArgs;
use crate::commands::shared::respond::respond;
use crate::context::AppContext;

#[derive(Serialize)]
struct AuthLoginResponse {
    authenticated: bool,
    user: User,
    landing: &'static str,
    backend: &'static str,
}

pub async fn handle(
    args: &AuthLoginArgs,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let result = ctx
        .desk
        .login(&mut ctx.session, &args.email, &args.password)
        .await;

    if result.is_ok()
        && let Some(token) = ctx.session.token()
        && let Err(error) = gate_auth::remember(&ctx.credentials, token)
    {
        tracing::warn!(%error, "signed in, but the token could not be stored");
    }

    let response = result.map(|user| AuthLoginResponse {
        authenticated: true,
        user,
        landing: ctx.session.landing_path(),
        backend: ctx.desk.store().backend_name(),
    });
    respond(response, flags)
}
