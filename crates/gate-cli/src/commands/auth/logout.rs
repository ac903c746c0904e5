use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::commands::shared::respond::respond;
use crate::context::AppContext;

#[derive(Serialize)]
struct AuthLogoutResponse {
    cleared: bool,
}

pub fn handle(ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let result = gate_auth::logout(&ctx.credentials, &mut ctx.session)
        .map(|()| AuthLogoutResponse { cleared: true });
    respond(result, flags)
}
