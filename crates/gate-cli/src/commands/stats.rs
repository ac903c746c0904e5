use crate::cli::GlobalFlags;
use crate::commands::shared::respond::respond;
use crate::context::AppContext;

/// Handle `gatepass stats`.
pub async fn handle(ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let result = ctx.desk.store().stats(&mut ctx.session).await;
    respond(result, flags)
}
