use gate_core::entities::User;
use gate_core::routing::{NavItem, nav_items};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct HomeView {
    society: String,
    user: Option<User>,
    landing: &'static str,
    nav: &'static [NavItem],
}

/// Handle `gatepass home`: where the signed-in role lands and what it can reach.
pub async fn handle(ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    if ctx.session.has_token()
        && let Err(error) = ctx.desk.role(&mut ctx.session).await
    {
        tracing::warn!(%error, "could not resolve the signed-in user");
    }

    let view = HomeView {
        society: ctx.config.general.society_name.clone(),
        user: ctx.session.user().cloned(),
        landing: ctx.session.landing_path(),
        nav: nav_items(ctx.session.role()),
    };
    output(&view, flags.format)
}
