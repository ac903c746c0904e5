mod check_in;
mod list;

use gate_core::enums::VisitPurpose;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::VisitorCommands;
use crate::commands::shared::confirm::confirmer;
use crate::commands::shared::respond::respond;
use crate::context::AppContext;
use crate::output::output;

/// Handle `gatepass visitor`.
pub async fn handle(
    action: &VisitorCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        VisitorCommands::CheckIn(args) => check_in::run(args, ctx, flags).await,
        VisitorCommands::CheckOut { id } => {
            let result = ctx.desk.check_out(&mut ctx.session, *id).await;
            respond(result, flags)
        }
        VisitorCommands::List(args) => list::run(args, ctx, flags).await,
        VisitorCommands::Delete { id } => {
            let confirm = confirmer(ctx.assume_yes);
            let result = ctx
                .desk
                .delete_visitor(&mut ctx.session, *id, confirm.as_ref())
                .await;
            respond(result, flags)
        }
        VisitorCommands::Purposes => {
            let labels = VisitPurpose::ALL
                .iter()
                .map(|purpose| purpose.label().to_string())
                .collect::<Vec<_>>();
            output(&labels, flags.format)
        }
    }
}
