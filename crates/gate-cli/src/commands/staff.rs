use gate_core::entities::{SecurityStaff, StaffFields};
use gate_core::errors::CoreError;
use gate_desk::{DeskError, DeskResult, Refreshed};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::StaffCommands;
use crate::commands::member::overwrite;
use crate::commands::shared::confirm::confirmer;
use crate::commands::shared::limit::{apply_limit, effective_limit};
use crate::commands::shared::respond::respond;
use crate::context::AppContext;

/// Shifts offered by the staff form. Other values are accepted as typed.
const KNOWN_SHIFTS: &[&str] = &["Morning", "Evening", "Night"];

/// Optional replacements for `staff update`.
struct StaffPatch<'a> {
    name: Option<&'a String>,
    email: Option<&'a String>,
    phone: Option<&'a String>,
    shift: Option<&'a String>,
}

/// Handle `gatepass staff`.
pub async fn handle(
    action: &StaffCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        StaffCommands::List => {
            let limit = effective_limit(flags.limit, ctx.config.general.default_limit);
            let result = ctx.desk.staff(&mut ctx.session).await.map(|mut staff| {
                apply_limit(&mut staff, limit);
                staff
            });
            respond(result, flags)
        }
        StaffCommands::Create {
            name,
            email,
            phone,
            shift,
        } => {
            warn_unknown_shift(shift);
            let fields = StaffFields {
                name: name.clone(),
                email: email.clone(),
                phone: phone.clone(),
                shift: shift.clone(),
            };
            let result = ctx.desk.create_staff(&mut ctx.session, &fields).await;
            respond(result, flags)
        }
        StaffCommands::Update {
            id,
            name,
            email,
            phone,
            shift,
        } => {
            let patch = StaffPatch {
                name: name.as_ref(),
                email: email.as_ref(),
                phone: phone.as_ref(),
                shift: shift.as_ref(),
            };
            let result = update(ctx, *id, &patch).await;
            respond(result, flags)
        }
        StaffCommands::Delete { id } => {
            let confirm = confirmer(ctx.assume_yes);
            let result = ctx
                .desk
                .delete_staff(&mut ctx.session, *id, confirm.as_ref())
                .await;
            respond(result, flags)
        }
    }
}

async fn update(
    ctx: &mut AppContext,
    id: i64,
    patch: &StaffPatch<'_>,
) -> DeskResult<Refreshed<SecurityStaff>> {
    let current = ctx
        .desk
        .staff(&mut ctx.session)
        .await?
        .into_iter()
        .find(|s| s.id == id)
        .ok_or_else(|| DeskError::from(CoreError::not_found("SecurityStaff", id)))?;

    let mut fields = StaffFields::from(&current);
    overwrite(&mut fields.name, patch.name);
    overwrite(&mut fields.email, patch.email);
    overwrite(&mut fields.phone, patch.phone);
    overwrite(&mut fields.shift, patch.shift);
    if let Some(shift) = patch.shift {
        warn_unknown_shift(shift);
    }
    ctx.desk.update_staff(&mut ctx.session, id, &fields).await
}

fn warn_unknown_shift(shift: &str) {
    if !KNOWN_SHIFTS.iter().any(|s| s.eq_ignore_ascii_case(shift.trim())) {
        tracing::warn!(shift, "unusual shift name; expected Morning, Evening or Night");
    }
}
