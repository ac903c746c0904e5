use gate_core::entities::{Member, MemberFields};
use gate_core::errors::CoreError;
use gate_desk::{DeskError, DeskResult};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::MemberCommands;
use crate::commands::shared::confirm::confirmer;
use crate::commands::shared::limit::{apply_limit, effective_limit};
use crate::commands::shared::respond::respond;
use crate::context::AppContext;

/// Handle `gatepass member`.
pub async fn handle(
    action: &MemberCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        MemberCommands::List { search } => {
            let limit = effective_limit(flags.limit, ctx.config.general.default_limit);
            let result = ctx.desk.members(&mut ctx.session).await.map(|mut members| {
                if let Some(term) = search {
                    members.retain(|m| matches_member(m, term));
                }
                apply_limit(&mut members, limit);
                members
            });
            respond(result, flags)
        }
        MemberCommands::Create {
            name,
            email,
            phone,
            apartment,
        } => {
            let fields = MemberFields {
                name: name.clone(),
                email: email.clone(),
                phone: phone.clone(),
                apartment: apartment.clone(),
            };
            warn_unknown_house(ctx, &fields.apartment);
            let result = ctx.desk.create_member(&mut ctx.session, &fields).await;
            respond(result, flags)
        }
        MemberCommands::Update {
            id,
            name,
            email,
            phone,
            apartment,
        } => {
            let result = async {
                let current = find_member(ctx, *id).await?;
                let mut fields = MemberFields::from(&current);
                overwrite(&mut fields.name, name.as_ref());
                overwrite(&mut fields.email, email.as_ref());
                overwrite(&mut fields.phone, phone.as_ref());
                overwrite(&mut fields.apartment, apartment.as_ref());
                warn_unknown_house(ctx, &fields.apartment);
                ctx.desk.update_member(&mut ctx.session, *id, &fields).await
            }
            .await;
            respond(result, flags)
        }
        MemberCommands::Delete { id } => {
            let confirm = confirmer(ctx.assume_yes);
            let result = ctx
                .desk
                .delete_member(&mut ctx.session, *id, confirm.as_ref())
                .await;
            respond(result, flags)
        }
    }
}

pub(crate) fn overwrite(slot: &mut String, value: Option<&String>) {
    if let Some(value) = value {
        slot.clone_from(value);
    }
}

async fn find_member(ctx: &mut AppContext, id: i64) -> DeskResult<Member> {
    ctx.desk
        .members(&mut ctx.session)
        .await?
        .into_iter()
        .find(|m| m.id == id)
        .ok_or_else(|| DeskError::from(CoreError::not_found("Member", id)))
}

fn warn_unknown_house(ctx: &AppContext, apartment: &str) {
    let catalog = ctx.config.general.house_catalog();
    if !catalog.knows_house(apartment.trim()) {
        tracing::warn!(apartment, "apartment is not in the society's house catalog");
    }
}

fn matches_member(member: &Member, term: &str) -> bool {
    let needle = term.to_lowercase();
    [&member.name, &member.email, &member.phone, &member.apartment]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asha() -> Member {
        Member {
            id: 1,
            name: "Asha Rao".into(),
            email: "asha@society.com".into(),
            phone: "+911234567890".into(),
            apartment: "203".into(),
        }
    }

    #[test]
    fn search_covers_every_contact_field() {
        assert!(matches_member(&asha(), "rao"));
        assert!(matches_member(&asha(), "SOCIETY.COM"));
        assert!(matches_member(&asha(), "203"));
        assert!(!matches_member(&asha(), "vikram"));
    }

    #[test]
    fn overwrite_keeps_current_value_when_absent() {
        let mut name = "Asha".to_string();
        overwrite(&mut name, None);
        assert_eq!(name, "Asha");
        overwrite(&mut name, Some(&"Asha Rao".to_string()));
        assert_eq!(name, "Asha Rao");
    }
}
