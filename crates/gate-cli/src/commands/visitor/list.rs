use chrono::{DateTime, Utc};
use gate_core::entities::VisitSession;
use gate_core::projections;
use gate_desk::DeskResult;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::visitor::VisitorListArgs;
use crate::commands::shared::dates::day_bounds;
use crate::commands::shared::limit::{apply_limit, effective_limit};
use crate::commands::shared::respond::respond;
use crate::context::AppContext;

pub async fn run(
    args: &VisitorListArgs,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let range = match (args.from, args.to) {
        (Some(from), Some(to)) => Some(day_bounds(from, to)?),
        _ => None,
    };
    let limit = effective_limit(flags.limit, ctx.config.general.default_limit);

    let result = fetch(args, ctx).await.and_then(|visitors| {
        let mut visitors = narrow(visitors, args, range)?;
        apply_limit(&mut visitors, limit);
        Ok(visitors)
    });
    respond(result, flags)
}

async fn fetch(args: &VisitorListArgs, ctx: &mut AppContext) -> DeskResult<Vec<VisitSession>> {
    if args.mine {
        return Ok(ctx.desk.store().my_visitors(&mut ctx.session).await?);
    }
    ctx.desk.visitors(&mut ctx.session).await
}

/// Apply the list filters in a fixed order: today, open, date range, search.
fn narrow(
    visitors: Vec<VisitSession>,
    args: &VisitorListArgs,
    range: Option<(DateTime<Utc>, DateTime<Utc>)>,
) -> DeskResult<Vec<VisitSession>> {
    let mut visitors = visitors;
    if args.today {
        visitors = projections::today(&visitors);
    }
    if args.open {
        visitors = projections::open_visits(&visitors);
    }
    if let Some((start, end)) = range {
        visitors = projections::by_date_range(&visitors, Some(start), Some(end))?;
    }
    if let Some(term) = &args.search {
        visitors = projections::by_search_term(&visitors, term);
    }
    Ok(visitors)
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use gate_core::enums::VisitPurpose;
    use pretty_assertions::assert_eq;

    use super::*;

    fn visit(id: i64, name: &str, open: bool) -> VisitSession {
        let at = Utc::now() - Duration::minutes(id);
        VisitSession {
            id,
            name: name.into(),
            phone: format!("+9190000000{id:02}"),
            vehicle: None,
            purpose: VisitPurpose::Guest,
            member_id: Some(1),
            member_name: Some("Asha".into()),
            selfie_url: None,
            checked_in_at: at,
            checked_out_at: (!open).then_some(at),
        }
    }

    fn args() -> VisitorListArgs {
        VisitorListArgs {
            today: false,
            mine: false,
            open: false,
            from: None,
            to: None,
            search: None,
        }
    }

    #[test]
    fn open_and_search_combine() {
        let visitors = vec![visit(1, "Ravi", true), visit(2, "Ravindra", false), visit(3, "Meera", true)];
        let args = VisitorListArgs {
            open: true,
            search: Some("ravi".into()),
            ..args()
        };
        let ids = narrow(visitors, &args, None)
            .unwrap()
            .iter()
            .map(|v| v.id)
            .collect::<Vec<_>>();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn no_filters_keep_everything_in_order() {
        let visitors = vec![visit(2, "b", false), visit(1, "a", true)];
        let ids = narrow(visitors, &args(), None)
            .unwrap()
            .iter()
            .map(|v| v.id)
            .collect::<Vec<_>>();
        assert_eq!(ids, vec![2, 1]);
    }
}
