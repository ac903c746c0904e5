use gate_core::entities::CheckInRequest;
use gate_desk::{CheckInSubmission, DeskError};
use gate_media::{CameraSession, FileCamera};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::visitor::CheckInArgs;
use crate::commands::shared::respond::respond;
use crate::context::AppContext;

pub async fn run(args: &CheckInArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let fields = CheckInRequest {
        name: args.name.clone(),
        phone: args.phone.clone(),
        vehicle: args.vehicle.clone(),
        purpose: args.purpose.clone(),
        member_id: Some(args.member),
        selfie_url: args.selfie_url.clone(),
    };

    let selfie = match &args.selfie {
        Some(path) => {
            let capture = CameraSession::open(FileCamera::new(path))
                .and_then(|mut camera| {
                    camera.capture()?;
                    Ok(camera.take())
                })
                .map_err(DeskError::from);
            match capture {
                Ok(selfie) => selfie,
                Err(error) => return respond::<(), _>(Err(error), flags),
            }
        }
        None => None,
    };

    let mut submission = CheckInSubmission::new(fields, selfie);
    let result = ctx.desk.check_in(&mut ctx.session, &mut submission).await;
    if result.is_err()
        && args.selfie_url.is_none()
        && let Some(url) = &submission.fields.selfie_url
    {
        tracing::warn!("selfie was uploaded; retry with --selfie-url {url} to reuse it");
    }
    respond(result, flags)
}
