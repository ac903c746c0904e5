use gate_core::entities::User;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::output::output;
use crate::context::AppContext;

#[derive(Serialize)]
struct AuthStatusResponse {
    authenticated: bool,
    user: Option<User>,
    token_source: Option<&'static str>,
    backend: &'static str,
    note: Option<String>,
}

pub async fn handle(ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let backend = ctx.desk.store().backend_name();
    let Some((_, source)) = ctx.credentials.load_with_source() else {
        let status = AuthStatusResponse {
            authenticated: false,
            user: None,
            token_source: None,
            backend,
            note: Some("no stored token; run `gatepass auth login`".into()),
        };
        return output(&status, flags.format);
    };

    let status = match ctx.desk.store().me(&mut ctx.session).await {
        Ok(user) => {
            ctx.session.set_user(user.clone());
            AuthStatusResponse {
                authenticated: true,
                user: Some(user),
                token_source: Some(source.as_str()),
                backend,
                note: None,
            }
        }
        Err(error) => AuthStatusResponse {
            authenticated: false,
            user: None,
            token_source: Some(source.as_str()),
            backend,
            note: Some(error.to_string()),
        },
    };
    output(&status, flags.format)
}
