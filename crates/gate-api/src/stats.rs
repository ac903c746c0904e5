use gate_core::responses::Stats;
use gate_core::session::SessionContext;

use crate::ApiClient;
use crate::error::ApiResult;
use crate::http::decode;

impl ApiClient {
    /// Dashboard counters from `/admin/stats`.
    pub async fn stats(&self, ctx: &mut SessionContext) -> ApiResult<Stats> {
        decode(self.get(ctx, "/admin/stats").await?)
    }
}
