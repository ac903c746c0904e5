use gate_core::responses::Outcome;
use serde::Serialize;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::output::output;

/// Print a command result.
///
/// JSON and raw output wrap it in the `{ok, data | message}` envelope; a
/// failure is printed there too and then returned, so the process still
/// exits non-zero. Table output prints the data alone.
pub fn respond<T, E>(result: Result<T, E>, flags: &GlobalFlags) -> anyhow::Result<()>
where
    T: Serialize,
    E: std::error::Error + Send + Sync + 'static,
{
    match (result, flags.format) {
        (Ok(data), OutputFormat::Table) => output(&data, flags.format),
        (Ok(data), _) => output(&Outcome::success(data), flags.format),
        (Err(error), OutputFormat::Table) => Err(error.into()),
        (Err(error), _) => {
            output(&Outcome::<T>::failure(error.to_string()), flags.format)?;
            Err(error.into())
        }
    }
}
