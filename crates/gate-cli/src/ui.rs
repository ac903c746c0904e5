//! Terminal facts decided once at startup.

use std::io::IsTerminal;
use std::sync::OnceLock;

use crate::cli::{GlobalFlags, OutputFormat};

/// Narrower than this and `COLUMNS` is ignored.
const MIN_TERM_WIDTH: usize = 40;

#[derive(Clone, Copy, Debug, Default)]
pub struct UiPrefs {
    /// Colour state cells in table output.
    pub table_color: bool,
    /// Stdin is a terminal, so delete prompts can be answered.
    pub interactive: bool,
    pub term_width: Option<usize>,
}

impl UiPrefs {
    fn detect(flags: &GlobalFlags) -> Self {
        let tables_on_tty = flags.format == OutputFormat::Table && std::io::stdout().is_terminal();
        Self {
            table_color: tables_on_tty && !flags.quiet && std::env::var_os("NO_COLOR").is_none(),
            interactive: std::io::stdin().is_terminal(),
            term_width: std::env::var("COLUMNS")
                .ok()
                .and_then(|columns| columns.parse::<usize>().ok())
                .filter(|width| *width >= MIN_TERM_WIDTH),
        }
    }
}

static PREFS: OnceLock<UiPrefs> = OnceLock::new();

pub fn init(flags: &GlobalFlags) {
    let _ = PREFS.set(UiPrefs::detect(flags));
}

/// Prefs from [`init`], or plain non-interactive output before it runs.
#[must_use]
pub fn prefs() -> UiPrefs {
    PREFS.get().copied().unwrap_or_default()
}
