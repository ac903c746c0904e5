use clap::{Args, Subcommand};

use crate::cli::subcommands::{AuthCommands, MemberCommands, StaffCommands, VisitorCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Authentication.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Society members.
    Member {
        #[command(subcommand)]
        action: MemberCommands,
    },
    /// Security staff.
    Staff {
        #[command(subcommand)]
        action: StaffCommands,
    },
    /// Visitor log.
    Visitor {
        #[command(subcommand)]
        action: VisitorCommands,
    },
    /// Admin dashboard counters.
    Stats,
    /// House numbers by block.
    Houses(HousesArgs),
    /// Landing view and navigation for the signed-in role.
    Home,
}

/// Arguments for `gatepass houses`.
#[derive(Clone, Debug, Args)]
pub struct HousesArgs {
    /// Block name (e.g. A). Lists every block when omitted.
    #[arg(long)]
    pub block: Option<String>,
}
