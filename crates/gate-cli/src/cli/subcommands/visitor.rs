use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{ArgGroup, Args, Subcommand};

/// Visitor log commands.
#[derive(Clone, Debug, Subcommand)]
pub enum VisitorCommands {
    /// Register a visitor at the gate.
    #[command(name = "check-in")]
    CheckIn(CheckInArgs),
    /// Record that a visitor has left.
    #[command(name = "check-out")]
    CheckOut { id: i64 },
    /// List visitors visible to the signed-in role.
    List(VisitorListArgs),
    /// Delete a visitor record.
    Delete { id: i64 },
    /// List the purposes offered at check-in.
    Purposes,
}

#[derive(Clone, Debug, Args)]
pub struct CheckInArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long)]
    pub vehicle: Option<String>,
    /// One of `visitor purposes`, or free text.
    #[arg(long)]
    pub purpose: String,
    /// Id of the member being visited.
    #[arg(long)]
    pub member: i64,
    /// Photo of the visitor (JPEG or PNG).
    #[arg(long, required_unless_present = "selfie_url", conflicts_with = "selfie_url")]
    pub selfie: Option<PathBuf>,
    /// Reuse a selfie that was already uploaded.
    #[arg(long)]
    pub selfie_url: Option<String>,
}

#[derive(Clone, Debug, Args)]
#[command(group(ArgGroup::new("scope").args(["today", "mine"]).multiple(false)))]
#[allow(clippy::struct_excessive_bools)]
pub struct VisitorListArgs {
    /// Only visitors checked in today.
    #[arg(long)]
    pub today: bool,
    /// Only visitors who came to see you.
    #[arg(long)]
    pub mine: bool,
    /// Only visitors still inside.
    #[arg(long)]
    pub open: bool,
    /// First day of a date range (inclusive), YYYY-MM-DD.
    #[arg(long, requires = "to")]
    pub from: Option<NaiveDate>,
    /// Last day of a date range (inclusive), YYYY-MM-DD.
    #[arg(long, requires = "from")]
    pub to: Option<NaiveDate>,
    /// Case-insensitive match on visitor name, phone, or member name.
    #[arg(long)]
    pub search: Option<String>,
}
