use clap::Subcommand;

/// Security staff commands.
#[derive(Clone, Debug, Subcommand)]
pub enum StaffCommands {
    /// List security staff.
    List,
    /// Create a staff record.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        /// Morning, Evening, or Night.
        #[arg(long)]
        shift: String,
    },
    /// Update a staff record. Omitted fields keep their current value.
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        shift: Option<String>,
    },
    /// Delete a staff record.
    Delete { id: i64 },
}
