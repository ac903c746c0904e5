use clap::Subcommand;

/// Society member commands.
#[derive(Clone, Debug, Subcommand)]
pub enum MemberCommands {
    /// List members.
    List {
        /// Case-insensitive match on name, email, phone, or apartment.
        #[arg(long)]
        search: Option<String>,
    },
    /// Create a member.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        /// House number, e.g. 302.
        #[arg(long)]
        apartment: String,
    },
    /// Update a member. Omitted fields keep their current value.
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        apartment: Option<String>,
    },
    /// Delete a member. Their visit history is kept.
    Delete { id: i64 },
}
