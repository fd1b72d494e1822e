use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "console", version, about = "Loan admin console")]
pub struct Cli {
    /// Print backend request metrics after the command
    #[arg(long)]
    pub metrics: bool,

    /// Bearer token of an existing session
    #[arg(long, requires = "identity")]
    pub token: Option<String>,

    /// Identity shown for the session
    #[arg(long, requires = "token")]
    pub identity: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Loan applications
    #[command(subcommand)]
    Loans(LoansCommand),
    /// Registered users
    #[command(subcommand)]
    Users(UsersCommand),
}

#[derive(Debug, Subcommand)]
pub enum LoansCommand {
    /// List every loan with summary figures
    List,
    /// Show every field of one loan
    Show {
        /// Full id, or the short id shown in listings
        id: String,
    },
    /// Edit a loan; blank flags leave the stored value alone
    Update {
        id: String,
        #[command(flatten)]
        edit: LoanEdit,
    },
    /// Set the status of a loan
    Status {
        id: String,
        /// PENDING, APPROVED or REJECTED
        status: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    /// List every user
    List,
    /// Show every field of one user
    Show {
        /// Full id, or the short id shown in listings
        id: String,
    },
    /// Edit a user's contact details
    Update {
        id: String,
        #[arg(long)]
        full_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        mobile: Option<String>,
    },
}

/// Raw loan edit inputs, coerced later.
#[derive(Debug, Clone, Default, Args)]
pub struct LoanEdit {
    #[arg(long)]
    pub full_name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub mobile: Option<String>,
    /// Loan amount in rupees
    #[arg(long)]
    pub amount: Option<String>,
    /// Duration in whole months
    #[arg(long)]
    pub duration: Option<String>,
    #[arg(long)]
    pub purpose: Option<String>,
    #[arg(long)]
    pub employment: Option<String>,
    /// Monthly income in rupees
    #[arg(long)]
    pub income: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
}
