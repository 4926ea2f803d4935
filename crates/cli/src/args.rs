use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use placement_core::catalog::{ExperienceFilter, MentorFilter};
use placement_core::experience::FinalResult;
use placement_core::types::DbId;

/// Command-line arguments for placement-tracker.
#[derive(Parser, Debug)]
#[command(name = "placement-tracker")]
#[command(about = "Share and browse placement interview experiences")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and remember the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "PLACEMENT_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign in with an administrator account
    AdminLogin {
        #[arg(long)]
        username: String,
        #[arg(long, env = "PLACEMENT_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Create an account from a JSON registration form
    Register {
        /// File holding a student or mentor registration, tagged by `role`
        #[arg(long)]
        form: PathBuf,
    },
    /// List departments
    Departments {
        /// Only departments in the same group as this one
        #[arg(long)]
        related: Option<String>,
    },
    /// List shared experiences
    Experiences {
        #[command(flatten)]
        filter: ExperienceArgs,
        /// Only experiences submitted by the signed-in user
        #[arg(long)]
        mine: bool,
        /// Group by company and placement year
        #[arg(long)]
        grouped: bool,
    },
    /// List companies
    Companies {
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one experience with all of its rounds
    Show { id: DbId },
    /// Submit an experience from a JSON draft
    Submit {
        #[arg(long)]
        draft: PathBuf,
        /// Update this stored experience instead of creating one
        #[arg(long)]
        edit: Option<DbId>,
    },
    /// Delete a stored experience
    Delete { id: DbId },
    /// List mentors
    Mentors {
        #[command(flatten)]
        filter: MentorArgs,
        /// Mentors waiting for approval (admin only)
        #[arg(long)]
        pending: bool,
    },
    /// Approve a pending mentor (admin only)
    ApproveMentor { id: DbId },
    /// Reject a pending mentor (admin only)
    RejectMentor { id: DbId },
}

#[derive(Args, Debug, Default, Clone)]
pub struct ExperienceArgs {
    #[arg(long)]
    pub company: Option<String>,
    #[arg(long)]
    pub department: Option<String>,
    #[arg(long)]
    pub year: Option<i32>,
    /// SELECTED, REJECTED or PENDING
    #[arg(long, value_parser = parse_result)]
    pub result: Option<FinalResult>,
}

impl From<ExperienceArgs> for ExperienceFilter {
    fn from(args: ExperienceArgs) -> Self {
        Self {
            company: args.company,
            department: args.department,
            year: args.year,
            result: args.result,
        }
    }
}

#[derive(Args, Debug, Default, Clone)]
pub struct MentorArgs {
    /// Matches name, company or position
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long)]
    pub company: Option<String>,
    #[arg(long)]
    pub department: Option<String>,
    #[arg(long)]
    pub year: Option<i32>,
}

impl From<MentorArgs> for MentorFilter {
    fn from(args: MentorArgs) -> Self {
        Self {
            search: args.search,
            company: args.company,
            department: args.department,
            year: args.year,
        }
    }
}

fn parse_result(s: &str) -> Result<FinalResult, String> {
    FinalResult::from_str_db(s).map_err(|e| e.to_string())
}
