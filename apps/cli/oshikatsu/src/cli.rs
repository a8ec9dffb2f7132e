//! Command-line surface.

use client_core::workflow::{SearchForm, SearchKind};

use models::GroupId;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(version, about = "推し活メタデータ管理クライアント", long_about = None)]
#[command(propagate_version = true)]
#[command(name = "oshikatsu")]
pub struct Cli {
    /// Directory holding config.json
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    /// Directory for oshikatsu.log
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// Log at debug level on the console
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print group lists as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    Login(LoginArgs),
    Register(RegisterArgs),
    Logout,
    Dashboard,
    #[command(subcommand)]
    Groups(GroupsCommand),
    Members,
}

#[derive(Debug, Args)]
pub struct LoginArgs {
    #[arg(long, default_value = "")]
    pub username: String,
    #[arg(long, default_value = "")]
    pub password: String,
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    #[arg(long, default_value = "")]
    pub username: String,
    #[arg(long, default_value = "")]
    pub email: String,
    #[arg(long, default_value = "")]
    pub password: String,
}

#[derive(Debug, Subcommand)]
pub enum GroupsCommand {
    /// Search groups by name or company
    Search(SearchArgs),
    /// Create a group, then show the refreshed search
    Create {
        #[command(flatten)]
        search: SearchArgs,
        #[command(flatten)]
        fields: GroupFieldArgs,
    },
    /// Edit a group found by the search
    Edit {
        #[arg(long)]
        id: GroupId,
        #[command(flatten)]
        search: SearchArgs,
        #[command(flatten)]
        fields: GroupFieldArgs,
    },
}

/// The search controls of the group page.
#[derive(Debug, Clone, Default, Args)]
pub struct SearchArgs {
    /// Group name, or company with --by-company
    #[arg(long, default_value = "")]
    pub query: String,

    /// Search by company instead of group name
    #[arg(long)]
    pub by_company: bool,

    /// Exact group-name match (default)
    #[arg(long)]
    pub full: bool,

    /// Partial group-name match
    #[arg(long)]
    pub fuzzy: bool,
}

impl SearchArgs {
    /// Full match stays selected unless only fuzzy was asked for.
    pub fn to_form(&self) -> SearchForm {
        SearchForm {
            kind: if self.by_company {
                SearchKind::Company
            } else {
                SearchKind::GroupName
            },
            full: self.full || !self.fuzzy,
            fuzzy: self.fuzzy,
            query: self.query.clone(),
        }
    }
}

/// Modal fields. Unset fields keep their current value when editing.
#[derive(Debug, Clone, Default, Args)]
pub struct GroupFieldArgs {
    #[arg(long)]
    pub group_name: Option<String>,
    #[arg(long)]
    pub company: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
}
