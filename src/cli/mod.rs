//! Command-line front end.
//!
//! Plays the part of the dashboard pages: it validates form input, turns
//! selected role/permission ids into embedded snapshots, calls the API and
//! renders the envelope as JSON. A failed command leaves stored state as it
//! was; the caller reports the error and may simply retry.

pub mod commands;

use crate::domain::{PermissionAction, UserStatus};
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "rbac-admin",
    about = "Manage users, roles and permissions",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage users
    Users {
        #[command(subcommand)]
        action: UserCommand,
    },
    /// Manage roles
    Roles {
        #[command(subcommand)]
        action: RoleCommand,
    },
    /// Manage permissions
    Permissions {
        #[command(subcommand)]
        action: PermissionCommand,
    },
    /// Show record counts
    Dashboard,
    /// Drop all stored collections; the next command re-seeds them
    Reset,
    /// Check that the configured store is reachable
    Health,
    /// Print metrics in Prometheus text format
    Metrics,
}

#[derive(Debug, Subcommand)]
pub enum UserCommand {
    List,
    Create(UserArgs),
    Update {
        id: String,
        #[command(flatten)]
        fields: UserUpdateArgs,
    },
    Delete {
        id: String,
    },
}

#[derive(Debug, Args)]
pub struct UserArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub name: String,
    /// Role id to assign; repeat for several roles
    #[arg(long = "role")]
    pub roles: Vec<String>,
    #[arg(long, default_value = "active")]
    pub status: UserStatus,
}

#[derive(Debug, Args)]
pub struct UserUpdateArgs {
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub name: Option<String>,
    /// Replaces all assigned roles when given
    #[arg(long = "role")]
    pub roles: Vec<String>,
    #[arg(long)]
    pub status: Option<UserStatus>,
}

#[derive(Debug, Subcommand)]
pub enum RoleCommand {
    List,
    Create(RoleArgs),
    Update {
        id: String,
        #[command(flatten)]
        fields: RoleUpdateArgs,
    },
    Delete {
        id: String,
    },
}

#[derive(Debug, Args)]
pub struct RoleArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long, default_value = "")]
    pub description: String,
    /// Permission id to assign; repeat for several permissions
    #[arg(long = "permission")]
    pub permissions: Vec<String>,
}

#[derive(Debug, Args)]
pub struct RoleUpdateArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Replaces all assigned permissions when given
    #[arg(long = "permission")]
    pub permissions: Vec<String>,
}

#[derive(Debug, Subcommand)]
pub enum PermissionCommand {
    List,
    Create(PermissionArgs),
    Update {
        id: String,
        #[command(flatten)]
        fields: PermissionUpdateArgs,
    },
    Delete {
        id: String,
    },
}

#[derive(Debug, Args)]
pub struct PermissionArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long, default_value = "")]
    pub description: String,
    #[arg(long)]
    pub resource: String,
    /// One of create, read, update, delete, manage
    #[arg(long)]
    pub action: PermissionAction,
}

#[derive(Debug, Args)]
pub struct PermissionUpdateArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub resource: Option<String>,
    #[arg(long)]
    pub action: Option<PermissionAction>,
}
