//! CLI module - Command-line interface for authbase
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};

/// authbase - authentication & authorization schema toolkit
#[derive(Parser)]
#[command(name = "authbase")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Apply, revert or inspect the schema migrations
    #[command(alias = "m")]
    Migrate {
        #[command(subcommand)]
        command: MigrateCommands,
    },

    /// Read and write the configuration table
    #[command(alias = "cfg")]
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Manage users and their role grants
    #[command(alias = "u")]
    User {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Inspect roles and permissions
    #[command(alias = "r")]
    Role {
        #[command(subcommand)]
        command: RoleCommands,
    },

    /// Create default config file
    Init,
}

#[derive(Subcommand)]
pub enum MigrateCommands {
    /// Apply pending migrations
    Up,
    /// Revert all applied migrations
    Down,
    /// Show which migrations are applied
    #[command(alias = "st")]
    Status,
    /// Revert everything, then apply again
    Refresh,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// List all configuration entries
    #[command(alias = "ls")]
    List,
    /// Print a single entry
    Get {
        /// Configuration key
        key: String,
    },
    /// Create or replace an entry
    Set {
        /// Configuration key
        key: String,
        /// New value
        value: String,
        /// Mark the value as hashed/sensitive
        #[arg(long)]
        hashed: bool,
    },
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// Register a user
    Add {
        /// Email address (primary key)
        email: String,
        /// First name
        first_name: String,
        /// Last name
        #[arg(long)]
        last_name: Option<String>,
        /// Phone number (must be unique)
        #[arg(long)]
        phone: Option<String>,
    },
    /// List users
    #[command(alias = "ls")]
    List,
    /// Grant a role to a user
    Grant {
        email: String,
        role: String,
        /// Why the role was granted
        #[arg(long)]
        description: Option<String>,
    },
    /// Revoke a role from a user
    Revoke { email: String, role: String },
    /// Show a user's roles and effective permissions
    Permissions { email: String },
}

#[derive(Subcommand)]
pub enum RoleCommands {
    /// List roles
    #[command(alias = "ls")]
    List,
    /// List the permissions linked to a role
    Permissions {
        /// Role name
        role: String,
    },
}

pub use commands::*;
