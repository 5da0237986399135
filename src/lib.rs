pub mod cli;
pub mod config;
pub mod constants;
pub mod db;
pub mod entities;
pub mod parser;
pub mod services;

use clap::Parser;
pub use config::Config;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, ConfigCommands, MigrateCommands, RoleCommands, UserCommands};

pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

pub async fn run(config: Config) -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(&config.general.log_level);
    config.validate()?;

    match cli.command {
        Commands::Migrate { command } => match command {
            MigrateCommands::Up => cli::cmd_migrate_up(&config).await,
            MigrateCommands::Down => cli::cmd_migrate_down(&config).await,
            MigrateCommands::Status => cli::cmd_migrate_status(&config).await,
            MigrateCommands::Refresh => cli::cmd_migrate_refresh(&config).await,
        },

        Commands::Config { command } => match command {
            ConfigCommands::List => cli::cmd_config_list(&config).await,
            ConfigCommands::Get { key } => cli::cmd_config_get(&config, &key).await,
            ConfigCommands::Set { key, value, hashed } => {
                cli::cmd_config_set(&config, &key, &value, hashed).await
            }
        },

        Commands::User { command } => match command {
            UserCommands::Add {
                email,
                first_name,
                last_name,
                phone,
            } => {
                cli::cmd_user_add(
                    &config,
                    &email,
                    &first_name,
                    last_name.as_deref(),
                    phone.as_deref(),
                )
                .await
            }
            UserCommands::List => cli::cmd_user_list(&config).await,
            UserCommands::Grant {
                email,
                role,
                description,
            } => cli::cmd_user_grant(&config, &email, &role, description.as_deref()).await,
            UserCommands::Revoke { email, role } => {
                cli::cmd_user_revoke(&config, &email, &role).await
            }
            UserCommands::Permissions { email } => cli::cmd_user_permissions(&config, &email).await,
        },

        Commands::Role { command } => match command {
            RoleCommands::List => cli::cmd_role_list(&config).await,
            RoleCommands::Permissions { role } => cli::cmd_role_permissions(&config, &role).await,
        },

        Commands::Init => {
            if Config::create_default_if_missing()? {
                println!("✓ Config file created. Edit config.toml and run again.");
            } else {
                println!("config.toml already exists.");
            }
            Ok(())
        }
    }
}
