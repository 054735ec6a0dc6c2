mod config;
mod database;
mod entities;
mod http_server;
mod id;
mod logging;
mod services;
#[cfg(test)]
mod test_utils;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::{Result, eyre::Context};

use crate::{
    config::Config, database::Database, http_server::app::HttpServerConfig,
    logging::setup_logging,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The config file to use
    #[arg(short, long, global = true, env = "OPEN_MUSIC_CONFIG")]
    config: Option<PathBuf>,

    /// Database URL, overrides the config file and the PG* variables
    #[arg(long, global = true, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Console log level
    #[arg(long, default_value = "info", global = true, env = "LOG_LEVEL")]
    log_level: log::LevelFilter,

    /// File log level
    #[arg(long, default_value = "debug", global = true)]
    log_file_level: log::LevelFilter,

    /// Path to log file
    #[arg(long, env = "OPEN_MUSIC_LOG_FILE", global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Apply pending migrations and serve the REST API
    Serve {
        /// The host to bind to
        #[arg(long, env = "HOST")]
        host: Option<String>,

        /// The port to run the server on
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,
    },
    #[command(subcommand)]
    Migrate(MigrateCommands),
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand, Debug)]
enum MigrateCommands {
    /// Apply all pending migrations
    Up,
    /// Roll back the last applied migration
    Down,
    /// List applied and pending migrations
    Status,
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Create a default config file, if it doesn't exist
    CreateDefault,
    /// Print the path to the config file
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    setup_logging(args.log_level, args.log_file.clone(), args.log_file_level)?;

    log::debug!("Loading configuration");
    let mut config = {
        if let Some(config) = &args.config {
            Config::from_file(config)
        } else {
            Config::load()
        }
    }
    .wrap_err("Failed to load open-music config")?;

    if let Some(url) = args.database_url {
        config.database.url = Some(url);
    }

    match args.command {
        Commands::Serve { host, port } => {
            let database = Database::open(&config.database).await?;
            http_server::app::start(HttpServerConfig {
                host: host.unwrap_or(config.server.host),
                port: port.unwrap_or(config.server.port),
                database,
            })
            .await?;
        }
        Commands::Migrate(migrate_commands) => {
            let database = Database::connect(&config.database).await?;
            match migrate_commands {
                MigrateCommands::Up => {
                    database.migrate_up().await?;
                    log::info!("Migrations applied");
                }
                MigrateCommands::Down => {
                    database.migrate_down().await?;
                    log::info!("Last migration rolled back");
                }
                MigrateCommands::Status => {
                    let (applied, pending) = database.migration_status().await?;
                    for name in applied {
                        println!("applied  {}", name);
                    }
                    for name in pending {
                        println!("pending  {}", name);
                    }
                }
            }
        }
        Commands::Config(config_commands) => match config_commands {
            ConfigCommands::CreateDefault => {
                let path = Config::create_default()?;
                log::info!("Default config at: {}", path.display());
            }
            ConfigCommands::Path => match Config::config_path() {
                Some(path) => println!("{}", path.display()),
                None => println!("No default config path found"),
            },
        },
    }

    Ok(())
}
