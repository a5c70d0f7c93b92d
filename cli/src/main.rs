//! Stable registry CLI
//!
//! Runs the REST service headless, or works on the database directly for
//! roster import/export.
//!
//! ```sh
//! # Run with default config (~/.config/stable-registry/config.toml)
//! stable-cli serve
//!
//! # Custom config path and port
//! stable-cli --config /etc/stable-registry/config.toml serve --port 9000
//!
//! # Validate config without starting
//! stable-cli check
//!
//! # Stables ordered by load
//! stable-cli stables
//!
//! # Roster interchange
//! stable-cli export --stable 1 --output north.csv
//! stable-cli import --stable 2 --input north.csv
//! ```

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{error, info};

use stable_registry::application::{RosterService, RowOutcome, StableService};
use stable_registry::config::AppConfig;
use stable_registry::domain::RepositoryProvider;
use stable_registry::server::{init_tracing, ServerHandle, ServerOptions};
use stable_registry::{init_database, run_migrations, SeaOrmRepositoryProvider};

/// Stable registry: stables, horses, ratings and CSV rosters.
#[derive(Parser, Debug)]
#[command(
    name = "stable-cli",
    version,
    about = "Stable, horse and rating registry",
    long_about = "Stable registry: REST API server and roster tool \
                  for stables, their horses and horse ratings.\n\n\
                  Default config: ~/.config/stable-registry/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "STABLES_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the REST API server until Ctrl+C.
    Serve {
        /// Override the listen port.
        #[arg(long)]
        port: Option<u16>,

        /// Skip database migrations on startup.
        #[arg(long)]
        no_migrate: bool,
    },
    /// Validate the configuration file and exit.
    Check,
    /// List stables ordered by how full they are.
    Stables,
    /// Write a stable's roster as CSV.
    Export {
        #[arg(long)]
        stable: i32,
        /// Output file; stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Load horses from a CSV roster into a stable.
    Import {
        #[arg(long)]
        stable: i32,
        #[arg(short, long)]
        input: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(stable_registry::default_config_path);

    let mut config = match AppConfig::load(&config_path) {
        Ok(mut cfg) => {
            if let Some(ref level) = cli.log_level {
                cfg.logging.level = level.clone();
            }
            init_tracing(&cfg);
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
            AppConfig::default()
        }
    };

    match cli.command {
        Command::Check => {
            println!("Configuration is valid");
            println!("   Config file : {}", config_path.display());
            println!("   API address : {}", config.server.address());
            println!("   Database    : {}", config.database.connection_url());
            println!("   Log level   : {}", config.logging.level);
            println!("   Log format  : {}", config.logging.format);
            Ok(())
        }
        Command::Serve { port, no_migrate } => {
            if let Some(port) = port {
                info!("CLI override: port = {}", port);
                config.server.port = port;
            }

            let handle = ServerHandle::start(ServerOptions {
                config,
                auto_migrate: !no_migrate,
            })
            .await?;

            handle.install_signal_handler();
            info!("Press Ctrl+C to shutdown gracefully.");

            handle.shutdown_signal().wait().await;
            handle.wait().await;
            Ok(())
        }
        Command::Stables => {
            let stables = open_services(&config).await?;
            for load in stables.list_stables_by_load().await? {
                println!(
                    "{:>4}  {:<24} {:>3}/{:<3} {:>5.1}%",
                    load.stable_id,
                    load.stable_name,
                    load.current,
                    load.max,
                    load.percentage * 100.0
                );
            }
            Ok(())
        }
        Command::Export { stable, output } => {
            let roster = RosterService::new(open_services(&config).await?);
            let written = match output {
                Some(path) => {
                    let mut out = BufWriter::new(File::create(&path)?);
                    let n = roster.export_roster(stable, &mut out).await?;
                    out.flush()?;
                    info!("Roster written to {}", path.display());
                    n
                }
                None => {
                    let mut out = io::stdout();
                    roster.export_roster(stable, &mut out).await?
                }
            };
            info!(stable_id = stable, horses = written, "Export complete");
            Ok(())
        }
        Command::Import { stable, input } => {
            let roster = RosterService::new(open_services(&config).await?);
            let reader = BufReader::new(File::open(&input)?);
            let report = roster.import_roster(stable, reader).await?;

            for row in &report.rows {
                match &row.outcome {
                    RowOutcome::Inserted { horse_id } => {
                        println!("line {:>4}: inserted horse {}", row.line, horse_id)
                    }
                    RowOutcome::SkippedDuplicate { reason }
                    | RowOutcome::SkippedFull { reason } => {
                        println!("line {:>4}: skipped, {}", row.line, reason)
                    }
                    RowOutcome::Rejected { reason } | RowOutcome::Malformed { reason } => {
                        println!("line {:>4}: rejected, {}", row.line, reason)
                    }
                }
            }
            println!(
                "{} inserted, {} skipped",
                report.inserted(),
                report.skipped()
            );
            Ok(())
        }
    }
}

/// Connect to the configured database and build the stable service over it.
async fn open_services(
    config: &AppConfig,
) -> Result<Arc<StableService>, Box<dyn std::error::Error>> {
    let db = init_database(&config.database.to_database_config()).await?;
    run_migrations(&db).await?;
    let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db));
    Ok(Arc::new(StableService::new(repos)))
}
