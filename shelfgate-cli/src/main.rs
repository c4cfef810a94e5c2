//! Shelfgate CLI: inspect access decisions without running the client.
//!
//! ```bash
//! shelfgate check --role Moderator /admin/users
//! shelfgate menu --role librarian --menu admin
//! shelfgate matrix
//! shelfgate validate --config shelfgate.toml
//! ```

mod commands;

use clap::{Args, Parser, Subcommand};
use shelfgate_core::config::ShelfgateConfig;
use shelfgate_core::logging::{init_logging, LoggingConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "shelfgate",
    about = "Inspect the library client's role-based access rules",
    version
)]
struct Cli {
    /// Configuration file (missing file means defaults)
    #[arg(long, global = true, default_value = "shelfgate.toml")]
    config: PathBuf,

    /// Override the configured log level
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Who is navigating
#[derive(Args, Debug, Clone)]
pub struct ViewerArgs {
    /// Raw role as the backend sends it: a JSON value or a bare string
    #[arg(long, required_unless_present = "anonymous", conflicts_with = "anonymous")]
    pub role: Option<String>,

    /// Evaluate as a signed-out visitor
    #[arg(long)]
    pub anonymous: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Decide a single navigation
    Check {
        #[command(flatten)]
        viewer: ViewerArgs,

        /// Destination path, query string allowed
        destination: String,
    },
    /// List the menu entries a viewer would see
    Menu {
        #[command(flatten)]
        viewer: ViewerArgs,

        /// "admin" or "header"
        #[arg(long, default_value = "admin")]
        menu: String,
    },
    /// Print the decision for every role and policy key
    Matrix,
    /// Load the configuration and check the policy for surprises
    Validate,
}

/// Runtime logger settings; every line is tagged `service=shelfgate`
fn logging_config(config: &ShelfgateConfig) -> anyhow::Result<LoggingConfig> {
    Ok(config.logging.to_runtime()?.with_context_field("service", "shelfgate"))
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = ShelfgateConfig::load_from(&cli.config)?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
        config.validate()?;
    }
    init_logging(&logging_config(&config)?)?;

    let output = match cli.command {
        Commands::Check { viewer, destination } => commands::check::run(&config, &viewer, &destination)?,
        Commands::Menu { viewer, menu } => commands::menu::run(&config, &viewer, &menu)?,
        Commands::Matrix => commands::matrix::run(&config)?,
        Commands::Validate => commands::validate::run(&config, &cli.config)?,
    };
    print!("{}", output);
    Ok(())
}

fn main() {
    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
