//! # Volley CLI
//!
//! Command-line interface for the volleyball statistics service.
//!
//! ## Usage
//!
//! ```bash
//! volley serve              # Start the API server
//! volley validate           # Check the environment
//! volley completions bash   # Print shell completions
//! ```

mod commands;
mod config;
mod serve;

use clap::{CommandFactory as _, Parser};
use commands::Commands;
use error::Result;

/// Volleyball match statistics dashboard API
#[derive(Parser, Debug)]
#[command(name = "volley")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level or filter directive (debug, info, `server=debug`)
    #[arg(short = 'L', long, env = "RUST_LOG", default_value = "info", global = true)]
    log_level: String,

    /// Output format (json, pretty, compact)
    #[arg(short, long, env = "VOLLEY_LOG_FORMAT", default_value = "compact", global = true)]
    log_format: String,

    /// Also write JSON logs to this file, rotated daily
    #[arg(long, env = "VOLLEY_LOG_FILE", global = true)]
    log_file: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // completion scripts go to stdout untouched
    if let Commands::Completions(args) = &cli.command {
        return commands::completions::completions(args.shell, &mut Cli::command(), &mut std::io::stdout());
    }

    let _guard = logging::init(&cli.log_level, &cli.log_format, cli.log_file.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    logging::info!(target: "app", command = ?cli.command, "Volley CLI starting...");

    match cli.command {
        Commands::Serve(args) => {
            let db_config = config::DatabaseConfig::from_env().map_err(|e| anyhow::anyhow!("{}", e))?;
            serve::serve(&db_config, &args).await?;
        },
        Commands::Validate => commands::validate::validate()?,
        Commands::Completions(_) => {},
    }

    logging::info!(target: "app", "Volley CLI completed successfully");
    Ok(())
}
