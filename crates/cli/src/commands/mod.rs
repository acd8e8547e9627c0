//! # CLI Commands
//!
//! Implementation of CLI commands for the volleyball statistics service.

pub mod completions;
pub mod validate;

use std::time::Duration;

use clap::{Args, Subcommand};
use server::{
    cache::{DEFAULT_ACTIONS_TTL_SECS, DEFAULT_CATALOG_TTL_SECS, DEFAULT_MAX_ENTRIES},
    CacheConfig,
};

/// Available commands for the volley CLI
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the API server
    Serve(ServeArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),

    /// Verify configuration
    Validate,
}

/// Arguments for the serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Server host to bind to
    #[arg(long, env = "VOLLEY_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Server port to bind to; falls back to `PORT`, then 8080
    #[arg(short, long, env = "VOLLEY_PORT")]
    pub port: Option<u16>,

    /// Seconds catalog queries (teams, seasons, matches, players) stay cached
    #[arg(long, env = "VOLLEY_CACHE_CATALOG_TTL", default_value_t = DEFAULT_CATALOG_TTL_SECS)]
    pub catalog_ttl: u64,

    /// Seconds action queries stay cached
    #[arg(long, env = "VOLLEY_CACHE_ACTIONS_TTL", default_value_t = DEFAULT_ACTIONS_TTL_SECS)]
    pub actions_ttl: u64,

    /// Maximum number of cached query results
    #[arg(long, env = "VOLLEY_CACHE_CAPACITY", default_value_t = DEFAULT_MAX_ENTRIES)]
    pub cache_capacity: usize,
}

impl ServeArgs {
    /// Query cache settings from the arguments
    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            catalog_ttl: Duration::from_secs(self.catalog_ttl),
            actions_ttl: Duration::from_secs(self.actions_ttl),
            max_entries: self.cache_capacity.max(1),
        }
    }
}

/// Arguments for the completions command
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
