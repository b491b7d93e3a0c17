//! Command line entry points
//!
//! - `serve`: run the HTTP API
//! - `migrate`: create the PostgreSQL schema and seed the system user

pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

/// User lifecycle service
#[derive(Parser)]
#[command(name = "user-lifecycle-service")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API (default)
    Serve,

    /// Prepare the PostgreSQL schema and exit
    Migrate,
}
