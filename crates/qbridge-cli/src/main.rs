//! qbridge Command-Line Interface
//!
//! Inspect and collect results of circuits executed on remote plugin
//! runners.
//!
//! ```text
//! qbridge status https://runner.example/tasks/42/
//! qbridge result https://runner.example/tasks/42/ --timeout 600 --format json
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{backends, result, status, version};

/// qbridge - collect circuit results from remote plugin runners
#[derive(Parser)]
#[command(name = "qbridge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll a task once and print its status
    Status {
        /// Task result URL
        url: String,
    },

    /// Wait for a task to finish and print its measurement counts
    Result {
        /// Task result URL
        url: String,

        /// Give up after this many seconds (waits indefinitely if omitted)
        #[arg(short, long)]
        timeout: Option<u64>,

        /// Seconds between status polls
        #[arg(short, long, default_value = "5")]
        interval: u64,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,

        /// Circuit name recorded in the result
        #[arg(short, long, default_value = "circuit")]
        name: String,
    },

    /// List available backends
    Backends,

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Status { url } => status::execute(&url).await,

        Commands::Result {
            url,
            timeout,
            interval,
            format,
            name,
        } => result::execute(&url, timeout, interval, &format, &name).await,

        Commands::Backends => backends::execute(),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
