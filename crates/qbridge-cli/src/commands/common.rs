//! Shared helpers for CLI commands.

use std::time::Duration;

use anyhow::{Context, Result};
use console::style;
use tracing::debug;

use qbridge_adapter_plugin::PluginBackend;
use qbridge_hal::{NormalizedResult, WaitOptions};

/// Environment variable holding an optional bearer token for the runner.
pub const TOKEN_ENV: &str = "QBRIDGE_TOKEN";

/// Read the runner token from [`TOKEN_ENV`], ignoring empty values.
pub fn token_from_env() -> Option<String> {
    std::env::var(TOKEN_ENV).ok().filter(|t| !t.trim().is_empty())
}

/// Create the plugin backend used by `status` and `result`.
pub fn create_backend() -> Result<PluginBackend> {
    let token = token_from_env();
    if token.is_some() {
        debug!("Using bearer token from {TOKEN_ENV}");
    }
    PluginBackend::with_token(token).context("Failed to create HTTP client")
}

/// Translate command-line seconds into wait options.
pub fn wait_options(timeout: Option<u64>, interval: u64) -> Result<WaitOptions> {
    if interval == 0 {
        anyhow::bail!("Poll interval must be at least 1 second");
    }

    let mut options = WaitOptions::default().with_poll_interval(Duration::from_secs(interval));
    if let Some(secs) = timeout {
        options = options.with_timeout(Duration::from_secs(secs));
    }
    Ok(options)
}

/// Print a normalized result as a histogram table.
pub fn print_results(result: &NormalizedResult) {
    println!(
        "\n{} Results for {} ({} shots):",
        style("✓").green().bold(),
        style(&result.circuit_name).bold(),
        result.shots
    );

    let sorted = result.counts.sorted();
    let total = result.counts.total_shots().max(1) as f64;

    for (bitstring, count) in sorted.iter().take(16) {
        let prob = **count as f64 / total * 100.0;
        let bar_len = (prob / 2.0).round() as usize;
        let bar: String = "█".repeat(bar_len);

        println!(
            "  {}: {:>6} ({:>5.2}%) {}",
            style(bitstring).cyan(),
            count,
            prob,
            style(bar).green()
        );
    }

    if sorted.len() > 16 {
        println!("  ... and {} more outcomes", sorted.len() - 16);
    }

    println!(
        "\n  Backend:  {} {}",
        result.backend_name,
        style(&result.backend_version).dim()
    );
    println!(
        "  Received: {}",
        style(result.date.format("%Y-%m-%d %H:%M:%S UTC")).yellow()
    );
}
