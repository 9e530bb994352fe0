//! Status command implementation.
//!
//! Poll a plugin task once and report its status.

use anyhow::Result;
use console::style;

use qbridge_hal::{Circuit, Job, JobStatus};

use super::common::create_backend;

/// Execute the status command.
pub async fn execute(url: &str) -> Result<()> {
    let backend = create_backend()?;
    let job = backend.attach(url, Circuit::from_qasm("circuit", ""));

    let status = job
        .status()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to get status: {e}"))?;

    let status_styled = match status {
        JobStatus::Done => style(status).green().bold(),
        JobStatus::Error => style(status).red().bold(),
        JobStatus::Running => style(status).yellow().bold(),
    };

    println!(
        "{} Task {} status: {}",
        style("→").cyan().bold(),
        style(url).dim(),
        status_styled
    );

    if status.is_terminal() {
        println!("  Terminal: {}", style("yes").dim());
    }

    Ok(())
}
