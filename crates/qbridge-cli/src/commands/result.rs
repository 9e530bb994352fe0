//! Result command implementation.
//!
//! Wait for a plugin task to finish, then display its counts.

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use qbridge_hal::{Circuit, HalError, Job};

use super::common::{create_backend, print_results, wait_options};

/// Execute the result command.
pub async fn execute(
    url: &str,
    timeout: Option<u64>,
    interval: u64,
    format: &str,
    name: &str,
) -> Result<()> {
    let options = wait_options(timeout, interval)?;
    let backend = create_backend()?;
    let job = backend.attach(url, Circuit::from_qasm(name, ""));

    match timeout {
        Some(secs) => println!(
            "{} Waiting for task {} (timeout: {}s)",
            style("→").cyan().bold(),
            style(url).dim(),
            secs
        ),
        None => println!(
            "{} Waiting for task {}",
            style("→").cyan().bold(),
            style(url).dim()
        ),
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.set_message(format!("Polling every {interval}s..."));
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));

    let outcome = job.result(options).await;
    spinner.finish_and_clear();

    let result = match outcome {
        Ok(result) => result,
        Err(HalError::Timeout(_)) => anyhow::bail!(
            "Timeout after {}s. Task {} has not finished. Use 'qbridge status {}' to check later.",
            timeout.unwrap_or_default(),
            url,
            url
        ),
        Err(e) => anyhow::bail!("Failed to get result: {e}"),
    };

    match format {
        "json" => {
            let json = serde_json::to_string_pretty(&result)
                .map_err(|e| anyhow::anyhow!("JSON serialization failed: {e}"))?;
            println!("{json}");
        }
        _ => {
            print_results(&result);
        }
    }

    Ok(())
}
