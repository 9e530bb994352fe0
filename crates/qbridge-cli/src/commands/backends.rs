//! Backends command implementation.

use anyhow::Result;
use console::style;

use qbridge_adapter_plugin::register_plugin_backend;
use qbridge_hal::{BackendConfig, BackendRegistry};

use super::common::token_from_env;

/// Execute the backends command.
pub fn execute() -> Result<()> {
    let mut registry = BackendRegistry::new();
    register_plugin_backend(&mut registry);

    println!("{} Available backends:\n", style("qbridge").cyan().bold());

    for name in registry.available_backends() {
        let mut config = BackendConfig::new(&name);
        if let Some(token) = token_from_env() {
            config = config.with_token(token);
        }

        match registry.create(&name, config) {
            Ok(backend) => {
                let caps = backend.capabilities();
                println!(
                    "  {} {} ({})",
                    style("●").green(),
                    style(&caps.name).bold(),
                    backend.version()
                );
                println!("    Max circuits per job: {}", caps.max_circuits);
                println!("    Default shots: {}", caps.default_shots);
                println!("    Formats: {}", caps.circuit_formats.join(", "));
            }
            Err(e) => {
                println!(
                    "  {} {} (unavailable: {})",
                    style("○").dim(),
                    style(&name).dim(),
                    e
                );
            }
        }
        println!();
    }

    Ok(())
}
