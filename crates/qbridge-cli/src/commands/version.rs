//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - result collection for remote plugin runners",
        style("qbridge").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qbridge-hal             Job, backend and result abstractions");
    println!("  qbridge-adapter-plugin  Plugin runner polling adapter");
    println!("  qbridge-cli             Command-line interface");
    println!();
    println!("License:    {}", style("Apache-2.0").dim());
}
