//! CLI command parsing and utility tests.
//!
//! Tests cover argument parsing (via clap `try_parse_from`) and the
//! wait-option translation shared by the `result` command.

// ============================================================================
// commands::common tests
// ============================================================================

mod common_tests {
    use std::time::Duration;

    use qbridge_hal::WaitOptions;

    // The CLI is a binary crate; this mirrors commands::common::wait_options.
    fn wait_options(timeout: Option<u64>, interval: u64) -> anyhow::Result<WaitOptions> {
        if interval == 0 {
            anyhow::bail!("Poll interval must be at least 1 second");
        }
        let mut options = WaitOptions::default().with_poll_interval(Duration::from_secs(interval));
        if let Some(secs) = timeout {
            options = options.with_timeout(Duration::from_secs(secs));
        }
        Ok(options)
    }

    #[test]
    fn test_wait_options_default_interval() {
        let options = wait_options(None, 5).unwrap();
        assert_eq!(options.poll_interval, Duration::from_secs(5));
        assert!(options.timeout.is_none());
        assert_eq!(options, WaitOptions::default());
    }

    #[test]
    fn test_wait_options_with_timeout() {
        let options = wait_options(Some(600), 2).unwrap();
        assert_eq!(options.timeout, Some(Duration::from_secs(600)));
        assert_eq!(options.poll_interval, Duration::from_secs(2));
    }

    #[test]
    fn test_wait_options_zero_timeout_allowed() {
        let options = wait_options(Some(0), 5).unwrap();
        assert_eq!(options.timeout, Some(Duration::ZERO));
    }

    #[test]
    fn test_wait_options_zero_interval_rejected() {
        assert!(wait_options(None, 0).is_err());
    }
}

// ============================================================================
// Clap argument parsing (test via try_parse_from on equivalent structs)
// ============================================================================

mod clap_parsing {
    use clap::{Parser, Subcommand};

    // Mirror the CLI struct for testing (since main.rs is a binary)
    #[derive(Parser)]
    #[command(name = "qbridge")]
    struct TestCli {
        #[arg(short, long, action = clap::ArgAction::Count, global = true)]
        verbose: u8,

        #[command(subcommand)]
        command: TestCommands,
    }

    #[derive(Subcommand)]
    enum TestCommands {
        Status {
            url: String,
        },
        Result {
            url: String,
            #[arg(short, long)]
            timeout: Option<u64>,
            #[arg(short, long, default_value = "5")]
            interval: u64,
            #[arg(short, long, default_value = "table")]
            format: String,
            #[arg(short, long, default_value = "circuit")]
            name: String,
        },
        Backends,
        Version,
    }

    const URL: &str = "https://runner.example/tasks/42/";

    // --- Status command ---

    #[test]
    fn test_parse_status() {
        let cli = TestCli::try_parse_from(["qbridge", "status", URL]).unwrap();
        match cli.command {
            TestCommands::Status { url } => assert_eq!(url, URL),
            _ => panic!("Expected Status command"),
        }
    }

    #[test]
    fn test_parse_status_missing_url() {
        assert!(TestCli::try_parse_from(["qbridge", "status"]).is_err());
    }

    // --- Result command ---

    #[test]
    fn test_parse_result_defaults() {
        let cli = TestCli::try_parse_from(["qbridge", "result", URL]).unwrap();
        match cli.command {
            TestCommands::Result {
                url,
                timeout,
                interval,
                format,
                name,
            } => {
                assert_eq!(url, URL);
                assert!(timeout.is_none());
                assert_eq!(interval, 5);
                assert_eq!(format, "table");
                assert_eq!(name, "circuit");
            }
            _ => panic!("Expected Result command"),
        }
    }

    #[test]
    fn test_parse_result_with_all_args() {
        let cli = TestCli::try_parse_from([
            "qbridge",
            "result",
            URL,
            "--timeout",
            "600",
            "-i",
            "2",
            "-f",
            "json",
            "--name",
            "bell",
        ])
        .unwrap();
        match cli.command {
            TestCommands::Result {
                timeout,
                interval,
                format,
                name,
                ..
            } => {
                assert_eq!(timeout, Some(600));
                assert_eq!(interval, 2);
                assert_eq!(format, "json");
                assert_eq!(name, "bell");
            }
            _ => panic!("Expected Result command"),
        }
    }

    #[test]
    fn test_parse_result_rejects_negative_timeout() {
        let result = TestCli::try_parse_from(["qbridge", "result", URL, "--timeout", "-1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_result_rejects_non_numeric_interval() {
        let result = TestCli::try_parse_from(["qbridge", "result", URL, "--interval", "soon"]);
        assert!(result.is_err());
    }

    // --- Simple commands ---

    #[test]
    fn test_parse_backends() {
        let cli = TestCli::try_parse_from(["qbridge", "backends"]).unwrap();
        assert!(matches!(cli.command, TestCommands::Backends));
    }

    #[test]
    fn test_parse_version() {
        let cli = TestCli::try_parse_from(["qbridge", "version"]).unwrap();
        assert!(matches!(cli.command, TestCommands::Version));
    }

    #[test]
    fn test_unknown_subcommand() {
        assert!(TestCli::try_parse_from(["qbridge", "submit"]).is_err());
    }

    // --- Global flags ---

    #[test]
    fn test_verbosity_counts() {
        let cli = TestCli::try_parse_from(["qbridge", "-vvv", "backends"]).unwrap();
        assert_eq!(cli.verbose, 3);

        let cli = TestCli::try_parse_from(["qbridge", "status", URL, "-v"]).unwrap();
        assert_eq!(cli.verbose, 1);

        let cli = TestCli::try_parse_from(["qbridge", "version"]).unwrap();
        assert_eq!(cli.verbose, 0);
    }
}
