//! Published backend capabilities.
//!
//! Capabilities are cached at construction time so that callers can consult
//! them synchronously before submitting work.

use serde::{Deserialize, Serialize};

/// Static description of what a backend accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    /// Backend name.
    pub name: String,
    /// Maximum number of circuits accepted by a single job.
    pub max_circuits: usize,
    /// Shot count used when the caller does not specify one.
    pub default_shots: u32,
    /// Circuit encodings accepted for submission.
    pub circuit_formats: Vec<String>,
}

impl Capabilities {
    /// Capabilities of a remote plugin runner: one OpenQASM circuit per job.
    pub fn plugin_runner(name: impl Into<String>, default_shots: u32) -> Self {
        Self {
            name: name.into(),
            max_circuits: 1,
            default_shots,
            circuit_formats: vec![crate::circuit::QASM_CONTENT_TYPE.to_string()],
        }
    }

    /// Check a requested circuit count against `max_circuits`.
    pub fn accepts_circuit_count(&self, count: usize) -> bool {
        count >= 1 && count <= self.max_circuits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plugin_runner_single_circuit() {
        let caps = Capabilities::plugin_runner("plugin-runner", 1024);
        assert_eq!(caps.max_circuits, 1);
        assert_eq!(caps.default_shots, 1024);
        assert!(caps.accepts_circuit_count(1));
        assert!(!caps.accepts_circuit_count(0));
        assert!(!caps.accepts_circuit_count(2));
        assert_eq!(caps.circuit_formats, vec!["text/x-qasm"]);
    }
}
