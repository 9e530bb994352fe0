//! Circuit descriptions handed to backends.
//!
//! The plugin service consumes circuits as OpenQASM text, transported inline
//! as `data:` URLs.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use serde::{Deserialize, Serialize};

/// Content type of OpenQASM sources.
pub const QASM_CONTENT_TYPE: &str = "text/x-qasm";

/// A named quantum circuit in OpenQASM form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Circuit {
    /// Human-readable circuit name, carried into results.
    pub name: String,
    /// OpenQASM source.
    pub source: String,
}

impl Circuit {
    /// Create a circuit from an OpenQASM source.
    pub fn from_qasm(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Encode the source as a `data:text/x-qasm;base64,...` URL.
    pub fn to_data_url(&self) -> String {
        text_to_data_url(&self.source, QASM_CONTENT_TYPE)
    }
}

/// Encode `text` as a base64 `data:` URL with the given content type.
pub fn text_to_data_url(text: &str, content_type: &str) -> String {
    format!("data:{content_type};base64,{}", BASE64.encode(text.as_bytes()))
}
