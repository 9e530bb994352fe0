//! Measurement-counts extraction from plugin outputs.

use qbridge_hal::{Counts, HalError, HalResult};

use crate::api::OutputDescriptor;

/// Substring identifying the counts output among a task's outputs.
pub const COUNTS_OUTPUT_MARKER: &str = "result-counts";

/// Entity metadata the plugin runner adds to every stored JSON document.
const METADATA_FIELDS: [&str; 2] = ["ID", "href"];

/// Pick the counts output: the first one, in service order, whose name
/// contains [`COUNTS_OUTPUT_MARKER`].
pub fn select_counts_output(outputs: &[OutputDescriptor]) -> HalResult<&OutputDescriptor> {
    outputs
        .iter()
        .find(|o| o.name.contains(COUNTS_OUTPUT_MARKER))
        .ok_or_else(|| {
            let names: Vec<&str> = outputs.iter().map(|o| o.name.as_str()).collect();
            HalError::MissingOutput(format!(
                "no output named '*{COUNTS_OUTPUT_MARKER}*' among [{}]",
                names.join(", ")
            ))
        })
}

/// Interpret a counts document as a bitstring → count histogram.
///
/// `ID` and `href` are dropped; every other value must be a non-negative
/// integer, and the values must sum to at most `u64::MAX`.
pub fn parse_counts(document: serde_json::Value) -> HalResult<Counts> {
    let mut fields = match document {
        serde_json::Value::Object(fields) => fields,
        other => {
            return Err(HalError::MalformedCounts(format!(
                "expected a JSON object, got {other}"
            )));
        }
    };

    for key in METADATA_FIELDS {
        fields.remove(key);
    }

    let mut counts = Counts::new();
    let mut total: u64 = 0;
    for (bitstring, value) in fields {
        let count = value.as_u64().ok_or_else(|| {
            HalError::MalformedCounts(format!(
                "count for '{bitstring}' is not a non-negative integer: {value}"
            ))
        })?;
        total = total.checked_add(count).ok_or_else(|| {
            HalError::MalformedCounts(format!("shot total overflows at '{bitstring}'"))
        })?;
        counts.insert(bitstring, count);
    }
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn output(name: &str, href: &str) -> OutputDescriptor {
        OutputDescriptor {
            name: name.into(),
            href: href.into(),
            data_type: None,
            content_type: None,
        }
    }

    #[test]
    fn test_select_counts_output() {
        let outputs = vec![output("other", "a"), output("x-result-counts", "b")];
        assert_eq!(select_counts_output(&outputs).unwrap().href, "b");
    }

    #[test]
    fn test_select_first_of_several_matches() {
        let outputs = vec![
            output("result-counts-2.json", "first"),
            output("result-counts-1.json", "second"),
        ];
        assert_eq!(select_counts_output(&outputs).unwrap().href, "first");
    }

    #[test]
    fn test_select_missing_output() {
        let outputs = vec![output("log.txt", "a")];
        let err = select_counts_output(&outputs).unwrap_err();
        assert!(matches!(err, HalError::MissingOutput(msg) if msg.contains("log.txt")));
        assert!(matches!(
            select_counts_output(&[]),
            Err(HalError::MissingOutput(_))
        ));
    }

    #[test]
    fn test_parse_counts_strips_metadata() {
        let counts = parse_counts(json!({"ID": "1", "href": "b", "00": 512, "01": 512})).unwrap();
        assert_eq!(counts.len(), 2);
        assert_eq!(counts.get("00"), 512);
        assert_eq!(counts.get("01"), 512);
        assert_eq!(counts.total_shots(), 1024);
    }

    #[test]
    fn test_parse_counts_rejects_string_value() {
        let err = parse_counts(json!({"00": "many"})).unwrap_err();
        assert!(matches!(err, HalError::MalformedCounts(msg) if msg.contains("00")));
    }

    #[test]
    fn test_parse_counts_rejects_negative_and_fractional() {
        assert!(matches!(
            parse_counts(json!({"0": -3})),
            Err(HalError::MalformedCounts(_))
        ));
        assert!(matches!(
            parse_counts(json!({"0": 1.5})),
            Err(HalError::MalformedCounts(_))
        ));
    }

    #[test]
    fn test_parse_counts_rejects_overflowing_total() {
        let err = parse_counts(json!({"0": u64::MAX, "1": 1})).unwrap_err();
        assert!(matches!(err, HalError::MalformedCounts(msg) if msg.contains("overflow")));

        let counts = parse_counts(json!({"0": u64::MAX, "1": 0})).unwrap();
        assert_eq!(counts.total_shots(), u64::MAX);
    }

    #[test]
    fn test_parse_counts_rejects_non_object() {
        assert!(matches!(
            parse_counts(json!([1, 2, 3])),
            Err(HalError::MalformedCounts(_))
        ));
    }

    #[test]
    fn test_parse_counts_empty_after_metadata() {
        let counts = parse_counts(json!({"ID": "7", "href": "x"})).unwrap();
        assert!(counts.is_empty());
        assert_eq!(counts.total_shots(), 0);
    }

    proptest! {
        #[test]
        fn prop_parse_preserves_counts(
            entries in prop::collection::btree_map("[01]{1,6}", 0u64..1_000_000, 0..24),
            id in "[a-z0-9]{1,8}",
        ) {
            let mut doc = serde_json::Map::new();
            doc.insert("ID".into(), json!(id));
            doc.insert("href".into(), json!("https://runner/files/x"));
            for (k, v) in &entries {
                doc.insert(k.clone(), json!(v));
            }

            let counts = parse_counts(serde_json::Value::Object(doc)).unwrap();
            prop_assert_eq!(counts.len(), entries.len());
            prop_assert_eq!(counts.total_shots(), entries.values().sum::<u64>());
            for (k, v) in &entries {
                prop_assert_eq!(counts.get(k), *v);
            }
        }
    }
}
