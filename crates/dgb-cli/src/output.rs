// crates/dgb-cli/src/output.rs
//
// Output formatting utilities for the DGB CLI.
// Supports table and JSON output modes.

use serde::Serialize;
use tabled::{Table, Tabled};

/// Output format for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default).
    Table,
    /// JSON output for machine consumption.
    Json,
}

impl OutputFormat {
    pub fn from_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Table
        }
    }
}

/// Format a slice of Tabled items as a table string.
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    Table::new(data).to_string()
}

/// Format a serializable value as a pretty-printed JSON string.
pub fn format_json<T: Serialize>(data: &T) -> String {
    serde_json::to_string_pretty(data)
        .unwrap_or_else(|e| format!("JSON serialization error: {}", e))
}

/// Render an optional height, using `-` for "never".
pub fn format_height(height: Option<u64>) -> String {
    height.map_or_else(|| "-".to_string(), |h| h.to_string())
}

/// Render an RPC amount field: integers as-is, fixed-point strings unquoted.
pub fn format_amount(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(&json!(72000)), "72000");
        assert_eq!(format_amount(&json!("0.00000001")), "0.00000001");
    }

    #[test]
    fn test_format_height() {
        assert_eq!(format_height(Some(5760)), "5760");
        assert_eq!(format_height(None), "-");
    }
}
