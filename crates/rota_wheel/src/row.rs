//! Row data
//!
//! Rows are normalized once when loaded: a plain value becomes a row whose
//! text is the value itself. After loading, a row set only changes through a
//! full replacement.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The value a row stands for
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowValue {
    Int(i64),
    Text(String),
}

impl fmt::Display for RowValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowValue::Int(n) => write!(f, "{}", n),
            RowValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RowValue {
    fn from(n: i64) -> Self {
        RowValue::Int(n)
    }
}

impl From<i32> for RowValue {
    fn from(n: i32) -> Self {
        RowValue::Int(n as i64)
    }
}

impl From<&str> for RowValue {
    fn from(s: &str) -> Self {
        RowValue::Text(s.to_string())
    }
}

impl From<String> for RowValue {
    fn from(s: String) -> Self {
        RowValue::Text(s)
    }
}

/// A single selectable (or disabled) row
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RowEntry")]
pub struct Row {
    pub value: RowValue,
    pub text: String,
    pub disabled: bool,
}

impl Row {
    /// Create an enabled row
    pub fn new(value: impl Into<RowValue>, text: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
            disabled: false,
        }
    }

    /// Create a row displaying its own value
    pub fn plain(value: impl Into<RowValue>) -> Self {
        let value = value.into();
        Self {
            text: value.to_string(),
            value,
            disabled: false,
        }
    }

    /// Mark the row disabled (builder pattern)
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Whether the wheel may come to rest on this row
    pub fn is_selectable(&self) -> bool {
        !self.disabled
    }
}

impl From<RowValue> for Row {
    fn from(value: RowValue) -> Self {
        Row::plain(value)
    }
}

impl From<&str> for Row {
    fn from(s: &str) -> Self {
        Row::plain(s)
    }
}

impl From<String> for Row {
    fn from(s: String) -> Self {
        Row::plain(s)
    }
}

impl From<i64> for Row {
    fn from(n: i64) -> Self {
        Row::plain(n)
    }
}

impl From<i32> for Row {
    fn from(n: i32) -> Self {
        Row::plain(n)
    }
}

/// Serialized row entry: either a bare value or a full table
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
enum RowEntry {
    Plain(RowValue),
    Full {
        value: RowValue,
        #[serde(default)]
        text: Option<String>,
        #[serde(default)]
        disabled: bool,
    },
}

impl From<RowEntry> for Row {
    fn from(entry: RowEntry) -> Self {
        match entry {
            RowEntry::Plain(value) => Row::plain(value),
            RowEntry::Full {
                value,
                text,
                disabled,
            } => Row {
                text: text.unwrap_or_else(|| value.to_string()),
                value,
                disabled,
            },
        }
    }
}

/// Normalize a sequence of row-like entries into rows
pub fn normalize_rows<I, R>(rows: I) -> Vec<Row>
where
    I: IntoIterator<Item = R>,
    R: Into<Row>,
{
    rows.into_iter().map(Into::into).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_rows_use_value_as_text() {
        let rows = normalize_rows(["Apple", "Pear"]);
        assert_eq!(rows[0].text, "Apple");
        assert_eq!(rows[0].value, RowValue::Text("Apple".into()));
        assert!(rows[1].is_selectable());

        let numbers = normalize_rows([2024i64, 2025]);
        assert_eq!(numbers[1].text, "2025");
        assert_eq!(numbers[1].value, RowValue::Int(2025));
    }

    #[test]
    fn test_disabled_builder() {
        let row = Row::new(3, "March").disabled();
        assert!(row.disabled);
        assert!(!row.is_selectable());
        assert_eq!(row.text, "March");
    }

    #[test]
    fn test_deserialize_mixed_entries() {
        let rows: Vec<Row> = serde_json::from_str(
            r#"["Mon", 7, {"value": "tue", "text": "Tuesday"}, {"value": 3, "disabled": true}]"#,
        )
        .unwrap();

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], Row::plain("Mon"));
        assert_eq!(rows[1], Row::plain(7));
        assert_eq!(rows[2].text, "Tuesday");
        assert_eq!(rows[2].value, RowValue::from("tue"));
        assert_eq!(rows[3].text, "3");
        assert!(rows[3].disabled);
    }
}
