//! Typed cell values and column data types

use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};
use email_address::EmailAddress;
use serde::{Deserialize, Serialize};

/// The declared data type of a column.
///
/// Wire names match the `dataType` metadata key of a specification document.
/// Unrecognized names deserialize as [`DataType::String`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Email,
    Number,
    Enum,
    Date,
    DateTime,
    #[default]
    #[serde(other)]
    String,
}

impl DataType {
    /// Returns the wire name of this type.
    pub fn name(&self) -> &'static str {
        match self {
            DataType::String => "string",
            DataType::Email => "email",
            DataType::Number => "number",
            DataType::Enum => "enum",
            DataType::Date => "date",
            DataType::DateTime => "datetime",
        }
    }

    /// Returns `true` for types whose empty text is a real (empty) value.
    pub fn is_textual(&self) -> bool {
        matches!(self, DataType::String)
    }

    /// Parses raw text into a value of this type.
    ///
    /// Empty text on a non-string type parses to [`Value::Null`]. Returns
    /// `None` when the text cannot be read as this type.
    pub fn parse(&self, text: &str) -> Option<Value> {
        if text.is_empty() && !self.is_textual() {
            return Some(Value::Null);
        }
        match self {
            DataType::String | DataType::Email => Some(Value::Text(text.to_string())),
            DataType::Enum => Some(Value::Enum(text.to_string())),
            DataType::Number => text.trim().parse::<f64>().ok().map(Value::Number),
            DataType::Date => NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
                .ok()
                .map(Value::Date),
            DataType::DateTime => parse_datetime(text.trim()).map(Value::DateTime),
        }
    }

    /// Returns `true` if `value` can be stored in a column of this type.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) => true,
            (DataType::String, Value::Text(_)) => true,
            (DataType::Email, Value::Text(s)) => EmailAddress::is_valid(s),
            (DataType::Number, Value::Number(n)) => n.is_finite(),
            (DataType::Enum, Value::Enum(_)) => true,
            (DataType::Date, Value::Date(_)) => true,
            (DataType::DateTime, Value::DateTime(_)) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Reads RFC 3339, falling back to a bare `YYYY-MM-DD` at midnight UTC.
fn parse_datetime(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
}

/// A typed cell value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Value {
    /// Empty cell.
    #[default]
    Null,
    /// Free text (also used for email columns).
    Text(String),
    /// Numeric value.
    Number(f64),
    /// One label of an enumerated column.
    Enum(String),
    /// Calendar date.
    Date(NaiveDate),
    /// Instant in UTC.
    DateTime(DateTime<Utc>),
}

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Text(_) => "text",
            Value::Number(_) => "number",
            Value::Enum(_) => "enum",
            Value::Date(_) => "date",
            Value::DateTime(_) => "datetime",
        }
    }

    /// Renders the value the way it is shown in an editable cell.
    ///
    /// [`DataType::parse`] reads this text back to an equal value.
    pub fn to_text(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Text(s) | Value::Enum(s) => s.clone(),
            Value::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
            Value::Date(d) => d.format("%Y-%m-%d").to_string(),
            Value::DateTime(dt) => {
                if dt.time() == NaiveTime::MIN {
                    dt.format("%Y-%m-%d").to_string()
                } else {
                    dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)
                }
            }
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Number(v as f64)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::DateTime(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_text() {
        assert_eq!(DataType::String.parse(""), Some(Value::Text(String::new())));
        assert_eq!(DataType::Number.parse(""), Some(Value::Null));
        assert_eq!(DataType::Email.parse(""), Some(Value::Null));
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(DataType::Number.parse(" 42 "), Some(Value::Number(42.0)));
        assert_eq!(DataType::Number.parse("forty"), None);
    }

    #[test]
    fn test_parse_datetime_accepts_plain_date() {
        let value = DataType::DateTime.parse("2024-05-12").unwrap();
        assert_eq!(value.to_text(), "2024-05-12");

        let value = DataType::DateTime.parse("2024-05-12T10:30:00Z").unwrap();
        assert_eq!(value.to_text(), "2024-05-12T10:30:00Z");
    }

    #[test]
    fn test_datetime_text_keeps_fractional_seconds() {
        let value = DataType::DateTime.parse("2024-05-12T10:30:00.750Z").unwrap();
        let text = value.to_text();
        assert_eq!(text, "2024-05-12T10:30:00.750Z");
        assert_eq!(DataType::DateTime.parse(&text), Some(value));
    }

    #[test]
    fn test_email_acceptance() {
        assert!(DataType::Email.accepts(&Value::from("alice@company.com")));
        assert!(!DataType::Email.accepts(&Value::from("not an email")));
        assert!(DataType::Email.accepts(&Value::Null));
    }

    #[test]
    fn test_number_text_drops_integral_fraction() {
        assert_eq!(Value::Number(3.0).to_text(), "3");
        assert_eq!(Value::Number(2.5).to_text(), "2.5");
    }

    #[test]
    fn test_unknown_data_type_reads_as_string() {
        let dt: DataType = serde_json::from_str("\"uuid\"").unwrap();
        assert_eq!(dt, DataType::String);
        let dt: DataType = serde_json::from_str("\"datetime\"").unwrap();
        assert_eq!(dt, DataType::DateTime);
        let dt: DataType = serde_json::from_str("\"string\"").unwrap();
        assert_eq!(dt, DataType::String);
        assert_eq!(serde_json::to_string(&DataType::String).unwrap(), "\"string\"");
    }

    #[test]
    fn test_mismatched_variant_rejected() {
        assert!(!DataType::Number.accepts(&Value::from("12")));
        assert!(!DataType::String.accepts(&Value::Number(1.0)));
    }
}
