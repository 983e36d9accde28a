//! Polymorphic field values used as sort and comparison keys

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A polymorphic field value extracted from a record for comparison
///
/// Missing attributes are represented as `Null` and coerced per field kind
/// at comparison time: timestamps to the earliest instant, numbers to zero,
/// text to the empty string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Timestamp(DateTime<Utc>),
    Null,
}

impl FieldValue {
    /// Get the value as text if possible
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as a number if possible
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the value as a timestamp if possible
    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            FieldValue::Timestamp(t) => Some(*t),
            _ => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Timestamp coercion: missing values sort as the earliest instant
    pub fn timestamp_or_min(&self) -> DateTime<Utc> {
        self.as_timestamp().unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Numeric coercion: missing values compare as zero
    pub fn number_or_zero(&self) -> f64 {
        self.as_number().unwrap_or(0.0)
    }

    /// Text coercion: missing values compare as the empty string
    pub fn text_or_empty(&self) -> &str {
        self.as_text().unwrap_or("")
    }
}

impl From<Option<DateTime<Utc>>> for FieldValue {
    fn from(value: Option<DateTime<Utc>>) -> Self {
        value.map_or(FieldValue::Null, FieldValue::Timestamp)
    }
}

impl From<Option<f64>> for FieldValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(FieldValue::Null, FieldValue::Number)
    }
}

impl From<Option<String>> for FieldValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(FieldValue::Null, FieldValue::Text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_value_text() {
        let value = FieldValue::Text("test".to_string());
        assert_eq!(value.as_text(), Some("test"));
        assert_eq!(value.as_number(), None);
        assert!(!value.is_null());
    }

    #[test]
    fn test_field_value_number() {
        let value = FieldValue::Number(4.0);
        assert_eq!(value.as_number(), Some(4.0));
        assert_eq!(value.as_text(), None);
    }

    #[test]
    fn test_field_value_null() {
        let value = FieldValue::Null;
        assert!(value.is_null());
        assert_eq!(value.as_text(), None);
        assert_eq!(value.as_timestamp(), None);
    }

    #[test]
    fn test_timestamp_coercion() {
        assert_eq!(
            FieldValue::Null.timestamp_or_min(),
            DateTime::<Utc>::MIN_UTC
        );

        let now = Utc::now();
        assert_eq!(FieldValue::Timestamp(now).timestamp_or_min(), now);
    }

    #[test]
    fn test_number_coercion() {
        assert_eq!(FieldValue::Null.number_or_zero(), 0.0);
        assert_eq!(FieldValue::Number(3.5).number_or_zero(), 3.5);
    }

    #[test]
    fn test_text_coercion() {
        assert_eq!(FieldValue::Null.text_or_empty(), "");
        assert_eq!(FieldValue::Text("שלום".to_string()).text_or_empty(), "שלום");
    }

    #[test]
    fn test_from_optional_timestamp() {
        let now = Utc::now();
        assert_eq!(FieldValue::from(Some(now)), FieldValue::Timestamp(now));
        assert_eq!(FieldValue::from(None::<DateTime<Utc>>), FieldValue::Null);
    }

    #[test]
    fn test_serde_roundtrip() {
        let original = FieldValue::Text("hello".to_string());
        let json = serde_json::to_string(&original).expect("serialize should succeed");
        let restored: FieldValue =
            serde_json::from_str(&json).expect("deserialize should succeed");
        assert_eq!(original, restored);
    }
}
