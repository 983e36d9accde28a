//! Record trait defining the core abstraction for filterable entities

use crate::core::field::FieldValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use uuid::Uuid;

/// Base trait for all records subject to filtering, sorting and aggregation.
///
/// A record carries:
/// - id: unique, stable identifier (uniqueness is enforced by the store)
/// - occurred_at: the timestamp attribute, optional
/// - score: a bounded numeric attribute (e.g. a 1–5 session rating), optional
/// - reference slots: named reference-id attributes pointing at entities
///   resolved elsewhere (staff, categories)
/// - text fields: free-text attributes included in search
pub trait Record: Clone + Send + Sync + 'static {
    /// Get the unique identifier for this record
    fn id(&self) -> Uuid;

    /// Get the timestamp attribute
    fn occurred_at(&self) -> Option<DateTime<Utc>>;

    /// Get the bounded numeric attribute
    fn score(&self) -> Option<u8>;

    /// Declared inclusive bounds for the numeric attribute
    fn score_bounds() -> RangeInclusive<u8> {
        1..=5
    }

    /// Names of the reference slots this record type carries
    /// (e.g. `["staff", "category"]`)
    fn reference_slots() -> &'static [&'static str];

    /// Get the reference id held in the given slot
    fn reference(&self, slot: &str) -> Option<Uuid>;

    /// Names of the free-text fields included in search
    fn text_field_names() -> &'static [&'static str];

    /// Get the value of a free-text field by name
    fn text_field(&self, name: &str) -> Option<&str>;

    /// All free-text values in declaration order
    fn text_values(&self) -> Vec<&str> {
        Self::text_field_names()
            .iter()
            .filter_map(|name| self.text_field(name))
            .collect()
    }

    /// The score, if present and within the declared bounds.
    ///
    /// Payloads occasionally carry values outside the bounds; those are
    /// treated as missing everywhere the engine consumes a score.
    fn bounded_score(&self) -> Option<u8> {
        self.score()
            .filter(|score| Self::score_bounds().contains(score))
    }

    /// The numeric attribute as a comparison value
    fn score_value(&self) -> FieldValue {
        FieldValue::from(self.bounded_score().map(f64::from))
    }
}

/// One treatment session for a child, as returned by the remote API.
///
/// The bundled concrete record type; consumers with other shapes implement
/// [`Record`] themselves.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TreatmentSession {
    pub id: Uuid,

    /// The child this session belongs to (the fetch scope key)
    pub child_id: Uuid,

    /// When the session took place
    #[serde(default)]
    pub occurred_at: Option<DateTime<Utc>>,

    /// Staff member who ran the session
    #[serde(default)]
    pub staff_id: Option<Uuid>,

    /// Treatment category
    #[serde(default)]
    pub category_id: Option<Uuid>,

    /// Session rating, 1–5
    #[serde(default)]
    pub rating: Option<u8>,

    /// Free-text session description
    #[serde(default)]
    pub summary: String,

    /// Free-text highlight of the session
    #[serde(default)]
    pub highlight: Option<String>,
}

/// Slot names for [`TreatmentSession`] references
pub const SLOT_STAFF: &str = "staff";
pub const SLOT_CATEGORY: &str = "category";

impl Record for TreatmentSession {
    fn id(&self) -> Uuid {
        self.id
    }

    fn occurred_at(&self) -> Option<DateTime<Utc>> {
        self.occurred_at
    }

    fn score(&self) -> Option<u8> {
        self.rating
    }

    fn reference_slots() -> &'static [&'static str] {
        &[SLOT_STAFF, SLOT_CATEGORY]
    }

    fn reference(&self, slot: &str) -> Option<Uuid> {
        match slot {
            SLOT_STAFF => self.staff_id,
            SLOT_CATEGORY => self.category_id,
            _ => None,
        }
    }

    fn text_field_names() -> &'static [&'static str] {
        &["summary", "highlight"]
    }

    fn text_field(&self, name: &str) -> Option<&str> {
        match name {
            "summary" => Some(self.summary.as_str()),
            "highlight" => self.highlight.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> TreatmentSession {
        TreatmentSession {
            id: Uuid::new_v4(),
            child_id: Uuid::new_v4(),
            occurred_at: Some(Utc::now()),
            staff_id: Some(Uuid::new_v4()),
            category_id: None,
            rating: Some(4),
            summary: "Worked on fine motor skills".to_string(),
            highlight: Some("First full grip".to_string()),
        }
    }

    #[test]
    fn test_reference_slots() {
        let s = session();
        assert_eq!(s.reference(SLOT_STAFF), s.staff_id);
        assert_eq!(s.reference(SLOT_CATEGORY), None);
        assert_eq!(s.reference("nonsense"), None);
    }

    #[test]
    fn test_text_fields() {
        let s = session();
        assert_eq!(s.text_field("summary"), Some("Worked on fine motor skills"));
        assert_eq!(s.text_field("highlight"), Some("First full grip"));
        assert_eq!(s.text_field("other"), None);
        assert_eq!(s.text_values().len(), 2);
    }

    #[test]
    fn test_text_values_skip_missing() {
        let mut s = session();
        s.highlight = None;
        assert_eq!(s.text_values(), vec!["Worked on fine motor skills"]);
    }

    #[test]
    fn test_score_value() {
        let mut s = session();
        assert_eq!(s.score_value(), FieldValue::Number(4.0));
        s.rating = None;
        assert_eq!(s.score_value(), FieldValue::Null);
    }

    #[test]
    fn test_score_bounds_default() {
        assert_eq!(TreatmentSession::score_bounds(), 1..=5);
    }

    #[test]
    fn test_out_of_bound_score_treated_as_missing() {
        let mut s = session();
        s.rating = Some(9);
        assert_eq!(s.bounded_score(), None);
        assert_eq!(s.score_value(), FieldValue::Null);

        s.rating = Some(5);
        assert_eq!(s.bounded_score(), Some(5));
    }

    #[test]
    fn test_deserialize_sparse_payload() {
        let json = serde_json::json!({
            "id": Uuid::new_v4(),
            "child_id": Uuid::new_v4(),
        });
        let s: TreatmentSession =
            serde_json::from_value(json).expect("sparse payload should deserialize");
        assert!(s.occurred_at.is_none());
        assert!(s.rating.is_none());
        assert_eq!(s.summary, "");
    }
}
