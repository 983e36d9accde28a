//! Filter criteria and predicate composition
//!
//! Independent criteria (free-text search, date range, reference equality,
//! score range) combine with logical AND. Each field is optional; an unset
//! field imposes no constraint.

use crate::core::error::{ViewError, ViewResult};
use crate::core::record::Record;
use crate::resolver::ResolverRegistry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Whether date-range filtering compares calendar dates or full instants
///
/// The admin UI's pickers are date-granular, so `DateOnly` is the default;
/// `Exact` keeps time-of-day significant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DateFilterMode {
    #[default]
    DateOnly,
    Exact,
}

/// Exact-equality constraint on one reference slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceFilter {
    pub slot: String,
    pub id: Uuid,
}

/// The full set of simultaneous filter criteria
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FilterCriteria {
    /// Case-insensitive substring match over text fields and resolved
    /// reference names
    pub search_text: Option<String>,

    /// Inclusive lower bound on the timestamp attribute
    pub date_from: Option<DateTime<Utc>>,

    /// Inclusive upper bound on the timestamp attribute
    pub date_to: Option<DateTime<Utc>>,

    /// Exact equality on one reference slot
    pub reference: Option<ReferenceFilter>,

    /// Inclusive bounds on the score attribute
    pub score_range: Option<(u8, u8)>,
}

impl FilterCriteria {
    /// True when no criterion is set
    pub fn is_empty(&self) -> bool {
        *self == FilterCriteria::default()
    }

    /// Reject malformed criteria: inverted date range or inverted score range
    pub fn validate(&self) -> ViewResult<()> {
        if let (Some(from), Some(to)) = (self.date_from, self.date_to)
            && to < from
        {
            return Err(ViewError::invalid(
                "date_range",
                format!("'to' ({to}) is earlier than 'from' ({from})"),
            ));
        }
        if let Some((min, max)) = self.score_range
            && min > max
        {
            return Err(ViewError::invalid(
                "score_range",
                format!("min ({min}) is greater than max ({max})"),
            ));
        }
        Ok(())
    }

    /// Evaluate all criteria against one record (logical AND)
    pub fn matches<R: Record>(
        &self,
        record: &R,
        resolvers: &ResolverRegistry,
        mode: DateFilterMode,
    ) -> bool {
        self.matches_search(record, resolvers)
            && self.matches_dates(record, mode)
            && self.matches_reference(record)
            && self.matches_score(record)
    }

    fn matches_search<R: Record>(&self, record: &R, resolvers: &ResolverRegistry) -> bool {
        let Some(term) = self.search_text.as_deref() else {
            return true;
        };
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }

        for text in record.text_values() {
            if text.to_lowercase().contains(&term) {
                return true;
            }
        }

        // Reference names take part in the search. A slot whose directory has
        // not loaded yet cannot exclude the record (default pass); the view
        // re-derives once the resolver becomes ready.
        let mut unresolved = false;
        for slot in R::reference_slots() {
            let Some(id) = record.reference(slot) else {
                continue;
            };
            if !resolvers.is_ready(slot) {
                unresolved = true;
                continue;
            }
            if let Some(name) = resolvers.display_name(slot, id)
                && name.to_lowercase().contains(&term)
            {
                return true;
            }
        }

        unresolved
    }

    fn matches_dates<R: Record>(&self, record: &R, mode: DateFilterMode) -> bool {
        if self.date_from.is_none() && self.date_to.is_none() {
            return true;
        }
        let Some(at) = record.occurred_at() else {
            // A bounded range cannot include a record with no timestamp
            return false;
        };

        match mode {
            DateFilterMode::Exact => {
                self.date_from.is_none_or(|from| at >= from)
                    && self.date_to.is_none_or(|to| at <= to)
            }
            DateFilterMode::DateOnly => {
                let day = at.date_naive();
                self.date_from.is_none_or(|from| day >= from.date_naive())
                    && self.date_to.is_none_or(|to| day <= to.date_naive())
            }
        }
    }

    fn matches_reference<R: Record>(&self, record: &R) -> bool {
        self.reference
            .as_ref()
            .is_none_or(|filter| record.reference(&filter.slot) == Some(filter.id))
    }

    fn matches_score<R: Record>(&self, record: &R) -> bool {
        self.score_range.is_none_or(|(min, max)| {
            record
                .bounded_score()
                .is_some_and(|score| score >= min && score <= max)
        })
    }
}
