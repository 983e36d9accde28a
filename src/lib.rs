//! # careview
//!
//! An in-memory record filtering, sorting, pagination and statistics engine
//! for administrative views over childcare treatment records.
//!
//! Given a flat collection of records fetched from a remote source, the
//! engine computes a filtered subset from multiple simultaneous criteria,
//! sorts it, slices it into pages, and derives aggregate statistics — all
//! kept consistent as criteria change interactively.
//!
//! ## Features
//!
//! - **Explicit pure pipeline**: every mutation reruns one deliberate
//!   `derive` pass; no hidden reactive recomputation
//! - **Composable criteria**: free-text search, date range, reference
//!   equality and score range, combined with logical AND
//! - **Quick filter presets**: mutually exclusive shortcuts; any manual edit
//!   disowns the active preset
//! - **Type-aware stable sorting**: descending is the negated ascending
//!   comparator, so directions never diverge in tie-breaking
//! - **Statistics over the whole filtered set**: counts, one-decimal average
//!   and grouped distributions with a reserved unknown bucket
//! - **Stale-fetch protection**: monotonically increasing fetch tickets;
//!   late responses for superseded requests are discarded
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use careview::prelude::*;
//!
//! let mut view = RecordView::new(ViewConfig::default(), source, child_id)?;
//! view.register_resolver(SLOT_STAFF, staff_directory);
//!
//! view.refresh().await?;
//! view.apply_preset(QuickFilter::ThisWeek);
//! view.set_sort(SortKey::OccurredAt, SortDirection::Descending);
//!
//! for session in view.visible_page() {
//!     // render
//! }
//! let stats = view.statistics();
//! ```

pub mod config;
pub mod core;
pub mod resolver;
pub mod source;
pub mod store;
pub mod view;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core types ===
    pub use crate::core::{
        criteria::{DateFilterMode, FilterCriteria, ReferenceFilter},
        error::{ViewError, ViewResult},
        field::FieldValue,
        page::{PageMeta, PageRequest},
        preset::{FilterState, QuickFilter},
        record::{Record, SLOT_CATEGORY, SLOT_STAFF, TreatmentSession},
        sort::{SortDirection, SortKey, SortSpec},
        stats::{StatisticsSnapshot, UNKNOWN_BUCKET},
    };

    // === Engine ===
    pub use crate::config::ViewConfig;
    pub use crate::resolver::{
        DirectoryResolver, ReferenceResolver, ResolvedReference, ResolverRegistry,
    };
    pub use crate::source::{FetchStatus, RecordSource, decode_payload};
    pub use crate::store::RecordStore;
    pub use crate::view::{Derived, FetchTicket, RecordView, derive};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
