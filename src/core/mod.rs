//! Core building blocks: records, criteria, presets, sorting, pagination,
//! statistics and errors

pub mod criteria;
pub mod error;
pub mod field;
pub mod page;
pub mod preset;
pub mod record;
pub mod sort;
pub mod stats;

pub use criteria::{DateFilterMode, FilterCriteria, ReferenceFilter};
pub use error::{ViewError, ViewResult};
pub use field::FieldValue;
pub use page::{PageMeta, PageRequest, slice_page};
pub use preset::{FilterState, QuickFilter};
pub use record::{Record, TreatmentSession};
pub use sort::{SortDirection, SortKey, SortSpec, sort_records};
pub use stats::{StatisticsSnapshot, UNKNOWN_BUCKET, aggregate};
