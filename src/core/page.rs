//! Deterministic windowing over the filtered-and-sorted sequence

use serde::{Deserialize, Serialize};

/// The consumer-controlled pagination state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number, 0-based
    pub index: usize,

    /// Number of records per page, at least 1
    pub size: usize,
}

impl PageRequest {
    pub fn new(index: usize, size: usize) -> Self {
        PageRequest {
            index,
            size: size.max(1),
        }
    }

    pub fn first(size: usize) -> Self {
        PageRequest::new(0, size)
    }
}

/// Pagination metadata derived from a request and the filtered total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub index: usize,
    pub size: usize,

    /// Total number of records after filtering
    pub total: usize,

    /// Total number of pages
    pub page_count: usize,

    pub has_next: bool,
    pub has_prev: bool,
}

impl PageMeta {
    pub fn new(request: &PageRequest, total: usize) -> Self {
        let size = request.size.max(1);
        let page_count = total.div_ceil(size);
        let start = request.index.saturating_mul(size);

        PageMeta {
            index: request.index,
            size,
            total,
            page_count,
            has_next: start.saturating_add(size) < total,
            has_prev: request.index > 0 && total > 0,
        }
    }

    pub fn empty(request: &PageRequest) -> Self {
        PageMeta::new(request, 0)
    }
}

/// The contiguous window `[index*size, index*size + size)`, clamped to the
/// sequence bounds. An out-of-range index yields an empty page, not an error.
pub fn slice_page<'a, T>(items: &'a [T], request: &PageRequest) -> &'a [T] {
    let size = request.size.max(1);
    let start = request.index.saturating_mul(size).min(items.len());
    let end = start.saturating_add(size).min(items.len());
    &items[start..end]
}
