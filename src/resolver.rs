//! Reference resolvers supplied by upstream directories
//!
//! The engine never fetches directory data (staff, categories) itself; it
//! consumes resolvers handed in by the caller. A resolver that has not yet
//! loaded its backing data reports `is_ready() == false`, and the filter
//! composer treats any criterion depending on it as non-excluding until
//! [`crate::view::RecordView::resolvers_updated`] is called.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// A resolved reference: display name plus an optional presentation style
/// (e.g. a badge color assigned by the directory)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedReference {
    pub display_name: String,
    pub style: Option<String>,
}

impl ResolvedReference {
    pub fn named(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            style: None,
        }
    }
}

/// Lookup translating an opaque reference id into a display name
pub trait ReferenceResolver: Send + Sync {
    /// Whether the backing directory data has loaded
    fn is_ready(&self) -> bool;

    /// Resolve an id to its display form, if known
    fn resolve(&self, id: Uuid) -> Option<ResolvedReference>;
}

/// Map-backed resolver fed by a directory fetched elsewhere
///
/// Starts out not ready; `populate` installs the entries and flips readiness.
/// Interior mutability lets the consumer keep one handle registered with the
/// view while the directory loads in the background.
#[derive(Default)]
pub struct DirectoryResolver {
    inner: RwLock<DirectoryInner>,
}

#[derive(Default)]
struct DirectoryInner {
    ready: bool,
    entries: HashMap<Uuid, ResolvedReference>,
}

impl DirectoryResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an already-populated resolver
    pub fn with_entries(entries: impl IntoIterator<Item = (Uuid, ResolvedReference)>) -> Self {
        let resolver = Self::new();
        resolver.populate(entries);
        resolver
    }

    /// Replace the directory contents and mark the resolver ready
    pub fn populate(&self, entries: impl IntoIterator<Item = (Uuid, ResolvedReference)>) {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        inner.entries = entries.into_iter().collect();
        inner.ready = true;
    }
}

impl ReferenceResolver for DirectoryResolver {
    fn is_ready(&self) -> bool {
        self.inner.read().unwrap_or_else(|e| e.into_inner()).ready
    }

    fn resolve(&self, id: Uuid) -> Option<ResolvedReference> {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .entries
            .get(&id)
            .cloned()
    }
}

/// Registry of resolvers keyed by reference slot name
#[derive(Clone, Default)]
pub struct ResolverRegistry {
    resolvers: HashMap<&'static str, Arc<dyn ReferenceResolver>>,
}

impl ResolverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the resolver for a slot
    pub fn register(&mut self, slot: &'static str, resolver: Arc<dyn ReferenceResolver>) {
        self.resolvers.insert(slot, resolver);
    }

    /// Whether the slot has a resolver with loaded data
    pub fn is_ready(&self, slot: &str) -> bool {
        self.resolvers.get(slot).is_some_and(|r| r.is_ready())
    }

    /// Resolve an id through the slot's resolver, if any
    pub fn resolve(&self, slot: &str, id: Uuid) -> Option<ResolvedReference> {
        self.resolvers.get(slot).and_then(|r| r.resolve(id))
    }

    /// Resolved display name for a slot/id pair
    pub fn display_name(&self, slot: &str, id: Uuid) -> Option<String> {
        self.resolve(slot, id).map(|r| r.display_name)
    }
}
