//! The record view engine
//!
//! [`RecordView`] ties the store, filter state, sort, pagination and
//! statistics together behind a mutation API. Every mutation runs the same
//! explicit, pure [`derive`] pipeline; there is no hidden reactive
//! recomputation. The view is single-actor: one logical owner mutates it at
//! a time, matching the interaction model of the admin screens it backs.

use crate::config::ViewConfig;
use crate::core::criteria::{DateFilterMode, FilterCriteria, ReferenceFilter};
use crate::core::error::{ViewError, ViewResult};
use crate::core::page::{PageMeta, PageRequest, slice_page};
use crate::core::preset::{FilterState, QuickFilter};
use crate::core::record::Record;
use crate::core::sort::{SortDirection, SortKey, SortSpec, sort_records};
use crate::core::stats::{StatisticsSnapshot, aggregate};
use crate::resolver::{ReferenceResolver, ResolverRegistry};
use crate::source::{FetchStatus, RecordSource};
use crate::store::RecordStore;
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// Everything derived from the store and the current criteria/sort/page
#[derive(Debug, Clone)]
pub struct Derived<R: Record> {
    /// The filtered and sorted set (all pages)
    pub filtered: Vec<R>,

    /// The visible page
    pub visible: Vec<R>,

    pub page_meta: PageMeta,

    /// Statistics over the whole filtered set
    pub statistics: StatisticsSnapshot,
}

impl<R: Record> Derived<R> {
    fn empty(page: &PageRequest) -> Self {
        Derived {
            filtered: Vec::new(),
            visible: Vec::new(),
            page_meta: PageMeta::empty(page),
            statistics: StatisticsSnapshot::default(),
        }
    }
}

/// Pure derivation pipeline: records in, filtered set + visible page +
/// statistics out. No state is read or written besides the arguments.
pub fn derive<R: Record>(
    records: &[R],
    criteria: &FilterCriteria,
    sort: &SortSpec,
    page: &PageRequest,
    resolvers: &ResolverRegistry,
    mode: DateFilterMode,
    reference_slot: &str,
) -> Derived<R> {
    let mut filtered: Vec<R> = records
        .iter()
        .filter(|record| criteria.matches(*record, resolvers, mode))
        .cloned()
        .collect();

    sort_records(&mut filtered, sort, resolvers);

    let statistics = aggregate(&filtered, reference_slot, resolvers);
    let page_meta = PageMeta::new(page, filtered.len());
    let visible = slice_page(&filtered, page).to_vec();

    debug!(
        total = records.len(),
        filtered = filtered.len(),
        visible = visible.len(),
        page = page.index,
        "derived view state"
    );

    Derived {
        filtered,
        visible,
        page_meta,
        statistics,
    }
}

/// Handle for one issued fetch; completing a superseded ticket is a no-op
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    scope: Uuid,
}

/// In-memory filtering, sorting, pagination and statistics over one scope's
/// records
pub struct RecordView<R: Record> {
    config: ViewConfig,
    source: Arc<dyn RecordSource<R>>,
    resolvers: ResolverRegistry,
    scope: Uuid,

    store: RecordStore<R>,
    status: FetchStatus,
    fetch_seq: u64,

    filter: FilterState,
    sort: SortSpec,
    page: PageRequest,
    derived: Derived<R>,
}

impl<R: Record> RecordView<R> {
    /// Create a view for one scope. The scope key is explicit construction
    /// input, never read from ambient state.
    pub fn new(
        config: ViewConfig,
        source: Arc<dyn RecordSource<R>>,
        scope: Uuid,
    ) -> ViewResult<Self> {
        config.validate()?;
        let page = PageRequest::first(config.page_size);
        Ok(RecordView {
            config,
            source,
            resolvers: ResolverRegistry::new(),
            scope,
            store: RecordStore::new(),
            status: FetchStatus::Idle,
            fetch_seq: 0,
            filter: FilterState::default(),
            sort: SortSpec::default(),
            page,
            derived: Derived::empty(&page),
        })
    }

    // === Resolvers ===

    /// Register (or replace) the resolver for a reference slot
    pub fn register_resolver(&mut self, slot: &'static str, resolver: Arc<dyn ReferenceResolver>) {
        self.resolvers.register(slot, resolver);
        self.recompute();
    }

    /// Re-derive after directory data behind a registered resolver has
    /// loaded or changed
    pub fn resolvers_updated(&mut self) {
        self.recompute();
    }

    // === Fetching ===

    /// Issue a fetch ticket and mark the view loading.
    ///
    /// Tickets carry a monotonically increasing sequence number; only the
    /// most recently issued ticket for the view can still complete.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.fetch_seq += 1;
        self.status = FetchStatus::Loading;
        FetchTicket {
            seq: self.fetch_seq,
            scope: self.scope,
        }
    }

    /// Apply a fetch outcome.
    ///
    /// Returns `Ok(true)` when the response was applied, `Ok(false)` when it
    /// was discarded as stale (a newer fetch or a scope change superseded
    /// it). A transport failure clears the store: derived structures never
    /// mix old and new data.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<R>>,
    ) -> ViewResult<bool> {
        if ticket.seq != self.fetch_seq || ticket.scope != self.scope {
            warn!(
                ticket = ticket.seq,
                latest = self.fetch_seq,
                "discarding stale fetch response"
            );
            return Ok(false);
        }

        match result {
            Ok(records) => {
                let kept = self.store.load(records);
                self.status = FetchStatus::Succeeded;
                debug!(scope = %self.scope, records = kept, "store replaced");
                self.recompute();
                Ok(true)
            }
            Err(err) => {
                let message = err.to_string();
                self.store.clear();
                self.status = FetchStatus::Failed(message.clone());
                self.derived = Derived::empty(&self.page);
                Err(ViewError::Fetch {
                    scope: self.scope,
                    message,
                })
            }
        }
    }

    /// Fetch the current scope's records from the source and apply them
    pub async fn refresh(&mut self) -> ViewResult<bool> {
        let source = Arc::clone(&self.source);
        let ticket = self.begin_fetch();
        let result = source.fetch(ticket.scope).await;
        self.complete_fetch(ticket, result)
    }

    /// Switch to a different scope, tearing down store and derived state
    pub fn set_scope(&mut self, scope: Uuid) {
        self.scope = scope;
        self.store.clear();
        self.status = FetchStatus::Idle;
        self.page.index = 0;
        self.derived = Derived::empty(&self.page);
    }

    // === Criteria mutations (all manual edits disown the active preset) ===

    pub fn set_search_text(&mut self, text: Option<String>) {
        self.edit_criteria(|criteria| criteria.search_text = text);
    }

    pub fn set_date_range(
        &mut self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> ViewResult<()> {
        self.try_edit_criteria(|criteria| {
            criteria.date_from = from;
            criteria.date_to = to;
        })
    }

    pub fn set_reference_filter(&mut self, filter: Option<ReferenceFilter>) {
        self.edit_criteria(|criteria| criteria.reference = filter);
    }

    pub fn set_score_range(&mut self, range: Option<(u8, u8)>) -> ViewResult<()> {
        self.try_edit_criteria(|criteria| criteria.score_range = range)
    }

    /// Apply a quick filter preset, replacing the criteria wholesale
    pub fn apply_preset(&mut self, preset: QuickFilter) {
        self.apply_preset_at(preset, Utc::now());
    }

    /// Preset application anchored at an explicit instant
    pub fn apply_preset_at(&mut self, preset: QuickFilter, now: DateTime<Utc>) {
        self.filter = FilterState::Preset {
            id: preset,
            criteria: preset.criteria(now),
        };
        self.page.index = 0;
        self.recompute();
    }

    /// Reset all criteria and return preset state to none
    pub fn clear_filters(&mut self) {
        self.filter = FilterState::default();
        self.page.index = 0;
        self.recompute();
    }

    // === Sort & pagination ===

    pub fn set_sort(&mut self, key: SortKey, direction: SortDirection) {
        self.sort = SortSpec::new(key, direction);
        self.page.index = 0;
        self.recompute();
    }

    pub fn set_page(&mut self, index: usize) {
        self.page.index = index;
        self.recompute();
    }

    pub fn set_page_size(&mut self, size: usize) -> ViewResult<()> {
        if size == 0 {
            return Err(ViewError::invalid("page_size", "must be at least 1"));
        }
        self.page = PageRequest::first(size);
        self.recompute();
        Ok(())
    }

    // === Reads ===

    pub fn visible_page(&self) -> &[R] {
        &self.derived.visible
    }

    pub fn filtered(&self) -> &[R] {
        &self.derived.filtered
    }

    pub fn statistics(&self) -> &StatisticsSnapshot {
        &self.derived.statistics
    }

    pub fn page_meta(&self) -> &PageMeta {
        &self.derived.page_meta
    }

    pub fn page_count(&self) -> usize {
        self.derived.page_meta.page_count
    }

    pub fn active_preset(&self) -> Option<QuickFilter> {
        self.filter.active_preset()
    }

    pub fn criteria(&self) -> &FilterCriteria {
        self.filter.criteria()
    }

    pub fn sort(&self) -> &SortSpec {
        &self.sort
    }

    pub fn status(&self) -> &FetchStatus {
        &self.status
    }

    pub fn scope(&self) -> Uuid {
        self.scope
    }

    pub fn records(&self) -> &[R] {
        self.store.records()
    }

    // === Internals ===

    fn edit_criteria(&mut self, edit: impl FnOnce(&mut FilterCriteria)) {
        // Infallible edits cannot produce malformed criteria
        let _ = self.try_edit_criteria(edit);
    }

    fn try_edit_criteria(&mut self, edit: impl FnOnce(&mut FilterCriteria)) -> ViewResult<()> {
        let mut criteria = self.filter.criteria().clone();
        edit(&mut criteria);
        criteria.validate()?;
        self.filter = FilterState::Manual(criteria);
        self.page.index = 0;
        self.recompute();
        Ok(())
    }

    /// Run the pure pipeline against the settled store.
    ///
    /// While a fetch is in flight the store is not settled; derivation is
    /// deferred until the fetch reaches a terminal state.
    fn recompute(&mut self) {
        if self.status.is_loading() {
            return;
        }
        self.derived = derive(
            self.store.records(),
            self.filter.criteria(),
            &self.sort,
            &self.page,
            &self.resolvers,
            self.config.date_filter_mode,
            &self.config.reference_slot,
        );
    }
}
