//! Story list state: section loads, incremental paging and live search.
//!
//! [`Feed`] owns the canonical list for the current section and the display
//! list derived from it. Network requests run as tasks on the tokio runtime
//! and report back through a channel; the owner drains it with
//! [`Feed::pump`] (or awaits [`Feed::next_event`]) so every state change
//! happens on the owning thread.
//!
//! Each `load` is tagged with a request epoch. Responses carrying an epoch
//! other than the latest issued are discarded, so a late answer for a
//! superseded section never overwrites the list.

mod filter;
mod pagination;

use std::sync::Arc;

use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use crate::api::{ApiError, ApiResult, ContentSource, Item, Section};
use crate::scheduler::RefreshSlot;

pub use filter::filter;
pub use pagination::{PAGE_SIZE, Pagination};

/// Callback used to turn a scheduler tick into a refresh of `section`.
pub type RefreshSink = Arc<dyn Fn(Section) -> anyhow::Result<()> + Send + Sync>;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("already loading {0} stories")]
    AlreadyLoading(Section),
    #[error("Failed to load {section} stories")]
    FetchFailed {
        section: Section,
        #[source]
        source: ApiError,
    },
    #[error("Failed to load more {section} stories")]
    PageFailed {
        section: Section,
        #[source]
        source: ApiError,
    },
}

impl FeedError {
    pub fn section(&self) -> Section {
        match self {
            Self::AlreadyLoading(section) => *section,
            Self::FetchFailed { section, .. } | Self::PageFailed { section, .. } => *section,
        }
    }
}

/// Completion messages sent by request tasks.
#[derive(Debug)]
pub enum FeedEvent {
    Loaded {
        epoch: u64,
        section: Section,
        result: ApiResult<Vec<Item>>,
    },
    PageLoaded {
        epoch: u64,
        section: Section,
        offset: usize,
        result: ApiResult<Vec<Item>>,
    },
}

/// What applying a [`FeedEvent`] changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedUpdate {
    Replaced { section: Section, count: usize },
    Appended { count: usize },
    EmptyPage,
    Stale,
}

pub struct Feed {
    source: Arc<dyn ContentSource>,
    runtime: Handle,
    tx: UnboundedSender<FeedEvent>,
    rx: UnboundedReceiver<FeedEvent>,
    section: Section,
    canonical: Vec<Item>,
    /// Section the canonical list was loaded from.
    listed: Option<Section>,
    display: Vec<Item>,
    query: String,
    loading: Option<Section>,
    error: Option<String>,
    pagination: Pagination,
    epoch: u64,
    refresh: Option<(RefreshSlot, RefreshSink)>,
}

impl Feed {
    pub fn new(source: Arc<dyn ContentSource>, runtime: Handle, section: Section, page_size: usize) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            source,
            runtime,
            tx,
            rx,
            section,
            canonical: Vec::new(),
            listed: None,
            display: Vec::new(),
            query: String::new(),
            loading: None,
            error: None,
            pagination: Pagination::new(page_size),
            epoch: 0,
            refresh: None,
        }
    }

    pub fn section(&self) -> Section {
        self.section
    }

    /// The list to render: the canonical list, filtered by the active query.
    pub fn items(&self) -> &[Item] {
        &self.display
    }

    /// Every fetched item of the current section, before filtering.
    pub fn canonical(&self) -> &[Item] {
        &self.canonical
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_searching(&self) -> bool {
        !self.query.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_some()
    }

    pub fn loading_section(&self) -> Option<Section> {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn is_fetching_more(&self) -> bool {
        self.pagination.is_fetching_more()
    }

    /// Route scheduler ticks to `sink` for whichever section is current.
    ///
    /// The slot is rewritten on every section change, so the scheduler never
    /// holds a callback bound to a section the user has left.
    pub fn attach_refresh(&mut self, slot: RefreshSlot, sink: RefreshSink) {
        self.refresh = Some((slot, sink));
        self.install_refresh_callback();
    }

    fn install_refresh_callback(&self) {
        if let Some((slot, sink)) = &self.refresh {
            let section = self.section;
            let sink = Arc::clone(sink);
            slot.set(move || sink(section));
        }
    }

    /// Request the first page of `section` and replace the list with it.
    ///
    /// Fails fast if a load of the same section is already in flight.
    pub fn load(&mut self, section: Section) -> Result<(), FeedError> {
        if self.loading == Some(section) {
            debug!(%section, "load already in flight");
            return Err(FeedError::AlreadyLoading(section));
        }
        self.epoch += 1;
        self.loading = Some(section);
        self.error = None;

        let epoch = self.epoch;
        let limit = self.pagination.page_size();
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        info!(%section, epoch, "loading stories");
        self.runtime.spawn(async move {
            let result = source.fetch_page(section, 0, limit).await;
            let _ = tx.send(FeedEvent::Loaded {
                epoch,
                section,
                result,
            });
        });
        Ok(())
    }

    /// Reload the current section.
    pub fn refresh(&mut self) -> Result<(), FeedError> {
        self.load(self.section)
    }

    /// Switch sections: clears the search, rewinds paging and loads.
    pub fn change_section(&mut self, section: Section) -> Result<(), FeedError> {
        self.query.clear();
        self.display = self.canonical.clone();
        self.pagination.reset();
        self.section = section;
        self.install_refresh_callback();
        self.load(section)
    }

    /// Request the next page of the current section.
    ///
    /// Returns `false` without touching the network when a page is already
    /// in flight, a search is active, or the list on screen still belongs to
    /// another section.
    pub fn fetch_more(&mut self) -> bool {
        if self.listed != Some(self.section) {
            debug!(section = %self.section, listed = ?self.listed, "no list of the current section to extend");
            return false;
        }
        let Some(offset) = self.pagination.begin(self.is_searching()) else {
            return false;
        };
        let epoch = self.epoch;
        let section = self.section;
        let limit = self.pagination.page_size();
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        debug!(%section, offset, "fetching more stories");
        self.runtime.spawn(async move {
            let result = source.fetch_page(section, offset, limit).await;
            let _ = tx.send(FeedEvent::PageLoaded {
                epoch,
                section,
                offset,
                result,
            });
        });
        true
    }

    /// Replace the search query and re-derive the display list.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.display = filter(&self.query, &self.canonical);
    }

    pub fn clear_query(&mut self) {
        self.set_query(String::new());
    }

    /// Apply every completed request without blocking.
    pub fn pump(&mut self) -> Vec<FeedError> {
        let mut errors = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            if let Err(err) = self.apply(event) {
                errors.push(err);
            }
        }
        errors
    }

    /// Wait for the next completed request and apply it.
    pub async fn next_event(&mut self) -> Option<Result<FeedUpdate, FeedError>> {
        let event = self.rx.recv().await?;
        Some(self.apply(event))
    }

    pub fn apply(&mut self, event: FeedEvent) -> Result<FeedUpdate, FeedError> {
        match event {
            FeedEvent::Loaded {
                epoch,
                section,
                result,
            } => self.apply_load(epoch, section, result),
            FeedEvent::PageLoaded {
                epoch,
                section,
                offset,
                result,
            } => self.apply_page(epoch, section, offset, result),
        }
    }

    fn apply_load(
        &mut self,
        epoch: u64,
        section: Section,
        result: ApiResult<Vec<Item>>,
    ) -> Result<FeedUpdate, FeedError> {
        if epoch != self.epoch {
            debug!(%section, epoch, latest = self.epoch, "discarding superseded load");
            return Ok(FeedUpdate::Stale);
        }
        self.loading = None;

        match result {
            Ok(items) => {
                let count = items.len();
                self.canonical = items;
                self.listed = Some(section);
                self.display = filter(&self.query, &self.canonical);
                info!(%section, count, "stories loaded");
                Ok(FeedUpdate::Replaced { section, count })
            }
            Err(source) => {
                let err = FeedError::FetchFailed { section, source };
                warn!(%section, error = %err, cause = %source_message(&err), "load failed");
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    fn apply_page(
        &mut self,
        epoch: u64,
        section: Section,
        offset: usize,
        result: ApiResult<Vec<Item>>,
    ) -> Result<FeedUpdate, FeedError> {
        if epoch != self.epoch {
            self.pagination.finish(offset, 0);
            debug!(%section, offset, "discarding page for a replaced list");
            return Ok(FeedUpdate::Stale);
        }

        match result {
            Ok(items) if items.is_empty() => {
                self.pagination.finish(offset, 0);
                debug!(%section, offset, "empty page");
                Ok(FeedUpdate::EmptyPage)
            }
            Ok(items) => {
                let count = items.len();
                self.pagination.finish(offset, count);
                self.canonical.extend(items);
                self.display = filter(&self.query, &self.canonical);
                debug!(%section, offset, count, "page appended");
                Ok(FeedUpdate::Appended { count })
            }
            Err(source) => {
                self.pagination.finish(offset, 0);
                let err = FeedError::PageFailed { section, source };
                warn!(%section, offset, error = %err, cause = %source_message(&err), "page failed");
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }
}

fn source_message(err: &FeedError) -> String {
    std::error::Error::source(err)
        .map(ToString::to_string)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests;
