use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::{ApiError, ApiResult, ContentSource, Item, Section};

/// In-memory content source that records how often it is hit.
#[derive(Default)]
pub(crate) struct StubSource {
    listings: Mutex<HashMap<Section, Vec<u64>>>,
    items: Mutex<HashMap<u64, Item>>,
    failing_sections: Mutex<HashSet<Section>>,
    failing_items: Mutex<HashSet<u64>>,
    list_calls: AtomicUsize,
    page_requests: Mutex<Vec<(Section, usize)>>,
}

impl StubSource {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// List `ids` under `section`, creating an item titled `Story {id}` for
    /// every id not already known.
    pub(crate) fn with_section(self, section: Section, ids: impl IntoIterator<Item = u64>) -> Self {
        let ids: Vec<u64> = ids.into_iter().collect();
        {
            let mut items = self.items.lock().unwrap();
            for id in &ids {
                items
                    .entry(*id)
                    .or_insert_with(|| Item::new(*id, format!("Story {id}")));
            }
        }
        self.listings.lock().unwrap().insert(section, ids);
        self
    }

    pub(crate) fn with_item(self, item: Item) -> Self {
        self.items.lock().unwrap().insert(item.id, item);
        self
    }

    pub(crate) fn without_item(self, id: u64) -> Self {
        self.items.lock().unwrap().remove(&id);
        self
    }

    pub(crate) fn fail_section(&self, section: Section) {
        self.failing_sections.lock().unwrap().insert(section);
    }

    pub(crate) fn heal_section(&self, section: Section) {
        self.failing_sections.lock().unwrap().remove(&section);
    }

    pub(crate) fn fail_item(self, id: u64) -> Self {
        self.failing_items.lock().unwrap().insert(id);
        self
    }

    pub(crate) fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn page_requests(&self) -> Vec<(Section, usize)> {
        self.page_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentSource for StubSource {
    async fn list_ids(&self, section: Section) -> ApiResult<Vec<u64>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_sections.lock().unwrap().contains(&section) {
            return Err(ApiError::Unavailable(format!("{section} listing unavailable")));
        }
        Ok(self
            .listings
            .lock()
            .unwrap()
            .get(&section)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_item(&self, id: u64) -> ApiResult<Option<Item>> {
        if self.failing_items.lock().unwrap().contains(&id) {
            return Err(ApiError::Unavailable(format!("item {id} unavailable")));
        }
        Ok(self.items.lock().unwrap().get(&id).cloned())
    }

    async fn fetch_page(&self, section: Section, offset: usize, limit: usize) -> ApiResult<Vec<Item>> {
        self.page_requests.lock().unwrap().push((section, offset));
        super::fetch_listing_page(self, section, offset, limit).await
    }
}
