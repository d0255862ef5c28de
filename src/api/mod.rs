//! Access to the Hacker News content API.
//!
//! [`ContentSource`] is the seam the rest of the crate talks to. The HTTP
//! implementation lives in [`client`]; tests substitute in-memory sources.

mod client;
mod error;
mod item;
mod loaders;
mod section;

use async_trait::async_trait;
use futures::future::try_join_all;

pub use client::{DEFAULT_BASE_URL, HnClient};
pub use error::ApiError;
pub use item::Item;
pub use loaders::{COMMENT_LIMIT, load_favorites, load_thread};
pub use section::Section;

pub type ApiResult<T> = Result<T, ApiError>;

/// Read-only view of the upstream content service.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Ordered ids currently listed under `section`.
    async fn list_ids(&self, section: Section) -> ApiResult<Vec<u64>>;

    /// Fetch a single item. `None` means the item is deleted or missing.
    async fn get_item(&self, id: u64) -> ApiResult<Option<Item>>;

    /// Fetch up to `limit` items of `section` starting at `offset`.
    ///
    /// Items are requested concurrently and returned in listing order with
    /// missing ones dropped. Any failed request fails the whole page.
    async fn fetch_page(&self, section: Section, offset: usize, limit: usize) -> ApiResult<Vec<Item>> {
        fetch_listing_page(self, section, offset, limit).await
    }
}

/// Slice the listing of `section` and fetch that page's items.
pub(crate) async fn fetch_listing_page<S>(
    source: &S,
    section: Section,
    offset: usize,
    limit: usize,
) -> ApiResult<Vec<Item>>
where
    S: ContentSource + ?Sized,
{
    let ids = source.list_ids(section).await?;
    let page: Vec<u64> = ids.into_iter().skip(offset).take(limit).collect();
    fetch_items(source, &page).await
}

/// Fetch every id concurrently, keeping order and dropping missing items.
pub(crate) async fn fetch_items<S>(source: &S, ids: &[u64]) -> ApiResult<Vec<Item>>
where
    S: ContentSource + ?Sized,
{
    let items = try_join_all(ids.iter().map(|id| source.get_item(*id))).await?;
    Ok(items.into_iter().flatten().collect())
}

#[cfg(test)]
pub(crate) mod testing;

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    /// Source that relies on the provided `fetch_page`.
    struct Listing {
        ids: Vec<u64>,
        items: HashMap<u64, Item>,
    }

    impl Listing {
        fn new(ids: impl IntoIterator<Item = u64>, missing: &[u64]) -> Self {
            let ids: Vec<u64> = ids.into_iter().collect();
            let items = ids
                .iter()
                .filter(|id| !missing.contains(id))
                .map(|id| (*id, Item::new(*id, format!("Story {id}"))))
                .collect();
            Self { ids, items }
        }
    }

    #[async_trait]
    impl ContentSource for Listing {
        async fn list_ids(&self, section: Section) -> ApiResult<Vec<u64>> {
            match section {
                Section::Top => Ok(self.ids.clone()),
                _ => Ok(Vec::new()),
            }
        }

        async fn get_item(&self, id: u64) -> ApiResult<Option<Item>> {
            Ok(self.items.get(&id).cloned())
        }
    }

    fn ids(items: &[Item]) -> Vec<u64> {
        items.iter().map(|item| item.id).collect()
    }

    #[tokio::test]
    async fn page_slices_listing_in_order() {
        let source = Listing::new((1..=10).rev(), &[]);

        let page = source.fetch_page(Section::Top, 3, 4).await.unwrap();
        assert_eq!(ids(&page), vec![7, 6, 5, 4]);

        let tail = source.fetch_page(Section::Top, 8, 4).await.unwrap();
        assert_eq!(ids(&tail), vec![2, 1]);

        let past_end = source.fetch_page(Section::Top, 10, 4).await.unwrap();
        assert!(past_end.is_empty());
    }

    #[tokio::test]
    async fn page_drops_missing_items() {
        let source = Listing::new(1..=6, &[2, 5]);

        let page = source.fetch_page(Section::Top, 0, 6).await.unwrap();
        assert_eq!(ids(&page), vec![1, 3, 4, 6]);
    }

    #[tokio::test]
    async fn empty_listing_gives_empty_page() {
        let source = Listing::new(1..=6, &[]);
        let page = source.fetch_page(Section::Ask, 0, 30).await.unwrap();
        assert!(page.is_empty());
    }
}
