use tracing::debug;

use super::{ApiResult, ContentSource, Item, fetch_items};

/// Number of top-level comments loaded for a thread.
pub const COMMENT_LIMIT: usize = 20;

/// Load the first `limit` top-level comments of `story`.
///
/// Deleted, dead and missing comments are dropped; the remaining comments
/// keep the order of `story.kids`.
pub async fn load_thread<S>(source: &S, story: &Item, limit: usize) -> ApiResult<Vec<Item>>
where
    S: ContentSource + ?Sized,
{
    if story.kids.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<u64> = story.kids.iter().copied().take(limit).collect();
    let comments: Vec<Item> = fetch_items(source, &ids)
        .await?
        .into_iter()
        .filter(|comment| !comment.is_hidden())
        .collect();
    debug!(story = story.id, requested = ids.len(), loaded = comments.len(), "thread loaded");
    Ok(comments)
}

/// Load the stories referenced by a favorites list.
pub async fn load_favorites<S>(source: &S, ids: &[u64]) -> ApiResult<Vec<Item>>
where
    S: ContentSource + ?Sized,
{
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    fetch_items(source, ids).await
}
