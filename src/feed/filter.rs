use crate::api::Item;

/// Filter `items` down to those matching `query`.
///
/// An empty query returns the list unchanged. Otherwise an item matches when
/// its title, text or author contains the query, ignoring case. Relative
/// order is preserved.
pub fn filter(query: &str, items: &[Item]) -> Vec<Item> {
    if query.is_empty() {
        return items.to_vec();
    }
    let needle = query.to_lowercase();
    items
        .iter()
        .filter(|item| matches(item, &needle))
        .cloned()
        .collect()
}

/// `needle` must already be lowercase.
fn matches(item: &Item, needle: &str) -> bool {
    contains(&item.title, needle)
        || item.text.as_deref().is_some_and(|text| contains(text, needle))
        || contains(&item.by, needle)
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
