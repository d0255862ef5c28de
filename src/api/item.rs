use serde::{Deserialize, Serialize};

/// A story or comment as returned by the item endpoint.
///
/// Stories and comments share this one record type. Only `id` is required;
/// every other field falls back to an empty default so that a partially
/// populated item never fails to decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    pub id: u64,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub by: String,
    pub time: i64,
    pub score: i64,
    pub descendants: u64,
    pub kids: Vec<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<u64>,
    #[serde(skip_serializing_if = "is_false")]
    pub deleted: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub dead: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Item {
    /// Minimal item with an id and title, mostly useful for fixtures.
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            ..Self::default()
        }
    }

    /// Whether the item should be hidden from listings and threads.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.deleted || self.dead
    }

    /// Link to the discussion page on the public site.
    #[must_use]
    pub fn discussion_url(&self) -> String {
        format!("https://news.ycombinator.com/item?id={}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_story_payload() {
        let json = r#"{
            "by": "dhouston",
            "descendants": 71,
            "id": 8863,
            "kids": [8952, 9224],
            "score": 111,
            "time": 1175714200,
            "title": "My YC app: Dropbox - Throw away your USB drive",
            "type": "story",
            "url": "http://www.getdropbox.com/u/2/screencast.html"
        }"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, 8863);
        assert_eq!(item.kind.as_deref(), Some("story"));
        assert_eq!(item.kids, vec![8952, 9224]);
        assert_eq!(item.descendants, 71);
        assert!(item.text.is_none());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let item: Item = serde_json::from_str(r#"{"id": 5, "deleted": true}"#).unwrap();
        assert_eq!(item.id, 5);
        assert!(item.title.is_empty());
        assert!(item.by.is_empty());
        assert_eq!(item.score, 0);
        assert!(item.kids.is_empty());
        assert!(item.is_hidden());
    }

    #[test]
    fn null_payload_is_none() {
        let item: Option<Item> = serde_json::from_str("null").unwrap();
        assert!(item.is_none());
    }
}
