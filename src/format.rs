//! Display helpers shared by the list, thread and profile views.

use std::sync::LazyLock;

use chrono::Utc;
use regex::Regex;
use url::Url;

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern"));

/// Current unix time in seconds.
pub fn now() -> i64 {
    Utc::now().timestamp()
}

/// Relative age of an item: "just now", "5 minutes ago", "3 hours ago",
/// "2 days ago".
pub fn time_ago(timestamp: i64, now: i64) -> String {
    let diff = now.saturating_sub(timestamp).max(0);
    match diff {
        0..60 => "just now".to_string(),
        60..3_600 => format!("{} minutes ago", diff / 60),
        3_600..86_400 => format!("{} hours ago", diff / 3_600),
        _ => format!("{} days ago", diff / 86_400),
    }
}

/// Coarse account age used on the profile view.
pub fn account_age(created: i64, now: i64) -> String {
    let diff = now.saturating_sub(created).max(0);
    match diff {
        0..86_400 => "today".to_string(),
        86_400..31_536_000 => format!("{} days ago", diff / 86_400),
        _ => format!("{} years ago", diff / 31_536_000),
    }
}

/// Seconds rendered as `m:ss`.
pub fn countdown(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Host of `url` without a leading `www.`, or an empty string when the url
/// does not parse.
pub fn hostname(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(|host| host.replacen("www.", "", 1)))
        .unwrap_or_default()
}

/// Turn the HTML fragment the API uses for comment bodies into plain text.
///
/// Paragraph tags become blank lines, other tags are dropped and the common
/// entities are decoded.
pub fn plain_text(html: &str) -> String {
    let text = html.replace("<p>", "\n\n");
    TAG.replace_all(&text, "")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&#x2F;", "/")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
        .trim()
        .to_string()
}
