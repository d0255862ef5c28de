use anyhow::Result;
use frontpage::{Item, Section, format};
use serde_json::json;

/// Render stories the way the front page lists them.
pub(crate) fn format_plain(section: Section, stories: &[Item], now: i64) -> String {
    if stories.is_empty() {
        return format!("No {section} stories\n");
    }

    let mut out = String::new();
    for (index, story) in stories.iter().enumerate() {
        let host = story
            .url
            .as_deref()
            .map(format::hostname)
            .filter(|host| !host.is_empty())
            .map(|host| format!(" ({host})"))
            .unwrap_or_default();
        out.push_str(&format!("{:>3}. {}{host}\n", index + 1, story.title));
        out.push_str(&format!(
            "     {} points by {} {} | {} comments\n",
            story.score,
            story.by,
            format::time_ago(story.time, now),
            story.descendants
        ));
    }
    out
}

pub(crate) fn print_plain(section: Section, stories: &[Item]) {
    print!("{}", format_plain(section, stories, format::now()));
}

/// Format the stories as a JSON document.
pub(crate) fn format_stories_json(section: Section, stories: &[Item]) -> Result<String> {
    let entries: Vec<_> = stories
        .iter()
        .enumerate()
        .map(|(index, story)| {
            json!({
                "rank": index + 1,
                "id": story.id,
                "title": story.title,
                "url": story.url,
                "discussion": story.discussion_url(),
                "by": story.by,
                "score": story.score,
                "time": story.time,
                "comments": story.descendants,
            })
        })
        .collect();

    let payload = json!({
        "section": section.key(),
        "count": stories.len(),
        "stories": entries,
    });

    Ok(serde_json::to_string_pretty(&payload)?)
}

pub(crate) fn print_json(section: Section, stories: &[Item]) -> Result<()> {
    println!("{}", format_stories_json(section, stories)?);
    Ok(())
}
