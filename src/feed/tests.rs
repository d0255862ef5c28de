use std::sync::{Arc, Mutex};

use tokio::runtime::Handle;

use super::*;
use crate::api::testing::StubSource;

fn feed_with(source: &Arc<StubSource>) -> Feed {
    let source: Arc<dyn ContentSource> = Arc::clone(source) as Arc<dyn ContentSource>;
    Feed::new(source, Handle::current(), Section::Top, PAGE_SIZE)
}

fn top_sixty() -> Arc<StubSource> {
    Arc::new(
        StubSource::new()
            .with_section(Section::Top, 1..=60)
            .with_item(Item::new(45, "Learning Rust the hard way")),
    )
}

fn ids(items: &[Item]) -> Vec<u64> {
    items.iter().map(|item| item.id).collect()
}

async fn settle(feed: &mut Feed) -> Result<FeedUpdate, FeedError> {
    feed.next_event().await.expect("feed channel closed")
}

#[tokio::test]
async fn load_then_fetch_more_appends_next_page() {
    let source = top_sixty();
    let mut feed = feed_with(&source);

    feed.load(Section::Top).unwrap();
    assert!(feed.is_loading());
    assert_eq!(
        settle(&mut feed).await.unwrap(),
        FeedUpdate::Replaced {
            section: Section::Top,
            count: 30
        }
    );
    assert!(!feed.is_loading());
    assert_eq!(ids(feed.canonical()), (1..=30).collect::<Vec<_>>());

    assert!(feed.fetch_more());
    assert_eq!(settle(&mut feed).await.unwrap(), FeedUpdate::Appended { count: 30 });

    assert_eq!(source.page_requests(), vec![(Section::Top, 0), (Section::Top, 30)]);
    assert_eq!(feed.canonical().len(), 60);
    assert_eq!(feed.items(), feed.canonical());
    assert_eq!(feed.pagination().offset(), 30);
    assert!(!feed.is_fetching_more());
}

#[tokio::test]
async fn search_after_paging_narrows_display_list() {
    let source = top_sixty();
    let mut feed = feed_with(&source);
    feed.load(Section::Top).unwrap();
    settle(&mut feed).await.unwrap();
    feed.fetch_more();
    settle(&mut feed).await.unwrap();

    feed.set_query("rust");
    assert_eq!(ids(feed.items()), vec![45]);
    assert_eq!(feed.canonical().len(), 60);

    feed.clear_query();
    assert_eq!(feed.items(), feed.canonical());
}

#[tokio::test]
async fn failed_first_load_reports_section_and_keeps_list_empty() {
    let source = top_sixty();
    source.fail_section(Section::Top);
    let mut feed = feed_with(&source);

    feed.load(Section::Top).unwrap();
    let err = settle(&mut feed).await.unwrap_err();

    assert!(matches!(err, FeedError::FetchFailed { section: Section::Top, .. }));
    assert!(err.to_string().contains("top"));
    assert!(feed.error().unwrap().contains("top"));
    assert!(feed.canonical().is_empty());
    assert!(!feed.is_loading());
}

#[tokio::test]
async fn failed_refresh_keeps_previous_stories() {
    let source = top_sixty();
    let mut feed = feed_with(&source);
    feed.load(Section::Top).unwrap();
    settle(&mut feed).await.unwrap();

    source.fail_section(Section::Top);
    feed.refresh().unwrap();
    assert!(settle(&mut feed).await.is_err());
    assert_eq!(feed.canonical().len(), 30);
    assert_eq!(feed.items().len(), 30);

    source.heal_section(Section::Top);
    feed.refresh().unwrap();
    assert!(feed.error().is_none(), "a new load clears the error");
    settle(&mut feed).await.unwrap();
    assert!(feed.error().is_none());
}

#[tokio::test]
async fn rapid_fetch_more_issues_one_request() {
    let source = top_sixty();
    let mut feed = feed_with(&source);
    feed.load(Section::Top).unwrap();
    settle(&mut feed).await.unwrap();

    assert!(feed.fetch_more());
    assert!(!feed.fetch_more());
    settle(&mut feed).await.unwrap();
    tokio::task::yield_now().await;

    let pages: Vec<_> = source
        .page_requests()
        .into_iter()
        .filter(|(_, offset)| *offset == 30)
        .collect();
    assert_eq!(pages.len(), 1);
    assert!(feed.pump().is_empty());
}

#[tokio::test]
async fn fetch_more_is_disabled_while_searching() {
    let source = top_sixty();
    let mut feed = feed_with(&source);
    feed.load(Section::Top).unwrap();
    settle(&mut feed).await.unwrap();
    let before = source.page_requests().len();

    feed.set_query("story");
    assert!(!feed.fetch_more());
    tokio::task::yield_now().await;

    assert_eq!(source.page_requests().len(), before);
    assert!(!feed.is_fetching_more());
}

#[tokio::test]
async fn overlapping_load_of_same_section_fails_fast() {
    let source = top_sixty();
    let mut feed = feed_with(&source);

    feed.load(Section::Top).unwrap();
    let err = feed.load(Section::Top).unwrap_err();
    assert!(matches!(err, FeedError::AlreadyLoading(Section::Top)));

    settle(&mut feed).await.unwrap();
    assert!(feed.refresh().is_ok());
    settle(&mut feed).await.unwrap();
    assert_eq!(source.page_requests().len(), 2);
}

#[tokio::test]
async fn superseded_load_is_discarded() {
    let source = Arc::new(
        StubSource::new()
            .with_section(Section::Top, 1..=5)
            .with_section(Section::New, 100..=102),
    );
    let mut feed = feed_with(&source);

    feed.load(Section::Top).unwrap();
    feed.change_section(Section::New).unwrap();

    let mut updates = vec![settle(&mut feed).await.unwrap(), settle(&mut feed).await.unwrap()];
    updates.sort_by_key(|update| matches!(update, FeedUpdate::Stale));
    assert_eq!(
        updates,
        vec![
            FeedUpdate::Replaced {
                section: Section::New,
                count: 3
            },
            FeedUpdate::Stale,
        ]
    );
    assert_eq!(ids(feed.canonical()), vec![100, 101, 102]);
    assert_eq!(feed.section(), Section::New);
    assert!(!feed.is_loading());
}

#[tokio::test]
async fn refresh_reapplies_active_search() {
    let source = top_sixty();
    let mut feed = feed_with(&source);
    feed.set_query("hard way");

    feed.refresh().unwrap();
    settle(&mut feed).await.unwrap();

    assert_eq!(feed.canonical().len(), 30);
    assert!(feed.items().is_empty(), "item 45 is not on the first page");

    feed.set_query("story 3");
    assert_eq!(ids(feed.items()), vec![3, 30]);
}

#[tokio::test]
async fn empty_page_changes_nothing() {
    let source = Arc::new(StubSource::new().with_section(Section::Top, 1..=30));
    let mut feed = feed_with(&source);
    feed.load(Section::Top).unwrap();
    settle(&mut feed).await.unwrap();

    assert!(feed.fetch_more());
    assert_eq!(settle(&mut feed).await.unwrap(), FeedUpdate::EmptyPage);
    assert_eq!(feed.canonical().len(), 30);
    assert_eq!(feed.pagination().offset(), 0);
    assert!(!feed.is_fetching_more());

    assert!(feed.fetch_more(), "an empty page does not exhaust the feed");
    assert_eq!(settle(&mut feed).await.unwrap(), FeedUpdate::EmptyPage);
}

#[tokio::test]
async fn failed_page_clears_in_flight_flag() {
    let source = top_sixty();
    let mut feed = feed_with(&source);
    feed.load(Section::Top).unwrap();
    settle(&mut feed).await.unwrap();

    source.fail_section(Section::Top);
    assert!(feed.fetch_more());
    let err = settle(&mut feed).await.unwrap_err();

    assert!(matches!(err, FeedError::PageFailed { .. }));
    assert!(!feed.is_fetching_more());
    assert_eq!(feed.canonical().len(), 30);
    assert_eq!(feed.pagination().offset(), 0);
}

#[tokio::test]
async fn change_section_clears_search_and_rewinds_paging() {
    let source = Arc::new(
        StubSource::new()
            .with_section(Section::Top, 1..=60)
            .with_section(Section::Ask, 200..=210),
    );
    let mut feed = feed_with(&source);
    feed.load(Section::Top).unwrap();
    settle(&mut feed).await.unwrap();
    feed.fetch_more();
    settle(&mut feed).await.unwrap();
    feed.set_query("story 1");

    feed.change_section(Section::Ask).unwrap();
    assert_eq!(feed.query(), "");
    assert_eq!(feed.pagination().offset(), 0);
    assert_eq!(feed.items(), feed.canonical());

    settle(&mut feed).await.unwrap();
    assert_eq!(ids(feed.items()), (200..=210).collect::<Vec<_>>());
}

#[tokio::test]
async fn refresh_slot_follows_current_section() {
    let source = top_sixty();
    let mut feed = feed_with(&source);
    let slot = RefreshSlot::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink_seen = Arc::clone(&seen);
    let sink: RefreshSink = Arc::new(move |section| {
        sink_seen.lock().unwrap().push(section);
        Ok(())
    });

    feed.attach_refresh(slot.clone(), sink);
    slot.current().unwrap()().unwrap();
    feed.change_section(Section::Show).unwrap();
    slot.current().unwrap()().unwrap();

    assert_eq!(*seen.lock().unwrap(), vec![Section::Top, Section::Show]);
}

#[tokio::test]
async fn failed_section_change_does_not_page_onto_old_list() {
    let source = Arc::new(
        StubSource::new()
            .with_section(Section::Top, 1..=60)
            .with_section(Section::Ask, 201..=260),
    );
    let mut feed = feed_with(&source);
    feed.load(Section::Top).unwrap();
    settle(&mut feed).await.unwrap();

    source.fail_section(Section::Ask);
    feed.change_section(Section::Ask).unwrap();
    assert!(settle(&mut feed).await.is_err());
    assert_eq!(ids(feed.canonical()), (1..=30).collect::<Vec<_>>());

    source.heal_section(Section::Ask);
    assert!(!feed.fetch_more(), "the top stories must not be extended with ask stories");
    tokio::task::yield_now().await;
    assert!(!source.page_requests().contains(&(Section::Ask, 30)));
    assert!(!feed.is_fetching_more());

    feed.refresh().unwrap();
    settle(&mut feed).await.unwrap();
    assert!(feed.fetch_more());
    settle(&mut feed).await.unwrap();
    assert_eq!(ids(feed.canonical()), (201..=260).collect::<Vec<_>>());
}

#[tokio::test]
async fn fetch_more_waits_for_first_load() {
    let source = top_sixty();
    let mut feed = feed_with(&source);

    assert!(!feed.fetch_more());
    tokio::task::yield_now().await;
    assert!(source.page_requests().is_empty());
}

#[tokio::test]
async fn refresh_keeps_paging_offset() {
    let source = top_sixty();
    let mut feed = feed_with(&source);
    feed.load(Section::Top).unwrap();
    settle(&mut feed).await.unwrap();
    feed.fetch_more();
    settle(&mut feed).await.unwrap();

    feed.refresh().unwrap();
    settle(&mut feed).await.unwrap();

    assert_eq!(feed.canonical().len(), 30);
    assert_eq!(feed.pagination().offset(), 30);
}
