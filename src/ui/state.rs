use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use anyhow::anyhow;
use ratatui::widgets::TableState;
use throbber_widgets_tui::ThrobberState;
use tokio::runtime::Handle;
use tracing::{debug, warn};

use crate::api::{ApiResult, ContentSource, Item, Section, load_favorites, load_thread};
use crate::feed::{Feed, FeedError, RefreshSink};
use crate::scheduler::Scheduler;
use crate::session::Session;

use super::config::UiConfig;
use super::input::LineInput;
use super::overlay::{FavoritesView, Loadable, Overlay, ThreadView};
use super::theme::Theme;

const NOTICE_TTL: Duration = Duration::from_secs(3);

/// Work finished off the UI thread.
#[derive(Debug)]
pub(crate) enum UiEvent {
    /// The auto-refresh timer fired for `section`.
    AutoRefresh(Section),
    ThreadLoaded {
        story_id: u64,
        result: ApiResult<Vec<Item>>,
    },
    FavoritesLoaded(ApiResult<Vec<Item>>),
}

/// Short-lived message in the status line.
#[derive(Debug, Clone)]
pub(crate) struct Notice {
    pub text: String,
    pub expires: Instant,
}

pub struct App<'a> {
    pub(crate) feed: Feed,
    pub(crate) scheduler: Scheduler,
    pub(crate) session: Session,
    pub(crate) source: Arc<dyn ContentSource>,
    pub(crate) runtime: Handle,
    pub theme: Theme,
    pub(crate) comment_limit: usize,
    pub(crate) search_input: LineInput<'a>,
    pub(crate) search_focused: bool,
    pub table_state: TableState,
    pub(crate) throbber_state: ThrobberState,
    pub(crate) overlay: Option<Overlay<'a>>,
    pub(crate) notice: Option<Notice>,
    events_tx: Sender<UiEvent>,
    events_rx: Receiver<UiEvent>,
    auto_refresh_on_start: bool,
}

impl<'a> App<'a> {
    pub fn new(
        source: Arc<dyn ContentSource>,
        runtime: Handle,
        session: Session,
        config: UiConfig,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::channel();
        let mut feed = Feed::new(
            Arc::clone(&source),
            runtime.clone(),
            config.section,
            config.page_size,
        );
        let scheduler = Scheduler::new(config.refresh_interval_secs, runtime.clone());

        let refresh_tx = events_tx.clone();
        let sink: RefreshSink = Arc::new(move |section| {
            refresh_tx
                .send(UiEvent::AutoRefresh(section))
                .map_err(|_| anyhow!("ui event channel closed"))
        });
        feed.attach_refresh(scheduler.slot(), sink);

        let mut search_input = LineInput::new(String::new());
        search_input.set_placeholder("type / to search", config.theme.empty);
        search_input.set_cursor_visible(false);

        Self {
            feed,
            scheduler,
            session,
            source,
            runtime,
            theme: config.theme,
            comment_limit: config.comment_limit,
            search_input,
            search_focused: false,
            table_state: TableState::default(),
            throbber_state: ThrobberState::default(),
            overlay: None,
            notice: None,
            events_tx,
            events_rx,
            auto_refresh_on_start: config.auto_refresh,
        }
    }

    /// Issue the first load and arm the timer if requested.
    pub(crate) fn start(&mut self) {
        let section = self.feed.section();
        if let Err(err) = self.feed.load(section) {
            debug!(error = %err, "initial load skipped");
        }
        if self.auto_refresh_on_start {
            self.scheduler.enable();
        }
    }

    /// Apply completed feed requests and keep the selection in range.
    pub(crate) fn pump_feed(&mut self) {
        for err in self.feed.pump() {
            if let FeedError::PageFailed { .. } = err {
                self.set_notice(err.to_string());
            }
        }
        self.sync_selection();
    }

    /// Apply completed background work.
    pub(crate) fn pump_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply_event(event);
        }
        if self
            .notice
            .as_ref()
            .is_some_and(|notice| notice.expires <= Instant::now())
        {
            self.notice = None;
        }
    }

    pub(crate) fn apply_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::AutoRefresh(section) => {
                if section != self.feed.section() {
                    debug!(%section, current = %self.feed.section(), "ignoring refresh for previous section");
                    return;
                }
                if let Err(err) = self.feed.refresh() {
                    debug!(error = %err, "auto-refresh skipped");
                }
            }
            UiEvent::ThreadLoaded { story_id, result } => {
                let Some(Overlay::Thread(view)) = self.overlay.as_mut() else {
                    return;
                };
                if view.story.id != story_id {
                    return;
                }
                view.comments = match result {
                    Ok(comments) => Loadable::Ready(comments),
                    Err(err) => {
                        warn!(story = story_id, error = %err, "failed to load comments");
                        Loadable::Failed("Failed to load comments".into())
                    }
                };
            }
            UiEvent::FavoritesLoaded(result) => {
                let Some(Overlay::Favorites(view)) = self.overlay.as_mut() else {
                    return;
                };
                view.stories = match result {
                    Ok(stories) => {
                        view.table_state
                            .select(if stories.is_empty() { None } else { Some(0) });
                        Loadable::Ready(stories)
                    }
                    Err(err) => {
                        warn!(error = %err, "failed to load favorites");
                        Loadable::Failed("Failed to load favorite stories".into())
                    }
                };
            }
        }
    }

    pub(crate) fn selected_story(&self) -> Option<&Item> {
        self.table_state
            .selected()
            .and_then(|index| self.feed.items().get(index))
    }

    /// Open the comments overlay and load the thread in the background.
    pub(crate) fn open_thread(&mut self, story: Item) {
        let story_id = story.id;
        self.overlay = Some(Overlay::Thread(ThreadView::new(story.clone())));

        let source = Arc::clone(&self.source);
        let tx = self.events_tx.clone();
        let limit = self.comment_limit;
        self.runtime.spawn(async move {
            let result = load_thread(source.as_ref(), &story, limit).await;
            let _ = tx.send(UiEvent::ThreadLoaded { story_id, result });
        });
    }

    /// Open the favorites overlay and load the stories in the background.
    pub(crate) fn open_favorites(&mut self) {
        let Some(user) = self.session.user() else {
            self.set_notice("Log in to see favorites");
            return;
        };
        let ids = user.favorites.clone();
        self.overlay = Some(Overlay::Favorites(FavoritesView::new()));

        let source = Arc::clone(&self.source);
        let tx = self.events_tx.clone();
        self.runtime.spawn(async move {
            let result = load_favorites(source.as_ref(), &ids).await;
            let _ = tx.send(UiEvent::FavoritesLoaded(result));
        });
    }

    pub(crate) fn set_notice(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice {
            text: text.into(),
            expires: Instant::now() + NOTICE_TTL,
        });
    }

    pub(crate) fn sync_selection(&mut self) {
        let len = self.feed.items().len();
        let selected = match self.table_state.selected() {
            _ if len == 0 => None,
            None => Some(0),
            Some(index) => Some(index.min(len - 1)),
        };
        self.table_state.select(selected);
    }
}

impl Drop for App<'_> {
    fn drop(&mut self) {
        self.scheduler.disable();
    }
}
