use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Margin};

use super::App;
use super::components::{
    StatusMessage, StoryTable, render_favorites, render_login, render_profile,
    render_search_row, render_section_tabs, render_status, render_story_table, render_thread,
};
use super::overlay::Overlay;
use crate::format;

impl<'a> App<'a> {
    pub(crate) fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let now = format::now();

        let [tabs_area, search_area, table_area, status_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(area);

        render_section_tabs(
            frame,
            tabs_area,
            self.feed.section(),
            self.session.user(),
            &self.theme,
        );
        let padded = |area: ratatui::layout::Rect| {
            area.inner(Margin {
                vertical: 0,
                horizontal: 1,
            })
        };
        render_search_row(
            frame,
            padded(search_area),
            &self.search_input,
            self.search_focused,
            &self.theme,
        );

        let empty_message = self.empty_message();
        render_story_table(
            frame,
            padded(table_area),
            &mut self.table_state,
            StoryTable {
                stories: self.feed.items(),
                query: self.feed.query(),
                session: &self.session,
                now,
                empty_message,
            },
            &self.theme,
        );

        let message = self.status_message();
        render_status(
            frame,
            padded(status_area),
            &message,
            self.scheduler.status(),
            &self.throbber_state,
            &self.theme,
        );

        let body = Layout::vertical([Constraint::Length(1), Constraint::Min(1)]).split(area)[1];
        match self.overlay.as_mut() {
            None => {}
            Some(Overlay::Thread(view)) => render_thread(frame, body, view, now, &self.theme),
            Some(Overlay::Favorites(view)) => render_favorites(frame, body, view, &self.theme),
            Some(Overlay::Profile(view)) => {
                if let Some(user) = self.session.user() {
                    render_profile(frame, body, view, user, now, &self.theme);
                }
            }
            Some(Overlay::Login(form)) => render_login(frame, body, form, &self.theme),
        }
    }

    fn empty_message(&self) -> &'static str {
        if self.feed.is_loading() {
            ""
        } else if self.feed.is_searching() {
            "No stories match your search"
        } else if self.feed.error().is_some() {
            "Nothing to show"
        } else {
            "No stories"
        }
    }

    /// Status line text, most urgent state first.
    pub(crate) fn status_message(&self) -> StatusMessage {
        if let Some(notice) = &self.notice {
            return StatusMessage::Notice(notice.text.clone());
        }
        if let Some(section) = self.feed.loading_section() {
            return StatusMessage::Loading(section);
        }
        if let Some(error) = self.feed.error() {
            return StatusMessage::Failed(error.to_string());
        }
        if self.feed.is_fetching_more() {
            return StatusMessage::FetchingMore;
        }
        if self.feed.is_searching() {
            return StatusMessage::Results {
                count: self.feed.items().len(),
                query: self.feed.query().to_string(),
            };
        }
        StatusMessage::Idle {
            count: self.feed.items().len(),
        }
    }
}
