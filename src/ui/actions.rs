use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use super::App;
use super::input::LineInput;
use super::overlay::{LoginForm, LoginMode, Overlay, ProfileView};
use crate::api::Section;
use crate::session::SessionError;

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeyOutcome {
    Continue,
    Quit,
}

impl<'a> App<'a> {
    pub(crate) fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return KeyOutcome::Quit;
        }
        if self.overlay.is_some() {
            self.handle_overlay_key(key);
            return KeyOutcome::Continue;
        }
        if self.search_focused {
            self.handle_search_key(key);
            return KeyOutcome::Continue;
        }
        self.handle_browse_key(key)
    }

    fn handle_browse_key(&mut self, key: KeyEvent) -> KeyOutcome {
        match key.code {
            KeyCode::Char('q') => return KeyOutcome::Quit,
            KeyCode::Tab => self.switch_section(self.feed.section().next()),
            KeyCode::BackTab => self.switch_section(self.feed.section().previous()),
            KeyCode::Char(digit @ '1'..='5') => {
                let index = digit as usize - '1' as usize;
                if let Some(section) = Section::ALL.get(index).copied() {
                    self.switch_section(section);
                }
            }
            KeyCode::Char('/') => {
                self.search_focused = true;
                self.search_input.set_cursor_visible(true);
            }
            KeyCode::Esc => {
                if self.feed.is_searching() {
                    self.search_input.clear();
                    self.feed.clear_query();
                    self.sync_selection();
                }
            }
            KeyCode::Up | KeyCode::Char('k') => self.move_selection_up(),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection_down(),
            KeyCode::Home | KeyCode::Char('g') => self.select_first(),
            KeyCode::End | KeyCode::Char('G') => self.select_last(),
            KeyCode::Char('r') => {
                if let Err(err) = self.feed.refresh() {
                    debug!(error = %err, "manual refresh skipped");
                }
            }
            KeyCode::Char('a') => {
                let enabled = self.scheduler.toggle();
                self.set_notice(if enabled {
                    "Auto-refresh on"
                } else {
                    "Auto-refresh off"
                });
            }
            KeyCode::Enter | KeyCode::Char('c') => {
                if let Some(story) = self.selected_story().cloned() {
                    self.open_thread(story);
                }
            }
            KeyCode::Char('f') => self.toggle_favorite_selected(),
            KeyCode::Char('v') => self.toggle_vote_selected(),
            KeyCode::Char('F') => self.open_favorites(),
            KeyCode::Char('P') => {
                if self.session.is_logged_in() {
                    self.overlay = Some(Overlay::Profile(ProfileView::default()));
                } else {
                    self.open_login();
                }
            }
            KeyCode::Char('L') => self.open_login(),
            _ => {}
        }
        KeyOutcome::Continue
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => {
                self.search_focused = false;
                self.search_input.set_cursor_visible(false);
            }
            KeyCode::Up => self.move_selection_up(),
            KeyCode::Down => self.move_selection_down(),
            _ => {
                if self.search_input.input(key) {
                    self.feed.set_query(self.search_input.text());
                    self.table_state
                        .select(if self.feed.items().is_empty() { None } else { Some(0) });
                }
            }
        }
    }

    fn switch_section(&mut self, section: Section) {
        if section == self.feed.section() {
            return;
        }
        self.search_input.clear();
        if let Err(err) = self.feed.change_section(section) {
            debug!(error = %err, "section change load skipped");
        }
        self.table_state.select(None);
        self.sync_selection();
    }

    fn move_selection_up(&mut self) {
        if let Some(selected) = self.table_state.selected()
            && selected > 0
        {
            self.table_state.select(Some(selected - 1));
        }
    }

    fn move_selection_down(&mut self) {
        let len = self.feed.items().len();
        if let Some(selected) = self.table_state.selected()
            && selected + 1 < len
        {
            self.table_state.select(Some(selected + 1));
        }
        self.maybe_fetch_more();
    }

    fn select_first(&mut self) {
        if !self.feed.items().is_empty() {
            self.table_state.select(Some(0));
        }
    }

    fn select_last(&mut self) {
        let len = self.feed.items().len();
        if len > 0 {
            self.table_state.select(Some(len - 1));
            self.maybe_fetch_more();
        }
    }

    /// Request the next page once the last row is selected.
    fn maybe_fetch_more(&mut self) {
        let len = self.feed.items().len();
        if len > 0 && self.table_state.selected() == Some(len - 1) {
            self.feed.fetch_more();
        }
    }

    fn toggle_favorite_selected(&mut self) {
        let Some(id) = self.selected_story().map(|story| story.id) else {
            return;
        };
        if !self.session.is_logged_in() {
            self.set_notice("Log in to save favorites");
            return;
        }
        match self.session.toggle_favorite(id) {
            Ok(true) => self.set_notice("Added to favorites"),
            Ok(false) => self.set_notice("Removed from favorites"),
            Err(err) => self.report_session_error(err),
        }
    }

    fn toggle_vote_selected(&mut self) {
        let Some(id) = self.selected_story().map(|story| story.id) else {
            return;
        };
        if !self.session.is_logged_in() {
            self.set_notice("Log in to vote");
            return;
        }
        match self.session.toggle_vote(id) {
            Ok(true) => self.set_notice("Upvoted"),
            Ok(false) => self.set_notice("Vote removed"),
            Err(err) => self.report_session_error(err),
        }
    }

    fn open_login(&mut self) {
        self.overlay = Some(Overlay::Login(LoginForm::new(&self.theme)));
    }

    fn report_session_error(&mut self, err: SessionError) {
        tracing::warn!(error = %err, "session update failed");
        self.set_notice(err.to_string());
    }

    fn handle_overlay_key(&mut self, key: KeyEvent) {
        let Some(overlay) = self.overlay.take() else {
            return;
        };
        self.overlay = match overlay {
            Overlay::Thread(mut view) => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => None,
                KeyCode::Down | KeyCode::Char('j') => {
                    view.scroll = view.scroll.saturating_add(1);
                    Some(Overlay::Thread(view))
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    view.scroll = view.scroll.saturating_sub(1);
                    Some(Overlay::Thread(view))
                }
                _ => Some(Overlay::Thread(view)),
            },
            Overlay::Favorites(mut view) => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => None,
                KeyCode::Down | KeyCode::Char('j') => {
                    if let Some(selected) = view.table_state.selected()
                        && selected + 1 < view.len()
                    {
                        view.table_state.select(Some(selected + 1));
                    }
                    Some(Overlay::Favorites(view))
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    if let Some(selected) = view.table_state.selected()
                        && selected > 0
                    {
                        view.table_state.select(Some(selected - 1));
                    }
                    Some(Overlay::Favorites(view))
                }
                KeyCode::Enter | KeyCode::Char('c') => match view.selected().cloned() {
                    Some(story) => {
                        self.open_thread(story);
                        return;
                    }
                    None => Some(Overlay::Favorites(view)),
                },
                _ => Some(Overlay::Favorites(view)),
            },
            Overlay::Profile(view) => self.handle_profile_key(view, key),
            Overlay::Login(form) => self.handle_login_key(form, key),
        };
    }

    fn handle_profile_key(&mut self, mut view: ProfileView<'a>, key: KeyEvent) -> Option<Overlay<'a>> {
        if let Some(mut input) = view.editing.take() {
            match key.code {
                KeyCode::Esc => {}
                KeyCode::Enter => {
                    if let Err(err) = self.session.update_about(input.text()) {
                        self.report_session_error(err);
                    }
                }
                _ => {
                    input.input(key);
                    view.editing = Some(input);
                }
            }
            return Some(Overlay::Profile(view));
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => None,
            KeyCode::Char('e') => {
                let about = self
                    .session
                    .user()
                    .map(|user| user.about.clone())
                    .unwrap_or_default();
                let mut input = LineInput::new(about);
                input.set_cursor_visible(true);
                view.editing = Some(input);
                Some(Overlay::Profile(view))
            }
            KeyCode::Char('L') => {
                match self.session.logout() {
                    Ok(()) => self.set_notice("Logged out"),
                    Err(err) => self.report_session_error(err),
                }
                None
            }
            _ => Some(Overlay::Profile(view)),
        }
    }

    fn handle_login_key(&mut self, mut form: LoginForm<'a>, key: KeyEvent) -> Option<Overlay<'a>> {
        match key.code {
            KeyCode::Esc => return None,
            KeyCode::Tab | KeyCode::BackTab => form.focus_next(),
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                form.toggle_mode();
            }
            KeyCode::Enter => {
                let username = form.username.text().to_string();
                let password = form.password.text().to_string();
                let result = match form.mode {
                    LoginMode::Login => self
                        .session
                        .login(&username, &password)
                        .map(|user| user.username.clone()),
                    LoginMode::Signup => self
                        .session
                        .signup(&username, form.email.text(), &password)
                        .map(|user| user.username.clone()),
                };
                match result {
                    Ok(name) => {
                        self.set_notice(format!("Welcome, {name}"));
                        return None;
                    }
                    Err(err) => form.error = Some(err.to_string()),
                }
            }
            _ => {
                form.focused_mut().input(key);
            }
        }
        Some(Overlay::Login(form))
    }
}
