use ratatui::widgets::TableState;

use crate::api::Item;

use super::input::LineInput;
use super::theme::Theme;

/// Result of a background load shown by an overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Loadable<T> {
    Loading,
    Failed(String),
    Ready(T),
}

/// A window drawn over the story table.
pub(crate) enum Overlay<'a> {
    Thread(ThreadView),
    Favorites(FavoritesView),
    Profile(ProfileView<'a>),
    Login(LoginForm<'a>),
}

pub(crate) struct ThreadView {
    pub story: Item,
    pub comments: Loadable<Vec<Item>>,
    pub scroll: u16,
}

impl ThreadView {
    pub fn new(story: Item) -> Self {
        Self {
            story,
            comments: Loadable::Loading,
            scroll: 0,
        }
    }
}

pub(crate) struct FavoritesView {
    pub stories: Loadable<Vec<Item>>,
    pub table_state: TableState,
}

impl FavoritesView {
    pub fn new() -> Self {
        Self {
            stories: Loadable::Loading,
            table_state: TableState::default(),
        }
    }

    pub fn selected(&self) -> Option<&Item> {
        let Loadable::Ready(stories) = &self.stories else {
            return None;
        };
        self.table_state.selected().and_then(|index| stories.get(index))
    }

    pub fn len(&self) -> usize {
        match &self.stories {
            Loadable::Ready(stories) => stories.len(),
            _ => 0,
        }
    }
}

#[derive(Default)]
pub(crate) struct ProfileView<'a> {
    /// Present while the "about" text is being edited.
    pub editing: Option<LineInput<'a>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoginMode {
    Login,
    Signup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoginField {
    Username,
    Email,
    Password,
}

pub(crate) struct LoginForm<'a> {
    pub mode: LoginMode,
    pub focus: LoginField,
    pub username: LineInput<'a>,
    pub email: LineInput<'a>,
    pub password: LineInput<'a>,
    pub error: Option<String>,
}

impl<'a> LoginForm<'a> {
    pub fn new(theme: &Theme) -> Self {
        let mut username = LineInput::new(String::new());
        username.set_placeholder("username", theme.empty);
        let mut email = LineInput::new(String::new());
        email.set_placeholder("you@example.com", theme.empty);
        let mut password = LineInput::masked();
        password.set_placeholder("at least 6 characters", theme.empty);
        let mut form = Self {
            mode: LoginMode::Login,
            focus: LoginField::Username,
            username,
            email,
            password,
            error: None,
        };
        form.sync_cursor();
        form
    }

    /// Fields shown in the current mode, top to bottom.
    pub fn fields(&self) -> &'static [LoginField] {
        match self.mode {
            LoginMode::Login => &[LoginField::Username, LoginField::Password],
            LoginMode::Signup => &[LoginField::Username, LoginField::Email, LoginField::Password],
        }
    }

    pub fn focus_next(&mut self) {
        let fields = self.fields();
        let index = fields.iter().position(|field| *field == self.focus).unwrap_or(0);
        self.focus = fields[(index + 1) % fields.len()];
        self.sync_cursor();
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            LoginMode::Login => LoginMode::Signup,
            LoginMode::Signup => LoginMode::Login,
        };
        if !self.fields().contains(&self.focus) {
            self.focus = LoginField::Username;
        }
        self.error = None;
        self.sync_cursor();
    }

    pub fn focused_mut(&mut self) -> &mut LineInput<'a> {
        self.field_mut(self.focus)
    }

    pub fn field(&self, field: LoginField) -> &LineInput<'a> {
        match field {
            LoginField::Username => &self.username,
            LoginField::Email => &self.email,
            LoginField::Password => &self.password,
        }
    }

    fn field_mut(&mut self, field: LoginField) -> &mut LineInput<'a> {
        match field {
            LoginField::Username => &mut self.username,
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
        }
    }

    fn sync_cursor(&mut self) {
        let focus = self.focus;
        for field in [LoginField::Username, LoginField::Email, LoginField::Password] {
            self.field_mut(field).set_cursor_visible(field == focus);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_form_cycles_visible_fields() {
        let mut form = LoginForm::new(&Theme::default());
        assert_eq!(form.focus, LoginField::Username);
        form.focus_next();
        assert_eq!(form.focus, LoginField::Password);
        form.focus_next();
        assert_eq!(form.focus, LoginField::Username);

        form.toggle_mode();
        form.focus_next();
        assert_eq!(form.focus, LoginField::Email);
    }

    #[test]
    fn leaving_signup_moves_focus_off_email() {
        let mut form = LoginForm::new(&Theme::default());
        form.toggle_mode();
        form.focus_next();
        assert_eq!(form.focus, LoginField::Email);
        form.toggle_mode();
        assert_eq!(form.mode, LoginMode::Login);
        assert_eq!(form.focus, LoginField::Username);
    }
}
