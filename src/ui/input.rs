use ratatui::Frame;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::Style;
use tui_textarea::TextArea;

/// Single-line text field on top of `tui-textarea`.
pub struct LineInput<'a> {
    textarea: TextArea<'a>,
}

impl<'a> LineInput<'a> {
    pub fn new(initial: impl Into<String>) -> Self {
        let mut textarea = TextArea::new(vec![initial.into()]);
        textarea.set_cursor_line_style(Style::default());
        textarea.move_cursor(tui_textarea::CursorMove::End);
        Self { textarea }
    }

    /// Field whose contents render as bullets.
    pub fn masked() -> Self {
        let mut input = Self::new(String::new());
        input.textarea.set_mask_char('\u{2022}');
        input
    }

    pub fn text(&self) -> &str {
        self.textarea
            .lines()
            .first()
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn set_placeholder(&mut self, placeholder: &str, style: Style) {
        self.textarea.set_placeholder_text(placeholder);
        self.textarea.set_placeholder_style(style);
    }

    pub fn clear(&mut self) {
        self.textarea.select_all();
        self.textarea.cut();
    }

    /// Feed a key to the field. Returns `true` when the text changed.
    ///
    /// Line breaks are swallowed so the field stays single-line.
    pub fn input(&mut self, key: KeyEvent) -> bool {
        if matches!(key.code, KeyCode::Enter)
            || (key.code == KeyCode::Char('m') && key.modifiers.contains(KeyModifiers::CONTROL))
        {
            return false;
        }
        self.textarea.input(key)
    }

    pub fn set_cursor_visible(&mut self, visible: bool) {
        let style = if visible {
            Style::default().add_modifier(ratatui::style::Modifier::REVERSED)
        } else {
            Style::default()
        };
        self.textarea.set_cursor_style(style);
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(&self.textarea, area);
    }
}
