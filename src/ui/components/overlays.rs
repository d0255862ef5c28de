use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, HighlightSpacing, Paragraph, Row, Table, Wrap};

use crate::api::Item;
use crate::format;
use crate::session::UserRecord;
use crate::ui::overlay::{
    FavoritesView, Loadable, LoginField, LoginForm, LoginMode, ProfileView, ThreadView,
};
use crate::ui::theme::Theme;

/// Area of `percent_x` by `percent_y` centered in `area`.
pub fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let [vertical] = Layout::vertical([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .areas(area);
    let [horizontal] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(vertical);
    horizontal
}

fn framed<'a>(title: impl Into<Line<'a>>, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme.muted)
        .title(title)
        .title_style(theme.prompt)
}

pub fn render_thread(frame: &mut Frame, area: Rect, view: &ThreadView, now: i64, theme: &Theme) {
    let area = centered(area, 90, 90);
    frame.render_widget(Clear, area);

    let story = &view.story;
    let mut lines = vec![
        Line::styled(story.title.clone(), theme.highlight),
        Line::styled(story_meta(story, now), theme.muted),
    ];
    if let Some(text) = story.text.as_deref() {
        lines.push(Line::default());
        lines.extend(Text::from(format::plain_text(text)).lines);
    }
    lines.push(Line::default());

    match &view.comments {
        Loadable::Loading => lines.push(Line::styled("Loading comments...", theme.empty)),
        Loadable::Failed(message) => lines.push(Line::styled(message.clone(), theme.error)),
        Loadable::Ready(comments) if comments.is_empty() => {
            lines.push(Line::styled("No comments yet.", theme.empty));
        }
        Loadable::Ready(comments) => {
            for comment in comments {
                lines.push(Line::from(vec![
                    Span::styled(comment.by.clone(), theme.prompt),
                    Span::styled(format!("  {}", format::time_ago(comment.time, now)), theme.muted),
                ]));
                let body = comment.text.as_deref().map(format::plain_text).unwrap_or_default();
                lines.extend(Text::from(body).lines);
                lines.push(Line::default());
            }
        }
    }

    let title = format!(" {} comments  (j/k scroll, Esc close) ", story.descendants);
    let paragraph = Paragraph::new(lines)
        .block(framed(title, theme))
        .wrap(Wrap { trim: false })
        .scroll((view.scroll, 0));
    frame.render_widget(paragraph, area);
}

pub fn render_favorites(frame: &mut Frame, area: Rect, view: &mut FavoritesView, theme: &Theme) {
    let area = centered(area, 80, 70);
    frame.render_widget(Clear, area);
    let block = framed(" Favorites  (Enter comments, Esc close) ", theme);

    let stories = match &view.stories {
        Loadable::Loading => {
            frame.render_widget(Paragraph::new("Loading...").style(theme.empty).block(block), area);
            return;
        }
        Loadable::Failed(message) => {
            frame.render_widget(Paragraph::new(message.as_str()).style(theme.error).block(block), area);
            return;
        }
        Loadable::Ready(stories) if stories.is_empty() => {
            frame.render_widget(
                Paragraph::new("No favorites yet. Press f on a story to save it.")
                    .style(theme.empty)
                    .block(block),
                area,
            );
            return;
        }
        Loadable::Ready(stories) => stories,
    };

    let rows: Vec<Row> = stories
        .iter()
        .map(|story| {
            Row::new(vec![
                story.title.clone(),
                story.score.to_string(),
                story.by.clone(),
            ])
        })
        .collect();
    let table = Table::new(
        rows,
        [Constraint::Min(20), Constraint::Length(6), Constraint::Length(15)],
    )
    .block(block)
    .row_highlight_style(theme.row_highlight)
    .highlight_symbol("▶ ")
    .highlight_spacing(HighlightSpacing::Always);
    frame.render_stateful_widget(table, area, &mut view.table_state);
}

pub fn render_profile(
    frame: &mut Frame,
    area: Rect,
    view: &ProfileView<'_>,
    user: &UserRecord,
    now: i64,
    theme: &Theme,
) {
    let area = centered(area, 60, 50);
    frame.render_widget(Clear, area);
    let block = framed(format!(" {} ", user.username), theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let field = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{label:<10}"), theme.muted),
            Span::raw(value),
        ])
    };
    let details = vec![
        field("karma", user.karma.to_string()),
        field("created", format::account_age(user.created, now)),
        field("email", user.email.clone()),
        field("favorites", user.favorites.len().to_string()),
        field("votes", user.voted.len().to_string()),
    ];

    let [details_area, about_area, hint_area] = Layout::vertical([
        Constraint::Length(details.len() as u16 + 1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(inner);
    frame.render_widget(Paragraph::new(details), details_area);

    let hint = match &view.editing {
        Some(input) => {
            let [label, field_area] =
                Layout::horizontal([Constraint::Length(10), Constraint::Min(1)]).areas(about_area);
            frame.render_widget(Paragraph::new("about").style(theme.prompt), label);
            input.render(frame, field_area);
            "Enter save, Esc cancel"
        }
        None => {
            let about = if user.about.is_empty() {
                Span::styled("(empty)", theme.empty)
            } else {
                Span::raw(user.about.clone())
            };
            let line = Line::from(vec![Span::styled(format!("{:<10}", "about"), theme.muted), about]);
            frame.render_widget(Paragraph::new(line).wrap(Wrap { trim: true }), about_area);
            "e edit about, L log out, Esc close"
        }
    };
    frame.render_widget(Paragraph::new(hint).style(theme.empty), hint_area);
}

pub fn render_login(frame: &mut Frame, area: Rect, form: &LoginForm<'_>, theme: &Theme) {
    let area = centered(area, 50, 40);
    frame.render_widget(Clear, area);
    let title = match form.mode {
        LoginMode::Login => " Log in ",
        LoginMode::Signup => " Sign up ",
    };
    let block = framed(title, theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let fields = form.fields();
    let mut constraints: Vec<Constraint> = fields.iter().map(|_| Constraint::Length(1)).collect();
    constraints.extend([Constraint::Length(1), Constraint::Min(1), Constraint::Length(1)]);
    let rows = Layout::vertical(constraints).split(inner);

    for (index, field) in fields.iter().enumerate() {
        let [label_area, input_area] =
            Layout::horizontal([Constraint::Length(11), Constraint::Min(1)]).areas(rows[index]);
        let style = if *field == form.focus { theme.prompt } else { theme.muted };
        frame.render_widget(Paragraph::new(field_label(*field)).style(style), label_area);
        form.field(*field).render(frame, input_area);
    }

    if let Some(error) = &form.error {
        frame.render_widget(
            Paragraph::new(error.as_str()).style(theme.error),
            rows[fields.len() + 1],
        );
    }
    let hint = match form.mode {
        LoginMode::Login => "Tab next field, Enter log in, Ctrl-s sign up instead",
        LoginMode::Signup => "Tab next field, Enter sign up, Ctrl-s log in instead",
    };
    frame.render_widget(Paragraph::new(hint).style(theme.empty), rows[fields.len() + 2]);
}

fn field_label(field: LoginField) -> &'static str {
    match field {
        LoginField::Username => "username",
        LoginField::Email => "email",
        LoginField::Password => "password",
    }
}

fn story_meta(story: &Item, now: i64) -> String {
    let mut meta = format!(
        "{} points by {} {}",
        story.score,
        story.by,
        format::time_ago(story.time, now)
    );
    if let Some(url) = story.url.as_deref() {
        meta.push_str(&format!(" | {}", format::hostname(url)));
    }
    meta
}
