pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use client::Tab;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{AppState, Screen, Section};
use components::hints::{KeyHint, hint_separator, hints_to_spans};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let area = frame.area();
    match state.screen {
        Screen::Login => screens::login::render(frame, area, state),
        Screen::Main => render_shell(frame, area, state),
    }
    components::toast::render(frame, area, state.notifier.current());
}

/// Rect of the given size centered in `area`.
pub fn centered_box(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1]);

    horizontal[1]
}

fn render_shell(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info bar
            Constraint::Length(2), // Section tabs
            Constraint::Min(0),    // Resource table
            Constraint::Length(1), // Bottom bar
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);
    let labels = Section::ALL.map(Section::label);
    let active = Section::ALL
        .iter()
        .position(|s| *s == state.section)
        .unwrap_or(0);
    components::tabs::render_tabs(frame, layout[1], &labels, active, &theme);

    screens::resources::render(frame, layout[2], state, &theme);

    render_bottom_bar(frame, layout[3], state, &theme);
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let user = state.user.as_ref().map_or("-", |u| u.username.as_str());

    let line = Line::from(vec![
        Span::styled("User", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {user}  ")),
        Span::styled("Server", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}", state.base_url)),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut parts = Vec::new();
    if state.form_open() {
        parts.extend(hints_to_spans(
            &[
                KeyHint::new("Tab", "next"),
                KeyHint::new("←→", "choose"),
                KeyHint::new("Enter", "save"),
                KeyHint::new("Esc", "cancel"),
            ],
            theme,
        ));
    } else {
        parts.extend(hints_to_spans(&[KeyHint::new("1/2/3", "section")], theme));
        parts.push(hint_separator(theme));
        let context = match state.current_tab() {
            Tab::Active => vec![
                KeyHint::new("a", "add"),
                KeyHint::new("e", "edit"),
                KeyHint::new("d", "delete"),
                KeyHint::new("Tab", "deleted"),
            ],
            Tab::Deleted => vec![
                KeyHint::new("a", "add"),
                KeyHint::new("r", "restore"),
                KeyHint::new("Tab", "active"),
            ],
        };
        parts.extend(hints_to_spans(&context, theme));
        parts.push(hint_separator(theme));
        parts.extend(hints_to_spans(
            &[
                KeyHint::new("R", "refresh"),
                KeyHint::new("L", "logout"),
                KeyHint::new("q", "quit"),
            ],
            theme,
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
