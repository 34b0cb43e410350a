use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::ui::theme::Theme;

/// Renders a horizontal tab bar; the active label is bracketed and highlighted.
pub fn render_tabs(frame: &mut Frame<'_>, area: Rect, labels: &[&str], active: usize, theme: &Theme) {
    frame.render_widget(Paragraph::new(tab_line(labels, active, theme)), area);
}

pub fn tab_line<'a>(labels: &[&'a str], active: usize, theme: &Theme) -> Line<'a> {
    let mut spans = vec![Span::raw(" ")]; // Leading padding

    for (i, label) in labels.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  ")); // Gap between tabs
        }

        if i == active {
            spans.push(Span::styled("[", Style::default().fg(theme.accent)));
            spans.push(Span::styled(
                *label,
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled("]", Style::default().fg(theme.accent)));
        } else {
            spans.push(Span::styled(*label, Style::default().fg(theme.text_muted)));
        }
    }

    Line::from(spans)
}
