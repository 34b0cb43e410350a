use client::{Notification, Severity};
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::ui::theme::Theme;

/// Bottom-right notification box, green for success and red for errors.
pub fn render(frame: &mut Frame<'_>, area: Rect, notification: Option<&Notification>) {
    let Some(notification) = notification else {
        return;
    };
    let theme = Theme::default();
    let width = (notification.message.chars().count() + 4).min(area.width as usize) as u16;
    let height = 3u16;
    let x = area.x + area.width.saturating_sub(width);
    let y = area
        .y
        .saturating_add(area.height.saturating_sub(height + 1));
    let rect = Rect { x, y, width, height };

    let style = match notification.severity {
        Severity::Success => Style::default().fg(theme.positive),
        Severity::Error => Style::default().fg(theme.error),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(style);
    let content = Paragraph::new(Line::from(notification.message.as_str())).style(style);
    frame.render_widget(Clear, rect);
    frame.render_widget(content.block(block), rect);
}
