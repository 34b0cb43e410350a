use client::{
    CrudForm, FormMode, Resource,
    form::{FieldKind, FieldSpec},
};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::ui::{centered_box, theme::Theme};

const FIELD_ROWS: u16 = 3;

/// Modal create/edit form: label, input and error line per visible field.
pub fn render<R: Resource>(frame: &mut Frame<'_>, area: Rect, form: &CrudForm<R>, theme: &Theme) {
    let title = match form.mode() {
        FormMode::Closed => return,
        FormMode::Creating => format!(" Add {} ", R::DESCRIPTOR.label),
        FormMode::Editing(_) => format!(" Edit {} ", R::DESCRIPTOR.label),
    };
    let fields = form.visible_fields();
    let height = fields.len() as u16 * FIELD_ROWS + 5;
    let rect = centered_box(48u16.min(area.width), height.min(area.height), area);

    // Clear the table behind the modal
    frame.render_widget(Clear, rect);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.accent));
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let mut constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(FIELD_ROWS))
        .collect();
    constraints.push(Constraint::Min(1)); // Status line
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .margin(1)
        .split(inner);

    for (i, field) in fields.iter().enumerate() {
        let focused = i == form.focus();
        render_field(frame, rows[i], form, field, focused, theme);
    }

    let status = if form.is_pending() {
        Span::styled("Saving...", Style::default().fg(theme.text_muted))
    } else {
        Span::styled("Enter save  Esc cancel", Style::default().fg(theme.text_muted))
    };
    if let Some(area) = rows.last() {
        frame.render_widget(Paragraph::new(Line::from(status)), *area);
    }
}

fn render_field<R: Resource>(
    frame: &mut Frame<'_>,
    area: Rect,
    form: &CrudForm<R>,
    field: &FieldSpec,
    focused: bool,
    theme: &Theme,
) {
    let value = form.input_text(field.key);
    let shown = match field.kind {
        FieldKind::Choice => format!("◀ {value} ▶"),
        _ if focused => format!("{value}│"),
        _ => value.to_string(),
    };
    let input_style = if focused {
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text)
    };

    let mut lines = vec![
        Line::from(Span::styled(field.label, Style::default().fg(theme.text_muted))),
        Line::from(Span::styled(shown, input_style)),
    ];
    if let Some(error) = form.field_error(field.key) {
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(theme.error),
        )));
    }
    frame.render_widget(Paragraph::new(lines), area);
}
