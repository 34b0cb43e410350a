use client::{CellValue, RowAction, TableModel, table::Align};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Row, Table, TableState},
};

use crate::ui::theme::Theme;

const BAR_WIDTH: usize = 10;

pub fn render(
    frame: &mut Frame<'_>,
    area: Rect,
    model: &TableModel,
    selected: usize,
    title: &str,
    theme: &Theme,
) {
    let widths: Vec<Constraint> = model
        .headers
        .iter()
        .map(|h| match h.width {
            Some(percent) => Constraint::Percentage(percent),
            None => Constraint::Fill(1),
        })
        .collect();

    let header = Row::new(model.headers.iter().map(|h| {
        Cell::from(Line::from(h.label).alignment(alignment(h.align)))
    }))
    .style(
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    );

    let rows = model.rows.iter().map(|row| {
        Row::new(
            row.cells
                .iter()
                .zip(&model.headers)
                .map(|(cell, h)| Cell::from(cell_line(cell, theme).alignment(alignment(h.align)))),
        )
        .style(Style::default().fg(theme.text))
    });

    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().bg(theme.panel).add_modifier(Modifier::BOLD))
        .highlight_symbol("▶ ");

    let mut table_state = TableState::default().with_selected(Some(selected));
    frame.render_stateful_widget(table, area, &mut table_state);
}

fn alignment(align: Align) -> Alignment {
    match align {
        Align::Left => Alignment::Left,
        Align::Center => Alignment::Center,
        Align::Right => Alignment::Right,
    }
}

fn cell_line(cell: &CellValue, theme: &Theme) -> Line<'static> {
    match cell {
        CellValue::Text(text) => Line::from(text.clone()),
        CellValue::Progress { percent, label } => Line::from(vec![
            Span::styled(progress_bar(*percent, BAR_WIDTH), Style::default().fg(theme.positive)),
            Span::raw(format!(" {percent:>3}% ")),
            Span::styled(label.clone(), Style::default().fg(theme.text_muted)),
        ]),
        CellValue::Actions(actions) => {
            let mut spans = Vec::new();
            for (i, action) in actions.iter().enumerate() {
                if i > 0 {
                    spans.push(Span::raw(" "));
                }
                spans.push(Span::styled(action_key(*action), Style::default().fg(theme.accent)));
                spans.push(Span::raw(format!(":{}", action.label())));
            }
            Line::from(spans)
        }
    }
}

fn action_key(action: RowAction) -> &'static str {
    match action {
        RowAction::Edit => "e",
        RowAction::Delete => "d",
        RowAction::Restore => "r",
    }
}

/// Text bar `width` cells wide, filled proportionally to `percent`.
pub fn progress_bar(percent: u8, width: usize) -> String {
    let filled = (usize::from(percent.min(100)) * width + 50) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
