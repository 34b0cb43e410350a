use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::{
    app::{AppState, AuthMode},
    ui::{centered_box, theme::Theme},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let login = &state.login;
    let fields = login.fields();

    // One row per field plus a spacer after each, then the hint line
    let box_width = 48;
    let box_height = fields.len() as u16 * 2 + 5;
    let card_area = centered_box(box_width, box_height, area);

    // Clear the area behind the form
    frame.render_widget(Clear, card_area);

    let (title, hint) = match login.mode {
        AuthMode::Login => (" fintrack login ", "Enter login  ^R register  ^C quit"),
        AuthMode::Register => (" fintrack register ", "Enter sign up  ^R back to login  ^C quit"),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));

    let inner = block.inner(card_area);
    frame.render_widget(block, card_area);

    let mut constraints = Vec::with_capacity(fields.len() * 2 + 1);
    for _ in fields {
        constraints.push(Constraint::Length(1));
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Length(1));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .margin(1)
        .split(inner);

    for (i, field) in fields.iter().enumerate() {
        render_input(
            frame,
            rows[i * 2],
            field.label(),
            login.value(*field),
            field.is_secret(),
            login.focus == *field,
            &theme,
        );
    }

    // Key hints on the last row
    frame.render_widget(
        Paragraph::new(Span::styled(hint, Style::default().fg(theme.text_muted))),
        rows[fields.len() * 2],
    );

    // Error message below the box (only shown when there's an error)
    if let Some(message) = &login.message {
        let error_area = Rect {
            x: card_area.x,
            y: card_area.y + card_area.height + 1,
            width: card_area.width,
            height: 1,
        }
        .intersection(area);
        frame.render_widget(
            Paragraph::new(Span::styled(
                message.as_str(),
                Style::default().fg(theme.error),
            ))
            .alignment(Alignment::Center),
            error_area,
        );
    }
}

fn render_input(
    frame: &mut Frame<'_>,
    area: Rect,
    label: &str,
    value: &str,
    is_password: bool,
    focused: bool,
    theme: &Theme,
) {
    let cursor = if focused { "│" } else { "" };

    let display = if is_password {
        format!("{}{}", mask_password(value), cursor)
    } else {
        format!("{value}{cursor}")
    };

    let style = if focused {
        Style::default().fg(theme.accent) // accent when focused
    } else {
        Style::default().fg(theme.text_muted)
    };

    let line = Line::from(vec![
        Span::styled(format!("{label:<9}"), Style::default().fg(theme.text_muted)),
        Span::styled(display, style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Masks password with bullets, one per character
fn mask_password(password: &str) -> String {
    "•".repeat(password.chars().count())
}
