use client::{Resource, Tab, TableModel};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::{
    app::{AppState, Pane, Section},
    ui::{components, theme::Theme},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    match state.section {
        Section::Wallets => render_pane(frame, area, &state.wallets, theme),
        Section::Categories => render_pane(frame, area, &state.categories, theme),
        Section::Goals => render_pane(frame, area, &state.goals, theme),
    }
}

fn render_pane<R: Resource>(frame: &mut Frame<'_>, area: Rect, pane: &Pane<R>, theme: &Theme) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    let tab = pane.list.tab();
    let active = match tab {
        Tab::Active => 0,
        Tab::Deleted => 1,
    };
    components::tabs::render_tabs(
        frame,
        layout[0],
        &[Tab::Active.label(), Tab::Deleted.label()],
        active,
        theme,
    );

    let d = R::DESCRIPTOR;
    let items = pane.list.visible();
    if items.is_empty() {
        let message = if pane.list.is_loading() {
            "Loading...".to_string()
        } else {
            match tab {
                Tab::Active => format!("No {} yet. Press a to add one.", d.plural_noun()),
                Tab::Deleted => format!("No recently deleted {}.", d.plural_noun()),
            }
        };
        let block = Block::default()
            .title(format!(" {} ", d.plural_label))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.border));
        frame.render_widget(
            Paragraph::new(Line::from(message))
                .style(Style::default().fg(theme.text_muted))
                .alignment(Alignment::Center)
                .block(block),
            layout[1],
        );
    } else {
        let model = TableModel::build(items, tab);
        let title = if pane.list.is_loading() {
            format!("{} (loading)", d.plural_label)
        } else {
            d.plural_label.to_string()
        };
        components::table::render(
            frame,
            layout[1],
            &model,
            pane.list.selected(),
            &title,
            theme,
        );
    }

    components::form::render(frame, area, &pane.form, theme);
}
