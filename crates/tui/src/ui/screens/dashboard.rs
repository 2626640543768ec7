use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    app::AppState,
    ui::{
        components::hints::{context_hints, global_hints, hint_separator, hints_to_spans},
        screens::{form, summary, table},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info bar
            Constraint::Length(3), // Summary cards
            Constraint::Length(12), // Form + charts
            Constraint::Min(6), // Search + table
            Constraint::Length(1), // Key hints
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);
    summary::render_cards(frame, layout[1], state, &theme);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(layout[2]);
    form::render(frame, middle[0], state, &theme);
    summary::render_charts(frame, middle[1], state, &theme);

    table::render(frame, layout[3], state, &theme);
    render_bottom_bar(frame, layout[4], state, &theme);
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let refresh = state
        .last_refresh
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string());
    let filter = if state.table.query.is_empty() {
        "none".to_string()
    } else {
        format!("\"{}\"", state.table.query)
    };

    let mut spans = vec![
        Span::styled("Endpoint", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}  ", state.endpoint)),
        Span::styled("Records", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}  ", state.table.store.len())),
        Span::styled("Filter", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {filter}  ")),
        Span::styled("Refresh", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {refresh}  ")),
    ];
    if state.busy {
        spans.push(Span::styled("loading…", Style::default().fg(theme.accent)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut parts = hints_to_spans(&context_hints(state), theme);
    parts.push(hint_separator(theme));
    parts.extend(hints_to_spans(&global_hints(), theme));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
