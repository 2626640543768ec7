use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState as WidgetState},
};

use api_types::transaction::TransactionType;

use crate::{
    app::{AppState, Focus, table::row_cells},
    ui::{components::card::Card, theme::Theme},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_search(frame, layout[0], state, theme);
    render_rows(frame, layout[1], state, theme);
}

fn render_search(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let focused = state.focus == Focus::Search;
    let card = Card::new("Search", theme).focused(focused);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    let query = &state.table.query;
    let line = if query.is_empty() && !focused {
        Line::from(Span::styled(
            "description or category",
            Style::default().fg(theme.text_muted),
        ))
    } else {
        let cursor = if focused { "│" } else { "" };
        Line::from(Span::styled(
            format!("{query}{cursor}"),
            Style::default().fg(theme.text),
        ))
    };
    frame.render_widget(Paragraph::new(line), inner);
}

fn render_rows(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let visible = state.table.visible();
    let title = if state.table.query.is_empty() {
        format!("Transactions ({})", state.table.store.len())
    } else {
        format!(
            "Transactions ({} of {})",
            visible.len(),
            state.table.store.len()
        )
    };
    let card = Card::new(&title, theme).focused(state.focus == Focus::Table);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    if visible.is_empty() {
        let message = if state.table.store.is_empty() {
            "No transactions."
        } else {
            "Nothing matches the search."
        };
        frame.render_widget(
            Paragraph::new(Span::styled(message, Style::default().fg(theme.text_muted)))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let rows = visible.iter().map(|tx| {
        let [date, category, description, amount, kind] = row_cells(tx);
        let amount_color = match tx.kind {
            Some(TransactionType::Income) => theme.positive,
            Some(TransactionType::Expense) => theme.negative,
            None => theme.text,
        };
        Row::new(vec![
            Cell::from(date),
            Cell::from(category),
            Cell::from(description),
            Cell::from(Line::from(amount).alignment(Alignment::Right))
                .style(Style::default().fg(amount_color)),
            Cell::from(kind),
        ])
    });

    let header = Row::new(["Date", "Category", "Description", "Amount", "Type"])
        .style(Style::default().fg(theme.text_muted).add_modifier(Modifier::BOLD));

    let table = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Length(16),
            Constraint::Min(12),
            Constraint::Length(12),
            Constraint::Length(8),
        ],
    )
    .header(header)
    .column_spacing(2)
    .row_highlight_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
    .highlight_symbol("» ");

    let mut widget_state = WidgetState::default().with_selected(Some(state.table.selected));
    frame.render_stateful_widget(table, inner, &mut widget_state);
}
