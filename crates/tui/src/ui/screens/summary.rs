use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

use crate::{
    app::AppState,
    ui::{
        components::{card::StatCard, charts},
        theme::Theme,
    },
};

/// Income, expense and net, side by side.
pub fn render_cards(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let placeholder = "-";
    let (income, expense, net) = match &state.summary {
        Some(cards) => (
            cards.total_income.as_str(),
            cards.total_expense.as_str(),
            cards.net.as_str(),
        ),
        None => (placeholder, placeholder, placeholder),
    };
    let net_color = if net.starts_with('-') {
        theme.negative
    } else {
        theme.positive
    };

    StatCard::new("Total income", income, theme)
        .color(theme.positive)
        .render(frame, columns[0]);
    StatCard::new("Total expense", expense, theme)
        .color(theme.negative)
        .render(frame, columns[1]);
    StatCard::new("Net", net, theme)
        .color(net_color)
        .render(frame, columns[2]);
}

pub fn render_charts(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    charts::render_month_chart(frame, rows[0], state.charts.month.as_ref(), theme);
    charts::render_category_chart(frame, rows[1], state.charts.category.as_ref(), theme);
}
