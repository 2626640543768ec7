use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Paragraph},
};

use crate::{
    app::report::{CategoryChart, MonthChart, fixed2, whole_units},
    ui::{components::card::Card, theme::Theme},
};

/// Grouped bars per month: income then expense.
pub fn render_month_chart(
    frame: &mut Frame<'_>,
    area: Rect,
    chart: Option<&MonthChart>,
    theme: &Theme,
) {
    let card = Card::new("Income / Expense by month", theme);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    let Some(chart) = chart.filter(|chart| !chart.is_empty()) else {
        render_empty(frame, inner, theme);
        return;
    };

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let legend = Line::from(vec![
        Span::styled("■ ", Style::default().fg(theme.positive)),
        Span::raw("Income  "),
        Span::styled("■ ", Style::default().fg(theme.negative)),
        Span::raw("Expense"),
    ]);
    frame.render_widget(Paragraph::new(legend), layout[0]);

    let mut bar_chart = BarChart::default()
        .bar_width(3)
        .bar_gap(0)
        .group_gap(2)
        .value_style(Style::default().fg(theme.text).add_modifier(Modifier::BOLD))
        .label_style(Style::default().fg(theme.text_muted));

    for ((month, income), expense) in chart
        .months
        .iter()
        .zip(&chart.income)
        .zip(&chart.expense)
    {
        let bars = [
            Bar::default()
                .value(whole_units(*income))
                .style(Style::default().fg(theme.positive)),
            Bar::default()
                .value(whole_units(*expense))
                .style(Style::default().fg(theme.negative)),
        ];
        bar_chart = bar_chart.data(
            BarGroup::default()
                .label(Line::from(month.as_str()))
                .bars(&bars),
        );
    }

    frame.render_widget(bar_chart, layout[1]);
}

/// Category "pie": one share bar per category.
pub fn render_category_chart(
    frame: &mut Frame<'_>,
    area: Rect,
    chart: Option<&CategoryChart>,
    theme: &Theme,
) {
    let card = Card::new("By category", theme);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    let Some(chart) = chart.filter(|chart| !chart.is_empty()) else {
        render_empty(frame, inner, theme);
        return;
    };

    let label_width = chart
        .slices
        .iter()
        .map(|slice| slice.label.chars().count())
        .max()
        .unwrap_or(0)
        .min(16);
    // label, space, bar, space, "100.0%", space, amount
    let bar_width = (inner.width as usize).saturating_sub(label_width + 22).max(4);

    let lines = chart
        .slices
        .iter()
        .map(|slice| {
            let label: String = slice.label.chars().take(label_width).collect();
            Line::from(vec![
                Span::styled(
                    format!("{label:<label_width$} "),
                    Style::default().fg(theme.text),
                ),
                Span::styled(
                    share_bar(slice.share, bar_width),
                    Style::default().fg(theme.accent),
                ),
                Span::styled(
                    format!(" {:>5.1}% ", slice.share),
                    Style::default().fg(theme.text_muted),
                ),
                Span::raw(fixed2(slice.value)),
            ])
        })
        .collect::<Vec<_>>();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_empty(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    frame.render_widget(
        Paragraph::new(Span::styled(
            "No data yet.",
            Style::default().fg(theme.text_muted),
        ))
        .alignment(Alignment::Center),
        area,
    );
}

/// `████░░░░` filled in proportion to `percentage` (0..=100).
#[must_use]
pub fn share_bar(percentage: f64, width: usize) -> String {
    let ratio = (percentage / 100.0).clamp(0.0, 1.0);
    let filled = ((ratio * width as f64).round() as usize).min(width);
    let empty = width.saturating_sub(filled);
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}
