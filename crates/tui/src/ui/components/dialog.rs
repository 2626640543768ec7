use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::ui::theme::Theme;

/// A `width` x `height` rect centered in `area`, shrunk to fit.
pub fn centered_box(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height.min(area.height)),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width.min(area.width)),
            Constraint::Min(0),
        ])
        .split(vertical[1]);

    horizontal[1]
}

/// Modal message; the app ignores other keys until it is dismissed.
pub fn render_alert(frame: &mut Frame<'_>, area: Rect, message: &str, theme: &Theme) {
    let lines = vec![
        Line::from(Span::styled(message, Style::default().fg(theme.text))),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", Style::default().fg(theme.accent)),
            Span::raw(" ok"),
        ]),
    ];
    render_modal(frame, area, " alert ", lines, theme.error, theme);
}

pub fn render_confirm(frame: &mut Frame<'_>, area: Rect, question: &str, theme: &Theme) {
    let lines = vec![
        Line::from(Span::styled(
            question,
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", Style::default().fg(theme.accent)),
            Span::raw(" yes  "),
            Span::styled("n", Style::default().fg(theme.accent)),
            Span::raw(" no"),
        ]),
    ];
    render_modal(frame, area, " confirm ", lines, theme.border_focused, theme);
}

fn render_modal(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    lines: Vec<Line<'_>>,
    border: ratatui::style::Color,
    theme: &Theme,
) {
    let rect = centered_box(48, 7, area);
    frame.render_widget(Clear, rect);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(theme.surface));

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        rect,
    );
}
