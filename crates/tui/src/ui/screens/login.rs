use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::{
    app::AppState,
    ui::{components::dialog::centered_box, theme::Theme},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    let card_area = centered_box(36, 5, area);
    frame.render_widget(Clear, card_area);

    let block = Block::default()
        .title(" password ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border_focused));

    let inner = block.inner(card_area);
    frame.render_widget(block, card_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    let display = format!("{}│", mask_password(&state.login.password));
    frame.render_widget(
        Paragraph::new(Span::styled(display, Style::default().fg(theme.accent))),
        rows[0],
    );
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Enter", Style::default().fg(theme.accent)),
            Span::styled(" unlock  ", Style::default().fg(theme.text_muted)),
            Span::styled("Ctrl+C", Style::default().fg(theme.accent)),
            Span::styled(" quit", Style::default().fg(theme.text_muted)),
        ])),
        rows[1],
    );

    // Below the box, only when there is something to say.
    if let Some(message) = &state.login.message {
        let error_area = Rect {
            x: card_area.x,
            y: (card_area.y + card_area.height + 1).min(area.bottom().saturating_sub(1)),
            width: card_area.width,
            height: 1,
        };
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

/// One bullet per character.
fn mask_password(password: &str) -> String {
    "•".repeat(password.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_counts_characters_not_bytes() {
        assert_eq!(mask_password("pässword"), "••••••••");
        assert_eq!(mask_password(""), "");
    }
}
