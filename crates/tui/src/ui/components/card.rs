use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::ui::theme::Theme;

/// Rounded panel used for every dashboard section.
pub struct Card<'a> {
    title: &'a str,
    theme: &'a Theme,
    focused: bool,
}

impl<'a> Card<'a> {
    pub fn new(title: &'a str, theme: &'a Theme) -> Self {
        Self {
            title,
            theme,
            focused: false,
        }
    }

    /// Highlights the border when the card holds input focus.
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn block(&self) -> Block<'a> {
        let border_color = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border
        };

        Block::default()
            .title(Span::styled(
                format!(" {} ", self.title),
                Style::default().fg(self.theme.accent),
            ))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color))
            .style(Style::default().bg(self.theme.surface))
    }

    pub fn inner(&self, area: Rect) -> Rect {
        self.block().inner(area)
    }

    pub fn render_frame(&self, frame: &mut Frame<'_>, area: Rect) {
        frame.render_widget(self.block(), area);
    }
}

/// One headline figure: a title and a big number.
pub struct StatCard<'a> {
    title: &'a str,
    value: &'a str,
    color: Color,
    theme: &'a Theme,
}

impl<'a> StatCard<'a> {
    pub fn new(title: &'a str, value: &'a str, theme: &'a Theme) -> Self {
        Self {
            title,
            value,
            color: theme.text,
            theme,
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let card = Card::new(self.title, self.theme);
        let inner = card.inner(area);
        card.render_frame(frame, area);

        let value = Line::from(Span::styled(
            self.value,
            Style::default().fg(self.color).add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(value).alignment(Alignment::Right), inner);
    }
}
