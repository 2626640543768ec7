use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    app::{AppState, Focus, form::FormField},
    ui::{components::card::Card, theme::Theme},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let form = &state.form;
    let focused_field = match state.focus {
        Focus::Form(field) => Some(field),
        _ => None,
    };

    let title = match &form.id {
        Some(id) => format!("Edit #{id}"),
        None => "New transaction".to_string(),
    };
    let card = Card::new(&title, theme).focused(focused_field.is_some());
    let inner = card.inner(area);
    card.render_frame(frame, area);

    let mut lines = FormField::ALL
        .iter()
        .map(|&field| {
            let focused = focused_field == Some(field);
            let label_style = if focused {
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text_muted)
            };
            let value = match field {
                FormField::Type => format!("◀ {} ▶", form.kind.as_str()),
                _ if focused => format!("{}│", form.value(field)),
                _ => form.value(field).to_string(),
            };
            Line::from(vec![
                Span::styled(format!("{:<12}", field.label()), label_style),
                Span::styled(value, Style::default().fg(theme.text)),
            ])
        })
        .collect::<Vec<_>>();

    lines.push(Line::from(""));
    let action = if form.is_editing() { "update" } else { "create" };
    lines.push(Line::from(vec![
        Span::styled("Enter", Style::default().fg(theme.accent)),
        Span::styled(format!(" {action}  "), Style::default().fg(theme.text_muted)),
        Span::styled("Ctrl+N", Style::default().fg(theme.accent)),
        Span::styled(" reset", Style::default().fg(theme.text_muted)),
    ]));

    frame.render_widget(Paragraph::new(lines), inner);
}
