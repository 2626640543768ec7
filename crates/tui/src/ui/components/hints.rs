use ratatui::{style::Style, text::Span};

use crate::{
    app::{AppState, Focus},
    ui::theme::Theme,
};

/// A keyboard hint consisting of a key and its action.
#[derive(Debug, Clone)]
pub struct KeyHint {
    pub key: &'static str,
    pub action: &'static str,
}

impl KeyHint {
    pub const fn new(key: &'static str, action: &'static str) -> Self {
        Self { key, action }
    }
}

pub fn hints_to_spans(hints: &[KeyHint], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(theme.accent)));
        spans.push(Span::raw(format!(" {}", hint.action)));
    }

    spans
}

pub fn hint_separator(theme: &Theme) -> Span<'static> {
    Span::styled("  │  ", Style::default().fg(theme.border))
}

/// Hints for whatever currently has focus (or the open overlay).
pub fn context_hints(state: &AppState) -> Vec<KeyHint> {
    if !state.alerts.is_empty() {
        return vec![KeyHint::new("Enter", "dismiss")];
    }
    if state.table.pending_delete.is_some() {
        return vec![KeyHint::new("y", "delete"), KeyHint::new("n", "keep")];
    }

    match state.focus {
        Focus::Form(_) => vec![
            KeyHint::new("Tab", "next"),
            KeyHint::new("Enter", if state.form.is_editing() { "update" } else { "create" }),
            KeyHint::new("Ctrl+N", "reset"),
        ],
        Focus::Search => vec![
            KeyHint::new("Enter", "to table"),
            KeyHint::new("Esc", "clear"),
        ],
        Focus::Table => vec![
            KeyHint::new("↑↓", "select"),
            KeyHint::new("e", "edit"),
            KeyHint::new("d", "delete"),
            KeyHint::new("/", "search"),
        ],
    }
}

pub fn global_hints() -> Vec<KeyHint> {
    vec![
        KeyHint::new("Ctrl+R", "reload"),
        KeyHint::new("Ctrl+L", "logout"),
        KeyHint::new("Ctrl+C", "quit"),
    ]
}
