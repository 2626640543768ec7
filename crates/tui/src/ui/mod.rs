pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{Frame, layout::Rect};

use crate::app::{AppState, Screen};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let area = frame.area();
    match state.screen {
        Screen::Login => screens::login::render(frame, area, state),
        Screen::Dashboard => {
            screens::dashboard::render(frame, area, state);
            render_overlays(frame, area, state);
        }
    }
}

/// Alerts win over the delete prompt; only one modal is drawn at a time.
fn render_overlays(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    if let Some(message) = state.alerts.front() {
        components::dialog::render_alert(frame, area, message, &theme);
    } else if state.table.pending_delete.is_some() {
        components::dialog::render_confirm(frame, area, "Delete this transaction?", &theme);
    }
}
