//! Status bar
//!
//! One line at the bottom: transient status messages, otherwise key hints
//! for the current screen.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::{App, Screen};

/// Render the status bar
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let (text, style) = if let Some(message) = &app.status_message {
        (message.clone(), Style::default().fg(Color::Yellow))
    } else {
        let hints = match app.screen {
            Screen::Auth => "Tab: next field  Enter: submit",
            Screen::Budget => {
                "a: add  d: delete  v: favorite  f: filter favorites  r: reload  q: quit"
            }
        };
        (hints.to_string(), Style::default().fg(Color::DarkGray))
    };

    frame.render_widget(Paragraph::new(text).style(style), area);
}
