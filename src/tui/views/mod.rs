//! TUI Views module
//!
//! Contains the auth and budget screens plus the status bar.

pub mod auth;
pub mod budget;
pub mod status_bar;

use ratatui::Frame;

use super::app::{App, Screen};
use super::dialogs;
use super::layout::AppLayout;

/// Render the entire application
pub fn render(frame: &mut Frame, app: &App) {
    let layout = AppLayout::new(frame.area());

    match app.screen {
        Screen::Auth => {
            auth::render(frame, app, layout.main);
        }
        Screen::Budget => {
            budget::render(frame, app, layout.main);
        }
    }

    status_bar::render(frame, app, layout.status_bar);

    if app.show_item_form {
        dialogs::budget_item::render(frame, app);
    }
}
