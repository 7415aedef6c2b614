//! Terminal User Interface module
//!
//! This module provides the interactive interface for pocketbudget using
//! ratatui: an auth screen (registration, login, password reset) and the
//! budget screen (item list, favorites filter, add-item dialog).

pub mod app;
pub mod event;
pub mod handler;
pub mod terminal;

// Views
pub mod views;

// Widgets
pub mod widgets;

// Dialogs
pub mod dialogs;

// Layout
pub mod layout;

pub use app::App;
pub use terminal::run_tui;
