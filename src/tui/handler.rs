//! Event handler for the TUI
//!
//! Routes keyboard events to the appropriate handlers based on the current
//! screen and whether the item dialog is open.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Screen};
use super::dialogs::budget_item::ItemField;
use super::event::Event;

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) -> Result<()> {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Tick => Ok(()),
        Event::Resize(_, _) => Ok(()),
    }
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    // Ctrl+C quits from anywhere
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return Ok(());
    }

    if app.show_item_form {
        return handle_item_form_key(app, key);
    }

    match app.screen {
        Screen::Auth => handle_auth_key(app, key),
        Screen::Budget => handle_budget_key(app, key),
    }
}

/// Handle keys on the auth screen (always in editing mode)
fn handle_auth_key(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            // Switch between registration and login
            KeyCode::Char('l') => app.auth_toggle_login(),
            // Forgot password (and back)
            KeyCode::Char('f') => app.auth_toggle_forgot(),
            _ => {}
        }
        return Ok(());
    }

    let mode = app.auth.mode;
    match key.code {
        KeyCode::Esc => app.quit(),

        KeyCode::Tab | KeyCode::Down => app.auth_form.next_field(mode),
        KeyCode::BackTab | KeyCode::Up => app.auth_form.prev_field(mode),

        KeyCode::Enter => app.submit_auth(),

        KeyCode::Left => app.auth_form.focused_input_mut().move_left(),
        KeyCode::Right => app.auth_form.focused_input_mut().move_right(),
        KeyCode::Home => app.auth_form.focused_input_mut().move_start(),
        KeyCode::End => app.auth_form.focused_input_mut().move_end(),

        KeyCode::Char(c) => {
            // Editing a field clears its stale error
            let field = app.auth_form.focused;
            app.auth.errors.remove(field.error_key());
            app.auth_form.focused_input_mut().insert(c);
        }
        KeyCode::Backspace => {
            let field = app.auth_form.focused;
            app.auth.errors.remove(field.error_key());
            app.auth_form.focused_input_mut().backspace();
        }

        _ => {}
    }

    Ok(())
}

/// Handle keys on the budget screen
fn handle_budget_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),

        // Navigation
        KeyCode::Char('j') | KeyCode::Down => app.move_selection(1),
        KeyCode::Char('k') | KeyCode::Up => app.move_selection(-1),

        // Add item
        KeyCode::Char('a') => app.open_item_form(),

        // Favorites filter
        KeyCode::Char('f') => app.toggle_favorites_filter(),

        // Item actions
        KeyCode::Char('d') | KeyCode::Delete => app.delete_selected(),
        KeyCode::Char('v') => app.favorite_selected(),

        // Reload from the service
        KeyCode::Char('r') => app.reload_items(),

        _ => {}
    }

    Ok(())
}

/// Handle keys while the item dialog is open
fn handle_item_form_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Esc => app.close_item_form(),

        KeyCode::Tab | KeyCode::Down => app.item_form.next_field(),
        KeyCode::BackTab | KeyCode::Up => app.item_form.prev_field(),

        KeyCode::Enter => app.submit_item_form(),

        KeyCode::Left => match app.item_form.focused_field {
            ItemField::Category => app.item_form.cycle_category(-1),
            ItemField::Subcategory => app.item_form.cycle_subcategory(-1),
            ItemField::PaymentType => app.item_form.cycle_payment_type(-1),
            ItemField::Amount => app.item_form.amount_input.move_left(),
        },
        KeyCode::Right => match app.item_form.focused_field {
            ItemField::Category => app.item_form.cycle_category(1),
            ItemField::Subcategory => app.item_form.cycle_subcategory(1),
            ItemField::PaymentType => app.item_form.cycle_payment_type(1),
            ItemField::Amount => app.item_form.amount_input.move_right(),
        },

        KeyCode::Char(c) => {
            if app.item_form.focused_field == ItemField::Amount
                && (c.is_ascii_digit() || c == '.' || c == '-')
            {
                app.item_form.error_message = None;
                app.item_form.amount_input.insert(c);
            }
        }
        KeyCode::Backspace => {
            if app.item_form.focused_field == ItemField::Amount {
                app.item_form.amount_input.backspace();
            }
        }

        _ => {}
    }

    Ok(())
}
