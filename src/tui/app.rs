//! Application state for the TUI
//!
//! The App struct holds everything needed for rendering and handling
//! events: the API client, the stored session, the auth flow, and the
//! budget item store.

use crate::api::ApiClient;
use crate::auth::{AuthFlow, AuthMode, SubmitOutcome};
use crate::journal::Journal;
use crate::models::BudgetItemId;
use crate::session::SessionStore;
use crate::store::BudgetItemStore;

use super::dialogs::budget_item::BudgetItemFormState;
use super::views::auth::AuthFormState;

/// Which screen is currently active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Registration / login / password reset
    #[default]
    Auth,
    /// The budget item list
    Budget,
}

/// Main application state
pub struct App {
    /// Client for the remote service
    pub client: ApiClient,

    /// Stored session token
    pub sessions: SessionStore,

    /// Sync journal
    pub journal: Journal,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Currently active screen
    pub screen: Screen,

    /// Auth flow state machine
    pub auth: AuthFlow,

    /// Text inputs for the auth screen
    pub auth_form: AuthFormState,

    /// The budget item store
    pub store: BudgetItemStore,

    /// Favorites filter for the item list
    pub show_favorites: bool,

    /// Selected row in the displayed (possibly filtered) list
    pub selected_index: usize,

    /// Budget item form dialog state
    pub item_form: BudgetItemFormState,

    /// Whether the item form dialog is open
    pub show_item_form: bool,

    /// Status message to display
    pub status_message: Option<String>,
}

impl App {
    /// Create a new App instance showing the auth screen
    pub fn new(client: ApiClient, sessions: SessionStore, journal: Journal) -> Self {
        Self {
            client,
            sessions,
            journal,
            should_quit: false,
            screen: Screen::default(),
            auth: AuthFlow::new(),
            auth_form: AuthFormState::new(),
            store: BudgetItemStore::new(),
            show_favorites: false,
            selected_index: 0,
            item_form: BudgetItemFormState::new(),
            show_item_form: false,
            status_message: None,
        }
    }

    /// Route past the auth screen when a stored session exists.
    ///
    /// The session is only trusted provisionally; the first item load acts
    /// as the validity probe and a 401 sends the user back to log in.
    pub fn start(&mut self) {
        if let Ok(Some(session)) = self.sessions.load() {
            self.client.set_token(session.token);
            self.enter_budget_screen();
        }
    }

    /// Request to quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear the status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    // === Screen transitions ===

    /// Switch to the budget screen and load items from the service
    pub fn enter_budget_screen(&mut self) {
        self.screen = Screen::Budget;
        self.show_favorites = false;
        self.selected_index = 0;
        self.reload_items();
    }

    /// Fetch the item list, replacing local state
    pub fn reload_items(&mut self) {
        match self.store.load(&self.client, &self.journal) {
            Ok(()) => {
                self.set_status(format!("Loaded {} budget items", self.store.len()));
            }
            Err(err) if err.is_unauthorized() => self.expire_session(),
            Err(_) => {
                // Already journaled by the store
                self.set_status("Could not load budget items");
            }
        }
        self.clamp_selection();
    }

    /// Drop the stored session and return to the auth screen
    pub fn expire_session(&mut self) {
        let _ = self.sessions.clear();
        self.client.clear_token();
        self.screen = Screen::Auth;
        self.auth = AuthFlow::new();
        self.auth_form.clear();
        self.auth_form.reset_focus(self.auth.mode);
        self.set_status("Session expired - please log in");
    }

    // === Item list selection ===

    /// Number of rows in the displayed (possibly filtered) list
    pub fn displayed_len(&self) -> usize {
        self.store.filtered_view(self.show_favorites).count()
    }

    /// The stable key of the selected row, if any
    pub fn selected_key(&self) -> Option<BudgetItemId> {
        self.store
            .filtered_view(self.show_favorites)
            .nth(self.selected_index)
            .map(|item| item.key)
    }

    /// Move the selection up or down, clamped to the displayed rows
    pub fn move_selection(&mut self, delta: isize) {
        let len = self.displayed_len();
        if len == 0 {
            self.selected_index = 0;
            return;
        }
        let current = self.selected_index as isize;
        self.selected_index = (current + delta).clamp(0, len as isize - 1) as usize;
    }

    fn clamp_selection(&mut self) {
        let len = self.displayed_len();
        if len == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= len {
            self.selected_index = len - 1;
        }
    }

    /// Toggle the favorites filter
    pub fn toggle_favorites_filter(&mut self) {
        self.show_favorites = !self.show_favorites;
        self.selected_index = 0;
    }

    // === Item mutations ===

    /// Open the add-item dialog with a fresh form
    pub fn open_item_form(&mut self) {
        self.item_form = BudgetItemFormState::new();
        self.show_item_form = true;
        self.clear_status();
    }

    /// Close the add-item dialog
    pub fn close_item_form(&mut self) {
        self.show_item_form = false;
    }

    /// Submit the add-item dialog
    pub fn submit_item_form(&mut self) {
        let candidate = match self.item_form.build_candidate() {
            Ok(candidate) => candidate,
            Err(message) => {
                self.item_form.set_error(message);
                return;
            }
        };

        match self.store.add(&self.client, &self.journal, candidate) {
            Ok(_) => {
                self.close_item_form();
                self.set_status("Budget item added");
                self.clamp_selection();
            }
            Err(err) if err.is_unauthorized() => self.expire_session(),
            Err(_) => {
                // Journaled by the store; the list is unchanged
                self.item_form.set_error("Could not save the item");
            }
        }
    }

    /// Delete the selected item
    pub fn delete_selected(&mut self) {
        let Some(key) = self.selected_key() else {
            return;
        };

        match self.store.delete(&self.client, &self.journal, key) {
            Ok(()) => self.set_status("Budget item deleted"),
            Err(err) if err.is_unauthorized() => self.expire_session(),
            Err(_) => self.set_status("Could not delete the item"),
        }
        self.clamp_selection();
    }

    /// Toggle the favorite flag of the selected item
    pub fn favorite_selected(&mut self) {
        let Some(key) = self.selected_key() else {
            return;
        };

        match self.store.toggle_favorite(&self.client, &self.journal, key) {
            Ok(true) => self.set_status("Added to favorites"),
            Ok(false) => self.set_status("Removed from favorites"),
            Err(err) if err.is_unauthorized() => self.expire_session(),
            Err(_) => self.set_status("Could not update the item"),
        }
        // Unfavoriting while filtered shrinks the displayed list
        self.clamp_selection();
    }

    // === Auth interactions ===

    /// Toggle between the registration and login forms
    pub fn auth_toggle_login(&mut self) {
        self.auth.toggle_login();
        self.auth_form.clear();
        self.auth_form.reset_focus(self.auth.mode);
        self.clear_status();
    }

    /// Toggle the forgot-password form
    pub fn auth_toggle_forgot(&mut self) {
        self.auth.toggle_forgot_password();
        self.auth_form.clear();
        self.auth_form.reset_focus(self.auth.mode);
        self.clear_status();
    }

    /// Submit whichever auth form is active
    pub fn submit_auth(&mut self) {
        self.auth_form.apply_to(&mut self.auth);

        let outcome = match self.auth.mode {
            AuthMode::Registration => self.auth.submit_registration(&self.client, &self.journal),
            AuthMode::Login => {
                self.auth
                    .submit_login(&self.client, &self.journal, &self.sessions)
            }
            AuthMode::ForgotPassword => {
                self.auth.submit_forgot_password(&self.client, &self.journal)
            }
        };

        // Mirror any form clearing back into the inputs
        self.auth_form.sync_from(&self.auth);

        match outcome {
            SubmitOutcome::LoggedIn(token) => {
                self.client.set_token(token);
                self.set_status("Logged in");
                self.enter_budget_screen();
            }
            SubmitOutcome::Accepted => {
                self.auth_form.reset_focus(self.auth.mode);
                let message = match self.auth.mode {
                    AuthMode::Registration => "Registration successful!",
                    AuthMode::ForgotPassword => "Password updated!",
                    AuthMode::Login => "",
                };
                if !message.is_empty() {
                    self.set_status(message);
                }
            }
            // Transport failures are journal-only; validation errors render
            // inline. Nothing more to do here.
            SubmitOutcome::Invalid | SubmitOutcome::Failed | SubmitOutcome::Busy => {}
        }
    }
}
