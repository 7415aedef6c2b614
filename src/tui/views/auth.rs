//! Auth screen
//!
//! Renders whichever of the three auth forms is active and carries the
//! text-input state for every credential field. Each flow only shows and
//! submits its own fields.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::auth::{AuthFlow, AuthMode};
use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;
use crate::tui::widgets::TextInput;

/// A credential field on the auth screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    Name,
    UserName,
    Email,
    Password,
    ConfirmPassword,
    NewPassword,
}

impl AuthField {
    /// The wire name this field's errors are keyed by
    pub fn error_key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::UserName => "userName",
            Self::Email => "email",
            Self::Password => "password",
            Self::ConfirmPassword => "confirmPassword",
            Self::NewPassword => "newPassword",
        }
    }
}

/// Text-input state for the auth screen
#[derive(Debug, Clone)]
pub struct AuthFormState {
    /// Currently focused field
    pub focused: AuthField,

    pub name: TextInput,
    pub user_name: TextInput,
    pub email: TextInput,
    pub password: TextInput,
    pub confirm_password: TextInput,
    pub new_password: TextInput,
}

impl Default for AuthFormState {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthFormState {
    /// Create inputs for every credential field
    pub fn new() -> Self {
        let mut state = Self {
            focused: AuthField::Name,
            name: TextInput::new().label("Name").placeholder("Your name"),
            user_name: TextInput::new().label("User Name").placeholder("User name"),
            email: TextInput::new().label("E-mail").placeholder("you@example.com"),
            password: TextInput::new().label("Password").masked(),
            confirm_password: TextInput::new().label("Confirm").masked(),
            new_password: TextInput::new().label("New Password").masked(),
        };
        state.update_focus();
        state
    }

    /// The fields each mode shows, in navigation order
    pub fn fields_for(mode: AuthMode) -> &'static [AuthField] {
        match mode {
            AuthMode::Registration => &[
                AuthField::Name,
                AuthField::UserName,
                AuthField::Email,
                AuthField::Password,
                AuthField::ConfirmPassword,
            ],
            AuthMode::Login => &[AuthField::UserName, AuthField::Password],
            AuthMode::ForgotPassword => &[AuthField::Email, AuthField::NewPassword],
        }
    }

    /// Focus the first field of a mode
    pub fn reset_focus(&mut self, mode: AuthMode) {
        self.focused = Self::fields_for(mode)[0];
        self.update_focus();
    }

    /// Move focus to the next field of the mode
    pub fn next_field(&mut self, mode: AuthMode) {
        self.step_focus(mode, 1);
    }

    /// Move focus to the previous field of the mode
    pub fn prev_field(&mut self, mode: AuthMode) {
        self.step_focus(mode, -1);
    }

    fn step_focus(&mut self, mode: AuthMode, delta: i32) {
        let fields = Self::fields_for(mode);
        let pos = fields
            .iter()
            .position(|f| *f == self.focused)
            .unwrap_or(0) as i32;
        let len = fields.len() as i32;
        self.focused = fields[(pos + delta).rem_euclid(len) as usize];
        self.update_focus();
    }

    fn update_focus(&mut self) {
        self.name.focused = self.focused == AuthField::Name;
        self.user_name.focused = self.focused == AuthField::UserName;
        self.email.focused = self.focused == AuthField::Email;
        self.password.focused = self.focused == AuthField::Password;
        self.confirm_password.focused = self.focused == AuthField::ConfirmPassword;
        self.new_password.focused = self.focused == AuthField::NewPassword;
    }

    /// Get the input for a field
    pub fn input(&self, field: AuthField) -> &TextInput {
        match field {
            AuthField::Name => &self.name,
            AuthField::UserName => &self.user_name,
            AuthField::Email => &self.email,
            AuthField::Password => &self.password,
            AuthField::ConfirmPassword => &self.confirm_password,
            AuthField::NewPassword => &self.new_password,
        }
    }

    /// Get the input for a field, mutably
    pub fn input_mut(&mut self, field: AuthField) -> &mut TextInput {
        match field {
            AuthField::Name => &mut self.name,
            AuthField::UserName => &mut self.user_name,
            AuthField::Email => &mut self.email,
            AuthField::Password => &mut self.password,
            AuthField::ConfirmPassword => &mut self.confirm_password,
            AuthField::NewPassword => &mut self.new_password,
        }
    }

    /// The currently focused input, mutably
    pub fn focused_input_mut(&mut self) -> &mut TextInput {
        self.input_mut(self.focused)
    }

    /// Copy the input values into the flow's form models
    pub fn apply_to(&self, flow: &mut AuthFlow) {
        flow.registration.name = self.name.value().to_string();
        flow.registration.user_name = self.user_name.value().to_string();
        flow.registration.email = self.email.value().to_string();
        flow.registration.password = self.password.value().to_string();
        flow.registration.confirm_password = self.confirm_password.value().to_string();

        flow.login.user_name = self.user_name.value().to_string();
        flow.login.password = self.password.value().to_string();

        flow.reset.email = self.email.value().to_string();
        flow.reset.new_password = self.new_password.value().to_string();
    }

    /// Mirror the flow's form models back into the inputs (after a submit
    /// may have cleared them)
    pub fn sync_from(&mut self, flow: &AuthFlow) {
        match flow.mode {
            AuthMode::Registration => {
                self.name = self.name.clone().content(flow.registration.name.clone());
                self.user_name = self
                    .user_name
                    .clone()
                    .content(flow.registration.user_name.clone());
                self.email = self.email.clone().content(flow.registration.email.clone());
                self.password = self
                    .password
                    .clone()
                    .content(flow.registration.password.clone());
                self.confirm_password = self
                    .confirm_password
                    .clone()
                    .content(flow.registration.confirm_password.clone());
            }
            AuthMode::Login => {
                self.user_name = self.user_name.clone().content(flow.login.user_name.clone());
                self.password = self.password.clone().content(flow.login.password.clone());
            }
            AuthMode::ForgotPassword => {
                self.email = self.email.clone().content(flow.reset.email.clone());
                self.new_password = self
                    .new_password
                    .clone()
                    .content(flow.reset.new_password.clone());
            }
        }
    }

    /// Clear every input
    pub fn clear(&mut self) {
        self.name.clear();
        self.user_name.clear();
        self.email.clear();
        self.password.clear();
        self.confirm_password.clear();
        self.new_password.clear();
    }
}

/// Render the auth screen
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let flow = &app.auth;
    let fields = AuthFormState::fields_for(flow.mode);

    let title = match flow.mode {
        AuthMode::Registration => " Registration ",
        AuthMode::Login => " Log In ",
        AuthMode::ForgotPassword => " Reset Password ",
    };

    // One row per field plus one for its error, banner, spacer, hints
    let height = (fields.len() as u16) * 2 + 6;
    let dialog = centered_rect_fixed(54, height, area);

    let block = Block::default()
        .title(title)
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, dialog);

    let inner = Rect {
        x: dialog.x + 2,
        y: dialog.y + 1,
        width: dialog.width.saturating_sub(4),
        height: dialog.height.saturating_sub(2),
    };

    let mut constraints: Vec<Constraint> = Vec::new();
    for _ in fields {
        constraints.push(Constraint::Length(1)); // input
        constraints.push(Constraint::Length(1)); // error
    }
    constraints.push(Constraint::Length(1)); // banner
    constraints.push(Constraint::Length(1)); // spacer
    constraints.push(Constraint::Length(1)); // hints
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (i, field) in fields.iter().enumerate() {
        frame.render_widget(app.auth_form.input(*field), chunks[i * 2]);

        if let Some(error) = flow.errors.get(field.error_key()) {
            let error_line =
                Paragraph::new(error.as_str()).style(Style::default().fg(Color::Red));
            frame.render_widget(error_line, chunks[i * 2 + 1]);
        }
    }

    // Banner errors are not tied to a field
    let banner_key = match flow.mode {
        AuthMode::Registration => "registration",
        AuthMode::Login => "login",
        AuthMode::ForgotPassword => "",
    };
    if let Some(banner) = flow.errors.get(banner_key) {
        let line = Paragraph::new(banner.as_str()).style(
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        );
        frame.render_widget(line, chunks[fields.len() * 2]);
    }

    let hints = match flow.mode {
        AuthMode::Registration => "Enter: register  Ctrl+L: log in  Esc: quit",
        AuthMode::Login => "Enter: log in  Ctrl+L: register  Ctrl+F: forgot password",
        AuthMode::ForgotPassword => "Enter: update password  Ctrl+F: back to log in",
    };
    let hint_text = if flow.is_loading() {
        "Loading...".to_string()
    } else {
        hints.to_string()
    };
    let hints_line = Paragraph::new(hint_text).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(hints_line, chunks[fields.len() * 2 + 2]);
}
