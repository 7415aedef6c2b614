//! Auth commands
//!
//! Interactive prompts for registration, login, and password reset. These
//! drive the same `AuthFlow` the TUI uses, so validation and error handling
//! behave identically.

use std::io::{self, Write};

use anyhow::Result;

use crate::api::ApiClient;
use crate::auth::{AuthFlow, AuthMode, SubmitOutcome};
use crate::journal::Journal;
use crate::session::SessionStore;

/// Prompt for a line of input
fn prompt(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;

    let mut value = String::new();
    io::stdin().read_line(&mut value)?;
    Ok(value.trim_end_matches(['\r', '\n']).to_string())
}

/// Prompt for a password without echoing it
fn prompt_password(label: &str) -> Result<String> {
    Ok(rpassword::prompt_password(format!("{}: ", label))?)
}

fn print_field_errors(flow: &AuthFlow) {
    for (field, message) in &flow.errors {
        println!("  {}: {}", field, message);
    }
}

/// Handle `pocketbudget register`
pub fn handle_register(client: &ApiClient, journal: &Journal) -> Result<()> {
    let mut flow = AuthFlow::new();

    flow.registration.name = prompt("Name")?;
    flow.registration.user_name = prompt("User name")?;
    flow.registration.email = prompt("E-mail")?;
    flow.registration.password = prompt_password("Password")?;
    flow.registration.confirm_password = prompt_password("Confirm password")?;

    match flow.submit_registration(client, journal) {
        SubmitOutcome::Accepted => println!("Registration successful!"),
        SubmitOutcome::Invalid => {
            println!("Registration rejected:");
            print_field_errors(&flow);
        }
        SubmitOutcome::Failed => {
            println!("Registration failed; details recorded in the journal.");
        }
        SubmitOutcome::LoggedIn(_) | SubmitOutcome::Busy => {}
    }

    Ok(())
}

/// Handle `pocketbudget login`
pub fn handle_login(
    client: &ApiClient,
    journal: &Journal,
    sessions: &SessionStore,
) -> Result<()> {
    let mut flow = AuthFlow::new();
    flow.switch_to(AuthMode::Login);

    flow.login.user_name = prompt("User name")?;
    flow.login.password = prompt_password("Password")?;

    match flow.submit_login(client, journal, sessions) {
        SubmitOutcome::LoggedIn(_) => println!("Logged in."),
        SubmitOutcome::Invalid => {
            println!("Login rejected:");
            print_field_errors(&flow);
        }
        SubmitOutcome::Failed => {
            println!("Login failed; details recorded in the journal.");
        }
        SubmitOutcome::Accepted | SubmitOutcome::Busy => {}
    }

    Ok(())
}

/// Handle `pocketbudget forgot-password`
pub fn handle_forgot_password(client: &ApiClient, journal: &Journal) -> Result<()> {
    let mut flow = AuthFlow::new();
    flow.switch_to(AuthMode::ForgotPassword);

    flow.reset.email = prompt("E-mail")?;
    flow.reset.new_password = prompt_password("New password")?;

    match flow.submit_forgot_password(client, journal) {
        SubmitOutcome::Accepted => println!("Password updated!"),
        SubmitOutcome::Invalid => {
            println!("Request rejected:");
            print_field_errors(&flow);
        }
        SubmitOutcome::Failed => {
            println!("Password reset failed; details recorded in the journal.");
        }
        SubmitOutcome::LoggedIn(_) | SubmitOutcome::Busy => {}
    }

    Ok(())
}

/// Handle `pocketbudget logout`
pub fn handle_logout(sessions: &SessionStore) -> Result<()> {
    if sessions.exists() {
        sessions.clear()?;
        println!("Logged out.");
    } else {
        println!("No active session.");
    }
    Ok(())
}
