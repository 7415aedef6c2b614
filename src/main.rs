use anyhow::Result;
use clap::{Parser, Subcommand};

use pocketbudget::api::ApiClient;
use pocketbudget::cli::{
    handle_budget_command, handle_forgot_password, handle_login, handle_logout, handle_register,
    BudgetCommands,
};
use pocketbudget::config::{paths::BudgetPaths, settings::Settings};
use pocketbudget::journal::Journal;
use pocketbudget::session::SessionStore;

#[derive(Parser)]
#[command(
    name = "pocketbudget",
    version,
    about = "Terminal client for a personal budget tracking service",
    long_about = "pocketbudget is a terminal client for a personal budget tracking \
                  service. It lets you register, log in, and record income and \
                  expense items against the remote service, from an interactive \
                  TUI or scriptable subcommands."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive TUI
    #[command(alias = "ui")]
    Tui,

    /// Register a new account
    Register,

    /// Log in and store the session token
    Login,

    /// Request a password reset
    ForgotPassword,

    /// Discard the stored session token
    Logout,

    /// Budget item management commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Write a default configuration file
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = BudgetPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let sessions = SessionStore::new(&paths);
    let journal = Journal::new(paths.journal_file());
    let mut client = ApiClient::new(&settings)?;

    match cli.command {
        Some(Commands::Tui) => {
            pocketbudget::tui::run_tui(client, sessions, journal)?;
        }
        Some(Commands::Register) => {
            handle_register(&client, &journal)?;
        }
        Some(Commands::Login) => {
            handle_login(&client, &journal, &sessions)?;
        }
        Some(Commands::ForgotPassword) => {
            handle_forgot_password(&client, &journal)?;
        }
        Some(Commands::Logout) => {
            handle_logout(&sessions)?;
        }
        Some(Commands::Budget(cmd)) => {
            // Budget commands require a session
            match sessions.load()? {
                Some(session) => client.set_token(session.token),
                None => anyhow::bail!("Not logged in. Run 'pocketbudget login' first."),
            }
            handle_budget_command(&client, &journal, &settings, cmd)?;
        }
        Some(Commands::Init) => {
            settings.save(&paths)?;
            println!("Wrote configuration to {}", paths.settings_file().display());
            println!();
            println!("Edit 'api_base_url' to point at your budget service.");
        }
        Some(Commands::Config) => {
            println!("pocketbudget Configuration");
            println!("==========================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Session file:     {}", paths.session_file().display());
            println!("Journal file:     {}", paths.journal_file().display());
            println!();
            println!("Settings:");
            println!("  API base URL:    {}", settings.api_base_url);
            println!("  Request timeout: {}s", settings.request_timeout_secs);
            println!("  Logged in:       {}", sessions.exists());
        }
        None => {
            println!("pocketbudget - Terminal client for a personal budget tracking service");
            println!();
            println!("Run 'pocketbudget --help' for usage information.");
            println!("Run 'pocketbudget tui' to launch the interactive interface.");
        }
    }

    Ok(())
}
