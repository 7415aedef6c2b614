//! pocketbudget - Terminal client for a personal budget tracking service
//!
//! This library provides the core functionality for the pocketbudget client:
//! auth flows (registration, login, password reset) and a budget item store
//! synchronized with a remote REST service, driven from a TUI or one-shot
//! CLI commands.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (budget items, auth forms, ids)
//! - `api`: Wire DTOs, service traits, and the HTTP client
//! - `session`: Session token persistence
//! - `journal`: Append-only record of remote-call outcomes
//! - `store`: The budget item store
//! - `auth`: The auth flow state machine
//! - `tui`: The interactive terminal interface
//! - `cli`: One-shot command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use pocketbudget::config::{paths::BudgetPaths, settings::Settings};
//!
//! let paths = BudgetPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! ```

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod journal;
pub mod models;
pub mod session;
pub mod store;
pub mod tui;

pub use error::{BudgetError, BudgetResult};
