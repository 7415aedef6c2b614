//! Configuration management for pocketbudget
//!
//! This module handles path resolution and user settings.

pub mod paths;
pub mod settings;

pub use paths::BudgetPaths;
pub use settings::Settings;
