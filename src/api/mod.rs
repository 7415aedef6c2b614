//! Remote service access
//!
//! The budget and auth services live behind fixed REST contracts. This
//! module defines the wire DTOs, the service traits the rest of the crate
//! programs against, and the live HTTP client implementing them.

pub mod client;
pub mod dto;

pub use client::ApiClient;

use crate::error::BudgetResult;
use crate::models::{BudgetItem, NewBudgetItem, RegistrationForm};

/// Authentication operations against the remote auth service
pub trait AuthService {
    /// Register a new user; the full credential record is posted
    fn register(&self, form: &RegistrationForm) -> BudgetResult<()>;

    /// Authenticate and return the opaque session token
    fn login(&self, user_name: &str, password: &str) -> BudgetResult<String>;

    /// Request a password reset
    fn forgot_password(&self, email: &str, new_password: &str) -> BudgetResult<()>;
}

/// Budget item persistence operations against the remote budget service
pub trait BudgetService {
    /// Fetch the full item list
    fn fetch_items(&self) -> BudgetResult<Vec<BudgetItem>>;

    /// Create an item; returns the identity the service assigned, if the
    /// response carried one
    fn create_item(&self, candidate: &NewBudgetItem, creation_date: chrono::NaiveDate)
        -> BudgetResult<Option<String>>;

    /// Delete an item by its remote identity
    fn delete_item(&self, remote_id: &str) -> BudgetResult<()>;

    /// Toggle an item's favorite flag by its remote identity. The flip is
    /// server-side; the call carries no value payload.
    fn toggle_favorite(&self, remote_id: &str) -> BudgetResult<()>;
}
