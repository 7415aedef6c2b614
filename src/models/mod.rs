//! Core data models for pocketbudget
//!
//! This module contains the budget item model and the auth form models.

pub mod budget_item;
pub mod forms;
pub mod ids;

pub use budget_item::{BudgetItem, Category, ItemValidationError, NewBudgetItem, PaymentType};
pub use forms::{FieldErrors, LoginForm, PasswordResetForm, RegistrationForm};
pub use ids::BudgetItemId;
