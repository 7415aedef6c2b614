//! Budget item model
//!
//! A budget item records a single income or expense entry. The subcategory
//! choices are fixed per category; an item's subcategory must always belong
//! to its category's list.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::BudgetItemId;

/// Top-level category of a budget item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Income,
    Expense,
}

impl Category {
    /// Get all categories in display order
    pub fn all() -> &'static [Self] {
        &[Self::Income, Self::Expense]
    }

    /// Get the display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }

    /// The fixed subcategory choices for this category
    pub fn subcategories(&self) -> &'static [&'static str] {
        match self {
            Self::Income => &[
                "Rental Income",
                "Capital Gains",
                "Business Profit",
                "Pension Income",
                "Gift Income",
            ],
            Self::Expense => &[
                "Utilities",
                "Groceries",
                "Transportation",
                "Health Insurance",
                "Education",
            ],
        }
    }

    /// Parse a category from its display name (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How the money moved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentType {
    Cash,
    Card,
}

impl PaymentType {
    /// Get all payment types in display order
    pub fn all() -> &'static [Self] {
        &[Self::Cash, Self::Card]
    }

    /// Get the display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::Card => "Card",
        }
    }

    /// Parse a payment type from its display name (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A candidate budget item built from form input, before the store accepts it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBudgetItem {
    /// Income or Expense
    pub category: Category,

    /// Subcategory; must belong to `category`'s fixed list
    pub subcategory: String,

    /// Cash or Card
    pub payment_type: PaymentType,

    /// Amount; only "parses as a number" is enforced
    pub amount: f64,
}

impl NewBudgetItem {
    /// Create a candidate item
    pub fn new(
        category: Category,
        subcategory: impl Into<String>,
        payment_type: PaymentType,
        amount: f64,
    ) -> Self {
        Self {
            category,
            subcategory: subcategory.into(),
            payment_type,
            amount,
        }
    }

    /// Validate the candidate
    pub fn validate(&self) -> Result<(), ItemValidationError> {
        if self.subcategory.trim().is_empty() {
            return Err(ItemValidationError::EmptySubcategory);
        }

        if !self
            .category
            .subcategories()
            .contains(&self.subcategory.as_str())
        {
            return Err(ItemValidationError::UnknownSubcategory {
                category: self.category,
                subcategory: self.subcategory.clone(),
            });
        }

        if !self.amount.is_finite() {
            return Err(ItemValidationError::InvalidAmount);
        }

        Ok(())
    }
}

/// A recorded income or expense entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetItem {
    /// Stable local key; all addressing (delete, favorite) uses this
    pub key: BudgetItemId,

    /// Identifier assigned by the remote service after a confirmed create;
    /// `None` while the item is pending
    pub remote_id: Option<String>,

    /// Income or Expense
    pub category: Category,

    /// Subcategory drawn from the category's fixed list
    pub subcategory: String,

    /// Cash or Card
    pub payment_type: PaymentType,

    /// Recorded amount
    pub amount: f64,

    /// Date the item was created; not editable
    pub creation_date: NaiveDate,

    /// Favorite flag; the only field mutable after creation
    #[serde(default)]
    pub favorite: bool,
}

impl BudgetItem {
    /// Create a new item from a candidate, dated today, not favorited
    pub fn from_candidate(candidate: NewBudgetItem) -> Self {
        Self {
            key: BudgetItemId::new(),
            remote_id: None,
            category: candidate.category,
            subcategory: candidate.subcategory,
            payment_type: candidate.payment_type,
            amount: candidate.amount,
            creation_date: Local::now().date_naive(),
            favorite: false,
        }
    }

    /// Whether the remote service has confirmed this item
    pub fn is_confirmed(&self) -> bool {
        self.remote_id.is_some()
    }

    /// Record the identity the service assigned
    pub fn confirm(&mut self, remote_id: impl Into<String>) {
        self.remote_id = Some(remote_id.into());
    }

    /// Flip the favorite flag
    pub fn toggle_favorite(&mut self) {
        self.favorite = !self.favorite;
    }
}

impl fmt::Display for BudgetItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} / {} ({}) {}",
            self.creation_date.format("%Y-%m-%d"),
            self.category,
            self.subcategory,
            self.payment_type,
            self.amount
        )
    }
}

/// Validation errors for budget items
#[derive(Debug, Clone, PartialEq)]
pub enum ItemValidationError {
    EmptySubcategory,
    UnknownSubcategory {
        category: Category,
        subcategory: String,
    },
    InvalidAmount,
}

impl fmt::Display for ItemValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySubcategory => write!(f, "Subcategory is required"),
            Self::UnknownSubcategory {
                category,
                subcategory,
            } => write!(
                f,
                "'{}' is not a {} subcategory",
                subcategory, category
            ),
            Self::InvalidAmount => write!(f, "Amount must be a number"),
        }
    }
}

impl std::error::Error for ItemValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_income_subcategories() {
        let subs = Category::Income.subcategories();
        assert_eq!(
            subs,
            &[
                "Rental Income",
                "Capital Gains",
                "Business Profit",
                "Pension Income",
                "Gift Income",
            ]
        );
    }

    #[test]
    fn test_expense_subcategories() {
        let subs = Category::Expense.subcategories();
        assert_eq!(
            subs,
            &[
                "Utilities",
                "Groceries",
                "Transportation",
                "Health Insurance",
                "Education",
            ]
        );
    }

    #[test]
    fn test_category_parse() {
        assert_eq!(Category::parse("Income"), Some(Category::Income));
        assert_eq!(Category::parse("expense"), Some(Category::Expense));
        assert_eq!(Category::parse("  Income "), Some(Category::Income));
        assert_eq!(Category::parse("Savings"), None);
    }

    #[test]
    fn test_payment_type_parse() {
        assert_eq!(PaymentType::parse("Cash"), Some(PaymentType::Cash));
        assert_eq!(PaymentType::parse("CARD"), Some(PaymentType::Card));
        assert_eq!(PaymentType::parse("Cheque"), None);
    }

    #[test]
    fn test_candidate_validation() {
        let valid = NewBudgetItem::new(Category::Expense, "Groceries", PaymentType::Cash, 42.5);
        assert!(valid.validate().is_ok());

        let empty = NewBudgetItem::new(Category::Expense, "", PaymentType::Cash, 1.0);
        assert_eq!(empty.validate(), Err(ItemValidationError::EmptySubcategory));

        // A subcategory from the other category's list is rejected
        let crossed = NewBudgetItem::new(Category::Income, "Groceries", PaymentType::Card, 1.0);
        assert!(matches!(
            crossed.validate(),
            Err(ItemValidationError::UnknownSubcategory { .. })
        ));

        let nan = NewBudgetItem::new(Category::Income, "Gift Income", PaymentType::Card, f64::NAN);
        assert_eq!(nan.validate(), Err(ItemValidationError::InvalidAmount));
    }

    #[test]
    fn test_from_candidate_defaults() {
        let candidate =
            NewBudgetItem::new(Category::Income, "Capital Gains", PaymentType::Card, 100.0);
        let item = BudgetItem::from_candidate(candidate);

        assert!(!item.favorite);
        assert!(!item.is_confirmed());
        assert_eq!(item.creation_date, Local::now().date_naive());
        assert_eq!(item.subcategory, "Capital Gains");
    }

    #[test]
    fn test_confirm_records_remote_identity() {
        let candidate = NewBudgetItem::new(Category::Expense, "Utilities", PaymentType::Cash, 9.99);
        let mut item = BudgetItem::from_candidate(candidate);

        item.confirm("abc123");
        assert!(item.is_confirmed());
        assert_eq!(item.remote_id.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_toggle_favorite_round_trip() {
        let candidate = NewBudgetItem::new(Category::Expense, "Education", PaymentType::Card, 1.0);
        let mut item = BudgetItem::from_candidate(candidate);

        assert!(!item.favorite);
        item.toggle_favorite();
        assert!(item.favorite);
        item.toggle_favorite();
        assert!(!item.favorite);
    }

    #[test]
    fn test_serialization() {
        let candidate = NewBudgetItem::new(Category::Income, "Pension Income", PaymentType::Cash, 7.0);
        let item = BudgetItem::from_candidate(candidate);

        let json = serde_json::to_string(&item).unwrap();
        let deserialized: BudgetItem = serde_json::from_str(&json).unwrap();
        assert_eq!(item, deserialized);
    }
}
