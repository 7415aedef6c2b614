//! Wire types for the remote service
//!
//! The service speaks camelCase JSON; these types mirror its request and
//! response bodies exactly. Conversions to the crate's models live here so
//! the rest of the code never sees wire shapes.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::BudgetError;
use crate::models::{BudgetItem, BudgetItemId, Category, NewBudgetItem, PaymentType};

/// Body of `POST /api/register` — the full credential record
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest<'a> {
    pub name: &'a str,
    pub user_name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub confirm_password: &'a str,
}

/// Body of `POST /api/login`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest<'a> {
    pub user_name: &'a str,
    pub password: &'a str,
}

/// Success body of `POST /api/login`
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Body of `POST /api/forgot-password`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordRequest<'a> {
    pub email: &'a str,
    pub new_password: &'a str,
}

/// Error body a 400 response may carry
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub errors: Option<BTreeMap<String, String>>,
}

/// Success body of `GET /api/filter-budget`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetItemsResponse {
    pub budget_items: Vec<BudgetItemDto>,
}

/// One budget item as the service represents it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetItemDto {
    /// Identity assigned by the service
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    pub category: String,
    pub subcategory: String,
    pub payment_type: String,
    pub money_amount: f64,
    pub creation_date: NaiveDate,
    #[serde(default)]
    pub favorite: bool,
}

/// Body of `POST /api/add-budget` — a budget item without identity
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddBudgetRequest<'a> {
    pub category: &'a str,
    pub subcategory: &'a str,
    pub payment_type: &'a str,
    pub money_amount: f64,
    pub creation_date: NaiveDate,
    pub favorite: bool,
}

impl<'a> AddBudgetRequest<'a> {
    /// Build the request body for a candidate item dated `creation_date`
    pub fn from_candidate(candidate: &'a NewBudgetItem, creation_date: NaiveDate) -> Self {
        Self {
            category: candidate.category.as_str(),
            subcategory: &candidate.subcategory,
            payment_type: candidate.payment_type.as_str(),
            money_amount: candidate.amount,
            creation_date,
            favorite: false,
        }
    }
}

/// Success body of `POST /api/add-budget`; the identity is optional because
/// the contract only promises a 2xx
#[derive(Debug, Default, Deserialize)]
pub struct AddBudgetResponse {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
}

impl TryFrom<BudgetItemDto> for BudgetItem {
    type Error = BudgetError;

    fn try_from(dto: BudgetItemDto) -> Result<Self, Self::Error> {
        let category = Category::parse(&dto.category).ok_or_else(|| {
            BudgetError::Json(format!("Unknown category '{}' from service", dto.category))
        })?;
        let payment_type = PaymentType::parse(&dto.payment_type).ok_or_else(|| {
            BudgetError::Json(format!(
                "Unknown payment type '{}' from service",
                dto.payment_type
            ))
        })?;

        Ok(BudgetItem {
            key: BudgetItemId::new(),
            remote_id: dto.id,
            category,
            subcategory: dto.subcategory,
            payment_type,
            amount: dto.money_amount,
            creation_date: dto.creation_date,
            favorite: dto.favorite,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_uses_camel_case() {
        let req = RegisterRequest {
            name: "Alice",
            user_name: "Alice",
            email: "alice@example.com",
            password: "secret1",
            confirm_password: "secret1",
        };

        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["userName"], "Alice");
        assert_eq!(json["confirmPassword"], "secret1");
    }

    #[test]
    fn test_add_budget_request_shape() {
        let candidate =
            NewBudgetItem::new(Category::Expense, "Groceries", PaymentType::Card, 12.5);
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        let req = AddBudgetRequest::from_candidate(&candidate, date);

        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["category"], "Expense");
        assert_eq!(json["paymentType"], "Card");
        assert_eq!(json["moneyAmount"], 12.5);
        assert_eq!(json["creationDate"], "2026-03-14");
        assert_eq!(json["favorite"], false);
    }

    #[test]
    fn test_items_response_parses() {
        let body = r#"{
            "budgetItems": [
                {
                    "id": "abc",
                    "category": "Income",
                    "subcategory": "Rental Income",
                    "paymentType": "Cash",
                    "moneyAmount": 900.0,
                    "creationDate": "2026-01-02",
                    "favorite": true
                }
            ]
        }"#;

        let parsed: BudgetItemsResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.budget_items.len(), 1);

        let item = BudgetItem::try_from(parsed.budget_items[0].clone()).unwrap();
        assert_eq!(item.remote_id.as_deref(), Some("abc"));
        assert_eq!(item.category, Category::Income);
        assert!(item.favorite);
    }

    #[test]
    fn test_item_dto_accepts_underscore_id() {
        let body = r#"{
            "_id": "mongo-ish",
            "category": "Expense",
            "subcategory": "Utilities",
            "paymentType": "Card",
            "moneyAmount": 50.0,
            "creationDate": "2026-02-03"
        }"#;

        let dto: BudgetItemDto = serde_json::from_str(body).unwrap();
        assert_eq!(dto.id.as_deref(), Some("mongo-ish"));
        assert!(!dto.favorite);
    }

    #[test]
    fn test_unknown_category_rejected() {
        let dto = BudgetItemDto {
            id: None,
            category: "Savings".into(),
            subcategory: "Utilities".into(),
            payment_type: "Card".into(),
            money_amount: 1.0,
            creation_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            favorite: false,
        };

        assert!(BudgetItem::try_from(dto).is_err());
    }

    #[test]
    fn test_error_body_with_and_without_map() {
        let with: ErrorBody =
            serde_json::from_str(r#"{"errors": {"email": "Invalid email address"}}"#).unwrap();
        assert_eq!(
            with.errors.unwrap().get("email").map(String::as_str),
            Some("Invalid email address")
        );

        let without: ErrorBody = serde_json::from_str(r#"{"message": "nope"}"#).unwrap();
        assert!(without.errors.is_none());
    }
}
