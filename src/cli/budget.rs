//! Budget item commands
//!
//! Scriptable equivalents of the budget screen: add, list, delete, and
//! favorite. Every command loads the remote list first and mutates through
//! the same store the TUI uses; delete and favorite address items by the
//! identity the service assigned (shown in `list`).

use anyhow::{bail, Result};
use clap::Subcommand;
use tabled::{Table, Tabled};

use crate::api::ApiClient;
use crate::config::Settings;
use crate::journal::Journal;
use crate::models::{BudgetItem, Category, NewBudgetItem, PaymentType};
use crate::store::BudgetItemStore;

/// Budget item management commands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Add a new budget item
    Add {
        /// Category: Income or Expense
        category: String,
        /// Subcategory from the category's fixed list
        subcategory: String,
        /// Amount
        amount: f64,
        /// Payment type: Cash or Card
        #[arg(short, long, default_value = "Card")]
        payment: String,
    },
    /// List budget items
    List {
        /// Show only favorites
        #[arg(short, long)]
        favorites: bool,
    },
    /// Delete a budget item by its ID (see `list`)
    Delete {
        /// Item ID
        id: String,
    },
    /// Toggle an item's favorite flag by its ID (see `list`)
    Favorite {
        /// Item ID
        id: String,
    },
}

/// One row of `budget list` output
#[derive(Tabled)]
struct ItemRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Subcategory")]
    subcategory: String,
    #[tabled(rename = "Payment")]
    payment: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Fav")]
    favorite: String,
}

impl ItemRow {
    fn new(item: &BudgetItem, date_format: &str) -> Self {
        Self {
            id: item.remote_id.clone().unwrap_or_else(|| "-".into()),
            date: item.creation_date.format(date_format).to_string(),
            category: item.category.to_string(),
            subcategory: item.subcategory.clone(),
            payment: item.payment_type.to_string(),
            amount: format!("{:.2}", item.amount),
            favorite: if item.favorite { "★".into() } else { String::new() },
        }
    }
}

/// Handle a budget subcommand
pub fn handle_budget_command(
    client: &ApiClient,
    journal: &Journal,
    settings: &Settings,
    cmd: BudgetCommands,
) -> Result<()> {
    let mut store = BudgetItemStore::new();

    match cmd {
        BudgetCommands::Add {
            category,
            subcategory,
            amount,
            payment,
        } => {
            let Some(category) = Category::parse(&category) else {
                bail!("Unknown category '{}'. Use Income or Expense.", category);
            };
            let Some(payment_type) = PaymentType::parse(&payment) else {
                bail!("Unknown payment type '{}'. Use Cash or Card.", payment);
            };

            let candidate = NewBudgetItem::new(category, subcategory, payment_type, amount);
            let key = store.add(client, journal, candidate)?;

            let id = store
                .get(key)
                .and_then(|item| item.remote_id.clone())
                .unwrap_or_else(|| key.to_string());
            println!("Added budget item {}", id);
        }

        BudgetCommands::List { favorites } => {
            store.load(client, journal)?;

            let rows: Vec<ItemRow> = store
                .filtered_view(favorites)
                .map(|item| ItemRow::new(item, &settings.date_format))
                .collect();
            if rows.is_empty() {
                if favorites {
                    println!("No favorite items.");
                } else {
                    println!("No budget items.");
                }
            } else {
                println!("{}", Table::new(rows));
            }
        }

        BudgetCommands::Delete { id } => {
            store.load(client, journal)?;
            let key = find_by_remote_id(&store, &id)?;
            store.delete(client, journal, key)?;
            println!("Deleted budget item {}", id);
        }

        BudgetCommands::Favorite { id } => {
            store.load(client, journal)?;
            let key = find_by_remote_id(&store, &id)?;
            let now_favorite = store.toggle_favorite(client, journal, key)?;
            if now_favorite {
                println!("Added {} to favorites", id);
            } else {
                println!("Removed {} from favorites", id);
            }
        }
    }

    Ok(())
}

/// Resolve a service-assigned identity to the item's local key
fn find_by_remote_id(
    store: &BudgetItemStore,
    id: &str,
) -> Result<crate::models::BudgetItemId> {
    store
        .items()
        .iter()
        .find(|item| item.remote_id.as_deref() == Some(id))
        .map(|item| item.key)
        .ok_or_else(|| anyhow::anyhow!("No budget item with ID '{}'", id))
}
