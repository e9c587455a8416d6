//! Expense management.
//!
//! This module contains everything related to expenses:
//! - The `Expense` model, `ExpenseBuilder` and the `Category` enum
//! - Database functions for storing and managing expenses
//! - The search, filter and sort pipeline and the CSV export built on it
//! - The JSON API and the HTML form endpoints

mod api;
mod category;
mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod edit_page;
mod export;
mod form;
mod query;

#[cfg(test)]
mod test_utils;

pub use api::{
    create_expense_api, delete_expense_api, get_api_root, list_expenses_api, update_expense_api,
};
pub use category::Category;
pub use core::{Expense, ExpenseBuilder, create_expense, create_expense_table, get_all_expenses};
pub use create_endpoint::create_expense_endpoint;
pub use delete_endpoint::delete_expense_endpoint;
pub use edit_endpoint::edit_expense_endpoint;
pub use edit_page::get_edit_expense_page;
pub use export::export_expenses_endpoint;
pub use form::{ExpenseFormDefaults, RedirectQuery, expense_form_fields};
pub use query::{QueryState, SortKey, apply_query};

#[cfg(test)]
pub use core::{ExpenseInput, count_expenses, delete_expense, get_expense, update_expense};
#[cfg(test)]
pub use query::CategoryFilter;
#[cfg(test)]
pub use test_utils::{sample_expense, sample_expenses};
