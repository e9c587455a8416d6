//! Dashboard module
//!
//! Provides the main page of the app: the expense form, a summary of this
//! month's spending, charts and the searchable list of expenses.

mod aggregation;
mod cards;
mod charts;
mod handlers;
mod tables;

pub use handlers::get_dashboard_page;
