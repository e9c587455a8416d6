use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    database_id::ExpenseId,
    endpoints::{self, format_endpoint},
    expense::{
        core::{Expense, get_expense},
        form::{ExpenseFormDefaults, RedirectQuery, expense_form_fields},
    },
    html::{
        BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, FORM_CONTAINER_STYLE, base,
        currency_input_styles,
    },
    navigation::NavBar,
};

/// The state needed for the edit expense page.
#[derive(Debug, Clone)]
pub struct EditExpensePageState {
    /// The database connection for reading the expense.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditExpensePageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Renders the page for editing an expense.
///
/// Responds with the 404 page if the expense does not exist.
pub async fn get_edit_expense_page(
    State(state): State<EditExpensePageState>,
    Path(expense_id): Path<ExpenseId>,
    Query(redirect): Query<RedirectQuery>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let expense = get_expense(expense_id, &connection)
        .inspect_err(|error| tracing::debug!("Could not open expense {expense_id}: {error}"))?;

    Ok(edit_expense_view(&expense, redirect.redirect_url()).into_response())
}

fn edit_expense_view(expense: &Expense, redirect_url: &str) -> Markup {
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW).into_html();
    let update_endpoint =
        RedirectQuery::to(redirect_url).append_to(&format_endpoint(endpoints::EXPENSE, expense.id));
    let fields = expense_form_fields(&ExpenseFormDefaults {
        title: Some(&expense.title),
        amount: Some(expense.amount),
        category: Some(expense.category),
        date: Some(expense.date),
    });

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            div class="w-full bg-white rounded-lg shadow dark:border dark:bg-gray-800 dark:border-gray-700"
            {
                div class="p-6 space-y-4 md:space-y-6 sm:p-8"
                {
                    h1 class="text-xl font-bold leading-tight tracking-tight text-gray-900 md:text-2xl dark:text-white"
                    {
                        "Edit Expense"
                    }

                    form
                        hx-put=(update_endpoint)
                        hx-target-error="#alert-container"
                        class="space-y-4 md:space-y-6"
                    {
                        (fields)

                        button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Update Expense" }
                    }

                    a href=(redirect_url) class=(BUTTON_SECONDARY_STYLE) { "Cancel" }
                }
            }
        }
    };

    base("Edit Expense", &[currency_input_styles()], &content)
}
