use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use rusqlite::Connection;

use crate::{
    AppState, Error,
    database_id::ExpenseId,
    expense::{
        core::{ExpenseInput, update_expense},
        form::RedirectQuery,
    },
    timezone::get_local_offset,
};

/// The state needed to edit an expense.
#[derive(Debug, Clone)]
pub struct EditExpenseState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for EditExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// A route handler for replacing the fields of an expense from the edit form.
pub async fn edit_expense_endpoint(
    State(state): State<EditExpenseState>,
    Path(expense_id): Path<ExpenseId>,
    Query(redirect): Query<RedirectQuery>,
    Form(input): Form<ExpenseInput>,
) -> Response {
    let Some(local_offset) = get_local_offset(&state.local_timezone) else {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        return Error::InvalidTimezoneError(state.local_timezone).into_alert_response();
    };

    let builder = match input.validate(local_offset) {
        Ok(builder) => builder,
        Err(error) => {
            tracing::debug!("Rejected changes to expense {expense_id}: {error}");
            return error.into_alert_response();
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("Could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match update_expense(expense_id, builder, &connection) {
        Ok(Some(_)) => {}
        Ok(None) => {
            tracing::error!("Could not update expense {expense_id}: expense not found");
            return Error::NotFound.into_alert_response();
        }
        Err(error) => {
            tracing::error!("Could not update expense {expense_id}: {error}");
            return error.into_alert_response();
        }
    }

    (
        HxRedirect(redirect.redirect_url().to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
