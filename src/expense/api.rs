//! JSON REST API for expenses.
//!
//! Errors are answered with a JSON body of the form
//! `{"message": "...", "error": "..."}`.

use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    Json,
    extract::{FromRef, Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde_json::json;

use crate::{
    AppState, Error,
    database_id::ExpenseId,
    expense::core::{
        ExpenseInput, create_expense, delete_expense, get_all_expenses, update_expense,
    },
    timezone::{get_local_offset, get_local_today},
};

/// The state needed by the expense API.
#[derive(Debug, Clone)]
pub struct ExpenseApiState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for ExpenseApiState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

impl ExpenseApiState {
    fn lock_connection(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)
    }

    fn local_offset(&self) -> Result<time::UtcOffset, Error> {
        get_local_offset(&self.local_timezone).ok_or_else(|| {
            tracing::error!("Invalid timezone {}", self.local_timezone);
            Error::InvalidTimezoneError(self.local_timezone.clone())
        })
    }
}

/// Unwrap a JSON body, turning a rejection into an [Error::InvalidJson] so
/// that it is answered with the API's JSON error body.
fn expense_input(body: Result<Json<ExpenseInput>, JsonRejection>) -> Result<ExpenseInput, Error> {
    body.map(|Json(input)| input).map_err(|rejection| {
        tracing::debug!("Rejected expense body: {rejection}");
        Error::InvalidJson(rejection.body_text())
    })
}

/// Check that the API is up.
pub async fn get_api_root() -> &'static str {
    "Expense Tracker API is running 🚀"
}

/// List every expense, most recently created first.
pub async fn list_expenses_api(State(state): State<ExpenseApiState>) -> Response {
    let result = state
        .lock_connection()
        .and_then(|connection| get_all_expenses(&connection));

    match result {
        Ok(expenses) => Json(expenses).into_response(),
        Err(error) => error.into_json_response("fetching"),
    }
}

/// Create an expense and respond with the stored record.
pub async fn create_expense_api(
    State(state): State<ExpenseApiState>,
    body: Result<Json<ExpenseInput>, JsonRejection>,
) -> Response {
    let result = expense_input(body)
        .and_then(|input| input.validate(state.local_offset()?))
        .and_then(|builder| {
            let today = get_local_today(&state.local_timezone)?;
            let connection = state.lock_connection()?;
            create_expense(builder, today, &connection)
        });

    match result {
        Ok(expense) => {
            tracing::info!("Created expense {}", expense.id);
            (StatusCode::CREATED, Json(expense)).into_response()
        }
        Err(error) => error.into_json_response("creating"),
    }
}

/// Replace the fields of an expense and respond with the updated record.
///
/// Responds with `null` if the expense does not exist.
pub async fn update_expense_api(
    State(state): State<ExpenseApiState>,
    Path(expense_id): Path<ExpenseId>,
    body: Result<Json<ExpenseInput>, JsonRejection>,
) -> Response {
    let result = expense_input(body)
        .and_then(|input| input.validate(state.local_offset()?))
        .and_then(|builder| {
            let connection = state.lock_connection()?;
            update_expense(expense_id, builder, &connection)
        });

    match result {
        Ok(Some(expense)) => Json(Some(expense)).into_response(),
        Ok(None) => {
            tracing::debug!("Tried to update missing expense {expense_id}");
            Json(None::<()>).into_response()
        }
        Err(error) => error.into_json_response("updating"),
    }
}

/// Delete an expense.
///
/// Deleting an expense that does not exist still succeeds.
pub async fn delete_expense_api(
    State(state): State<ExpenseApiState>,
    Path(expense_id): Path<ExpenseId>,
) -> Response {
    let result = state
        .lock_connection()
        .and_then(|connection| delete_expense(expense_id, &connection));

    match result {
        Ok(rows_affected) => {
            tracing::info!("Deleted expense {expense_id} ({rows_affected} rows affected)");
            Json(json!({ "message": "Expense deleted" })).into_response()
        }
        Err(error) => error.into_json_response("deleting"),
    }
}
