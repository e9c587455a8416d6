use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use rusqlite::Connection;

use crate::{
    AppState, Error,
    database_id::ExpenseId,
    expense::{core::delete_expense, form::RedirectQuery},
};

/// The state needed to delete an expense.
#[derive(Debug, Clone)]
pub struct DeleteExpenseState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for deleting an expense.
///
/// Redirects back to the dashboard so the list and charts are rebuilt. Deleting
/// an expense that has already been deleted is treated as a success.
pub async fn delete_expense_endpoint(
    State(state): State<DeleteExpenseState>,
    Path(expense_id): Path<ExpenseId>,
    Query(redirect): Query<RedirectQuery>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match delete_expense(expense_id, &connection) {
        Ok(0) => tracing::debug!("Expense {expense_id} was already deleted"),
        Ok(_) => tracing::info!("Deleted expense {expense_id}"),
        Err(error) => {
            tracing::error!("Could not delete expense {expense_id}: {error}");
            return error.into_alert_response();
        }
    }

    (
        HxRedirect(redirect.redirect_url().to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

#[cfg(test)]
mod delete_expense_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, Query, State},
        http::StatusCode,
    };
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        db::initialize,
        endpoints,
        expense::{Expense, RedirectQuery, create_expense, get_expense},
        test_utils::assert_hx_redirect,
    };

    use super::{DeleteExpenseState, delete_expense_endpoint};

    fn get_test_state() -> DeleteExpenseState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        initialize(&connection).expect("Could not initialize database");
        create_expense(Expense::build("Bus", 40.0), date!(2026 - 01 - 10), &connection)
            .expect("Could not create test expense");

        DeleteExpenseState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn deletes_expense_and_redirects() {
        let state = get_test_state();

        let response =
            delete_expense_endpoint(State(state.clone()), Path(1), Query(RedirectQuery::default()))
                .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::DASHBOARD_VIEW);
        assert_eq!(
            get_expense(1, &state.db_connection.lock().unwrap()),
            Err(Error::NotFound)
        );
    }

    #[tokio::test]
    async fn deleting_missing_expense_still_redirects() {
        let state = get_test_state();

        let response =
            delete_expense_endpoint(State(state), Path(42), Query(RedirectQuery::default())).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::DASHBOARD_VIEW);
    }
}
