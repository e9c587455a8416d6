//! Defines the endpoint for creating a new expense from the dashboard form.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use rusqlite::Connection;

use crate::{
    AppState, Error,
    expense::{
        core::{ExpenseInput, create_expense},
        form::RedirectQuery,
    },
    timezone::{get_local_offset, get_local_today},
};

/// The state needed to create an expense.
#[derive(Debug, Clone)]
pub struct CreateExpenseState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// A route handler for creating a new expense.
///
/// Redirects back to the dashboard on success so that the page is rendered
/// again from the full list of expenses, or responds with an alert on failure.
pub async fn create_expense_endpoint(
    State(state): State<CreateExpenseState>,
    Query(redirect): Query<RedirectQuery>,
    Form(input): Form<ExpenseInput>,
) -> Response {
    let Some(local_offset) = get_local_offset(&state.local_timezone) else {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        return Error::InvalidTimezoneError(state.local_timezone).into_alert_response();
    };

    let today = match get_local_today(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => return error.into_alert_response(),
    };

    let builder = match input.validate(local_offset) {
        Ok(builder) => builder,
        Err(error) => {
            tracing::debug!("Rejected new expense: {error}");
            return error.into_alert_response();
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match create_expense(builder, today, &connection) {
        Ok(expense) => tracing::info!("Created expense {}", expense.id),
        Err(error) => {
            tracing::error!("Could not create expense: {error}");
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
mod create_expense_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Query, State},
        http::StatusCode,
    };
    use axum_extra::extract::Form;
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        db::initialize,
        endpoints,
        expense::{Category, ExpenseInput, RedirectQuery, get_all_expenses},
        test_utils::{assert_hx_redirect, assert_valid_html, parse_html_fragment},
    };

    use super::{CreateExpenseState, create_expense_endpoint};

    fn get_test_state() -> CreateExpenseState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        initialize(&connection).expect("Could not initialize database");

        CreateExpenseState {
            db_connection: Arc::new(Mutex::new(connection)),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    fn coffee_form() -> ExpenseInput {
        ExpenseInput {
            title: Some("Coffee".to_owned()),
            amount: Some(150.0),
            category: Some("Food".to_owned()),
            date: Some("2026-01-05".to_owned()),
        }
    }

    #[tokio::test]
    async fn creates_expense_and_redirects_to_dashboard() {
        let state = get_test_state();

        let response = create_expense_endpoint(
            State(state.clone()),
            Query(RedirectQuery::default()),
            Form(coffee_form()),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::DASHBOARD_VIEW);

        let expenses = get_all_expenses(&state.db_connection.lock().unwrap()).unwrap();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].title, "Coffee");
        assert_eq!(expenses[0].category, Category::Food);
        assert_eq!(expenses[0].date, date!(2026 - 01 - 05));
    }

    #[tokio::test]
    async fn redirect_keeps_dashboard_query() {
        let state = get_test_state();
        let redirect_url = "/dashboard?search=cof&category=All&sort=amount_desc";

        let response = create_expense_endpoint(
            State(state),
            Query(RedirectQuery::to(redirect_url)),
            Form(coffee_form()),
        )
        .await;

        assert_hx_redirect(&response, redirect_url);
    }

    #[tokio::test]
    async fn missing_title_responds_with_alert() {
        let state = get_test_state();
        let form = ExpenseInput {
            title: None,
            ..coffee_form()
        };

        let response =
            create_expense_endpoint(State(state.clone()), Query(RedirectQuery::default()), Form(form))
                .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let fragment = parse_html_fragment(response).await;
        assert_valid_html(&fragment);
        let expenses = get_all_expenses(&state.db_connection.lock().unwrap()).unwrap();
        assert!(expenses.is_empty());
    }

    #[tokio::test]
    async fn invalid_timezone_responds_with_alert() {
        let state = CreateExpenseState {
            local_timezone: "Middle/Earth".to_owned(),
            ..get_test_state()
        };

        let response =
            create_expense_endpoint(State(state), Query(RedirectQuery::default()), Form(coffee_form()))
                .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
