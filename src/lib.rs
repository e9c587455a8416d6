//! ExpenseMate is a web app for recording and visualising personal expenses.
//!
//! This library provides a JSON REST API for expense records and a set of
//! server-rendered HTML pages (maud + htmx) that summarise them with charts,
//! a filterable list and CSV export.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod alert;
mod app_state;
mod dashboard;
mod database_id;
mod db;
mod endpoints;
mod expense;
mod html;
mod internal_server_error;
mod landing;
mod logging;
mod navigation;
mod not_found;
mod routing;
mod timezone;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use database_id::ExpenseId;
pub use db::initialize as initialize_db;
pub use expense::{Category, Expense, ExpenseBuilder, create_expense};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use timezone::{get_local_offset, get_local_today};

use crate::{
    alert::{Alert, render_alert},
    internal_server_error::InternalServerError,
    not_found::get_404_not_found_response,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A required field of an expense (title, amount or category) was missing
    /// or blank.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The category is not one of the fixed set of expense categories.
    #[error("\"{0}\" is not a valid category")]
    InvalidCategory(String),

    /// The date could not be parsed as a calendar date or an RFC 3339 date-time.
    #[error("\"{0}\" is not a valid date")]
    InvalidDate(String),

    /// A JSON request body could not be read as an expense, e.g. the amount
    /// was not a number or the body was not JSON.
    #[error("invalid JSON body: {0}")]
    InvalidJson(String),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// Tried to export a list of expenses that is empty.
    #[error("there are no expenses to export")]
    NothingToExport,

    /// The CSV writer failed while exporting expenses.
    #[error("could not write CSV: {0}")]
    ExportError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::NothingToExport => (
                StatusCode::BAD_REQUEST,
                html::error_view(
                    "Nothing to Export",
                    "400",
                    "There are no expenses to export.",
                    "Add an expense or clear the search and category filters, then try again.",
                ),
            )
                .into_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::DatabaseLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Render the error as an alert fragment for htmx to swap into the page.
    fn into_alert_response(self) -> Response {
        match self {
            Error::MissingField(field) => render_alert(
                StatusCode::BAD_REQUEST,
                Alert {
                    message: "Please provide all required fields".to_owned(),
                    details: format!("The expense's {field} is required."),
                },
            ),
            Error::InvalidCategory(category) => render_alert(
                StatusCode::BAD_REQUEST,
                Alert {
                    message: "Invalid category".to_owned(),
                    details: format!(
                        "\"{category}\" is not a valid category. Choose one of the listed categories."
                    ),
                },
            ),
            Error::InvalidDate(date) => render_alert(
                StatusCode::BAD_REQUEST,
                Alert {
                    message: "Invalid date".to_owned(),
                    details: format!("\"{date}\" is not a valid date."),
                },
            ),
            Error::NotFound => render_alert(
                StatusCode::NOT_FOUND,
                Alert {
                    message: "Could not find expense".to_owned(),
                    details: "The expense could not be found. \
                        Try refreshing the page to see if it has been deleted."
                        .to_owned(),
                },
            ),
            Error::InvalidTimezoneError(timezone) => render_alert(
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert {
                    message: "Invalid Timezone Settings".to_owned(),
                    details: format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                        ensure the timezone has been set to valid, canonical timezone string"
                    ),
                },
            ),
            Error::NothingToExport => render_alert(
                StatusCode::BAD_REQUEST,
                Alert {
                    message: "Nothing to export".to_owned(),
                    details: "No expenses match the current filters.".to_owned(),
                },
            ),
            _ => render_alert(
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert {
                    message: "Something went wrong".to_owned(),
                    details: "An unexpected error occurred, check the server logs for more details."
                        .to_owned(),
                },
            ),
        }
    }

    /// Render the error as a JSON body for the REST API.
    ///
    /// `action` describes what the failed request was doing, e.g. "creating",
    /// and is used in the message for store errors.
    fn into_json_response(self, action: &str) -> Response {
        match self {
            Error::MissingField(_) => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "message": "Please provide all required fields",
                    "error": self.to_string(),
                })),
            )
                .into_response(),
            Error::InvalidCategory(_) | Error::InvalidDate(_) | Error::InvalidJson(_) => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "message": "Invalid expense data",
                    "error": self.to_string(),
                })),
            )
                .into_response(),
            error => {
                tracing::error!("Error {action} expense: {error}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "message": format!("Error {action} expense"),
                        "error": error.to_string(),
                    })),
                )
                    .into_response()
            }
        }
    }
}
