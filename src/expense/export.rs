//! Downloading the filtered list of expenses as a CSV file.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use rusqlite::Connection;
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    AppState, Error,
    expense::{
        core::{Expense, get_all_expenses},
        query::{QueryState, apply_query},
    },
    timezone::get_local_today,
};

const EXPORT_HEADER: [&str; 4] = ["Title", "Amount", "Category", "Date"];

const EXPORT_DATE_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[month padding:none]/[day padding:none]/[year]");

/// Write `expenses` as CSV text, one line per expense after the header line.
///
/// Every field of an expense row is quoted and quotes inside a title are
/// doubled, so titles containing commas or quotes survive a round trip
/// through a spreadsheet.
///
/// # Errors
/// Returns [Error::NothingToExport] if `expenses` is empty, or
/// [Error::ExportError] if the CSV could not be written.
pub fn export_csv(expenses: &[&Expense]) -> Result<String, Error> {
    if expenses.is_empty() {
        return Err(Error::NothingToExport);
    }

    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(EXPORT_HEADER).map_err(export_error)?;
    let buffer = writer.into_inner().map_err(export_error)?;

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(buffer);

    for expense in expenses {
        let date = expense.date.format(EXPORT_DATE_FORMAT).map_err(export_error)?;

        writer
            .write_record([
                expense.title.as_str(),
                &expense.amount.to_string(),
                expense.category.as_str(),
                &date,
            ])
            .map_err(export_error)?;
    }

    let buffer = writer.into_inner().map_err(export_error)?;

    String::from_utf8(buffer).map_err(export_error)
}

fn export_error(error: impl std::fmt::Display) -> Error {
    tracing::error!("Could not export expenses: {error}");
    Error::ExportError(error.to_string())
}

/// The name of the exported file, e.g. "expenses_2026-01-15.csv".
pub fn export_file_name(today: Date) -> String {
    format!("expenses_{today}.csv")
}

/// The state needed for exporting expenses.
#[derive(Debug, Clone)]
pub struct ExportState {
    /// The database connection for reading expenses.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for ExportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Download the expenses shown on the dashboard for the same query as a CSV file.
pub async fn export_expenses_endpoint(
    State(state): State<ExportState>,
    Query(query): Query<QueryState>,
) -> Result<Response, Error> {
    let today = get_local_today(&state.local_timezone)?;

    let expenses = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        get_all_expenses(&connection)?
    };

    let view = apply_query(&expenses, &query);
    let csv = export_csv(&view)?;

    tracing::info!("Exporting {} expenses", view.len());

    Ok((
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8".to_owned()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export_file_name(today)),
            ),
        ],
        csv,
    )
        .into_response())
}

#[cfg(test)]
mod export_csv_tests {
    use time::macros::date;

    use crate::{
        Error,
        expense::{
            Category,
            test_utils::{sample_expense, sample_expenses},
        },
    };

    use super::{export_csv, export_file_name};

    #[test]
    fn writes_header_and_one_line_per_expense() {
        let expenses = sample_expenses();
        let view = expenses.iter().collect::<Vec<_>>();

        let csv = export_csv(&view).unwrap();

        assert_eq!(
            csv,
            "Title,Amount,Category,Date\n\
            \"Coffee\",\"150\",\"Food\",\"1/5/2026\"\n\
            \"Bus\",\"40\",\"Transport\",\"1/10/2026\"\n\
            \"Movie\",\"500\",\"Entertainment\",\"2/1/2026\"\n"
        );
        assert_eq!(csv.lines().count(), view.len() + 1);
    }

    #[test]
    fn refuses_to_export_nothing() {
        assert_eq!(export_csv(&[]), Err(Error::NothingToExport));
    }

    #[test]
    fn escapes_quotes_and_commas_in_title() {
        let expense = sample_expense(
            1,
            "Dinner, \"fancy\"",
            12.5,
            Category::Food,
            date!(2026 - 03 - 14),
        );

        let csv = export_csv(&[&expense]).unwrap();

        assert_eq!(
            csv.lines().nth(1),
            Some("\"Dinner, \"\"fancy\"\"\",\"12.5\",\"Food\",\"3/14/2026\"")
        );
    }

    #[test]
    fn file_name_uses_iso_date() {
        assert_eq!(
            export_file_name(date!(2026 - 01 - 15)),
            "expenses_2026-01-15.csv"
        );
    }
}
