//! Defines the core data models and database queries for expenses.

use rusqlite::{Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};
use time::{
    Date, OffsetDateTime, UtcOffset,
    format_description::{BorrowedFormatItem, well_known::Rfc3339},
    macros::format_description,
};

use crate::{
    Error,
    database_id::ExpenseId,
    expense::category::{Category, ParseCategoryError},
};

// ============================================================================
// MODELS
// ============================================================================

/// A record of money spent on something.
///
/// To create a new `Expense`, use [Expense::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// The ID of the expense, assigned by the database.
    pub id: ExpenseId,
    /// A short label for what the money was spent on.
    pub title: String,
    /// How much money was spent.
    pub amount: f64,
    /// What kind of thing the money was spent on.
    pub category: Category,
    /// When the money was spent.
    pub date: Date,
    /// When the expense was first saved.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// When the expense was last saved.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Expense {
    /// Create a new expense.
    ///
    /// Shortcut for [ExpenseBuilder] for discoverability.
    pub fn build(title: &str, amount: f64) -> ExpenseBuilder {
        ExpenseBuilder {
            title: title.to_owned(),
            amount,
            category: Category::default(),
            date: None,
        }
    }
}

/// The user-editable fields of an [Expense].
///
/// The same builder is used to create an expense and to replace the fields of
/// an existing one.
///
/// # Examples
///
/// ```ignore
/// use time::macros::date;
///
/// let expense = Expense::build("Coffee", 4.5)
///     .category(Category::Food)
///     .date(date!(2026 - 01 - 05));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseBuilder {
    /// A short, non-empty label for the expense.
    pub title: String,

    /// The amount of money spent.
    ///
    /// No sign convention is enforced, a negative amount is stored as-is.
    pub amount: f64,

    /// Defaults to [Category::Other].
    pub category: Category,

    /// When the money was spent.
    ///
    /// When creating an expense, `None` means the expense happened today.
    /// When updating an expense, `None` keeps the date that is already stored.
    pub date: Option<Date>,
}

impl ExpenseBuilder {
    /// Set the category of the expense.
    pub fn category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Set the date of the expense.
    pub fn date(mut self, date: Date) -> Self {
        self.date = Some(date);
        self
    }
}

/// The unvalidated fields of an expense as sent by a client.
///
/// Used as both the JSON body of the REST API and the HTML form data.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseInput {
    /// A short label for the expense. Required.
    #[serde(default)]
    pub title: Option<String>,
    /// The amount of money spent. Required.
    #[serde(default)]
    pub amount: Option<f64>,
    /// The name of one of the [Category] variants. Required.
    #[serde(default)]
    pub category: Option<String>,
    /// Either a calendar date "2026-01-05" or an RFC 3339 date-time.
    #[serde(default)]
    pub date: Option<String>,
}

const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

impl ExpenseInput {
    /// Check the input and convert it into an [ExpenseBuilder].
    ///
    /// The title is trimmed and control characters in it are replaced with
    /// spaces. Date-times are converted to `local_offset`
    /// before their calendar date is taken.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::MissingField] if the title, amount or category is missing or blank,
    /// - [Error::InvalidCategory] if the category is not one of the known categories,
    /// - or [Error::InvalidDate] if the date could not be parsed.
    pub fn validate(self, local_offset: UtcOffset) -> Result<ExpenseBuilder, Error> {
        // Line breaks and other control characters would split an exported row.
        let title = self
            .title
            .as_deref()
            .map(|title| {
                title
                    .chars()
                    .map(|c| if c.is_control() { ' ' } else { c })
                    .collect::<String>()
            })
            .map(|title| title.trim().to_owned())
            .filter(|title| !title.is_empty())
            .ok_or(Error::MissingField("title"))?;

        let amount = self
            .amount
            .filter(|amount| amount.is_finite())
            .ok_or(Error::MissingField("amount"))?;

        let category = self
            .category
            .as_deref()
            .map(str::trim)
            .filter(|category| !category.is_empty())
            .ok_or(Error::MissingField("category"))?
            .parse::<Category>()
            .map_err(|ParseCategoryError(name)| Error::InvalidCategory(name))?;

        let builder = Expense::build(&title, amount).category(category);

        match self.date.as_deref().map(str::trim) {
            None | Some("") => Ok(builder),
            Some(text) => Ok(builder.date(parse_date(text, local_offset)?)),
        }
    }
}

fn parse_date(text: &str, local_offset: UtcOffset) -> Result<Date, Error> {
    if let Ok(date) = Date::parse(text, DATE_FORMAT) {
        return Ok(date);
    }

    OffsetDateTime::parse(text, &Rfc3339)
        .map(|date_time| date_time.to_offset(local_offset).date())
        .map_err(|_| Error::InvalidDate(text.to_owned()))
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

const EXPENSE_COLUMNS: &str = "id, title, amount, category, date, created_at, updated_at";

/// Create a new expense in the database from a builder.
///
/// If the builder has no date, the expense is dated `today`.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn create_expense(
    builder: ExpenseBuilder,
    today: Date,
    connection: &Connection,
) -> Result<Expense, Error> {
    let now = OffsetDateTime::now_utc();

    connection
        .prepare(&format!(
            "INSERT INTO expense (title, amount, category, date, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?5)
             RETURNING {EXPENSE_COLUMNS}"
        ))?
        .query_row(
            (
                builder.title,
                builder.amount,
                builder.category,
                builder.date.unwrap_or(today),
                now,
            ),
            map_expense_row,
        )
        .map_err(Error::from)
}

/// Retrieve an expense from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid expense,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_expense(id: ExpenseId, connection: &Connection) -> Result<Expense, Error> {
    connection
        .prepare(&format!(
            "SELECT {EXPENSE_COLUMNS} FROM expense WHERE id = :id"
        ))?
        .query_row(&[(":id", &id)], map_expense_row)
        .map_err(Error::from)
}

/// Retrieve every expense, most recently created first.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn get_all_expenses(connection: &Connection) -> Result<Vec<Expense>, Error> {
    connection
        .prepare(&format!(
            "SELECT {EXPENSE_COLUMNS} FROM expense ORDER BY created_at DESC, id DESC"
        ))?
        .query_map([], map_expense_row)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(Error::from)
}

/// Replace the title, amount and category of the expense `id`.
///
/// The date is only replaced if the builder has one.
///
/// Returns `Ok(None)` if `id` does not refer to an expense.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn update_expense(
    id: ExpenseId,
    builder: ExpenseBuilder,
    connection: &Connection,
) -> Result<Option<Expense>, Error> {
    connection
        .prepare(&format!(
            "UPDATE expense
             SET title = ?1, amount = ?2, category = ?3, date = COALESCE(?4, date), updated_at = ?5
             WHERE id = ?6
             RETURNING {EXPENSE_COLUMNS}"
        ))?
        .query_row(
            (
                builder.title,
                builder.amount,
                builder.category,
                builder.date,
                OffsetDateTime::now_utc(),
                id,
            ),
            map_expense_row,
        )
        .optional()
        .map_err(Error::from)
}

type RowsAffected = usize;

/// Delete the expense `id`.
///
/// Deleting an expense that does not exist is not an error, zero rows are
/// affected instead.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn delete_expense(id: ExpenseId, connection: &Connection) -> Result<RowsAffected, Error> {
    connection
        .execute("DELETE FROM expense WHERE id = :id", &[(":id", &id)])
        .map_err(Error::from)
}

/// Get the total number of expenses in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
#[cfg(test)]
pub fn count_expenses(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM expense;", [], |row| row.get(0))
        .map_err(Error::from)
}

/// Create the expense table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expense (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL CHECK (length(trim(title)) > 0),
                amount REAL NOT NULL,
                category TEXT NOT NULL DEFAULT 'Other' CHECK (category IN (
                    'Food', 'Transport', 'Entertainment', 'Utilities', 'Health', 'Other'
                )),
                date TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
                )",
        (),
    )?;

    // Index used for the default list order.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_expense_created_at ON expense(created_at);",
        (),
    )?;

    Ok(())
}

/// Map a database row to an Expense.
pub fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    Ok(Expense {
        id: row.get(0)?,
        title: row.get(1)?,
        amount: row.get(2)?,
        category: row.get(3)?,
        date: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================
