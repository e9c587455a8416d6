//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/expenses/{expense_id}', use [format_endpoint].

/// The landing page.
pub const ROOT: &str = "/";
/// The page with the expense form, charts and the list of expenses.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The route for submitting the new expense form.
pub const EXPENSES: &str = "/expenses";
/// The route for submitting the edit expense form or deleting an expense.
pub const EXPENSE: &str = "/expenses/{expense_id}";
/// The page for editing an existing expense.
pub const EDIT_EXPENSE_VIEW: &str = "/expenses/{expense_id}/edit";
/// The route for downloading the filtered list of expenses as CSV.
pub const EXPORT_EXPENSES: &str = "/expenses/export";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route for checking that the API is up.
pub const API_ROOT: &str = "/api";
/// The route to list and create expenses as JSON.
pub const EXPENSES_API: &str = "/api/expenses";
/// The route to update and delete a single expense as JSON.
pub const EXPENSE_API: &str = "/api/expenses/{expense_id}";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/expenses/{expense_id}', '{expense_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|offset| param_start + offset + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
