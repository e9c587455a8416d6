//! Dashboard HTTP handler and view rendering.
//!
//! The dashboard is a single page with:
//! - The form for adding an expense
//! - A summary card for the current month
//! - Charts of monthly spending and this month's spending by category
//! - The search, filter and sort controls and the resulting list of expenses
//!
//! Everything below the form is derived from the same filtered and sorted
//! view of the expenses, so the charts always agree with the list.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use time::Date;

use crate::{
    AppState, Error,
    dashboard::{
        aggregation::{current_month_summary, monthly_totals},
        cards::current_month_card,
        charts::{
            DashboardChart, category_chart, charts_script, charts_view, monthly_expenses_chart,
        },
        tables::{expense_table, export_link, query_controls},
    },
    endpoints,
    expense::{
        Expense, ExpenseFormDefaults, QueryState, RedirectQuery, apply_query,
        expense_form_fields, get_all_expenses,
    },
    html::{
        BUTTON_PRIMARY_STYLE, CARD_STYLE, ECHARTS_URL, HeadElement, base, currency_input_styles,
    },
    navigation::NavBar,
    timezone::get_local_today,
};

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for reading expenses.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Display the expense form, charts and the list of expenses.
///
/// The search, category filter and sort order are read from the query string.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    Query(query): Query<QueryState>,
) -> Result<Response, Error> {
    let today = get_local_today(&state.local_timezone)?;

    let expenses = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        get_all_expenses(&connection)
            .inspect_err(|error| tracing::error!("Could not get expenses: {error}"))?
    };

    let view = apply_query(&expenses, &query);

    Ok(dashboard_view(&view, &query, today).into_response())
}

/// Creates the dashboard charts from the filtered expenses.
///
/// Returns no charts if there is nothing to plot.
fn build_dashboard_charts(expenses: &[&Expense], today: Date) -> Vec<DashboardChart> {
    if expenses.is_empty() {
        return Vec::new();
    }

    let mut charts = vec![DashboardChart {
        id: "monthly-expenses-chart",
        options: monthly_expenses_chart(&monthly_totals(expenses)).to_string(),
    }];

    let summary = current_month_summary(expenses, today);
    if !summary.is_empty() {
        charts.push(DashboardChart {
            id: "category-chart",
            options: category_chart(&summary).to_string(),
        });
    }

    charts
}

fn dashboard_view(expenses: &[&Expense], query: &QueryState, today: Date) -> Markup {
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW).into_html();
    let current_view_url = query.append_to(endpoints::DASHBOARD_VIEW);
    let create_endpoint = RedirectQuery::to(&current_view_url).append_to(endpoints::EXPENSES);
    let summary = current_month_summary(expenses, today);
    let charts = build_dashboard_charts(expenses, today);

    let content = html!(
        (nav_bar)

        div
            id="dashboard-content"
            class="flex flex-col items-center gap-4 px-2 lg:px-6 lg:py-8 mx-auto
                max-w-screen-xl text-gray-900 dark:text-white"
        {
            div class="grid grid-cols-1 lg:grid-cols-2 gap-4 w-full"
            {
                section id="new-expense" class=(CARD_STYLE)
                {
                    h2 class="text-xl font-bold mb-4" { "Add Expense" }

                    form
                        hx-post=(create_endpoint)
                        hx-target-error="#alert-container"
                        class="space-y-4"
                    {
                        (expense_form_fields(&ExpenseFormDefaults::default()))

                        button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add Expense" }
                    }
                }

                (current_month_card(&summary))
            }

            @if !charts.is_empty() {
                (charts_view(&charts))
            }

            section id="expense-list" class="w-full"
            {
                div class="flex justify-between items-baseline mb-4"
                {
                    h2 class="text-xl font-bold" { "Expenses" }

                    @if !expenses.is_empty() {
                        (export_link(query))
                    }
                }

                (query_controls(query))
                (expense_table(expenses, &current_view_url))
            }
        }
    );

    let mut head_elements = vec![currency_input_styles()];
    if !charts.is_empty() {
        head_elements.push(HeadElement::ScriptLink(ECHARTS_URL));
        head_elements.push(charts_script(&charts));
    }

    base("Dashboard", &head_elements, &content)
}
