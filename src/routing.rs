//! Application router configuration for the HTML pages and the JSON API.

use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::{cors::CorsLayer, services::ServeDir};

use crate::{
    AppState,
    dashboard::get_dashboard_page,
    endpoints,
    expense::{
        create_expense_api, create_expense_endpoint, delete_expense_api, delete_expense_endpoint,
        edit_expense_endpoint, export_expenses_endpoint, get_api_root, get_edit_expense_page,
        list_expenses_api, update_expense_api,
    },
    internal_server_error::get_internal_server_error_page,
    landing::get_landing_page,
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let page_routes = Router::new()
        .route(endpoints::ROOT, get(get_landing_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::EDIT_EXPENSE_VIEW, get(get_edit_expense_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    // These routes are called by htmx and respond with the HX-REDIRECT header
    // or an alert.
    let form_routes = Router::new()
        .route(endpoints::EXPENSES, post(create_expense_endpoint))
        .route(endpoints::EXPORT_EXPENSES, get(export_expenses_endpoint))
        .route(
            endpoints::EXPENSE,
            put(edit_expense_endpoint).delete(delete_expense_endpoint),
        );

    let api_routes = Router::new()
        .route(endpoints::API_ROOT, get(get_api_root))
        .route(
            endpoints::EXPENSES_API,
            get(list_expenses_api).post(create_expense_api),
        )
        .route(
            endpoints::EXPENSE_API,
            put(update_expense_api).delete(delete_expense_api),
        )
        .layer(CorsLayer::permissive());

    page_routes
        .merge(form_routes)
        .merge(api_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}
