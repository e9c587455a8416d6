//! Alerts for displaying error messages to users.
//!
//! Alerts are rendered as HTML fragments that htmx swaps into the
//! `#alert-container` element of the base page.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

/// An error message shown to the user after a form submission fails.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    /// The headline of the alert.
    pub message: String,
    /// What went wrong and, where possible, how to fix it.
    pub details: String,
}

impl Alert {
    /// Render the alert as a dismissable HTML fragment.
    pub fn into_html(self) -> Markup {
        // Template adapted from https://flowbite.com/docs/components/alerts/
        html! {
            div
                id="alert"
                class="flex items-start p-4 mb-4 text-red-800 border border-red-300
                    rounded-lg bg-red-50 dark:bg-gray-800 dark:text-red-400
                    dark:border-red-800"
                role="alert"
            {
                div class="flex-1"
                {
                    p class="font-medium" { (self.message) }

                    @if !self.details.is_empty()
                    {
                        p class="text-sm mt-1" { (self.details) }
                    }
                }

                button
                    type="button"
                    aria-label="Close"
                    class="ms-3 -mx-1.5 -my-1.5 rounded-lg p-1.5 inline-flex \
                        items-center justify-center h-8 w-8 hover:opacity-75"
                    onclick="document.getElementById('alert-container').classList.add('hidden')"
                {
                    "✕"
                }
            }

            script
            {
                "document.getElementById('alert-container').classList.remove('hidden');"
            }
        }
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_html().into_response()
    }
}

/// Render `alert` as the body of a response with the status code `status`.
pub fn render_alert(status: StatusCode, alert: Alert) -> Response {
    (status, alert.into_html()).into_response()
}
