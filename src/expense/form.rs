//! The HTML form shared by the create and edit expense views.

use maud::{Markup, html};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    endpoints,
    expense::Category,
    html::{FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
};

/// The values to pre-fill the expense form with.
#[derive(Debug, Default)]
pub struct ExpenseFormDefaults<'a> {
    pub title: Option<&'a str>,
    pub amount: Option<f64>,
    pub category: Option<Category>,
    /// Left empty when creating an expense, the server then uses today's date.
    pub date: Option<Date>,
}

/// Render the title, amount, category and date inputs of the expense form.
pub fn expense_form_fields(defaults: &ExpenseFormDefaults<'_>) -> Markup {
    let amount_str = defaults.amount.map(|amount| amount.to_string());
    let selected_category = defaults.category.unwrap_or_default();

    html! {
        div
        {
            label
                for="title"
                class=(FORM_LABEL_STYLE)
            {
                "Title"
            }

            input
                name="title"
                id="title"
                type="text"
                placeholder="Coffee"
                required
                value=[defaults.title]
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="amount"
                class=(FORM_LABEL_STYLE)
            {
                "Amount"
            }

            div class="input-wrapper w-full"
            {
                input
                    name="amount"
                    id="amount"
                    type="number"
                    step="0.01"
                    placeholder="0.00"
                    required
                    value=[amount_str.as_deref()]
                    class=(FORM_TEXT_INPUT_STYLE);
            }
        }

        div
        {
            label
                for="category"
                class=(FORM_LABEL_STYLE)
            {
                "Category"
            }

            select
                name="category"
                id="category"
                required
                class=(FORM_TEXT_INPUT_STYLE)
            {
                @for category in Category::ALL {
                    @if category == selected_category {
                        option value=(category) selected { (category) }
                    } @else {
                        option value=(category) { (category) }
                    }
                }
            }
        }

        div
        {
            label
                for="date"
                class=(FORM_LABEL_STYLE)
            {
                "Date"
            }

            input
                name="date"
                id="date"
                type="date"
                value=[defaults.date]
                class=(FORM_TEXT_INPUT_STYLE);
        }
    }
}

/// Where to send the browser after a successful form submission.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct RedirectQuery {
    /// A path on this site, e.g. "/dashboard?sort=amount_desc".
    pub redirect_url: Option<String>,
}

impl RedirectQuery {
    /// Redirect back to `url` after the form is submitted.
    pub fn to(url: &str) -> Self {
        Self {
            redirect_url: Some(url.to_owned()),
        }
    }

    /// The URL to redirect to, falling back to the dashboard.
    ///
    /// Only paths on this site are followed, anything else is replaced with
    /// the dashboard.
    pub fn redirect_url(&self) -> &str {
        match self.redirect_url.as_deref() {
            // Browsers treat a leading "/\" like "//", which leaves this site.
            Some(url)
                if url.starts_with('/') && !url.starts_with("//") && !url.starts_with("/\\") =>
            {
                url
            }
            _ => endpoints::DASHBOARD_VIEW,
        }
    }

    /// Append the redirect URL to `path` as a query parameter.
    pub fn append_to(&self, path: &str) -> String {
        match serde_urlencoded::to_string(self) {
            Ok(query) if !query.is_empty() => format!("{path}?{query}"),
            Ok(_) => path.to_owned(),
            Err(error) => {
                tracing::error!("Could not encode redirect URL {self:?}: {error}");
                path.to_owned()
            }
        }
    }
}
