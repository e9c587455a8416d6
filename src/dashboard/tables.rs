//! The expense list and the search, filter and sort controls above it.

use maud::{Markup, html};

use crate::{
    endpoints::{self, format_endpoint},
    expense::{Category, Expense, QueryState, RedirectQuery, SortKey},
    html::{
        BUTTON_DELETE_STYLE, CATEGORY_BADGE_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        LINK_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_currency,
    },
};

/// Renders the search box, category filter and sort order for the expense list.
///
/// The form submits with GET so that the current view is kept in the page URL.
pub(super) fn query_controls(query: &QueryState) -> Markup {
    let selected_category = query.category.to_string();

    html! {
        form
            id="query-controls"
            method="get"
            action=(endpoints::DASHBOARD_VIEW)
            class="grid grid-cols-1 md:grid-cols-4 gap-4 items-end w-full mb-4"
        {
            div
            {
                label for="search" class=(FORM_LABEL_STYLE) { "Search" }

                input
                    id="search"
                    name="search"
                    type="search"
                    placeholder="Search by title"
                    value=(query.search)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="category-filter" class=(FORM_LABEL_STYLE) { "Category" }

                select id="category-filter" name="category" class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="All" selected[selected_category == "All"] { "All" }

                    @for category in Category::ALL {
                        option
                            value=(category)
                            selected[selected_category == category.as_str()]
                        {
                            (category)
                        }
                    }
                }
            }

            div
            {
                label for="sort" class=(FORM_LABEL_STYLE) { "Sort by" }

                select id="sort" name="sort" class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for sort in SortKey::ALL {
                        option value=(sort.as_str()) selected[sort == query.sort]
                        {
                            (sort.label())
                        }
                    }
                }
            }

            button
                type="submit"
                class="px-4 py-2.5 bg-blue-500 dark:bg-blue-600 hover:bg-blue-600
                    dark:hover:bg-blue-700 text-white rounded"
            {
                "Apply"
            }
        }
    }
}

/// Renders the link for downloading the current view as a CSV file.
pub(super) fn export_link(query: &QueryState) -> Markup {
    html! {
        a
            id="export-link"
            href=(query.append_to(endpoints::EXPORT_EXPENSES))
            download
            class=(LINK_STYLE)
        {
            "Export CSV"
        }
    }
}

/// Renders the table of expenses with edit and delete actions for each row.
///
/// `redirect_url` is where the browser returns to after an expense is edited
/// or deleted, so that the current search, filter and sort are kept.
pub(super) fn expense_table(expenses: &[&Expense], redirect_url: &str) -> Markup {
    let redirect = RedirectQuery::to(redirect_url);

    html! {
        div class="overflow-x-auto rounded-lg shadow w-full"
        {
            table id="expenses" class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Title" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class={(TABLE_CELL_STYLE) " text-right"} { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { span class="sr-only" { "Actions" } }
                    }
                }

                tbody
                {
                    @for expense in expenses {
                        (expense_row(expense, &redirect))
                    }

                    @if expenses.is_empty() {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td colspan="5" class={(TABLE_CELL_STYLE) " text-center"}
                            {
                                "No expenses found"
                            }
                        }
                    }
                }
            }
        }
    }
}

fn expense_row(expense: &Expense, redirect: &RedirectQuery) -> Markup {
    let edit_url = redirect.append_to(&format_endpoint(endpoints::EDIT_EXPENSE_VIEW, expense.id));
    let delete_url = redirect.append_to(&format_endpoint(endpoints::EXPENSE, expense.id));
    let confirm_message = format!("Are you sure you want to delete '{}'?", expense.title);

    html! {
        tr class=(TABLE_ROW_STYLE) data-expense-id=(expense.id)
        {
            th scope="row" class={(TABLE_CELL_STYLE) " font-medium text-gray-900 dark:text-white"}
            {
                (expense.title)
            }

            td class=(TABLE_CELL_STYLE)
            {
                span class=(CATEGORY_BADGE_STYLE) { (expense.category) }
            }

            td class=(TABLE_CELL_STYLE) { (expense.date) }

            td class={(TABLE_CELL_STYLE) " text-right whitespace-nowrap"}
            {
                (format_currency(expense.amount))
            }

            td class={(TABLE_CELL_STYLE) " flex gap-4"}
            {
                a href=(edit_url) class=(LINK_STYLE) { "Edit" }

                button
                    hx-delete=(delete_url)
                    hx-confirm=(confirm_message)
                    hx-target-error="#alert-container"
                    class=(BUTTON_DELETE_STYLE)
                {
                    "Delete"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use crate::expense::{Category, CategoryFilter, QueryState, SortKey, sample_expenses};

    use super::{expense_table, export_link, query_controls};

    fn select_texts(html: &Html, selector: &str) -> Vec<String> {
        html.select(&Selector::parse(selector).unwrap())
            .map(|element| element.text().collect::<String>().trim().to_owned())
            .collect()
    }

    fn select_attribute(html: &Html, selector: &str, attribute: &str) -> String {
        html.select(&Selector::parse(selector).unwrap())
            .next()
            .unwrap_or_else(|| panic!("could not find {selector}"))
            .value()
            .attr(attribute)
            .unwrap_or_else(|| panic!("{selector} has no {attribute}"))
            .to_owned()
    }

    #[test]
    fn table_lists_expenses_in_given_order() {
        let expenses = sample_expenses();
        let view = expenses.iter().rev().collect::<Vec<_>>();

        let html = Html::parse_fragment(&expense_table(&view, "/dashboard").into_string());

        let titles = select_texts(&html, "tbody th");
        assert_eq!(titles, vec!["Movie", "Bus", "Coffee"]);
        let amounts = select_texts(&html, "tbody td.text-right");
        assert_eq!(amounts, vec!["₹500.00", "₹40.00", "₹150.00"]);
    }

    #[test]
    fn row_actions_return_to_current_view() {
        let expenses = sample_expenses();
        let view = vec![&expenses[1]];

        let html =
            Html::parse_fragment(&expense_table(&view, "/dashboard?search=bus").into_string());

        assert_eq!(
            select_attribute(&html, "tbody a", "href"),
            "/expenses/2/edit?redirect_url=%2Fdashboard%3Fsearch%3Dbus"
        );
        assert_eq!(
            select_attribute(&html, "tbody button", "hx-delete"),
            "/expenses/2?redirect_url=%2Fdashboard%3Fsearch%3Dbus"
        );
        assert_eq!(
            select_attribute(&html, "tbody button", "hx-target-error"),
            "#alert-container"
        );
    }

    #[test]
    fn empty_table_shows_message() {
        let html = Html::parse_fragment(&expense_table(&[], "/dashboard").into_string());

        assert_eq!(select_texts(&html, "tbody td"), vec!["No expenses found"]);
    }

    #[test]
    fn controls_reflect_current_query() {
        let query = QueryState {
            search: "bus".to_owned(),
            category: CategoryFilter::Only(Category::Transport),
            sort: SortKey::AmountDescending,
        };

        let html = Html::parse_fragment(&query_controls(&query).into_string());

        assert_eq!(select_attribute(&html, "input[name=search]", "value"), "bus");
        assert_eq!(
            select_texts(&html, "select[name=category] option[selected]"),
            vec!["Transport"]
        );
        assert_eq!(
            select_attribute(&html, "select[name=sort] option[selected]", "value"),
            "amount_desc"
        );
    }

    #[test]
    fn controls_default_to_all_categories() {
        let html = Html::parse_fragment(&query_controls(&QueryState::default()).into_string());

        assert_eq!(
            select_texts(&html, "select[name=category] option[selected]"),
            vec!["All"]
        );
        assert_eq!(
            select_attribute(&html, "select[name=sort] option[selected]", "value"),
            "date_desc"
        );
    }

    #[test]
    fn export_link_carries_query() {
        let query = QueryState {
            search: String::new(),
            category: CategoryFilter::Only(Category::Food),
            sort: SortKey::DateAscending,
        };

        let html = Html::parse_fragment(&export_link(&query).into_string());

        assert_eq!(
            select_attribute(&html, "#export-link", "href"),
            "/expenses/export?search=&category=Food&sort=date_asc"
        );
    }
}
