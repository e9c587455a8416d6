//! Card component for this month's spending.

use maud::{Markup, html};

use crate::{
    dashboard::aggregation::{CurrentMonthSummary, format_month_label},
    html::{CARD_STYLE, format_currency},
};

/// Renders the current month's total and the amount spent in each category.
pub(super) fn current_month_card(summary: &CurrentMonthSummary) -> Markup {
    html! {
        div id="current-month" class=(CARD_STYLE)
        {
            div class="flex justify-between items-baseline mb-2"
            {
                h3 class="text-lg font-semibold" { "This Month" }

                span class="text-sm text-gray-600 dark:text-gray-400"
                {
                    (format_month_label(summary.year, summary.month))
                }
            }

            p id="current-month-total" class="text-3xl font-bold mb-4"
            {
                (format_currency(summary.total))
            }

            @if summary.is_empty() {
                p class="text-sm text-gray-600 dark:text-gray-400" { "No expenses this month" }
            } @else {
                ul class="space-y-1 text-sm"
                {
                    @for category_total in &summary.categories {
                        li class="flex justify-between"
                        {
                            span { (category_total.category) }
                            span class="font-medium" { (format_currency(category_total.total)) }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};
    use time::{Month, macros::date};

    use crate::{
        dashboard::aggregation::{CurrentMonthSummary, current_month_summary},
        expense::sample_expenses,
    };

    use super::current_month_card;

    fn render(summary: &CurrentMonthSummary) -> Html {
        Html::parse_fragment(&current_month_card(summary).into_string())
    }

    fn text_of(html: &Html, selector: &str) -> String {
        html.select(&Selector::parse(selector).unwrap())
            .next()
            .unwrap_or_else(|| panic!("could not find {selector}"))
            .text()
            .collect::<String>()
    }

    #[test]
    fn shows_total_and_categories() {
        let expenses = sample_expenses();
        let view = expenses.iter().collect::<Vec<_>>();
        let summary = current_month_summary(&view, date!(2026 - 01 - 15));

        let html = render(&summary);

        assert_eq!(text_of(&html, "#current-month-total").trim(), "₹190.00");
        let rows = html
            .select(&Selector::parse("#current-month li").unwrap())
            .map(|row| row.text().collect::<String>())
            .collect::<Vec<_>>();
        assert_eq!(rows, vec!["Food₹150.00", "Transport₹40.00"]);
    }

    #[test]
    fn shows_message_when_empty() {
        let summary = CurrentMonthSummary {
            year: 2026,
            month: Month::March,
            categories: Vec::new(),
            total: 0.0,
        };

        let html = render(&summary);

        assert!(text_of(&html, "#current-month").contains("No expenses this month"));
        assert_eq!(text_of(&html, "#current-month-total").trim(), "₹0.00");
    }
}
