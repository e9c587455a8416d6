//! Expense aggregation for the dashboard charts and summary card.
//!
//! Provides functions to total expenses by calendar month and to break down
//! the current month's spending by category.

use std::collections::BTreeMap;

use time::{Date, Month};

use crate::expense::{Category, Expense};

/// The total amount spent in one calendar month.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct MonthlyTotal {
    pub year: i32,
    pub month: Month,
    /// A short label for the month, e.g. "Jan 2026".
    pub label: String,
    pub total: f64,
}

/// The total amount spent in one category.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct CategoryTotal {
    pub category: Category,
    pub total: f64,
}

/// Spending in the month containing "today".
#[derive(Debug, Clone, PartialEq)]
pub(super) struct CurrentMonthSummary {
    pub year: i32,
    pub month: Month,
    /// One entry per category with spending this month, in the order the
    /// categories were first seen. Categories with no spending are omitted.
    pub categories: Vec<CategoryTotal>,
    /// The sum of every expense dated this month.
    pub total: f64,
}

impl CurrentMonthSummary {
    /// Whether no expenses fall in the current month.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Sums expense amounts by calendar month.
///
/// # Returns
/// One entry per month that has at least one expense, ordered chronologically.
pub(super) fn monthly_totals(expenses: &[&Expense]) -> Vec<MonthlyTotal> {
    // Keyed by (year, month number) so that iteration is chronological.
    let mut totals: BTreeMap<(i32, u8), (Month, f64)> = BTreeMap::new();

    for expense in expenses {
        let month = expense.date.month();
        let entry = totals
            .entry((expense.date.year(), u8::from(month)))
            .or_insert((month, 0.0));
        entry.1 += expense.amount;
    }

    totals
        .into_iter()
        .map(|((year, _), (month, total))| MonthlyTotal {
            year,
            month,
            label: format_month_label(year, month),
            total,
        })
        .collect()
}

/// Totals the expenses dated in the same calendar month as `today`, by category.
pub(super) fn current_month_summary(expenses: &[&Expense], today: Date) -> CurrentMonthSummary {
    let mut categories: Vec<CategoryTotal> = Vec::new();
    let mut total = 0.0;

    let this_month = expenses.iter().filter(|expense| {
        expense.date.year() == today.year() && expense.date.month() == today.month()
    });

    for expense in this_month {
        total += expense.amount;

        match categories
            .iter_mut()
            .find(|category_total| category_total.category == expense.category)
        {
            Some(category_total) => category_total.total += expense.amount,
            None => categories.push(CategoryTotal {
                category: expense.category,
                total: expense.amount,
            }),
        }
    }

    CurrentMonthSummary {
        year: today.year(),
        month: today.month(),
        categories,
        total,
    }
}

/// Formats a month as a three-letter abbreviation and the year, e.g. "Jan 2026".
pub(super) fn format_month_label(year: i32, month: Month) -> String {
    let month = match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    };

    format!("{month} {year}")
}

#[cfg(test)]
mod tests {
    use time::{Month, macros::date};

    use crate::expense::{Category, Expense, sample_expense, sample_expenses};

    use super::{CategoryTotal, current_month_summary, format_month_label, monthly_totals};

    fn as_view(expenses: &[Expense]) -> Vec<&Expense> {
        expenses.iter().collect()
    }

    #[test]
    fn monthly_totals_for_sample_expenses() {
        let expenses = sample_expenses();

        let result = monthly_totals(&as_view(&expenses));

        let pairs = result
            .iter()
            .map(|month| (month.label.as_str(), month.total))
            .collect::<Vec<_>>();
        assert_eq!(pairs, vec![("Jan 2026", 190.0), ("Feb 2026", 500.0)]);
    }

    #[test]
    fn monthly_totals_are_chronological_across_years() {
        let expenses = vec![
            sample_expense(1, "a", 1.0, Category::Other, date!(2026 - 01 - 15)),
            sample_expense(2, "b", 2.0, Category::Other, date!(2025 - 12 - 20)),
            sample_expense(3, "c", 4.0, Category::Other, date!(2025 - 02 - 10)),
            sample_expense(4, "d", 8.0, Category::Other, date!(2026 - 01 - 01)),
        ];

        let result = monthly_totals(&as_view(&expenses));

        let keys = result
            .iter()
            .map(|month| (month.year, month.month, month.total))
            .collect::<Vec<_>>();
        assert_eq!(
            keys,
            vec![
                (2025, Month::February, 4.0),
                (2025, Month::December, 2.0),
                (2026, Month::January, 9.0),
            ]
        );
    }

    #[test]
    fn same_month_in_different_years_is_not_merged() {
        let expenses = vec![
            sample_expense(1, "a", 1.0, Category::Other, date!(2025 - 03 - 15)),
            sample_expense(2, "b", 2.0, Category::Other, date!(2026 - 03 - 15)),
        ];

        let result = monthly_totals(&as_view(&expenses));

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].label, "Mar 2025");
        assert_eq!(result[1].label, "Mar 2026");
    }

    #[test]
    fn monthly_totals_handles_empty_input() {
        assert!(monthly_totals(&[]).is_empty());
    }

    #[test]
    fn current_month_summary_for_sample_expenses() {
        let expenses = sample_expenses();

        let summary = current_month_summary(&as_view(&expenses), date!(2026 - 01 - 15));

        assert_eq!(summary.total, 190.0);
        assert_eq!(
            summary.categories,
            vec![
                CategoryTotal {
                    category: Category::Food,
                    total: 150.0
                },
                CategoryTotal {
                    category: Category::Transport,
                    total: 40.0
                },
            ]
        );
    }

    #[test]
    fn current_month_summary_merges_categories() {
        let expenses = vec![
            sample_expense(1, "a", 10.0, Category::Food, date!(2026 - 01 - 02)),
            sample_expense(2, "b", 5.0, Category::Health, date!(2026 - 01 - 03)),
            sample_expense(3, "c", 2.5, Category::Food, date!(2026 - 01 - 04)),
        ];

        let summary = current_month_summary(&as_view(&expenses), date!(2026 - 01 - 31));

        assert_eq!(summary.categories.len(), 2);
        let category_sum: f64 = summary.categories.iter().map(|c| c.total).sum();
        assert_eq!(summary.total, category_sum);
        assert_eq!(summary.total, 17.5);
    }

    #[test]
    fn current_month_summary_is_empty_without_current_expenses() {
        let expenses = sample_expenses();

        let summary = current_month_summary(&as_view(&expenses), date!(2026 - 03 - 01));

        assert!(summary.is_empty());
        assert_eq!(summary.total, 0.0);
    }

    #[test]
    fn current_month_ignores_same_month_of_other_years() {
        let expenses = vec![sample_expense(
            1,
            "a",
            10.0,
            Category::Food,
            date!(2025 - 01 - 15),
        )];

        let summary = current_month_summary(&as_view(&expenses), date!(2026 - 01 - 15));

        assert!(summary.is_empty());
    }

    #[test]
    fn formats_month_labels() {
        assert_eq!(format_month_label(2026, Month::January), "Jan 2026");
        assert_eq!(format_month_label(2025, Month::December), "Dec 2025");
    }
}
