//! Search, category filter and sort order for the list of expenses.
//!
//! The dashboard list, the charts and the CSV export are all derived from the
//! output of [apply_query] so that they agree for a given [QueryState].

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::expense::{
    category::{Category, ParseCategoryError},
    core::Expense,
};

/// The order to show expenses in.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    /// Most recent date first.
    #[default]
    #[serde(rename = "date_desc")]
    DateDescending,
    /// Oldest date first.
    #[serde(rename = "date_asc")]
    DateAscending,
    /// Largest amount first.
    #[serde(rename = "amount_desc")]
    AmountDescending,
    /// Smallest amount first.
    #[serde(rename = "amount_asc")]
    AmountAscending,
}

impl SortKey {
    /// Every sort key, in the order they are shown to users.
    pub const ALL: [SortKey; 4] = [
        SortKey::DateDescending,
        SortKey::DateAscending,
        SortKey::AmountDescending,
        SortKey::AmountAscending,
    ];

    /// The value used in query strings, e.g. "date_desc".
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::DateDescending => "date_desc",
            SortKey::DateAscending => "date_asc",
            SortKey::AmountDescending => "amount_desc",
            SortKey::AmountAscending => "amount_asc",
        }
    }

    /// The human readable name of the sort order.
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::DateDescending => "Date (Newest)",
            SortKey::DateAscending => "Date (Oldest)",
            SortKey::AmountDescending => "Amount (Highest)",
            SortKey::AmountAscending => "Amount (Lowest)",
        }
    }
}

/// Which categories of expense to show.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CategoryFilter {
    /// Show every expense.
    #[default]
    All,
    /// Only show expenses in a single category.
    Only(Category),
}

impl CategoryFilter {
    const ALL_LABEL: &str = "All";

    /// Whether an expense in `category` passes the filter.
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => *wanted == category,
        }
    }
}

impl Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(Self::ALL_LABEL),
            CategoryFilter::Only(category) => category.fmt(f),
        }
    }
}

impl TryFrom<String> for CategoryFilter {
    type Error = ParseCategoryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "" | Self::ALL_LABEL => Ok(CategoryFilter::All),
            name => name.parse().map(CategoryFilter::Only),
        }
    }
}

impl From<CategoryFilter> for String {
    fn from(value: CategoryFilter) -> Self {
        value.to_string()
    }
}

/// The search, filter and sort settings chosen on the dashboard.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryState {
    /// Only show expenses whose title contains this text, ignoring case.
    #[serde(default)]
    pub search: String,
    /// Only show expenses in this category.
    #[serde(default)]
    pub category: CategoryFilter,
    /// The order to show expenses in.
    #[serde(default)]
    pub sort: SortKey,
}

impl QueryState {
    /// Encode the query as a URL query string, e.g. "search=bus&category=All&sort=date_desc".
    pub fn to_query_string(&self) -> String {
        serde_urlencoded::to_string(self).unwrap_or_else(|error| {
            tracing::error!("Could not encode query {self:?}: {error}");
            String::new()
        })
    }

    /// Append the query string to `path`, e.g. "/dashboard?search=bus&...".
    ///
    /// Returns `path` unchanged for the default query.
    pub fn append_to(&self, path: &str) -> String {
        if *self == QueryState::default() {
            path.to_owned()
        } else {
            format!("{path}?{}", self.to_query_string())
        }
    }
}

/// Filter and sort `expenses` according to `query`.
///
/// An expense must pass both the search and the category filter. Sorting
/// happens after filtering and is stable, so expenses with equal sort keys
/// keep the order they had in `expenses`.
pub fn apply_query<'a>(expenses: &'a [Expense], query: &QueryState) -> Vec<&'a Expense> {
    let search = query.search.to_lowercase();

    let mut view = expenses
        .iter()
        .filter(|expense| query.category.matches(expense.category))
        .filter(|expense| search.is_empty() || expense.title.to_lowercase().contains(&search))
        .collect::<Vec<_>>();

    match query.sort {
        SortKey::DateDescending => view.sort_by(|a, b| b.date.cmp(&a.date)),
        SortKey::DateAscending => view.sort_by(|a, b| a.date.cmp(&b.date)),
        SortKey::AmountDescending => view.sort_by(|a, b| b.amount.total_cmp(&a.amount)),
        SortKey::AmountAscending => view.sort_by(|a, b| a.amount.total_cmp(&b.amount)),
    }

    view
}

#[cfg(test)]
mod tests {
    use crate::expense::{
        Category,
        test_utils::{sample_expense, sample_expenses},
    };

    use super::{CategoryFilter, QueryState, SortKey, apply_query};

    fn titles(view: &[&crate::expense::Expense]) -> Vec<String> {
        view.iter().map(|expense| expense.title.clone()).collect()
    }

    #[test]
    fn amount_highest_first() {
        let expenses = sample_expenses();
        let query = QueryState {
            sort: SortKey::AmountDescending,
            ..Default::default()
        };

        let view = apply_query(&expenses, &query);

        assert_eq!(titles(&view), vec!["Movie", "Coffee", "Bus"]);
    }

    #[test]
    fn amount_lowest_first() {
        let expenses = sample_expenses();
        let query = QueryState {
            sort: SortKey::AmountAscending,
            ..Default::default()
        };

        let view = apply_query(&expenses, &query);

        assert_eq!(titles(&view), vec!["Bus", "Coffee", "Movie"]);
    }

    #[test]
    fn date_newest_first_by_default() {
        let expenses = sample_expenses();

        let view = apply_query(&expenses, &QueryState::default());

        assert_eq!(titles(&view), vec!["Movie", "Bus", "Coffee"]);
    }

    #[test]
    fn date_oldest_first() {
        let expenses = sample_expenses();
        let query = QueryState {
            sort: SortKey::DateAscending,
            ..Default::default()
        };

        let view = apply_query(&expenses, &query);

        assert_eq!(titles(&view), vec!["Coffee", "Bus", "Movie"]);
    }

    #[test]
    fn category_filter_only_keeps_matching_category() {
        let expenses = sample_expenses();
        let query = QueryState {
            category: CategoryFilter::Only(Category::Transport),
            ..Default::default()
        };

        let view = apply_query(&expenses, &query);

        assert_eq!(titles(&view), vec!["Bus"]);
    }

    #[test]
    fn search_ignores_case() {
        let expenses = vec![
            sample_expense(1, "Groceries", 80.0, Category::Food, time::macros::date!(2026 - 01 - 02)),
            sample_expense(2, "Bus", 40.0, Category::Transport, time::macros::date!(2026 - 01 - 03)),
        ];

        for term in ["gro", "GRO"] {
            let query = QueryState {
                search: term.to_owned(),
                ..Default::default()
            };

            let view = apply_query(&expenses, &query);

            assert_eq!(titles(&view), vec!["Groceries"], "search term {term:?}");
        }
    }

    #[test]
    fn search_and_category_are_both_applied() {
        let expenses = sample_expenses();
        let query = QueryState {
            search: "o".to_owned(),
            category: CategoryFilter::Only(Category::Food),
            sort: SortKey::DateDescending,
        };

        let view = apply_query(&expenses, &query);

        // "Movie" contains an "o" but is not food.
        assert_eq!(titles(&view), vec!["Coffee"]);
    }

    #[test]
    fn default_query_returns_every_expense() {
        let expenses = sample_expenses();

        let mut got = apply_query(&expenses, &QueryState::default())
            .into_iter()
            .map(|expense| expense.id)
            .collect::<Vec<_>>();
        got.sort_unstable();

        assert_eq!(got, vec![1, 2, 3]);
    }

    #[test]
    fn applying_query_twice_gives_same_view() {
        let expenses = sample_expenses();
        let query = QueryState {
            search: "u".to_owned(),
            category: CategoryFilter::All,
            sort: SortKey::AmountAscending,
        };

        let once = apply_query(&expenses, &query)
            .into_iter()
            .cloned()
            .collect::<Vec<_>>();
        let twice = apply_query(&once, &query)
            .into_iter()
            .cloned()
            .collect::<Vec<_>>();

        assert_eq!(once, twice);
    }

    #[test]
    fn equal_amounts_keep_input_order() {
        let date = time::macros::date!(2026 - 01 - 02);
        let expenses = vec![
            sample_expense(1, "first", 10.0, Category::Other, date),
            sample_expense(2, "second", 10.0, Category::Other, date),
            sample_expense(3, "third", 10.0, Category::Other, date),
        ];
        let query = QueryState {
            sort: SortKey::AmountDescending,
            ..Default::default()
        };

        let view = apply_query(&expenses, &query);

        assert_eq!(titles(&view), vec!["first", "second", "third"]);
    }

    #[test]
    fn does_not_modify_input() {
        let expenses = sample_expenses();
        let before = expenses.clone();
        let query = QueryState {
            sort: SortKey::AmountAscending,
            ..Default::default()
        };

        let _ = apply_query(&expenses, &query);

        assert_eq!(expenses, before);
    }

    #[test]
    fn parses_query_string() {
        let query: QueryState =
            serde_urlencoded::from_str("search=bus&category=Transport&sort=amount_desc").unwrap();

        assert_eq!(
            query,
            QueryState {
                search: "bus".to_owned(),
                category: CategoryFilter::Only(Category::Transport),
                sort: SortKey::AmountDescending,
            }
        );
    }

    #[test]
    fn missing_query_parameters_use_defaults() {
        let query: QueryState = serde_urlencoded::from_str("").unwrap();

        assert_eq!(query, QueryState::default());
    }

    #[test]
    fn all_category_parses_as_no_filter() {
        let query: QueryState = serde_urlencoded::from_str("category=All").unwrap();

        assert_eq!(query.category, CategoryFilter::All);
    }

    #[test]
    fn unknown_category_fails_to_parse() {
        let result = serde_urlencoded::from_str::<QueryState>("category=Groceries");

        assert!(result.is_err());
    }

    #[test]
    fn default_query_is_not_appended_to_path() {
        assert_eq!(QueryState::default().append_to("/dashboard"), "/dashboard");
    }

    #[test]
    fn query_string_is_appended_to_path() {
        let query = QueryState {
            search: "coffee beans".to_owned(),
            category: CategoryFilter::Only(Category::Food),
            sort: SortKey::DateAscending,
        };

        assert_eq!(
            query.append_to("/dashboard"),
            "/dashboard?search=coffee+beans&category=Food&sort=date_asc"
        );
    }
}
