use time::{Date, OffsetDateTime, macros::date};

use crate::{
    ExpenseId,
    expense::{Category, Expense},
};

/// Create an expense without going through the database.
pub fn sample_expense(
    id: ExpenseId,
    title: &str,
    amount: f64,
    category: Category,
    date: Date,
) -> Expense {
    Expense {
        id,
        title: title.to_owned(),
        amount,
        category,
        date,
        created_at: OffsetDateTime::UNIX_EPOCH,
        updated_at: OffsetDateTime::UNIX_EPOCH,
    }
}

/// Coffee and a bus ride in January 2026 and a movie in February 2026.
pub fn sample_expenses() -> Vec<Expense> {
    vec![
        sample_expense(1, "Coffee", 150.0, Category::Food, date!(2026 - 01 - 05)),
        sample_expense(2, "Bus", 40.0, Category::Transport, date!(2026 - 01 - 10)),
        sample_expense(
            3,
            "Movie",
            500.0,
            Category::Entertainment,
            date!(2026 - 02 - 01),
        ),
    ]
}
