use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use expense_mate::{Category, Expense, create_expense, initialize_db};

/// A utility for creating a database of sample expenses for ExpenseMate.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Titles, amounts and categories of the sample expenses, with how many days ago each was spent.
const SAMPLE_EXPENSES: [(&str, f64, Category, i64); 12] = [
    ("Coffee", 150.0, Category::Food, 0),
    ("Bus pass", 40.0, Category::Transport, 2),
    ("Groceries", 1_240.5, Category::Food, 5),
    ("Electricity bill", 2_300.0, Category::Utilities, 9),
    ("Movie night", 500.0, Category::Entertainment, 14),
    ("Pharmacy", 320.75, Category::Health, 21),
    ("Taxi", 260.0, Category::Transport, 33),
    ("Internet", 999.0, Category::Utilities, 40),
    ("Concert tickets", 1_800.0, Category::Entertainment, 62),
    ("Dinner, \"Spice Route\"", 1_150.0, Category::Food, 75),
    ("Haircut", 300.0, Category::Other, 100),
    ("Dentist", 1_500.0, Category::Health, 130),
];

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating sample expenses...");

    let today = OffsetDateTime::now_utc().date();
    for (title, amount, category, days_ago) in SAMPLE_EXPENSES {
        create_expense(
            Expense::build(title, amount)
                .category(category)
                .date(today - Duration::days(days_ago)),
            today,
            &conn,
        )?;
    }

    println!("Success!");

    Ok(())
}
