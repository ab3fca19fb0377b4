use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use client_core::{load_settings, settle, submit_expense, AppwriteStore, QueryController};
use shared::{display::format_created_at, domain::SortPreset};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "expense-tracker", about = "Record and browse expenses")]
struct Args {
    /// Settings file; defaults to ./expense_tracker.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record a new expense and print the refreshed list.
    Add {
        #[arg(long)]
        description: String,
        #[arg(long)]
        amount: String,
        #[arg(long, default_value = "")]
        category: String,
    },
    /// Print expenses in the chosen order.
    List {
        #[arg(long, value_enum, default_value_t = SortArg::MostRecent)]
        sort: SortArg,
        /// Only show this category.
        #[arg(long, default_value = "")]
        category: String,
    },
    /// Print every category seen in the collection.
    Categories,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SortArg {
    MostRecent,
    Oldest,
    HighestPrice,
    LowestPrice,
}

impl From<SortArg> for SortPreset {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::MostRecent => SortPreset::MostRecent,
            SortArg::Oldest => SortPreset::Oldest,
            SortArg::HighestPrice => SortPreset::HighestPrice,
            SortArg::LowestPrice => SortPreset::LowestPrice,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let settings = load_settings(args.config.as_deref())?;
    let store = AppwriteStore::new(&settings)?;

    match args.command {
        Command::Add {
            description,
            amount,
            category,
        } => {
            let mut controller = QueryController::new();
            controller.set_description(description);
            controller.set_amount(amount);
            controller.set_category(category);
            let expense = submit_expense(&mut controller, &store).await?;
            println!("recorded {}", expense.id);
            print_expenses(&controller);
        }
        Command::List { sort, category } => {
            let mut controller = QueryController::with_selection(sort.into(), category);
            let requests = vec![controller.fetch_expenses()];
            settle(&mut controller, &store, requests).await;
            print_expenses(&controller);
        }
        Command::Categories => {
            let mut controller = QueryController::new();
            let requests = vec![controller.fetch_categories()];
            settle(&mut controller, &store, requests).await;
            for category in controller.categories() {
                if category.is_empty() {
                    println!("(uncategorized)");
                } else {
                    println!("{category}");
                }
            }
        }
    }

    Ok(())
}

fn print_expenses(controller: &QueryController) {
    let filter = match controller.category_filter() {
        "" => "all categories".to_string(),
        category => format!("category '{category}'"),
    };
    println!("{} ({filter})", controller.sort_preset());

    for expense in controller.expenses() {
        let category = if expense.category.is_empty() {
            String::new()
        } else {
            format!(" [{}]", expense.category)
        };
        println!(
            "{:<32} {:>10}  {}{category}",
            expense.description,
            expense.amount,
            format_created_at(&expense.created_at),
        );
    }
}
