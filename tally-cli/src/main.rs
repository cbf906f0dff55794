use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use tally_core::store::CategoryStore;
use tally_insights::{save_monthly_snapshot, summarize};

mod config;
mod repl;
mod session;
mod state;

use session::Session;

#[derive(Parser, Debug)]
#[command(name = "tally", version, about = "UK bank statement categorizer and spending insights")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the default category store and config under ~/.tally
    Init,

    /// Launch the interactive session
    Session {
        /// Statement CSV to load on startup
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Load one statement, print the categorized table and summary
    Import {
        csv: PathBuf,

        /// Also write a monthly snapshot under ~/.tally/history
        #[arg(long)]
        snapshot: bool,
    },

    /// Category store maintenance
    Categories {
        #[command(subcommand)]
        command: CategoriesCommand,
    },
}

#[derive(Subcommand, Debug)]
enum CategoriesCommand {
    /// Print categories and their keywords
    List,

    /// Add an empty category
    Add { name: String },

    /// Add a keyword to a category
    AddKeyword { category: String, keyword: String },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Init => {
            let path = state::categories_path()?;
            if path.exists() {
                println!("Category store already exists: {}", path.display());
            } else {
                let store = CategoryStore::load(&path)?;
                store.save()?;
                println!("Wrote {}", path.display());
            }
            config::init_config()?;
        }

        Command::Session { csv } => {
            let cfg = config::load_config()?;
            let store = CategoryStore::load(state::categories_path()?)?;
            let mut session = Session::open(store);

            if let Some(csv_path) = csv {
                match fs::read(&csv_path) {
                    Ok(bytes) => match session.load_statement(&bytes) {
                        Ok(count) => println!(
                            "Loaded {count} transactions from {}",
                            csv_path.display()
                        ),
                        // Report and carry on with an empty session.
                        Err(e) => eprintln!("error processing file: {e}"),
                    },
                    Err(e) => eprintln!("error reading {}: {e}", csv_path.display()),
                }
            }

            repl::run(&mut session, &cfg)?;
        }

        Command::Import { csv, snapshot } => {
            let cfg = config::load_config()?;
            if !csv.exists() {
                bail!("CSV not found: {}", csv.display());
            }
            let bytes =
                fs::read(&csv).with_context(|| format!("reading {}", csv.display()))?;

            let store = CategoryStore::load(state::categories_path()?)?;
            let table = match tally_ingest::load_statement(&bytes, &store) {
                Ok(table) => table,
                Err(e) => bail!("processing {}: {e}", csv.display()),
            };

            println!("Parsed {} transactions from {}\n", table.len(), csv.display());
            repl::print_table(&table, &cfg);

            let s = summarize(&table);
            let sym = &cfg.currency_symbol;
            println!("\nIncome {sym}{:.2} | Expenses {sym}{:.2} | Net {sym}{:.2}",
                s.total_income, s.total_expenses, s.net);

            if snapshot {
                let path = save_monthly_snapshot(&table, &state::history_dir()?)?;
                println!("Snapshot written to {}", path.display());
            }
        }

        Command::Categories { command } => {
            let mut store = CategoryStore::load(state::categories_path()?)?;
            match command {
                CategoriesCommand::List => {
                    for category in store.iter() {
                        println!("{:<18} {}", category.name, category.keywords.join(", "));
                    }
                }
                CategoriesCommand::Add { name } => {
                    if store.add_category(&name)? {
                        println!("Added category {name:?}");
                    } else {
                        println!("Category {name:?} already exists");
                    }
                }
                CategoriesCommand::AddKeyword { category, keyword } => {
                    if store.add_keyword(&category, &keyword)? {
                        println!("Added keyword to {category:?}");
                    } else {
                        println!("Keyword empty or already present");
                    }
                }
            }
        }
    }

    Ok(())
}
