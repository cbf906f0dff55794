//! Interactive terminal session over a `Session`.
//!
//! Plain stdin/stdout, one command per line. Recoverable errors are printed
//! and the loop continues; nothing here ends the session except `quit`.

use anyhow::{Result, anyhow, bail};
use std::fs;
use std::io::{self, Write};

use tally_core::transaction::{Transaction, TransactionTable};
use tally_insights::{
    monthly_totals, months_to_goal, save_monthly_snapshot, savings_projection, summarize,
};

use crate::config::Config;
use crate::session::Session;
use crate::state::history_dir;

fn prompt(label: &str) -> Result<Option<String>> {
    print!("{label}");
    io::stdout().flush().ok();
    let mut s = String::new();
    if io::stdin().read_line(&mut s)? == 0 {
        return Ok(None); // EOF
    }
    Ok(Some(s.trim().to_string()))
}

pub fn run(session: &mut Session, config: &Config) -> Result<()> {
    println!("tally — type 'help' for commands, 'quit' to exit\n");
    loop {
        let line = match prompt("tally> ")? {
            Some(line) => line,
            None => break,
        };
        if line.is_empty() {
            continue;
        }
        let (command, rest) = match line.split_once(' ') {
            Some((c, r)) => (c, r.trim()),
            None => (line.as_str(), ""),
        };

        match command {
            "quit" | "exit" => break,
            "help" => print_help(),
            _ => {
                // Errors are reported, never fatal; prior state stays put.
                if let Err(e) = dispatch(session, config, command, rest) {
                    eprintln!("error: {e}");
                }
            }
        }
    }
    Ok(())
}

fn dispatch(session: &mut Session, config: &Config, command: &str, rest: &str) -> Result<()> {
    match command {
        "load" => {
            if rest.is_empty() {
                bail!("usage: load <statement.csv>");
            }
            let bytes = fs::read(rest)
                .map_err(|e| anyhow!("reading {rest}: {e}"))?;
            match session.load_statement(&bytes) {
                Ok(count) => println!("Loaded {count} transactions"),
                Err(e) => bail!("processing file: {e}"),
            }
        }

        "table" => {
            let table = current_table(session)?;
            match rest {
                "" => print_table(table, config),
                "debits" => print_rows(table, config, |t| t.is_debit()),
                "credits" => print_rows(table, config, |t| t.is_credit()),
                other => bail!("unknown view {other:?} (debits|credits)"),
            }
        }

        "edit" => {
            let (index, category) = rest
                .split_once(' ')
                .ok_or_else(|| anyhow!("usage: edit <row> <category>"))?;
            let index: usize = index.parse()?;
            let learned = session.edit_category(index, category.trim())?;
            if learned {
                println!("Reassigned row {index}; keyword learned for {:?}", category.trim());
            } else {
                println!("Reassigned row {index}");
            }
        }

        "categories" => {
            for category in session.store().iter() {
                println!("{:<18} {}", category.name, category.keywords.join(", "));
            }
        }

        "addcat" => {
            if rest.is_empty() {
                bail!("usage: addcat <name>");
            }
            if session.add_category(rest)? {
                println!("Added category {rest:?}");
            } else {
                println!("Category {rest:?} already exists");
            }
        }

        "keyword" => {
            let (category, keyword) = rest
                .split_once('=')
                .ok_or_else(|| anyhow!("usage: keyword <category> = <text>"))?;
            if session.add_keyword(category.trim(), keyword.trim())? {
                session.recategorize();
                println!("Keyword added; table recategorized");
            } else {
                println!("Keyword empty or already present");
            }
        }

        "summary" => {
            let table = current_table(session)?;
            let s = summarize(table);
            let sym = &config.currency_symbol;
            println!("Total income:   {sym}{:.2}", s.total_income);
            println!("Total expenses: {sym}{:.2}", s.total_expenses);
            println!("Net position:   {sym}{:.2}", s.net);
        }

        "trends" => {
            let table = current_table(session)?;
            let sym = &config.currency_symbol;
            for m in monthly_totals(table) {
                println!("{}  {sym}{:.2}", m.month.format("%Y-%m"), m.total);
            }
        }

        "project" => {
            let table = current_table(session)?;
            let projection = savings_projection(table, config.projection_months);
            let sym = &config.currency_symbol;
            println!(
                "Current savings {sym}{:.2}, average monthly net {sym}{:.2}",
                projection.current_savings, projection.avg_monthly_net
            );
            for (i, value) in projection.projected.iter().enumerate().skip(1) {
                println!("+{i:>2} months  {sym}{value:.2}");
            }
            if !rest.is_empty() {
                let goal: f64 = rest.parse()?;
                match months_to_goal(goal, &projection) {
                    Some(months) => println!(
                        "At the current rate you will reach {sym}{goal:.2} in {months:.1} months"
                    ),
                    None => println!("Goal unreachable at the current rate"),
                }
            }
        }

        "budget" => {
            let (category, limit) = rest
                .rsplit_once(' ')
                .ok_or_else(|| anyhow!("usage: budget <category> <limit>"))?;
            let limit: f64 = limit.parse()?;
            session.set_budget(category.trim(), limit)?;
            println!("Budget for {:?} set to {limit:.2}", category.trim());
        }

        "budgets" => {
            let table = current_table(session)?;
            let sym = &config.currency_symbol;
            for status in session.budgets().statuses(table) {
                println!(
                    "{:<18} spent {sym}{:>9.2}  limit {sym}{:>9.2}  {:>3.0}%",
                    status.category,
                    status.spent,
                    status.limit,
                    status.progress * 100.0
                );
            }
        }

        "export" => {
            let table = current_table(session)?;
            let path = save_monthly_snapshot(table, &history_dir()?)?;
            println!("Wrote {}", path.display());
        }

        other => bail!("unknown command {other:?} (try 'help')"),
    }
    Ok(())
}

fn current_table<'a>(session: &'a Session) -> Result<&'a TransactionTable> {
    session
        .table()
        .ok_or_else(|| anyhow!("no statement loaded (use: load <file>)"))
}

pub fn print_table(table: &TransactionTable, config: &Config) {
    print_rows(table, config, |_| true);
}

fn print_rows(
    table: &TransactionTable,
    config: &Config,
    keep: impl Fn(&Transaction) -> bool,
) {
    let sym = &config.currency_symbol;
    println!("{:>4}  {:<10}  {:>12}  {:<18}  Details", "#", "Date", "Amount", "Category");
    for (i, txn) in table.iter().enumerate() {
        if !keep(txn) {
            continue;
        }
        println!(
            "{i:>4}  {:<10}  {:>12}  {:<18}  {}",
            txn.date.format("%d/%m/%Y").to_string(),
            format!("{sym}{:.2}", txn.amount),
            txn.category,
            txn.details
        );
    }
}

fn print_help() {
    println!("Commands:");
    println!("  load <file>              load a statement CSV");
    println!("  table [debits|credits]   show the categorized table");
    println!("  edit <row> <category>    reassign a row (teaches a keyword)");
    println!("  categories               list categories and keywords");
    println!("  addcat <name>            add an empty category");
    println!("  keyword <cat> = <text>   add a keyword and recategorize");
    println!("  summary                  income / expenses / net");
    println!("  trends                   monthly net totals");
    println!("  project [goal]           savings projection (and months to goal)");
    println!("  budget <cat> <limit>     set a budget limit");
    println!("  budgets                  budget progress per category");
    println!("  export                   write a monthly snapshot CSV");
    println!("  quit");
}
