//! Expense CLI commands

use chrono::Local;
use clap::Subcommand;

use super::{parse_amount, parse_date};
use crate::config::settings::Settings;
use crate::display::format_expense_list;
use crate::error::{LedgerError, LedgerResult};
use crate::services::{ExpenseService, ProjectService};
use crate::storage::Storage;

/// Expense subcommands
#[derive(Subcommand, Debug)]
pub enum ExpenseCommands {
    /// Record an expense against an open project
    Add {
        /// Project name or ID
        project: String,
        /// Amount (e.g., "1500" or "1500.50")
        amount: String,
        /// Category name
        #[arg(short, long)]
        category: String,
        /// Description
        #[arg(short = 'm', long, default_value = "")]
        description: String,
        /// Expense date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List expenses
    List {
        /// Only show expenses of this project (name or ID)
        #[arg(short, long)]
        project: Option<String>,
    },

    /// Delete an expense from an open project
    Delete {
        /// Expense ID
        expense: String,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> LedgerResult<()> {
    let service = ExpenseService::new(storage);
    let projects = ProjectService::new(storage);
    let symbol = settings.currency_symbol.as_str();
    let date_format = settings.date_format.as_str();

    match cmd {
        ExpenseCommands::Add {
            project,
            amount,
            category,
            description,
            date,
        } => {
            let project = projects.resolve(&project)?;
            let amount = parse_amount(&amount)?;
            let date = match date {
                Some(date_str) => parse_date(&date_str)?,
                None => Local::now().date_naive(),
            };

            let expense = service.add(project.id, amount, &category, &description, date)?;
            println!(
                "Added expense to {}: {} ({})",
                project.name,
                expense.amount.format_with_symbol(symbol),
                expense.category
            );
            println!("  ID: {}", expense.id);
        }

        ExpenseCommands::List { project } => {
            let expenses = match project {
                Some(identifier) => {
                    let project = projects.resolve(&identifier)?;
                    service.list_for_project(project.id)?
                }
                None => service.list()?,
            };
            println!("{}", format_expense_list(&expenses, symbol, date_format).trim_end());
        }

        ExpenseCommands::Delete { expense } => {
            let found = service
                .find(&expense)?
                .ok_or_else(|| LedgerError::expense_not_found(&expense))?;

            let deleted = service.delete(found.id)?;
            println!(
                "Deleted expense: {} ({})",
                deleted.amount.format_with_symbol(symbol),
                deleted.category
            );
        }
    }

    Ok(())
}
