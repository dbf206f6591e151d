//! Project CLI commands
//!
//! Create projects, list them with their headline metrics, close/reopen
//! them and record sales.

use chrono::Local;
use clap::Subcommand;

use super::{parse_amount, parse_date};
use crate::config::settings::Settings;
use crate::display::{format_project_details, format_project_list, format_project_metrics};
use crate::error::LedgerResult;
use crate::models::{Project, PropertyType};
use crate::reports::ProjectMetrics;
use crate::services::{ExpenseService, ProjectService};
use crate::storage::Storage;

/// Project subcommands
#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// Create a new project
    Create {
        /// Project name
        name: String,
        /// Property type (land, house, apartment, estate, other, or a custom label)
        #[arg(short = 't', long = "type", default_value = "house")]
        project_type: String,
        /// Location or address
        #[arg(short, long, default_value = "")]
        location: String,
        /// Area in square meters
        #[arg(short, long)]
        area: f64,
        /// Auction date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        auction_date: Option<String>,
    },

    /// List active projects
    List {
        /// Include closed projects
        #[arg(short, long)]
        all: bool,
    },

    /// List closed projects
    History,

    /// Show project details and metrics
    Show {
        /// Project name or ID
        project: String,
    },

    /// Close a project, freezing its expenses and sale
    Close {
        /// Project name or ID
        project: String,
    },

    /// Reopen a closed project
    Reopen {
        /// Project name or ID
        project: String,
    },

    /// Record the sale of a project
    Sale {
        /// Project name or ID
        project: String,
        /// Sale amount (e.g., "250000" or "250000.00")
        amount: String,
        /// Sale date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },
}

/// Handle a project command
pub fn handle_project_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ProjectCommands,
) -> LedgerResult<()> {
    let service = ProjectService::new(storage);
    let symbol = settings.currency_symbol.as_str();
    let date_format = settings.date_format.as_str();

    match cmd {
        ProjectCommands::Create {
            name,
            project_type,
            location,
            area,
            auction_date,
        } => {
            let auction_date = match auction_date {
                Some(date_str) => parse_date(&date_str)?,
                None => Local::now().date_naive(),
            };

            let project = service.create(
                &name,
                PropertyType::from(project_type),
                &location,
                area,
                auction_date,
            )?;

            println!("Created project: {}", project.name);
            println!("  Type: {}", project.project_type);
            println!("  Area: {:.2} m²", project.square_meters);
            println!("  ID:   {}", project.id);
        }

        ProjectCommands::List { all } => {
            let projects = if all {
                service.list()?
            } else {
                service.list_active()?
            };
            print_project_list(storage, &projects, symbol)?;
        }

        ProjectCommands::History => {
            let projects = service.list_closed()?;
            print_project_list(storage, &projects, symbol)?;
        }

        ProjectCommands::Show { project } => {
            let project = service.resolve(&project)?;
            let expenses = ExpenseService::new(storage).list_for_project(project.id)?;
            let metrics = ProjectMetrics::compute(&project, &expenses);

            print!("{}", format_project_details(&project, symbol, date_format));
            println!();
            print!("{}", format_project_metrics(&project, &metrics, symbol, date_format));
        }

        ProjectCommands::Close { project } => {
            let project = service.resolve(&project)?;
            let closed = service.close(project.id)?;
            println!("Closed project: {}", closed.name);
        }

        ProjectCommands::Reopen { project } => {
            let project = service.resolve(&project)?;
            let reopened = service.reopen(project.id)?;
            println!("Reopened project: {}", reopened.name);
        }

        ProjectCommands::Sale {
            project,
            amount,
            date,
        } => {
            let project = service.resolve(&project)?;
            let amount = parse_amount(&amount)?;
            let sale_date = match date {
                Some(date_str) => parse_date(&date_str)?,
                None => Local::now().date_naive(),
            };

            let updated = service.record_sale(project.id, amount, sale_date)?;
            println!(
                "Recorded sale of {}: {} on {}",
                updated.name,
                amount.format_with_symbol(symbol),
                sale_date.format(date_format)
            );
            if amount.is_zero() {
                println!("Note: a sale of zero is treated as no sale in reports.");
            }
        }
    }

    Ok(())
}

fn print_project_list(
    storage: &Storage,
    projects: &[Project],
    symbol: &str,
) -> LedgerResult<()> {
    if projects.is_empty() {
        println!("No projects found.");
        return Ok(());
    }

    let rows = projects
        .iter()
        .map(|project| {
            let metrics = ProjectMetrics::generate(storage, project.id)?;
            Ok((project.clone(), metrics))
        })
        .collect::<LedgerResult<Vec<_>>>()?;

    println!("{}", format_project_list(&rows, symbol).trim_end());
    Ok(())
}
