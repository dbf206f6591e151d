//! CLI commands for reports
//!
//! Per-project metrics and the portfolio summary, printed to the terminal
//! or exported to CSV.

use std::io::Write;
use std::path::PathBuf;

use clap::Subcommand;

use super::create_output;
use crate::config::settings::Settings;
use crate::display::{format_portfolio_analysis, format_portfolio_report, format_project_metrics};
use crate::error::LedgerResult;
use crate::reports::{FetchPolicy, PortfolioReport, ProjectMetrics};
use crate::services::ProjectService;
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Metrics for a single project
    Project {
        /// Project name or ID
        project: String,

        /// Only print the total spent in this category
        #[arg(short, long)]
        category: Option<String>,

        /// Export the category breakdown to a CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Metrics across every project
    Portfolio {
        /// Count projects whose expenses cannot be read as having none,
        /// instead of failing
        #[arg(long)]
        lenient: bool,

        /// Append a written analysis with recommendations
        #[arg(long)]
        analysis: bool,

        /// Export monthly profit to a CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> LedgerResult<()> {
    match cmd {
        ReportCommands::Project {
            project,
            category,
            output,
        } => handle_project_report(storage, settings, &project, category, output),
        ReportCommands::Portfolio {
            lenient,
            analysis,
            output,
        } => {
            let policy = if lenient {
                FetchPolicy::Lenient
            } else {
                settings.fetch_policy
            };
            handle_portfolio_report(storage, settings, policy, analysis, output)
        }
    }
}

fn handle_project_report(
    storage: &Storage,
    settings: &Settings,
    identifier: &str,
    category: Option<String>,
    output: Option<PathBuf>,
) -> LedgerResult<()> {
    let project = ProjectService::new(storage).resolve(identifier)?;
    let metrics = ProjectMetrics::generate(storage, project.id)?;

    if let Some(category) = category {
        match metrics.category_total(&category) {
            Some(amount) => println!(
                "{} / {}: {}",
                project.name,
                category,
                amount.format_with_symbol(&settings.currency_symbol)
            ),
            None => println!("{} has no expenses in category '{}'", project.name, category),
        }
    } else if let Some(path) = output {
        let mut writer = create_output(&path)?;
        metrics.export_csv(&mut writer)?;
        writer.flush()?;
        println!("Project report exported to: {}", path.display());
    } else {
        print!(
            "{}",
            format_project_metrics(
                &project,
                &metrics,
                &settings.currency_symbol,
                &settings.date_format
            )
        );
    }

    Ok(())
}

fn handle_portfolio_report(
    storage: &Storage,
    settings: &Settings,
    policy: FetchPolicy,
    analysis: bool,
    output: Option<PathBuf>,
) -> LedgerResult<()> {
    let report = PortfolioReport::generate(storage, policy)?;

    if let Some(path) = output {
        let mut writer = create_output(&path)?;
        report.export_csv(&mut writer)?;
        writer.flush()?;
        println!("Portfolio report exported to: {}", path.display());
    } else {
        print!(
            "{}",
            format_portfolio_report(&report, &settings.currency_symbol)
        );
        if analysis {
            println!();
            print!(
                "{}",
                format_portfolio_analysis(&report, &settings.currency_symbol)
            );
        }
    }

    Ok(())
}
