//! Report formatting for terminal output
//!
//! Text renderings of project and portfolio metrics, including simple bar
//! charts for the category, monthly and per-type breakdowns.

use crate::models::{Money, Project, SaleMonth};
use crate::reports::{PortfolioReport, ProjectMetrics};

const BAR_WIDTH: usize = 24;
const REPORT_WIDTH: usize = 60;

/// Format a percentage with precision suited to its magnitude
pub fn format_percentage(pct: f64) -> String {
    let magnitude = pct.abs();
    if magnitude > 0.0 && magnitude < 10.0 {
        format!("{:.2}%", pct)
    } else {
        format!("{:.1}%", pct)
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Label for a sale month, e.g. "Mar 2025"
pub fn format_sale_month(month: SaleMonth) -> String {
    month
        .first_day()
        .map(|d| d.format("%b %Y").to_string())
        .unwrap_or_else(|| month.to_string())
}

/// Format a fractional amount of currency units
pub fn format_amount(units: f64, symbol: &str) -> String {
    Money::from_cents((units * 100.0).round() as i64).format_with_symbol(symbol)
}

/// Format a day count with one decimal
pub fn format_days(days: f64) -> String {
    format!("{:.1} days", days)
}

pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

pub fn double_separator(width: usize) -> String {
    "═".repeat(width)
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

/// Detailed metrics for one project
pub fn format_project_metrics(
    project: &Project,
    metrics: &ProjectMetrics,
    symbol: &str,
    date_format: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{} ({}, {})\n",
        project.name, project.project_type, project.location
    ));
    output.push_str(&double_separator(REPORT_WIDTH));
    output.push('\n');

    output.push_str(&format!("Status:          {}\n", project.status_label()));
    output.push_str(&format!(
        "Auction date:    {}\n",
        project.auction_date.format(date_format)
    ));
    output.push_str(&format!("Area:            {:.1} m²\n", project.square_meters));
    match (project.sale_amount, project.sale_date) {
        (Some(amount), Some(date)) => output.push_str(&format!(
            "Sale:            {} on {}\n",
            amount.format_with_symbol(symbol),
            date.format(date_format)
        )),
        _ => output.push_str("Sale:            (none)\n"),
    }
    output.push('\n');

    output.push_str(&format!(
        "Total cost:      {:>16}\n",
        metrics.total_cost.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Gross profit:    {:>16}\n",
        metrics.gross_profit.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Profit margin:   {:>16}\n",
        format_percentage(metrics.profit_margin)
    ));
    output.push_str(&format!("ROI:             {:>16}\n", format_percentage(metrics.roi)));
    output.push_str(&format!(
        "Cost per m²:     {:>16}\n",
        format_amount(metrics.cost_per_sq_meter, symbol)
    ));
    output.push_str(&format!(
        "Profit per m²:   {:>16}\n",
        format_amount(metrics.profit_per_sq_meter, symbol)
    ));

    output.push_str("\nExpenses by category\n");
    output.push_str(&separator(REPORT_WIDTH));
    output.push('\n');

    if metrics.expenses_by_category.is_empty() {
        output.push_str("  (no expenses)\n");
        return output;
    }

    let rows: Vec<(String, Money)> = metrics
        .expenses_by_category
        .iter()
        .map(|c| (truncate(&c.category, 20), c.amount))
        .collect();
    output.push_str(&money_chart(&rows, symbol));

    output
}

/// Portfolio summary with monthly and per-type breakdowns
pub fn format_portfolio_report(report: &PortfolioReport, symbol: &str) -> String {
    let mut output = String::new();
    let money = |m: Money| m.format_with_symbol(symbol);

    output.push_str("Portfolio Summary\n");
    output.push_str(&double_separator(REPORT_WIDTH));
    output.push('\n');

    output.push_str(&format!(
        "Projects:                     {} ({} closed)\n",
        report.total_projects(),
        report.closed_projects_count
    ));
    output.push_str(&format!(
        "Capital deployed:             {:>16}\n",
        money(report.total_capital_deployed)
    ));
    output.push_str(&format!(
        "Capital in active projects:   {:>16}\n",
        money(report.capital_employed_active_projects)
    ));
    output.push_str(&format!(
        "Investment realized:          {:>16}\n",
        money(report.total_investment_realized)
    ));
    output.push_str(&format!(
        "Profit realized:              {:>16}\n",
        money(report.total_profit_realized)
    ));
    output.push_str(&format!(
        "Portfolio margin:             {:>16}\n",
        format_percentage(report.portfolio_profit_margin)
    ));
    output.push_str(&format!(
        "Average ROI:                  {:>16}\n",
        format_percentage(report.average_roi)
    ));
    output.push_str(&format!(
        "Average profit per project:   {:>16}\n",
        format_amount(report.average_profit_per_project, symbol)
    ));
    output.push_str(&format!(
        "Average time to close:        {:>16}\n",
        format_days(report.average_time_to_close_project)
    ));

    output.push_str("\nProfit by month\n");
    output.push_str(&separator(REPORT_WIDTH));
    output.push('\n');
    if report.monthly_profit.is_empty() {
        output.push_str("  (no sales)\n");
    } else {
        let rows: Vec<(String, Money)> = report
            .monthly_profit
            .iter()
            .map(|(month, profit)| (format_sale_month(*month), *profit))
            .collect();
        output.push_str(&money_chart(&rows, symbol));
    }

    output.push_str("\nProjects by type\n");
    output.push_str(&separator(REPORT_WIDTH));
    output.push('\n');
    if report.project_distribution_by_type.is_empty() {
        output.push_str("  (no projects)\n");
    } else {
        let max = report
            .project_distribution_by_type
            .values()
            .copied()
            .max()
            .unwrap_or(0) as f64;
        let width = label_width(report.project_distribution_by_type.keys().map(|k| k.as_str()));
        for (kind, count) in &report.project_distribution_by_type {
            output.push_str(&format!(
                "  {:<width$}  {:>6}  {}\n",
                kind.as_str(),
                count,
                format_bar(*count as f64, max, BAR_WIDTH),
                width = width
            ));
        }
    }

    if !report.profit_margin_by_type.is_empty() {
        output.push_str("\nMargin by type\n");
        output.push_str(&separator(REPORT_WIDTH));
        output.push('\n');
        let max = report
            .profit_margin_by_type
            .values()
            .fold(0.0f64, |acc, v| acc.max(v.abs()));
        let width = label_width(report.profit_margin_by_type.keys().map(|k| k.as_str()));
        for (kind, margin) in &report.profit_margin_by_type {
            output.push_str(&format!(
                "  {:<width$}  {:>8}  {}\n",
                kind.as_str(),
                format_percentage(*margin),
                format_bar(margin.abs(), max, BAR_WIDTH),
                width = width
            ));
        }
    }

    if !report.average_time_to_close_by_type.is_empty() {
        output.push_str("\nTime to close by type\n");
        output.push_str(&separator(REPORT_WIDTH));
        output.push('\n');
        let width = label_width(
            report
                .average_time_to_close_by_type
                .keys()
                .map(|k| k.as_str()),
        );
        for (kind, days) in &report.average_time_to_close_by_type {
            output.push_str(&format!(
                "  {:<width$}  {:>12}\n",
                kind.as_str(),
                format_days(*days),
                width = width
            ));
        }
    }

    if !report.fetch_failures.is_empty() {
        output.push_str(&format!(
            "\nWarning: expenses could not be loaded for {} project(s); they are counted at zero cost\n",
            report.fetch_failures.len()
        ));
        for failure in &report.fetch_failures {
            output.push_str(&format!("  {}: {}\n", failure.project_name, failure.message));
        }
    }

    output
}

const RECOMMENDATIONS: [(&str, &str); 5] = [
    (
        "Cost control",
        "review spending on low-margin projects and renegotiate the largest categories",
    ),
    (
        "Pricing",
        "check whether sale prices leave value behind for some property types or locations",
    ),
    (
        "Time to close",
        "shorten the time between acquisition and sale to free capital sooner",
    ),
    (
        "Capital allocation",
        "favor the property types that consistently show the best margins and ROI",
    ),
    (
        "Record keeping",
        "record every expense and sale; the analysis is only as good as the data",
    ),
];

/// Written analysis of a portfolio report with fixed recommendations
///
/// Sections without enough data are replaced by a short note.
pub fn format_portfolio_analysis(report: &PortfolioReport, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str("Portfolio Analysis\n");
    output.push_str(&double_separator(REPORT_WIDTH));
    output.push('\n');

    output.push_str("1. Overall profitability\n");
    output.push_str(&format!(
        "  - Portfolio margin: {:.2}%. Realized profit over realized investment.\n",
        report.portfolio_profit_margin
    ));
    output.push_str(&format!(
        "  - Average ROI: {:.2}%. Profit generated per unit of capital invested.\n",
        report.average_roi
    ));
    output.push_str(&format!(
        "  - Average profit per closed project: {}.\n",
        format_amount(report.average_profit_per_project, symbol)
    ));

    output.push('\n');
    if report.closed_projects_count > 0 {
        output.push_str("2. Operational efficiency\n");
        output.push_str(&format!(
            "  - Average time to close: {:.0} days. Shorter cycles keep capital tied up for less time.\n",
            report.average_time_to_close_project
        ));
    } else {
        output.push_str(
            "Operational efficiency needs closed projects with creation and sale dates.\n",
        );
    }

    output.push('\n');
    if report.profit_margin_by_type.is_empty() {
        output.push_str(
            "Not enough closed projects per property type for a segmented analysis.\n",
        );
    } else {
        output.push_str("3. Performance by property type\n");
        for (kind, margin) in &report.profit_margin_by_type {
            output.push_str(&format!("  - {}: margin {:.2}%", kind, margin));
            if let Some(days) = report
                .average_time_to_close_by_type
                .get(kind)
                .filter(|days| **days > 0.0)
            {
                output.push_str(&format!(", time to close {:.0} days", days));
            }
            output.push('\n');
        }
    }

    if !report.project_distribution_by_type.is_empty() {
        output.push_str("\n4. Diversification\n");
        for (kind, count) in &report.project_distribution_by_type {
            output.push_str(&format!("  - {}: {} project(s)\n", kind, count));
        }
    }

    output.push_str("\nRecommendations\n");
    output.push_str(&separator(REPORT_WIDTH));
    output.push('\n');
    for (title, advice) in RECOMMENDATIONS {
        output.push_str(&format!("  - {}: {}.\n", title, advice));
    }

    output
}

/// Labelled money amounts with a bar scaled to the largest magnitude
fn money_chart(rows: &[(String, Money)], symbol: &str) -> String {
    let max = rows
        .iter()
        .map(|(_, amount)| amount.abs().as_f64())
        .fold(0.0f64, f64::max);
    let width = label_width(rows.iter().map(|(label, _)| label.as_str()));

    let mut output = String::new();
    for (label, amount) in rows {
        output.push_str(&format!(
            "  {:<width$}  {:>16}  {}\n",
            label,
            amount.format_with_symbol(symbol),
            format_bar(amount.abs().as_f64(), max, BAR_WIDTH),
            width = width
        ));
    }
    output
}

fn label_width<'a>(labels: impl Iterator<Item = &'a str>) -> usize {
    labels.map(|l| l.chars().count()).max().unwrap_or(0).max(4)
}
