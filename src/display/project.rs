//! Project display formatting
//!
//! Project listings are rendered with `tabled`; details use aligned
//! label/value lines.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Project;
use crate::reports::ProjectMetrics;

#[derive(Tabled)]
struct ProjectRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Area m²")]
    area: String,
    #[tabled(rename = "Cost")]
    cost: String,
    #[tabled(rename = "Sale")]
    sale: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// Format projects with their total cost as a table
pub fn format_project_list(rows: &[(Project, ProjectMetrics)], symbol: &str) -> String {
    if rows.is_empty() {
        return "No projects found.".to_string();
    }

    let table_rows: Vec<ProjectRow> = rows
        .iter()
        .map(|(project, metrics)| ProjectRow {
            id: project.id.to_string(),
            name: super::report::truncate(&project.name, 30),
            kind: project.project_type.to_string(),
            location: super::report::truncate(&project.location, 20),
            area: format!("{:.1}", project.square_meters),
            cost: metrics.total_cost.format_with_symbol(symbol),
            sale: project
                .sale_amount
                .map(|s| s.format_with_symbol(symbol))
                .unwrap_or_else(|| "-".to_string()),
            status: project.status_label().to_string(),
        })
        .collect();

    let mut table = Table::new(table_rows);
    table.with(Style::psql());
    table.to_string()
}

/// Format the stored fields of a project
pub fn format_project_details(project: &Project, symbol: &str, date_format: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Project:      {}\n", project.name));
    output.push_str(&format!("ID:           {}\n", project.id));
    output.push_str(&format!("Type:         {}\n", project.project_type));
    if !project.location.is_empty() {
        output.push_str(&format!("Location:     {}\n", project.location));
    }
    output.push_str(&format!("Area:         {:.1} m²\n", project.square_meters));
    output.push_str(&format!(
        "Auction date: {}\n",
        project.auction_date.format(date_format)
    ));
    if let Some(created) = project.created_at {
        output.push_str(&format!("Created:      {}\n", created.format(date_format)));
    }
    if let Some(amount) = project.sale_amount {
        output.push_str(&format!(
            "Sale amount:  {}\n",
            amount.format_with_symbol(symbol)
        ));
    }
    if let Some(date) = project.sale_date {
        output.push_str(&format!("Sale date:    {}\n", date.format(date_format)));
    }
    output.push_str(&format!("Status:       {}\n", project.status_label()));

    output
}
