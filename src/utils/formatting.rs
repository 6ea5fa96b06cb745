use chrono::Local;
use console::{style, Color};
use tabled::{Table, Tabled, settings::{Style, Alignment}};

use crate::models::{CartEntry, CartView, Priority};
use crate::utils::currency::format_amount;

#[derive(Tabled)]
struct CartTableRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Product")]
    name: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Qty")]
    quantity: u32,
    #[tabled(rename = "Unit")]
    unit_price: String,
    #[tabled(rename = "Total")]
    line_total: String,
}

pub fn format_cart_table(view: &CartView) -> String {
    if view.is_empty() {
        return String::new();
    }

    let rows: Vec<CartTableRow> = view
        .entries
        .iter()
        .map(|entry| CartTableRow {
            id: entry.id.to_string(),
            name: if entry.name.chars().count() > 30 {
                format!("{}...", entry.name.chars().take(27).collect::<String>())
            } else {
                entry.name.clone()
            },
            priority: format_priority(&entry.priority),
            quantity: entry.quantity,
            unit_price: entry.unit_price.clone(),
            line_total: entry.line_total.clone(),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Alignment::left());

    table.to_string()
}

pub fn format_entry_detail(entry: &CartEntry) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}: {}\n", style("ID").bold(), style(entry.id).cyan()));
    output.push_str(&format!("{}: {}\n", style("Product").bold(), style(&entry.name).green()));
    output.push_str(&format!("{}: {}\n", style("Priority").bold(), format_priority(&entry.priority)));
    output.push_str(&format!("{}: {}\n", style("Quantity").bold(), entry.quantity));
    output.push_str(&format!("{}: {}\n", style("Unit price").bold(), format_amount(entry.unit_value)));
    output.push_str(&format!("{}: {}\n", style("Line total").bold(), style(format_amount(entry.line_total())).yellow()));
    output.push_str(&format!(
        "{}: {}\n",
        style("Added").bold(),
        style(entry.added_at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")).dim()
    ));

    output
}

pub fn format_total(view: &CartView) -> String {
    format!("{}: {}", style("Total").bold(), style(&view.total).bold().green())
}

/// Marker color shown next to an entry of the given priority.
pub fn priority_color(priority: &Priority) -> Color {
    match priority {
        Priority::High => Color::Red,
        Priority::Medium => Color::Yellow,
        Priority::Low => Color::Green,
    }
}

pub fn priority_label(priority: &Priority) -> &'static str {
    match priority {
        Priority::High => "High",
        Priority::Medium => "Medium",
        Priority::Low => "Low",
    }
}

pub fn format_priority(priority: &Priority) -> String {
    style(format!("● {}", priority_label(priority)))
        .fg(priority_color(priority))
        .to_string()
}
