use console::style;
use pace_core::validate::ValidationReport;
use pace_core::Classification;
use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

pub fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    // Calculate column widths
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }

    // Print header
    let header_row: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| format!("{:width$}", h, width = widths[i]))
        .collect();
    println!("{}", header_row.join("  "));

    // Print separator
    let sep: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    println!("{}", sep.join("  "));

    // Print rows
    for row in &rows {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let w = widths.get(i).copied().unwrap_or(0);
                format!("{:width$}", cell, width = w)
            })
            .collect();
        println!("{}", cells.join("  "));
    }
}

pub fn print_classification(c: &Classification) {
    println!(
        "Suggested level: {}",
        style(format!("{} ({})", c.level, c.level.as_str())).bold()
    );
    println!("Confidence:      {}", style(format!("{}%", c.confidence_percent())).bold());
    println!("Reasoning:");
    for (i, reason) in c.reasoning.iter().enumerate() {
        println!("  {}. {}", i + 1, style(reason).dim());
    }
}

pub fn print_report(report: &ValidationReport) {
    for w in &report.warnings {
        println!("{} {w}", style("warning:").yellow());
    }
    for s in &report.suggestions {
        println!("{} {s}", style("suggestion:").cyan());
    }
}
