use crate::output::print_json;
use console::style;
use pace_core::Level;
use serde::Serialize;

#[derive(Serialize)]
struct LevelInfo {
    level: u8,
    name: &'static str,
    ownership: &'static str,
    description: &'static str,
    examples: &'static str,
    workflow: &'static str,
}

pub fn run(json: bool) -> anyhow::Result<()> {
    if json {
        let levels: Vec<LevelInfo> = Level::all()
            .iter()
            .map(|&level| LevelInfo {
                level: level.number(),
                name: level.as_str(),
                ownership: level.ownership(),
                description: level.summary(),
                examples: level.examples(),
                workflow: level.workflow(),
            })
            .collect();
        return print_json(&levels);
    }

    print_help();
    Ok(())
}

/// Human-readable level guide, shared with the interactive flow.
pub fn print_help() {
    for (i, &level) in Level::all().iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!(
            "{} {}",
            style(level.to_string()).bold(),
            style(format!("{} ({})", level.as_str(), level.ownership())).cyan()
        );
        println!("  {}", level.summary());
        println!("  examples: {}", level.examples());
        println!("  workflow: {}", level.workflow());
    }
}
