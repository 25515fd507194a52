//! Markdown fragments substituted into task-card templates.

use crate::types::{RelatedFile, RiskItem, TechnicalRequirement};

/// `- item` per line.
pub fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `- [ ] item` per line.
pub fn checklist(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- [ ] {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn requirements_table(requirements: &[TechnicalRequirement]) -> String {
    let header = "| Category | Description | Required |\n|----------|-------------|----------|";
    if requirements.is_empty() {
        return format!("{header}\n| - | no technical requirements | - |");
    }
    let rows: Vec<String> = requirements
        .iter()
        .map(|r| {
            let mark = if r.required { "✅" } else { "❌" };
            format!("| {} | {} | {mark} |", r.category, r.description)
        })
        .collect();
    format!("{header}\n{}", rows.join("\n"))
}

pub fn related_files_table(files: &[RelatedFile]) -> String {
    let header = "| Path | Description | Action |\n|------|-------------|--------|";
    if files.is_empty() {
        return format!("{header}\n| - | no related files | - |");
    }
    let rows: Vec<String> = files
        .iter()
        .map(|f| {
            format!(
                "| `{}` | {} | {} {} |",
                f.path,
                f.description,
                f.action.icon(),
                f.action.as_str()
            )
        })
        .collect();
    format!("{header}\n{}", rows.join("\n"))
}

/// Empty input renders nothing; templates guard the section themselves.
pub fn risk_table(risks: &[RiskItem]) -> String {
    if risks.is_empty() {
        return String::new();
    }
    let header = "| Risk | Impact | Probability | Mitigation |\n|------|--------|-------------|------------|";
    let rows: Vec<String> = risks
        .iter()
        .map(|r| {
            format!(
                "| {} | {} {} | {} {} | {} |",
                r.description,
                r.impact.icon(),
                r.impact.as_str(),
                r.probability.icon(),
                r.probability.as_str(),
                r.mitigation
            )
        })
        .collect();
    format!("{header}\n{}", rows.join("\n"))
}
