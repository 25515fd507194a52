use crate::config::EstimationUnit;
use crate::error::{PaceError, Result};
use crate::io;
use crate::markdown;
use crate::types::{Level, TaskCard};
use minijinja::Environment;
use rust_embed::Embed;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Embed)]
#[folder = "templates/"]
struct DefaultTemplates;

/// Built-in template for `level`.
pub fn default_template(level: Level) -> Result<String> {
    let name = level.template_file();
    let file = <DefaultTemplates as Embed>::get(name)
        .ok_or_else(|| PaceError::TemplateNotFound(name.to_string()))?;
    Ok(String::from_utf8_lossy(&file.data).into_owned())
}

/// Where a loaded template came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateOrigin {
    Embedded,
    File(PathBuf),
}

impl std::fmt::Display for TemplateOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateOrigin::Embedded => f.write_str("built-in"),
            TemplateOrigin::File(path) => write!(f, "{}", path.display()),
        }
    }
}

// ---------------------------------------------------------------------------
// TemplateSet
// ---------------------------------------------------------------------------

/// The four level templates, compiled once.
pub struct TemplateSet {
    env: Environment<'static>,
    origins: [TemplateOrigin; 4],
}

impl TemplateSet {
    /// Load templates, preferring files in `override_dir` over the built-in
    /// ones. Syntax errors surface here rather than at render time.
    pub fn load(override_dir: Option<&Path>) -> Result<Self> {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        let mut origins: [TemplateOrigin; 4] = std::array::from_fn(|_| TemplateOrigin::Embedded);

        for &level in Level::all() {
            let name = level.template_file();
            let candidate = override_dir.map(|dir| dir.join(name));
            let source = match candidate {
                Some(path) if path.is_file() => {
                    let source = std::fs::read_to_string(&path).map_err(|source| {
                        PaceError::TemplateLoad {
                            path: path.display().to_string(),
                            source,
                        }
                    })?;
                    tracing::debug!(template = name, path = %path.display(), "using template override");
                    origins[level.index()] = TemplateOrigin::File(path);
                    source
                }
                _ => default_template(level)?,
            };
            env.add_template_owned(name, source)?;
        }

        Ok(Self { env, origins })
    }

    pub fn origin(&self, level: Level) -> &TemplateOrigin {
        &self.origins[level.index()]
    }

    pub fn source(&self, level: Level) -> Result<String> {
        Ok(self.env.get_template(level.template_file())?.source().to_string())
    }

    pub fn render(&self, card: &TaskCard, unit: EstimationUnit) -> Result<String> {
        let ctx = RenderContext::new(card, unit);
        let template = self.env.get_template(card.task_type.template_file())?;
        Ok(template.render(&ctx)?)
    }
}

/// Write the built-in templates into `dir`. Existing files are kept unless
/// `force` is set. Returns each path with whether it was written.
pub fn export_defaults(dir: &Path, force: bool) -> Result<Vec<(PathBuf, bool)>> {
    let mut results = Vec::with_capacity(4);
    for &level in Level::all() {
        let path = dir.join(level.template_file());
        let data = default_template(level)?;
        let written = if force {
            io::atomic_write(&path, data.as_bytes())?;
            true
        } else {
            io::write_if_missing(&path, data.as_bytes())?
        };
        results.push((path, written));
    }
    Ok(results)
}

// ---------------------------------------------------------------------------
// Render context
// ---------------------------------------------------------------------------

/// The card's own fields plus pre-formatted lists, tables and level text.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RenderContext<'a> {
    #[serde(flatten)]
    card: &'a TaskCard,
    created_date_formatted: String,
    due_date_formatted: String,
    business_rules_list: String,
    acceptance_criteria_list: String,
    constraints_list: String,
    best_practices_list: String,
    considerations_list: String,
    validation_checklist_list: String,
    technical_requirements_table: String,
    related_files_table: String,
    risk_assessment_table: String,
    estimation_formatted: String,
    estimation_unit: &'static str,
    level_number: u8,
    level_name: &'static str,
    level_description: &'static str,
}

impl<'a> RenderContext<'a> {
    fn new(card: &'a TaskCard, unit: EstimationUnit) -> Self {
        let level = card.task_type;
        Self {
            card,
            created_date_formatted: format_date(&card.created_date),
            due_date_formatted: card.due_date.as_deref().map(format_date).unwrap_or_default(),
            business_rules_list: markdown::bullet_list(&card.business_rules),
            acceptance_criteria_list: markdown::bullet_list(&card.acceptance_criteria),
            constraints_list: markdown::bullet_list(&card.constraints),
            best_practices_list: markdown::bullet_list(&card.best_practices),
            considerations_list: markdown::bullet_list(&card.considerations),
            validation_checklist_list: markdown::checklist(&card.validation_checklist),
            technical_requirements_table: markdown::requirements_table(&card.technical_requirements),
            related_files_table: markdown::related_files_table(&card.related_files),
            risk_assessment_table: card
                .risk_assessment
                .as_deref()
                .map(markdown::risk_table)
                .unwrap_or_default(),
            estimation_formatted: card.estimation.to_string(),
            estimation_unit: unit.as_str(),
            level_number: level.number(),
            level_name: level.as_str(),
            level_description: level.summary(),
        }
    }
}

/// `2024-01-05` becomes `2024/1/5`; anything unparseable is kept as is.
fn format_date(date: &str) -> String {
    chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| d.format("%Y/%-m/%-d").to_string())
        .unwrap_or_else(|_| date.to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Priority, RiskItem};
    use tempfile::TempDir;

    fn card(level: Level) -> TaskCard {
        TaskCard {
            task_id: "SHOP-L2-CART-001".to_string(),
            task_title: "Sync cart".to_string(),
            task_type: level,
            priority: Priority::P0,
            estimation: 12.0,
            assignee: "alice".to_string(),
            created_date: "2024-01-05".to_string(),
            due_date: None,
            business_goal: "keep carts in sync".to_string(),
            user_value: "no lost items".to_string(),
            business_rules: vec!["one cart per user".to_string()],
            acceptance_criteria: vec!["cart survives reload".to_string()],
            functional_description: "sync the cart with the server".to_string(),
            technical_requirements: vec![],
            interface_definition: None,
            data_model: None,
            constraints: vec![],
            implementation_approach: None,
            code_examples: vec![],
            best_practices: vec!["handle retries".to_string()],
            considerations: vec![],
            related_files: vec![],
            test_strategy: "integration tests".to_string(),
            validation_checklist: vec!["sync verified".to_string()],
            risk_assessment: None,
            rollback_plan: None,
            custom_fields: None,
        }
    }

    #[test]
    fn every_level_has_a_builtin_template() {
        for &level in Level::all() {
            let source = default_template(level).unwrap();
            assert!(source.contains("{{ taskTitle }}"), "{level} template lacks title");
        }
    }

    #[test]
    fn renders_card_fields_and_derived_fields() {
        let set = TemplateSet::load(None).unwrap();
        let out = set.render(&card(Level::Integration), EstimationUnit::Hours).unwrap();
        assert!(out.contains("Sync cart"));
        assert!(out.contains("SHOP-L2-CART-001"));
        assert!(out.contains("2024/1/5"));
        assert!(out.contains("12 hours"));
        assert!(out.contains("- one cart per user"));
        assert!(out.contains("- [ ] sync verified"));
        assert!(out.contains("no related files"));
        assert!(out.ends_with('\n'));
    }

    #[test]
    fn missing_optional_fields_render_empty() {
        let set = TemplateSet::load(None).unwrap();
        let out = set.render(&card(Level::Innovation), EstimationUnit::Hours).unwrap();
        assert!(!out.contains("none"));
        assert!(!out.contains("Risk | Impact"));
    }

    #[test]
    fn risk_section_renders_when_present() {
        let set = TemplateSet::load(None).unwrap();
        let mut c = card(Level::Innovation);
        c.risk_assessment = Some(vec![RiskItem::parse_line("vendor lock-in:high:medium:abstraction layer").unwrap()]);
        let out = set.render(&c, EstimationUnit::Hours).unwrap();
        assert!(out.contains("| vendor lock-in | 🔴 high | 🟡 medium | abstraction layer |"));
    }

    #[test]
    fn override_directory_wins() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("level-2-integration.md"),
            "custom {{ taskId }} / {{ levelName }}",
        )
        .unwrap();
        let set = TemplateSet::load(Some(dir.path())).unwrap();
        assert_eq!(
            set.origin(Level::Integration),
            &TemplateOrigin::File(dir.path().join("level-2-integration.md"))
        );
        assert_eq!(set.origin(Level::Standardized), &TemplateOrigin::Embedded);
        assert_eq!(
            set.source(Level::Integration).unwrap(),
            "custom {{ taskId }} / {{ levelName }}"
        );
        assert!(set.source(Level::Standardized).unwrap().contains("{{ taskTitle }}"));
        let out = set.render(&card(Level::Integration), EstimationUnit::Hours).unwrap();
        assert_eq!(out, "custom SHOP-L2-CART-001 / integration and coordination");
    }

    #[test]
    fn broken_override_is_an_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("level-1-standardized.md"), "{% if %}").unwrap();
        assert!(matches!(
            TemplateSet::load(Some(dir.path())),
            Err(PaceError::Render(_))
        ));
    }

    #[test]
    fn export_keeps_existing_files_unless_forced() {
        let dir = TempDir::new().unwrap();
        let existing = dir.path().join("level-1-standardized.md");
        std::fs::write(&existing, "mine").unwrap();

        let results = export_defaults(dir.path(), false).unwrap();
        assert_eq!(results.iter().filter(|(_, written)| *written).count(), 3);
        assert_eq!(std::fs::read_to_string(&existing).unwrap(), "mine");

        let results = export_defaults(dir.path(), true).unwrap();
        assert!(results.iter().all(|(_, written)| *written));
        assert_ne!(std::fs::read_to_string(&existing).unwrap(), "mine");
    }

    #[test]
    fn date_formatting() {
        assert_eq!(format_date("2024-12-31"), "2024/12/31");
        assert_eq!(format_date("next week"), "next week");
    }
}
