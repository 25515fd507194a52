use crate::classifier::{Classification, Classifier};
use crate::config::Config;
use crate::error::{PaceError, Result};
use crate::io;
use crate::paths;
use crate::template::TemplateSet;
use crate::types::{Level, TaskCard, TaskDraft};
use crate::validate::{self, ValidationReport};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Options and results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default)]
pub struct GenerateOptions {
    /// Classify the functional description when the draft has no level.
    pub auto_classify: bool,
    /// Run the output quality checks and fold them into the report.
    pub validate_output: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Generated {
    pub path: PathBuf,
    pub card: TaskCard,
    /// Present when the level came from the classifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification: Option<Classification>,
    /// Warnings and suggestions from input and output validation.
    pub report: ValidationReport,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchFailure {
    pub index: usize,
    pub label: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchReport {
    pub generated: Vec<PathBuf>,
    pub failures: Vec<BatchFailure>,
}

// ---------------------------------------------------------------------------
// Generator
// ---------------------------------------------------------------------------

pub struct Generator {
    config: Config,
    output_dir: PathBuf,
    templates: TemplateSet,
    classifier: Classifier,
}

impl Generator {
    /// Build a generator for the project at `root`, loading templates from
    /// the configured override directory if any.
    pub fn new(config: Config, root: &Path) -> Result<Self> {
        let templates = TemplateSet::load(config.template_path(root).as_deref())?;
        let output_dir = config.output_path(root);
        Ok(Self {
            config,
            output_dir,
            templates,
            classifier: Classifier,
        })
    }

    pub fn with_output_dir(mut self, dir: PathBuf) -> Self {
        self.output_dir = dir;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn templates(&self) -> &TemplateSet {
        &self.templates
    }

    pub fn generate(&self, draft: &TaskDraft, options: GenerateOptions) -> Result<Generated> {
        let mut report = validate::validate_draft(draft, self.config.defaults.estimation_unit);
        if !report.is_valid() {
            return Err(PaceError::Validation(report.errors));
        }

        let (level, classification) = self.resolve_level(draft, options)?;
        let card = self.complete(draft, level);

        let content = self.templates.render(&card, self.config.defaults.estimation_unit)?;
        let file_name = paths::card_file_name(level, &card.task_id, &card.task_title);
        let path = self.output_dir.join(file_name);
        io::atomic_write(&path, content.as_bytes())?;
        tracing::info!(id = %card.task_id, path = %path.display(), "generated task card");

        if options.validate_output {
            let output = validate::validate_card(&card, self.config.defaults.estimation_unit);
            report.warnings.extend(output.warnings);
            report.suggestions.extend(output.suggestions);
        }
        for warning in &report.warnings {
            tracing::warn!(id = %card.task_id, "{warning}");
        }

        Ok(Generated {
            path,
            card,
            classification,
            report,
        })
    }

    /// Generate every draft, collecting failures instead of stopping.
    pub fn generate_batch(&self, drafts: &[TaskDraft], options: GenerateOptions) -> BatchReport {
        let mut batch = BatchReport::default();
        for (index, draft) in drafts.iter().enumerate() {
            match self.generate(draft, options) {
                Ok(generated) => batch.generated.push(generated.path),
                Err(e) => {
                    let label = draft.label();
                    tracing::error!(index, task = %label, "generation failed: {e}");
                    batch.failures.push(BatchFailure {
                        index,
                        label,
                        error: e.to_string(),
                    });
                }
            }
        }
        batch
    }

    fn resolve_level(
        &self,
        draft: &TaskDraft,
        options: GenerateOptions,
    ) -> Result<(Level, Option<Classification>)> {
        if let Some(level) = draft.task_type {
            return Ok((level, None));
        }
        if !options.auto_classify {
            return Err(PaceError::MissingLevel(draft.label()));
        }
        let description = draft.functional_description.as_deref().unwrap_or_default();
        let classification = self.classifier.classify(description);
        tracing::info!(
            task = %draft.label(),
            "auto-classified as {} ({}% confidence)",
            classification.level,
            classification.confidence_percent()
        );
        Ok((classification.level, Some(classification)))
    }

    /// Fill every gap in `draft` with project or level defaults.
    pub fn complete(&self, draft: &TaskDraft, level: Level) -> TaskCard {
        let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
        let task_id = draft
            .task_id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| {
                task_id_for(
                    &self.config.project.prefix,
                    level,
                    chrono::Utc::now().timestamp_millis(),
                )
            });

        TaskCard {
            task_id,
            task_title: draft.task_title.clone().unwrap_or_default(),
            task_type: level,
            priority: draft.priority.unwrap_or(self.config.defaults.priority),
            estimation: draft
                .estimation
                .filter(|h| *h > 0.0)
                .unwrap_or(self.config.defaults.estimation),
            assignee: draft.assignee.clone().unwrap_or_default(),
            created_date: today,
            due_date: draft.due_date.clone(),

            business_goal: draft.business_goal.clone().unwrap_or_default(),
            user_value: draft.user_value.clone().unwrap_or_default(),
            business_rules: draft.business_rules.clone().unwrap_or_default(),
            acceptance_criteria: draft.acceptance_criteria.clone().unwrap_or_default(),

            functional_description: draft.functional_description.clone().unwrap_or_default(),
            technical_requirements: draft.technical_requirements.clone().unwrap_or_default(),
            interface_definition: non_blank(&draft.interface_definition),
            data_model: non_blank(&draft.data_model),
            constraints: draft.constraints.clone().unwrap_or_default(),

            implementation_approach: non_blank(&draft.implementation_approach),
            code_examples: draft.code_examples.clone().unwrap_or_default(),
            best_practices: draft
                .best_practices
                .clone()
                .unwrap_or_else(|| owned(default_best_practices(level))),
            considerations: draft.considerations.clone().unwrap_or_default(),

            related_files: draft.related_files.clone().unwrap_or_default(),

            test_strategy: draft
                .test_strategy
                .clone()
                .unwrap_or_else(|| default_test_strategy(level).to_string()),
            validation_checklist: draft
                .validation_checklist
                .clone()
                .unwrap_or_else(|| owned(default_validation_checklist(level))),
            risk_assessment: draft.risk_assessment.clone().filter(|r| !r.is_empty()),
            rollback_plan: non_blank(&draft.rollback_plan),

            custom_fields: draft.custom_fields.clone(),
        }
    }
}

/// Read a JSON array of drafts.
pub fn load_batch(path: &Path) -> Result<Vec<TaskDraft>> {
    let data = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

/// `<PREFIX>-L<level>-TASK-<last six digits of millis>`
pub fn task_id_for(prefix: &str, level: Level, millis: i64) -> String {
    format!(
        "{prefix}-L{}-TASK-{:06}",
        level.number(),
        millis.rem_euclid(1_000_000)
    )
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value.clone().filter(|v| !v.trim().is_empty())
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ---------------------------------------------------------------------------
// Level defaults
// ---------------------------------------------------------------------------

pub fn default_best_practices(level: Level) -> &'static [&'static str] {
    match level {
        Level::Standardized => &[
            "follow the team's coding conventions",
            "write clear comments and documentation",
            "cover the change with unit tests",
            "use type checking to catch mistakes early",
        ],
        Level::Integration => &[
            "keep interface design consistent",
            "handle failures and edge cases",
            "add error handling and logging",
            "consider performance and user experience",
        ],
        Level::Architecture => &[
            "analyse the architecture end to end",
            "weigh scalability and maintainability",
            "justify technology choices",
            "write a detailed rollout plan",
        ],
        Level::Innovation => &[
            "research prior work thoroughly",
            "build a proof of concept or prototype",
            "assess feasibility and risk",
            "prepare a fallback option",
        ],
    }
}

pub fn default_test_strategy(level: Level) -> &'static str {
    match level {
        Level::Standardized => {
            "unit tests cover the main behaviour; integration tests check the interfaces"
        }
        Level::Integration => {
            "integration tests verify cross-system interaction; end-to-end tests cover user flows"
        }
        Level::Architecture => {
            "performance tests validate the design; load tests confirm capacity"
        }
        Level::Innovation => {
            "proof-of-concept tests, user feedback sessions and A/B tests measure the effect"
        }
    }
}

pub fn default_validation_checklist(level: Level) -> &'static [&'static str] {
    match level {
        Level::Standardized => &[
            "all unit tests pass",
            "code follows team conventions",
            "behaviour matches the requirements",
            "code review completed",
        ],
        Level::Integration => &[
            "integration tests pass",
            "user flows verified",
            "performance targets met",
            "error handling verified",
        ],
        Level::Architecture => &[
            "architecture document complete",
            "technology choices confirmed",
            "rollout plan is feasible",
            "risk assessment done",
        ],
        Level::Innovation => &[
            "proof of concept succeeded",
            "technical feasibility confirmed",
            "user feedback is positive",
            "business value is clear",
        ],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
