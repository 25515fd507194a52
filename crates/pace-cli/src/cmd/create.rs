use crate::output::{print_classification, print_json, print_report};
use anyhow::Context;
use clap::Args;
use pace_core::config::Config;
use pace_core::generator::{GenerateOptions, Generated, Generator};
use pace_core::paths;
use pace_core::types::{Priority, TaskDraft};
use pace_core::Level;
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct CreateArgs {
    /// Task title
    #[arg(long)]
    pub title: String,

    /// Functional description (also the classifier input)
    #[arg(long)]
    pub description: String,

    /// Business goal
    #[arg(long)]
    pub goal: String,

    /// User value
    #[arg(long)]
    pub user_value: Option<String>,

    /// Level 1-4; classified from the description when omitted
    #[arg(long)]
    pub level: Option<Level>,

    /// Priority P0-P3 (default from config)
    #[arg(long)]
    pub priority: Option<Priority>,

    /// Estimated effort in the configured unit
    #[arg(long)]
    pub estimation: Option<f64>,

    #[arg(long)]
    pub assignee: Option<String>,

    /// Task id, e.g. PACE-L2-AUTH-001 (generated when omitted)
    #[arg(long)]
    pub id: Option<String>,

    /// Acceptance criterion (repeatable)
    #[arg(long = "criterion", value_name = "TEXT")]
    pub criteria: Vec<String>,

    /// Output directory, relative to the project root (default from config)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

impl CreateArgs {
    fn into_draft(self) -> TaskDraft {
        TaskDraft {
            task_id: self.id,
            task_title: Some(self.title),
            task_type: self.level,
            priority: self.priority,
            estimation: self.estimation,
            assignee: self.assignee,
            business_goal: Some(self.goal),
            user_value: self.user_value,
            acceptance_criteria: (!self.criteria.is_empty()).then_some(self.criteria),
            functional_description: Some(self.description),
            ..TaskDraft::default()
        }
    }
}

pub fn run(root: &Path, args: CreateArgs, json: bool) -> anyhow::Result<()> {
    if let Some(est) = args.estimation {
        if est <= 0.0 {
            anyhow::bail!("estimation must be greater than zero, got {est}");
        }
    }

    let config = Config::load(root).context("failed to load config")?;
    let mut generator = Generator::new(config, root).context("failed to load templates")?;
    if let Some(dir) = &args.output {
        generator = generator.with_output_dir(paths::resolve(root, dir));
    }

    let draft = args.into_draft();
    let generated = generator
        .generate(
            &draft,
            GenerateOptions {
                auto_classify: true,
                validate_output: true,
            },
        )
        .with_context(|| format!("failed to create task card '{}'", draft.label()))?;

    if json {
        print_json(&generated)?;
    } else {
        print_generated(&generated);
    }
    Ok(())
}

/// Summary of a freshly written card, shared with the interactive flow.
pub fn print_generated(generated: &Generated) {
    if let Some(c) = &generated.classification {
        print_classification(c);
        println!();
    }
    println!(
        "Created {} ({}): {}",
        generated.card.task_id,
        generated.card.task_type,
        generated.path.display()
    );
    print_report(&generated.report);
}
