use crate::cmd::create::print_generated;
use crate::cmd::levels;
use crate::output::print_classification;
use anyhow::Context;
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use pace_core::config::Config;
use pace_core::generator::{GenerateOptions, Generator};
use pace_core::paths;
use pace_core::types::{Priority, RelatedFile, RiskItem, TaskDraft};
use pace_core::{Classifier, Level, PaceError};
use std::path::Path;

const OTHER_ASSIGNEE: &str = "someone else...";

pub fn run(root: &Path) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    for w in config.validate() {
        tracing::warn!("config: {}", w.message);
    }
    let generator = Generator::new(config, root).context("failed to load templates")?;
    let theme = ColorfulTheme::default();

    println!("{}", style("PACE task-card generator").bold().cyan());
    println!(
        "project {} ({}), cards go to {}",
        generator.config().project.name,
        generator.config().project.prefix,
        generator.output_dir().display()
    );

    loop {
        println!();
        let draft = collect(&theme, &generator)?;
        let generated = generator.generate(
            &draft,
            GenerateOptions {
                auto_classify: false,
                validate_output: true,
            },
        );
        match generated {
            Ok(generated) => {
                println!();
                print_generated(&generated);
            }
            Err(PaceError::Validation(errors)) => {
                for e in &errors {
                    println!("{} {e}", style("error:").red());
                }
            }
            Err(e) => return Err(e).context("failed to generate task card"),
        }

        let again = Confirm::with_theme(&theme)
            .with_prompt("Create another task card?")
            .default(false)
            .interact()?;
        if !again {
            break;
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Prompt flow
// ---------------------------------------------------------------------------

fn collect(theme: &ColorfulTheme, generator: &Generator) -> anyhow::Result<TaskDraft> {
    let config = generator.config();

    let title: String = Input::with_theme(theme)
        .with_prompt("Task title")
        .interact_text()?;
    let description: String = Input::with_theme(theme)
        .with_prompt("Functional description")
        .interact_text()?;
    let goal: String = Input::with_theme(theme)
        .with_prompt("Business goal")
        .interact_text()?;
    let user_value = optional_text(theme, "User value (optional)")?;

    let priorities: Vec<&str> = Priority::all().iter().map(|p| p.label()).collect();
    let default_priority = Priority::all()
        .iter()
        .position(|&p| p == config.defaults.priority)
        .unwrap_or(0);
    let priority = Select::with_theme(theme)
        .with_prompt("Priority")
        .items(&priorities)
        .default(default_priority)
        .interact()?;

    let estimation: f64 = Input::with_theme(theme)
        .with_prompt(format!("Estimation ({})", config.defaults.estimation_unit))
        .default(config.defaults.estimation)
        .validate_with(|v: &f64| -> Result<(), &str> {
            if *v > 0.0 {
                Ok(())
            } else {
                Err("estimation must be greater than zero")
            }
        })
        .interact_text()?;

    let assignee = prompt_assignee(theme, &config.team_members)?;

    let level = choose_level(theme, &description)?;

    let task_id = optional_text_validated(
        theme,
        "Task id (empty to generate, e.g. PACE-L2-AUTH-001)",
        |id| paths::is_valid_task_id(id),
        "task id must look like PREFIX-L<1-4>-MODULE-NUMBER",
    )?;

    let mut draft = TaskDraft {
        task_id,
        task_title: Some(title),
        task_type: Some(level),
        priority: Some(Priority::all()[priority]),
        estimation: Some(estimation),
        assignee: Some(assignee),
        business_goal: Some(goal),
        user_value,
        functional_description: Some(description),
        ..TaskDraft::default()
    };

    draft.acceptance_criteria = non_empty(prompt_lines(theme, "Acceptance criterion")?);
    draft.business_rules = non_empty(prompt_lines(theme, "Business rule")?);
    draft.constraints = non_empty(prompt_lines(theme, "Constraint")?);

    let (files, rejected) = parse_entries(
        prompt_lines(theme, "Related file (path:description:view|modify|create)")?,
        RelatedFile::parse_line,
    );
    report_rejected(&rejected);
    draft.related_files = non_empty(files);

    if level >= Level::Integration {
        draft.interface_definition = optional_text(theme, "Interface definition (optional)")?;
    }
    if level >= Level::Architecture {
        draft.implementation_approach =
            optional_text(theme, "Implementation approach (optional)")?;
    }
    if level == Level::Innovation {
        let (risks, rejected) = parse_entries(
            prompt_lines(
                theme,
                "Risk (description:impact:probability:mitigation, ratings high|medium|low)",
            )?,
            RiskItem::parse_line,
        );
        report_rejected(&rejected);
        draft.risk_assessment = non_empty(risks);
    }

    Ok(draft)
}

/// Classify the description, show the result and let the user accept or
/// override the suggested level.
fn choose_level(theme: &ColorfulTheme, description: &str) -> anyhow::Result<Level> {
    let classification = Classifier.classify(description);
    println!();
    print_classification(&classification);
    println!();

    let mut items = vec![format!("accept {}", classification.level.display_name())];
    items.extend(Level::all().iter().map(|l| l.display_name()));
    items.push("show the level guide".to_string());
    let guide = items.len() - 1;

    loop {
        let choice = Select::with_theme(theme)
            .with_prompt("Task level")
            .items(&items)
            .default(0)
            .interact()?;
        match choice {
            0 => return Ok(classification.level),
            n if n == guide => {
                println!();
                levels::print_help();
                println!();
            }
            n => return Ok(Level::all()[n - 1]),
        }
    }
}

fn prompt_assignee(theme: &ColorfulTheme, team: &[String]) -> anyhow::Result<String> {
    if !team.is_empty() {
        let mut items: Vec<&str> = team.iter().map(String::as_str).collect();
        items.push(OTHER_ASSIGNEE);
        let choice = Select::with_theme(theme)
            .with_prompt("Assignee")
            .items(&items)
            .default(0)
            .interact()?;
        if choice < team.len() {
            return Ok(team[choice].clone());
        }
    }
    let name: String = Input::with_theme(theme)
        .with_prompt("Assignee")
        .allow_empty(true)
        .interact_text()?;
    Ok(name.trim().to_string())
}

// ---------------------------------------------------------------------------
// Prompt helpers
// ---------------------------------------------------------------------------

fn optional_text(theme: &ColorfulTheme, prompt: &str) -> anyhow::Result<Option<String>> {
    let text: String = Input::with_theme(theme)
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    let text = text.trim();
    Ok((!text.is_empty()).then(|| text.to_string()))
}

fn optional_text_validated(
    theme: &ColorfulTheme,
    prompt: &str,
    valid: impl Fn(&str) -> bool,
    message: &'static str,
) -> anyhow::Result<Option<String>> {
    let text: String = Input::with_theme(theme)
        .with_prompt(prompt)
        .allow_empty(true)
        .validate_with(|input: &String| -> Result<(), &str> {
            let input = input.trim();
            if input.is_empty() || valid(input) {
                Ok(())
            } else {
                Err(message)
            }
        })
        .interact_text()?;
    let text = text.trim();
    Ok((!text.is_empty()).then(|| text.to_string()))
}

/// Ask for entries one at a time until an empty answer.
fn prompt_lines(theme: &ColorfulTheme, prompt: &str) -> anyhow::Result<Vec<String>> {
    let mut lines = Vec::new();
    loop {
        let line: String = Input::with_theme(theme)
            .with_prompt(format!("{prompt} #{} (empty to finish)", lines.len() + 1))
            .allow_empty(true)
            .interact_text()?;
        let line = line.trim();
        if line.is_empty() {
            return Ok(lines);
        }
        lines.push(line.to_string());
    }
}

/// Parse each line, splitting parsed values from rejected lines.
fn parse_entries<T>(
    lines: Vec<String>,
    parse: impl Fn(&str) -> Result<T, PaceError>,
) -> (Vec<T>, Vec<(String, PaceError)>) {
    let mut parsed = Vec::new();
    let mut rejected = Vec::new();
    for line in lines {
        match parse(&line) {
            Ok(value) => parsed.push(value),
            Err(e) => rejected.push((line, e)),
        }
    }
    (parsed, rejected)
}

fn report_rejected(rejected: &[(String, PaceError)]) {
    for (line, e) in rejected {
        println!("{} skipped '{line}': {e}", style("warning:").yellow());
    }
}

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    (!items.is_empty()).then_some(items)
}
