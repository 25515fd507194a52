use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Args;
use pace_core::config::Config;
use pace_core::generator::{self, GenerateOptions, Generator};
use pace_core::paths;
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct BatchArgs {
    /// JSON file holding an array of task records
    pub file: PathBuf,

    /// Output directory, relative to the project root (default from config)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Fail records without a taskType instead of classifying them
    #[arg(long)]
    pub no_classify: bool,
}

pub fn run(root: &Path, args: BatchArgs, json: bool) -> anyhow::Result<()> {
    let drafts = generator::load_batch(&args.file)
        .with_context(|| format!("failed to read batch file {}", args.file.display()))?;

    let config = Config::load(root).context("failed to load config")?;
    let mut generator = Generator::new(config, root).context("failed to load templates")?;
    if let Some(dir) = &args.output {
        generator = generator.with_output_dir(paths::resolve(root, dir));
    }

    let report = generator.generate_batch(
        &drafts,
        GenerateOptions {
            auto_classify: !args.no_classify,
            validate_output: true,
        },
    );

    if json {
        print_json(&report)?;
    } else {
        for path in &report.generated {
            println!("created {}", path.display());
        }
        if !report.failures.is_empty() {
            println!();
            let rows = report
                .failures
                .iter()
                .map(|f| vec![f.index.to_string(), f.label.clone(), f.error.clone()])
                .collect();
            print_table(&["#", "TASK", "ERROR"], rows);
        }
        println!();
        println!(
            "{} of {} task cards generated",
            report.generated.len(),
            drafts.len()
        );
    }

    if report.generated.is_empty() && !report.failures.is_empty() {
        anyhow::bail!("no task cards generated");
    }
    Ok(())
}
