use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use pace_core::config::Config;
use pace_core::paths::DEFAULT_TEMPLATE_DIR;
use pace_core::template::{self, TemplateSet};
use pace_core::Level;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum TemplateSubcommand {
    /// List the template used for each level
    List,

    /// Print the template source for a level
    Show {
        /// Level 1-4
        level: Level,
    },

    /// Write the built-in templates to disk for editing
    Export {
        /// Target directory (default: config template_dir, else templates/task-cards)
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(root: &Path, subcmd: TemplateSubcommand, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    match subcmd {
        TemplateSubcommand::List => list(root, &config, json),
        TemplateSubcommand::Show { level } => show(root, &config, level, json),
        TemplateSubcommand::Export { dir, force } => {
            let dir = dir
                .map(|d| pace_core::paths::resolve(root, &d))
                .or_else(|| config.template_path(root))
                .unwrap_or_else(|| root.join(DEFAULT_TEMPLATE_DIR));
            export(&dir, force, json)
        }
    }
}

fn load(root: &Path, config: &Config) -> anyhow::Result<TemplateSet> {
    TemplateSet::load(config.template_path(root).as_deref()).context("failed to load templates")
}

// ---------------------------------------------------------------------------
// list / show
// ---------------------------------------------------------------------------

fn list(root: &Path, config: &Config, json: bool) -> anyhow::Result<()> {
    let templates = load(root, config)?;

    if json {
        let items: Vec<serde_json::Value> = Level::all()
            .iter()
            .map(|&level| {
                serde_json::json!({
                    "level": level.number(),
                    "file": level.template_file(),
                    "source": templates.origin(level).to_string(),
                })
            })
            .collect();
        return print_json(&items);
    }

    let rows = Level::all()
        .iter()
        .map(|&level| {
            vec![
                level.number().to_string(),
                level.template_file().to_string(),
                templates.origin(level).to_string(),
            ]
        })
        .collect();
    print_table(&["LEVEL", "FILE", "SOURCE"], rows);
    Ok(())
}

fn show(root: &Path, config: &Config, level: Level, json: bool) -> anyhow::Result<()> {
    let templates = load(root, config)?;
    let source = templates.source(level)?;

    if json {
        return print_json(&serde_json::json!({
            "level": level.number(),
            "source": templates.origin(level).to_string(),
            "template": source,
        }));
    }

    print!("{source}");
    Ok(())
}

// ---------------------------------------------------------------------------
// export
// ---------------------------------------------------------------------------

fn export(dir: &Path, force: bool, json: bool) -> anyhow::Result<()> {
    let results = template::export_defaults(dir, force)
        .with_context(|| format!("failed to export templates to {}", dir.display()))?;

    if json {
        let items: Vec<serde_json::Value> = results
            .iter()
            .map(|(path, written)| {
                serde_json::json!({ "path": path.display().to_string(), "written": written })
            })
            .collect();
        return print_json(&items);
    }

    for (path, written) in &results {
        if *written {
            println!("wrote   {}", path.display());
        } else {
            println!("kept    {} (exists; use --force to overwrite)", path.display());
        }
    }
    Ok(())
}
