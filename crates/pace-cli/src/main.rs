mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{
    batch::BatchArgs, config::ConfigSubcommand, create::CreateArgs, template::TemplateSubcommand,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "pace",
    about = "PACE task-card generator: classify work by ownership level and render task cards",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from pace.config.yaml or .git/)
    #[arg(long, global = true, env = "PACE_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Step through task-card creation with prompts (default)
    #[command(alias = "i")]
    Interactive,

    /// Suggest a level for a task description
    Classify {
        /// Description words (reads stdin when omitted)
        words: Vec<String>,

        /// Also show raw keyword counts, normalized scores and tone
        #[arg(long)]
        explain: bool,
    },

    /// Create a task card without prompts
    Create(CreateArgs),

    /// Create task cards from a JSON array of task records
    Batch(BatchArgs),

    /// Describe the four task levels
    Levels,

    /// Inspect and export task-card templates
    Template {
        #[command(subcommand)]
        subcommand: TemplateSubcommand,
    },

    /// Show, create or validate pace.config.yaml
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        None | Some(Commands::Interactive) => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Interactive => cmd::interactive::run(&root),
        Commands::Classify { words, explain } => cmd::classify::run(&words, explain, cli.json),
        Commands::Create(args) => cmd::create::run(&root, args, cli.json),
        Commands::Batch(args) => cmd::batch::run(&root, args, cli.json),
        Commands::Levels => cmd::levels::run(cli.json),
        Commands::Template { subcommand } => cmd::template::run(&root, subcommand, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
