mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{goal::GoalSubcommand, streak::StreakSubcommand};
use pathwise_core::ResolveContext;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "pathwise",
    about = "Onboarding progress resolver: decide where a learner lands next",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .pathwise/)
    #[arg(long, global = true, env = "PATHWISE_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default .pathwise/config.yaml
    Init {
        /// Backend base URL to record in the config
        #[arg(long)]
        backend_url: Option<String>,
    },

    /// Resolve a progress snapshot read from a file or stdin
    Resolve {
        /// Snapshot JSON file (default: stdin)
        #[arg(long)]
        file: Option<PathBuf>,
        /// Calling page: onboarding, login, signup or roadmap
        #[arg(long, default_value = "onboarding")]
        context: ResolveContext,
        /// Current client location, e.g. /onboarding?step=two
        #[arg(long)]
        current: Option<String>,
    },

    /// Fetch the learner's snapshot from the backend and resolve it
    Next {
        /// Calling page: onboarding, login, signup or roadmap
        #[arg(long, default_value = "onboarding")]
        context: ResolveContext,
        /// Current client location
        #[arg(long)]
        current: Option<String>,
    },

    /// List the resolution rules in priority order
    Rules,

    /// Validate the project configuration
    Validate,

    /// Track the daily learning streak
    Streak {
        #[command(subcommand)]
        subcommand: StreakSubcommand,
    },

    /// Manage learning goals
    Goal {
        #[command(subcommand)]
        subcommand: GoalSubcommand,
    },

    /// Serve the HTTP API
    Ui {
        /// Port to listen on (0 = OS-assigned)
        #[arg(long, default_value = "0")]
        port: u16,

        /// Don't open browser automatically
        #[arg(long)]
        no_open: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Ui { .. } => tracing::Level::INFO,
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

    let result = match cli.command {
        Commands::Init { backend_url } => cmd::init::run(&root, backend_url.as_deref(), cli.json),
        Commands::Resolve {
            file,
            context,
            current,
        } => cmd::resolve::run(&root, file.as_deref(), context, current.as_deref(), cli.json),
        Commands::Next { context, current } => {
            cmd::next::run(&root, context, current.as_deref(), cli.json)
        }
        Commands::Rules => cmd::rules::run(cli.json),
        Commands::Validate => cmd::validate::run(&root, cli.json),
        Commands::Streak { subcommand } => cmd::streak::run(&root, subcommand, cli.json),
        Commands::Goal { subcommand } => cmd::goal::run(&root, subcommand, cli.json),
        Commands::Ui { port, no_open } => cmd::ui::run(&root, port, no_open),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
