mod cmd;
mod output;

use clap::{Parser, Subcommand};
use cmd::options::OptionsSubcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "blueprint",
    about = "Generate serverless application blueprints and their CI/CD workflows",
    version,
    propagate_version = true
)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve an action name to its versioned identifier
    Resolve {
        /// Action alias (e.g. build) or qualified identifier (e.g. aws/build@v1)
        identifier: String,

        /// Rollout tier: default or prod (anything else falls back to default)
        #[arg(long, default_value = "default")]
        tier: String,
    },

    /// List registered workflow actions
    Actions,

    /// Create or inspect blueprint option files
    Options {
        #[command(subcommand)]
        subcommand: OptionsSubcommand,
    },

    /// Validate a blueprint options file
    Validate {
        /// Options file
        #[arg(long, default_value = "blueprint.yaml")]
        options: PathBuf,
    },

    /// Generate the SAM serverless project into an output directory
    Synth {
        /// Options file (defaults are used when omitted)
        #[arg(long)]
        options: Option<PathBuf>,

        /// Output directory
        #[arg(long, env = "BLUEPRINT_OUTDIR", default_value = ".")]
        outdir: PathBuf,

        /// Override the options' action tier
        #[arg(long)]
        tier: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Resolve { identifier, tier } => cmd::resolve::run(&identifier, &tier, cli.json),
        Commands::Actions => cmd::actions::run(cli.json),
        Commands::Options { subcommand } => cmd::options::run(subcommand, cli.json),
        Commands::Validate { options } => cmd::validate::run(&options, cli.json),
        Commands::Synth {
            options,
            outdir,
            tier,
        } => cmd::synth::run(options.as_deref(), &outdir, tier, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
