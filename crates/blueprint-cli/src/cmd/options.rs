use crate::output::{print_file_status, print_json};
use anyhow::Context;
use blueprint_core::{io, options::BlueprintOptions, paths};
use clap::Subcommand;
use std::path::{Path, PathBuf};

#[derive(Subcommand)]
pub enum OptionsSubcommand {
    /// Write a default options file (an existing file is left untouched)
    Init {
        /// Destination file
        #[arg(long, default_value = paths::OPTIONS_FILE)]
        file: PathBuf,
    },

    /// Show the effective options, defaults applied
    Show {
        /// Options file
        #[arg(long, default_value = paths::OPTIONS_FILE)]
        file: PathBuf,
    },
}

pub fn run(subcmd: OptionsSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        OptionsSubcommand::Init { file } => init(&file, json),
        OptionsSubcommand::Show { file } => show(&file, json),
    }
}

fn init(file: &Path, json: bool) -> anyhow::Result<()> {
    let yaml = BlueprintOptions::default()
        .to_yaml()
        .context("failed to serialize default options")?;
    let created = io::write_if_missing(file, yaml.as_bytes())
        .with_context(|| format!("failed to write {}", file.display()))?;

    if json {
        print_json(&serde_json::json!({
            "file": file.display().to_string(),
            "created": created,
        }))?;
    } else {
        print_file_status(file, created);
    }
    Ok(())
}

fn show(file: &Path, json: bool) -> anyhow::Result<()> {
    let options = BlueprintOptions::load(file)
        .with_context(|| format!("failed to load {}", file.display()))?;
    if json {
        print_json(&options)?;
    } else {
        print!("{}", options.to_yaml()?);
    }
    Ok(())
}
