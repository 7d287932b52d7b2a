use crate::output::{print_file_status, print_json};
use anyhow::Context;
use blueprint_core::options::{BlueprintOptions, WarnLevel};
use blueprint_core::sam;
use std::path::Path;

pub fn run(
    options_file: Option<&Path>,
    outdir: &Path,
    tier: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let mut options = match options_file {
        Some(path) => BlueprintOptions::load(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => BlueprintOptions::default(),
    };
    if let Some(tier) = tier {
        options.action_tier = tier;
    }

    let warnings = options.validate();
    for w in &warnings {
        match w.level {
            WarnLevel::Warning => tracing::warn!("{}", w.message),
            WarnLevel::Error => tracing::error!("{}", w.message),
        }
    }
    if warnings.iter().any(|w| w.level == WarnLevel::Error) {
        anyhow::bail!("options validation found errors; run 'blueprint validate' for details");
    }

    let scaffold = sam::synth(&options).context("failed to synthesize blueprint")?;
    let written = scaffold
        .write_to(outdir)
        .with_context(|| format!("failed to write project to {}", outdir.display()))?;

    if json {
        let files: Vec<String> = written.iter().map(|p| p.display().to_string()).collect();
        print_json(&serde_json::json!({
            "outdir": outdir.display().to_string(),
            "files": files,
        }))?;
    } else {
        println!("Generated {} files in {}:", written.len(), outdir.display());
        for rel in scaffold.paths() {
            print_file_status(rel, true);
        }
    }
    Ok(())
}
