use crate::output::{print_json, print_warnings};
use anyhow::Context;
use blueprint_core::options::{BlueprintOptions, WarnLevel};
use std::path::Path;

pub fn run(file: &Path, json: bool) -> anyhow::Result<()> {
    let options = BlueprintOptions::load(file)
        .with_context(|| format!("failed to load {}", file.display()))?;
    let warnings = options.validate();

    if json {
        print_json(&serde_json::json!({
            "warnings": warnings,
        }))?;
    } else if warnings.is_empty() {
        println!("Options are valid. No warnings.");
    } else {
        print_warnings(&warnings);
    }

    if warnings.iter().any(|w| w.level == WarnLevel::Error) {
        anyhow::bail!("options validation found errors");
    }
    Ok(())
}
