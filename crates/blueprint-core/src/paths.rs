use crate::error::{BlueprintError, Result};
use std::path::{Component, Path, PathBuf};

// ---------------------------------------------------------------------------
// Layout constants
// ---------------------------------------------------------------------------

pub const WORKFLOWS_DIR: &str = ".codecatalyst/workflows";
pub const SCRIPTS_DIR: &str = ".aws/scripts";
pub const SETUP_SAM_SCRIPT: &str = "setup-sam.sh";
pub const SAM_TEMPLATE_FILE: &str = "template.yaml";
pub const OPTIONS_FILE: &str = "blueprint.yaml";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn workflow_file(workflow_name: &str) -> PathBuf {
    Path::new(WORKFLOWS_DIR).join(format!("{workflow_name}.yaml"))
}

pub fn setup_sam_script(repository: &str) -> PathBuf {
    Path::new(repository).join(SCRIPTS_DIR).join(SETUP_SAM_SCRIPT)
}

pub fn sam_template(repository: &str) -> PathBuf {
    Path::new(repository).join(SAM_TEMPLATE_FILE)
}

pub fn repository_workflow_file(repository: &str, workflow_name: &str) -> PathBuf {
    Path::new(repository).join(workflow_file(workflow_name))
}

/// Reject paths that are absolute or climb out of the output directory.
pub fn validate_relative(path: &Path) -> Result<()> {
    let escapes = path.as_os_str().is_empty()
        || path
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes {
        return Err(BlueprintError::InvalidScaffoldPath(
            path.display().to_string(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
