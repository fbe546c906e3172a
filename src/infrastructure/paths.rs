//! Locates the local model script and dataset across ambiguous
//! working-directory layouts.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Subdirectory assumed to hold the project's scripts and data when the
/// process is launched from a parent checkout.
const MODULE_DIR: &str = "rustcast";

const FALLBACK_OUT_DIR: &str = "models/out";

/// Resolved filesystem locations for one local model run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelPaths {
    pub script: PathBuf,
    pub data: PathBuf,
    pub out_dir: PathBuf,
}

impl ModelPaths {
    /// Resolve against the process working directory.
    pub fn resolve(script_rel: &Path, data_rel: &Path) -> Result<Self> {
        let run_dir = std::env::current_dir().context("failed to read working directory")?;
        Self::resolve_from(&run_dir, script_rel, data_rel)
    }

    /// Candidate roots are tried in order: `<run_dir>/rustcast`, then
    /// `run_dir` itself. Script and dataset always resolve against the same
    /// root; a script from one root never pairs with the other root's data.
    ///
    /// A script missing from both candidates is not an error here — the
    /// module-root resolution is handed on and the invoker reports the
    /// failure at launch, naming the path it tried.
    pub fn resolve_from(run_dir: &Path, script_rel: &Path, data_rel: &Path) -> Result<Self> {
        let module_root = run_dir.join(MODULE_DIR);
        let mut script = module_root.join(script_rel);
        let mut data = module_root.join(data_rel);

        if !script.exists() {
            let alt_script = run_dir.join(script_rel);
            if alt_script.exists() {
                script = alt_script;
                data = run_dir.join(data_rel);
            }
        }

        let out_dir = match script.parent() {
            Some(parent) => parent.join("out"),
            None => run_dir.join(FALLBACK_OUT_DIR),
        };
        // Idempotent: an existing directory is fine.
        fs::create_dir_all(&out_dir).with_context(|| {
            format!(
                "failed to create model output directory {}",
                out_dir.display()
            )
        })?;

        Ok(Self {
            script,
            data,
            out_dir,
        })
    }
}
