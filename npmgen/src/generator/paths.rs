//! Paths of everything a generation run creates

use std::path::{Path, PathBuf};

/// Name of the source directory
pub const SRC_DIR: &str = "src";
/// Name of the entry file
pub const ENTRY_FILE: &str = "index.js";
/// Name of the package manifest
pub const MANIFEST_FILE: &str = "package.json";
/// Name of the babel configuration
pub const TRANSPILER_CONFIG_FILE: &str = ".babelrc";
/// Name of the eslint configuration
pub const LINT_CONFIG_FILE: &str = ".eslintrc.js";

/// Target paths derived from `cwd` and the project name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    /// `cwd/name`
    pub base: PathBuf,
    /// `base/src`
    pub src: PathBuf,
    /// `base/index.js`
    pub entry_file: PathBuf,
    /// `base/package.json`
    pub manifest_file: PathBuf,
    /// `base/.babelrc`
    pub transpiler_config_file: PathBuf,
    /// `base/.eslintrc.js`
    pub lint_config_file: PathBuf,
}

impl ProjectPaths {
    /// Derive all paths for project `name` under `cwd`
    #[must_use]
    pub fn new(cwd: &Path, name: &str) -> Self {
        let base = cwd.join(name);
        Self {
            src: base.join(SRC_DIR),
            entry_file: base.join(ENTRY_FILE),
            manifest_file: base.join(MANIFEST_FILE),
            transpiler_config_file: base.join(TRANSPILER_CONFIG_FILE),
            lint_config_file: base.join(LINT_CONFIG_FILE),
            base,
        }
    }
}
