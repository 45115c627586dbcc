//! Configuration management for npmgen
//!
//! Configuration is loaded from multiple sources with clear precedence:
//!
//! 1. Environment variables (highest priority, `NPMGEN_` prefix, `__` for nesting)
//! 2. `./npmgen.toml`
//! 3. `~/.config/npmgen/config.toml` (user config)
//! 4. Hardcoded defaults (fallback)
//!
//! # Example Configuration
//!
//! ```toml
//! # npmgen.toml
//! start_script = "nodemon --exec babel-node index"
//! template_dir = "./templates"
//!
//! [packages]
//! dev = ["@babel/core", "@babel/preset-env", "nodemon"]
//! project = ["express"]
//!
//! [installer]
//! program = "npm"
//! show_output = true
//! ```

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Start script written into the generated `package.json`
pub const DEFAULT_START_SCRIPT: &str = "nodemon --exec babel-node index";

/// Name of the project-local configuration file
pub const LOCAL_CONFIG_FILE: &str = "npmgen.toml";

/// Dependencies installed into every generated project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageList {
    /// Installed with `--save-dev`
    pub dev: Vec<String>,

    /// Installed as regular dependencies
    pub project: Vec<String>,
}

impl Default for PackageList {
    fn default() -> Self {
        Self {
            dev: [
                "@babel/cli",
                "@babel/core",
                "@babel/node",
                "@babel/preset-env",
                "eslint",
                "eslint-config-airbnb-base",
                "eslint-plugin-import",
                "nodemon",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            project: ["core-js", "regenerator-runtime"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Package manager settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallerSettings {
    /// Package manager executable
    pub program: String,

    /// Stream the package manager's output to the terminal
    pub show_output: bool,
}

impl Default for InstallerSettings {
    fn default() -> Self {
        Self {
            program: "npm".to_string(),
            show_output: true,
        }
    }
}

/// Complete npmgen configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Command substituted for `#start_script#`
    pub start_script: String,

    /// Directory holding `package.json.tpl`; built-in template when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_dir: Option<PathBuf>,

    /// Dependencies to install
    pub packages: PackageList,

    /// Package manager settings
    pub installer: InstallerSettings,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            start_script: DEFAULT_START_SCRIPT.to_string(),
            template_dir: None,
            packages: PackageList::default(),
            installer: InstallerSettings::default(),
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from the standard locations
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Default configuration cannot be serialized to TOML
    /// - A configuration file contains invalid TOML
    /// - Values fail type conversion
    pub fn load() -> anyhow::Result<Self> {
        let mut figment = Self::defaults()?;

        let user_config = Self::recommended_path();
        if user_config.exists() {
            figment = figment.merge(Toml::file(&user_config));
        }

        let local_config = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_config.exists() {
            figment = figment.merge(Toml::file(&local_config));
        }

        let config = figment.merge(Self::env()).extract()?;
        Ok(config)
    }

    /// Load configuration from a specific file
    ///
    /// Unlike [`GeneratorConfig::load`], a missing file is an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist, contains invalid TOML, or
    /// its values fail type conversion.
    pub fn load_from(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            anyhow::bail!("Configuration file not found: {}", path.display());
        }

        let config = Self::defaults()?
            .merge(Toml::file(path))
            .merge(Self::env())
            .extract()?;

        Ok(config)
    }

    /// Get the user config path, `~/.config/npmgen/config.toml` on Linux
    #[must_use]
    pub fn recommended_path() -> PathBuf {
        dirs::config_dir().map_or_else(
            || PathBuf::from(LOCAL_CONFIG_FILE),
            |config_dir| config_dir.join("npmgen").join("config.toml"),
        )
    }

    fn defaults() -> anyhow::Result<Figment> {
        Ok(Figment::new().merge(Toml::string(&toml::to_string(&Self::default())?)))
    }

    fn env() -> Env {
        Env::prefixed("NPMGEN_").split("__").lowercase(true)
    }
}
