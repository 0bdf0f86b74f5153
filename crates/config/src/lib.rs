//! Layered configuration for renamr.
//!
//! Values are merged, lowest priority first, from:
//!
//! 1. Built-in defaults ([`Config::default`]).
//! 2. A configuration file. Either the one passed to [`Loader::file`], or
//!    `config.toml`, `config.yaml` and `config.json` (in that order) from the
//!    platform configuration directory.
//! 3. Environment variables prefixed with `RENAMR_`, e.g. `RENAMR_DRY_RUN=true`.
//! 4. Explicit [`Overrides`], normally the command line flags.
//!
//! The merged configuration is validated before it is returned: the naming
//! template is compiled, so a bad template is reported here rather than when
//! the first file is processed.

pub mod error;

use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use renamr_engine::describe::describer::TitleDescriber;
use renamr_engine::describe::{DescriberKind, DescriberRegistry};
use renamr_engine::{DEFAULT_TEMPLATE, NamingTemplate, Renamer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const ENV_PREFIX: &str = "RENAMR_";
const CONFIG_STEM: &str = "config";

/// How `.txt` and `.pdf` files are turned into the `extra` fragment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextStyle {
    /// The first line of the leading text, as-is.
    #[default]
    Snippet,
    /// A cleaned-up title, date or first few words; see [`TitleDescriber`].
    Title,
}

impl FromStr for TextStyle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "snippet" => Ok(Self::Snippet),
            "title" => Ok(Self::Title),
            other => Err(format!("unknown text style {other:?}, expected \"snippet\" or \"title\"")),
        }
    }
}

impl fmt::Display for TextStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Snippet => "snippet",
            Self::Title => "title",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Naming template, see [`renamr_engine::NamingTemplate`].
    pub template: String,
    /// Plan renames without touching the filesystem.
    pub dry_run: bool,
    pub text_style: TextStyle,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
            dry_run: false,
            text_style: TextStyle::default(),
        }
    }
}

impl Config {
    /// Loads configuration from the default locations with no overrides.
    pub fn load() -> Result<Self> {
        Loader::new().load()
    }

    /// Compiles the configured template.
    pub fn naming_template(&self) -> Result<NamingTemplate> {
        self.template.parse::<NamingTemplate>().or_raise(|| ErrorKind::Template(self.template.clone()))
    }

    /// Builds a [`Renamer`] from this configuration.
    pub fn renamer(&self) -> Result<Renamer> {
        let renamer = Renamer::new(self.naming_template()?).with_dry_run(self.dry_run);
        Ok(match self.text_style {
            TextStyle::Snippet => renamer,
            TextStyle::Title => renamer
                .with_registry(DescriberRegistry::default().with(DescriberKind::Text, TitleDescriber::default())),
        })
    }
}

/// Values that take precedence over every other source.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dry_run: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_style: Option<TextStyle>,
}

#[derive(Clone, Debug)]
pub struct Loader {
    file: Option<PathBuf>,
    config_dir: Option<PathBuf>,
    env_prefix: String,
    overrides: Overrides,
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

impl Loader {
    pub fn new() -> Self {
        Self {
            file: None,
            config_dir: ProjectDirs::from("", "", "renamr").map(|dirs| dirs.config_dir().to_path_buf()),
            env_prefix: ENV_PREFIX.to_string(),
            overrides: Overrides::default(),
        }
    }

    /// Reads this file instead of searching the configuration directory.
    pub fn file(mut self, path: Option<impl Into<PathBuf>>) -> Self {
        self.file = path.map(Into::into);
        self
    }

    /// Searches `dir` instead of the platform configuration directory.
    pub fn config_dir(mut self, dir: Option<impl Into<PathBuf>>) -> Self {
        self.config_dir = dir.map(Into::into);
        self
    }

    pub fn env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    pub fn overrides(mut self, overrides: Overrides) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn figment(&self) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        match (&self.file, &self.config_dir) {
            (Some(file), _) => {
                if !file.is_file() {
                    exn::bail!(ErrorKind::NotFound(file.clone()));
                }
                figment = merge_file(figment, file)?;
            },
            (None, Some(dir)) => {
                for ext in ["toml", "yaml", "json"] {
                    let candidate = dir.join(CONFIG_STEM).with_extension(ext);
                    if candidate.is_file() {
                        tracing::debug!(path = %candidate.display(), "Found configuration file");
                        figment = merge_file(figment, &candidate)?;
                    }
                }
            },
            (None, None) => {},
        }
        Ok(figment
            .merge(Env::prefixed(&self.env_prefix))
            .merge(Serialized::globals(&self.overrides)))
    }

    /// Merges every source and validates the result.
    pub fn load(&self) -> Result<Config> {
        let config: Config = self.figment()?.extract().map_err(|e| ErrorKind::Invalid(e.to_string()))?;
        config.naming_template()?;
        tracing::debug!(template = %config.template, dry_run = config.dry_run, "Loaded configuration");
        Ok(config)
    }
}

fn merge_file(figment: Figment, path: &Path) -> Result<Figment> {
    let ext = path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);
    Ok(match ext.as_deref() {
        Some("toml") => figment.merge(Toml::file_exact(path)),
        Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path)),
        Some("json") => figment.merge(Json::file_exact(path)),
        _ => exn::bail!(ErrorKind::UnsupportedFormat(path.to_path_buf())),
    })
}
