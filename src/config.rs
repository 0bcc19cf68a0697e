// Configuration file handling

use crate::error::{ReportError, Result};
use crate::report::SchemaVariant;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file names, probed in the working directory then the home directory
pub const CONFIG_FILE_NAMES: [&str; 2] = [".browser-junitrc", ".browser-junitrc.toml"];

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Project root; relative output directories resolve against it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_path: Option<PathBuf>,

    #[serde(default)]
    pub junit: JunitConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JunitConfig {
    /// Package name used in legacy classnames and suite attributes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suite: Option<String>,

    /// Directory reports are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// File name, or an absolute path shared by every browser
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_file: Option<String>,

    /// Include the browser name in classnames and report paths
    #[serde(default = "default_use_browser_name")]
    pub use_browser_name: bool,

    /// 0 or absent for the legacy schema, 1 for the compact schema
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xml_version: Option<u8>,

    /// Extra suite properties, in declaration order
    #[serde(default)]
    pub properties: IndexMap<String, String>,
}

impl Default for JunitConfig {
    fn default() -> Self {
        Self {
            suite: None,
            output_dir: default_output_dir(),
            output_file: None,
            use_browser_name: default_use_browser_name(),
            xml_version: None,
            properties: IndexMap::new(),
        }
    }
}

pub fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_use_browser_name() -> bool {
    true
}

impl JunitConfig {
    /// Schema selected by `xml_version`
    pub fn schema_variant(&self) -> Result<SchemaVariant> {
        SchemaVariant::from_xml_version(self.xml_version)
    }

    /// Reject settings that cannot produce a report
    pub fn validate(&self) -> Result<()> {
        self.schema_variant()?;
        if self
            .output_file
            .as_deref()
            .is_some_and(|file| file.trim().is_empty())
        {
            return Err(ReportError::Config(
                "output_file must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration from default locations
    pub fn load() -> Option<Self> {
        let cwd = std::env::current_dir().ok()?;
        let home = dirs::home_dir()?;

        CONFIG_FILE_NAMES
            .iter()
            .flat_map(|name| [cwd.join(name), home.join(name)])
            .find(|path| path.exists())
            .and_then(|path| Self::load_from_file(&path))
    }

    /// Load configuration from a specific file, ignoring errors
    pub fn load_from_file(path: &Path) -> Option<Self> {
        Self::read(path).ok()
    }

    /// Load configuration from a file the user asked for explicitly
    pub fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ReportError::io(path, e))?;
        toml::from_str(&content)
            .map_err(|e| ReportError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> Option<Self> {
        toml::from_str(content).ok()
    }

    /// Generate configuration as TOML
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_else(|_| String::new())
    }

    /// Absolute base path, falling back to the working directory
    pub fn resolved_base_path(&self) -> PathBuf {
        match &self.base_path {
            Some(path) => std::path::absolute(path).unwrap_or_else(|_| path.clone()),
            None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }
}
