// CLI argument definitions using Clap

use crate::config::Config;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Write JUnit XML reports from a recorded browser test run
#[derive(Parser, Debug)]
#[command(name = "browser-junit")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Turn browser test lifecycle events into JUnit XML reports", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose debug output
    #[arg(short = 'v', long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Read configuration from this file instead of the default locations
    #[arg(long, global = true, value_name = "CONFIG_FILE")]
    pub config_file: Option<PathBuf>,

    /// Show current configuration and exit
    #[arg(long, default_value_t = false)]
    pub config: bool,

    /// Create default configuration file
    #[arg(long, value_name = "CONFIG_FILE")]
    pub init_config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay newline-delimited JSON lifecycle events and write reports
    Replay(ReplayArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct ReplayArgs {
    /// Event stream file, or `-` for stdin
    #[arg(default_value = "-")]
    pub events: PathBuf,

    /// Directory reports are written to
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Report file name, or an absolute path shared by all browsers
    #[arg(short = 'f', long, value_name = "FILE")]
    pub output_file: Option<String>,

    /// Package name used in classnames
    #[arg(short = 's', long)]
    pub suite: Option<String>,

    /// Report schema version (0 = legacy, 1 = compact)
    #[arg(long, value_name = "VERSION")]
    pub xml_version: Option<u8>,

    /// Keep browser names out of classnames and report paths
    #[arg(long, default_value_t = false)]
    pub no_browser_name: bool,

    /// Extra suite property (repeatable)
    #[arg(long = "property", value_name = "KEY=VALUE", value_parser = parse_property)]
    pub properties: Vec<(String, String)>,

    /// Project root that relative output directories resolve against
    #[arg(long, value_name = "DIR")]
    pub base_path: Option<PathBuf>,
}

impl ReplayArgs {
    /// Whether events come from stdin
    pub fn reads_stdin(&self) -> bool {
        self.events.as_os_str() == "-"
    }

    /// Layer command-line overrides on top of file configuration
    pub fn apply(&self, config: &mut Config) {
        if let Some(dir) = &self.output_dir {
            config.junit.output_dir = dir.clone();
        }
        if let Some(file) = &self.output_file {
            config.junit.output_file = Some(file.clone());
        }
        if let Some(suite) = &self.suite {
            config.junit.suite = Some(suite.clone());
        }
        if self.xml_version.is_some() {
            config.junit.xml_version = self.xml_version;
        }
        if self.no_browser_name {
            config.junit.use_browser_name = false;
        }
        for (key, value) in &self.properties {
            config.junit.properties.insert(key.clone(), value.clone());
        }
        if let Some(base) = &self.base_path {
            config.base_path = Some(base.clone());
        }
    }
}

fn parse_property(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got `{}`", raw)),
    }
}
