//! Configuration management

use crate::types::{BackupError, SourcePath, SourcePathAttributes};
use clap::Parser;
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration file read when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Command line for the `quick-backups` binary
#[derive(Parser, Debug, Clone)]
#[command(name = "quick-backups", version, about = "Copy configured sources into a flat backup directory")]
pub struct Cli {
    /// YAML configuration file
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Print debug diagnostics to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Backup configuration, read once at startup and passed by reference
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Entries in declaration order
    #[serde(rename = "source paths", deserialize_with = "deserialize_source_paths")]
    pub source_paths: Vec<SourcePath>,

    /// Flat destination root
    #[serde(rename = "backup path")]
    pub backup_path: PathBuf,
}

impl Config {
    /// Read and parse a YAML configuration file
    ///
    /// Paths inside the file are not checked here; a missing source only
    /// surfaces when it is copied.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BackupError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| BackupError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text, path)
    }

    /// Parse configuration text; `origin` is only used in error messages
    pub fn from_yaml_str(text: &str, origin: impl AsRef<Path>) -> Result<Self, BackupError> {
        let config: Config =
            serde_yml::from_str(text).map_err(|source| BackupError::ConfigParse {
                path: origin.as_ref().to_path_buf(),
                source,
            })?;
        tracing::debug!(
            "Loaded {} source path(s), backup path {:?}",
            config.source_paths.len(),
            config.backup_path
        );
        Ok(config)
    }
}

impl TryFrom<&Cli> for Config {
    type Error = BackupError;

    fn try_from(cli: &Cli) -> Result<Self, Self::Error> {
        Config::load(&cli.config)
    }
}

struct SourcePathsVisitor;

impl<'de> Visitor<'de> for SourcePathsVisitor {
    type Value = Vec<SourcePath>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a mapping of source names to path entries")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut seen = HashSet::new();
        let mut sources = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((name, attrs)) = map.next_entry::<String, SourcePathAttributes>()? {
            if !seen.insert(name.clone()) {
                return Err(de::Error::custom(format!(
                    "duplicate source path name {name:?}"
                )));
            }
            sources.push(SourcePath::from_attributes(name, attrs));
        }
        Ok(sources)
    }
}

// Collects into a Vec in declaration order.
fn deserialize_source_paths<'de, D>(deserializer: D) -> Result<Vec<SourcePath>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_map(SourcePathsVisitor)
}
