//! Startup configuration: the tabs, headers, header-group bands and sample rows
//! a fresh workspace is built from.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::state::cell::{CellKind, CellValue};

/// Environment variable naming an alternative seed file.
pub const SEED_ENV_VAR: &str = "SHEETGRID_SEED";

const EMBEDDED_SEED: &str = include_str!("../../assets/seed.json");

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("seed parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("header group `{group}` references unknown column `{column}`")]
    UnknownGroupColumn { group: String, column: String },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeedConfig {
    #[serde(default = "default_min_rows")]
    pub min_rows: usize,
    #[serde(default = "default_header_rows")]
    pub header_rows: usize,
    pub columns: Vec<SeedColumn>,
    #[serde(default)]
    pub header_groups: Vec<SeedHeaderGroup>,
    #[serde(default)]
    pub tabs: Vec<SeedTab>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeedColumn {
    pub name: String,
    #[serde(default)]
    pub kind: CellKind,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeedHeaderGroup {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub columns: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeedTab {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub rows: Vec<Vec<CellValue>>,
}

fn default_min_rows() -> usize {
    25
}

fn default_header_rows() -> usize {
    1
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            min_rows: default_min_rows(),
            header_rows: default_header_rows(),
            columns: Vec::new(),
            header_groups: Vec::new(),
            tabs: Vec::new(),
        }
    }
}

impl SeedConfig {
    pub fn embedded() -> Result<Self, SeedError> {
        Self::parse(EMBEDDED_SEED)
    }

    pub fn parse(source: &str) -> Result<Self, SeedError> {
        let config: SeedConfig = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, SeedError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Uses the file named by [`SEED_ENV_VAR`] when set and valid, else the embedded seed.
    pub fn from_env() -> Self {
        if let Ok(path) = std::env::var(SEED_ENV_VAR) {
            let path = PathBuf::from(path);
            match Self::load(&path) {
                Ok(config) => {
                    info!(path = %path.display(), "loaded seed override");
                    return config;
                }
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "ignoring seed override");
                }
            }
        }

        Self::embedded().unwrap_or_else(|err| {
            warn!(error = %err, "embedded seed is invalid, starting empty");
            Self::default()
        })
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    fn validate(&self) -> Result<(), SeedError> {
        for group in &self.header_groups {
            if let Some(missing) = group
                .columns
                .iter()
                .find(|column| self.column_index(column).is_none())
            {
                return Err(SeedError::UnknownGroupColumn {
                    group: group.label.clone(),
                    column: missing.clone(),
                });
            }
        }
        Ok(())
    }
}
