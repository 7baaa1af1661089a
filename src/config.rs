// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use std::path::PathBuf;

use crate::ledger::DEFAULT_COLLECTION_KEY;
use crate::store::FileStore;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Fintrack", "fintrack"));

pub const DATA_DIR_ENV: &str = "FINTRACK_DATA_DIR";
pub const COLLECTION_ENV: &str = "FINTRACK_COLLECTION";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub collection_key: String,
}

impl Settings {
    /// Command-line override first, then the environment, then platform defaults.
    pub fn resolve(data_dir: Option<PathBuf>) -> Result<Self> {
        Self::from_lookup(data_dir, |name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(data_dir: Option<PathBuf>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => match lookup(DATA_DIR_ENV).filter(|s| !s.trim().is_empty()) {
                Some(dir) => PathBuf::from(dir),
                None => default_data_dir()?,
            },
        };
        let collection_key = lookup(COLLECTION_ENV)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_COLLECTION_KEY.to_string());
        Ok(Self {
            data_dir,
            collection_key,
        })
    }

    pub fn open_store(&self) -> Result<FileStore> {
        FileStore::open(&self.data_dir)
            .with_context(|| format!("Open data dir at {}", self.data_dir.display()))
    }
}

pub fn default_data_dir() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    Ok(proj.data_dir().to_path_buf())
}
