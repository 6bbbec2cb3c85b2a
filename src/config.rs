//! Runtime configuration utilities for trial-safety-view.

use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Deserialize;

/// Application configuration resolved from `.env` and defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Folder (or file) holding exported trial arm records.
    pub data_dir: PathBuf,
    /// Root folder for rendered pages.
    pub outputs_dir: PathBuf,
    /// Default page size for the trial arm listing.
    pub page_size: usize,
    /// Upper bound a client may request for the listing page size.
    pub max_page_size: usize,
}

impl Settings {
    /// Load configuration from environment with reasonable defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let data_dir = env::var("TRIAL_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data"));
        let outputs_dir = env::var("OUTPUTS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./outputs"));
        let max_page_size = env::var("API_MAX_PAGE_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(100);
        let page_size = env::var("API_PAGE_SIZE")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(25)
            .clamp(1, max_page_size.max(1));

        if !data_dir.is_file() {
            std::fs::create_dir_all(&data_dir).context("creating data dir")?;
        }
        std::fs::create_dir_all(&outputs_dir).context("creating outputs dir")?;

        Ok(Self {
            data_dir,
            outputs_dir,
            page_size,
            max_page_size,
        })
    }

    /// Settings rooted at explicit directories, without touching the environment.
    pub fn with_dirs(data_dir: impl Into<PathBuf>, outputs_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            outputs_dir: outputs_dir.into(),
            page_size: 25,
            max_page_size: 100,
        }
    }

    /// Convenience helper for derived output path segments.
    pub fn join_output<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        self.outputs_dir.join(path)
    }

    /// Clamp a client-requested page size to the configured bounds.
    pub fn page_size_for(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.page_size)
            .clamp(1, self.max_page_size.max(1))
    }
}
