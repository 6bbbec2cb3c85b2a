//! Loading trial arm records from exported JSON and CSV files.
//!
//! Upstream exports encode decimals as strings and may omit optional
//! fields, so all parsing and validation happens here. Everything past this
//! module works with fully typed [`TrialArm`] values.

pub mod arms;
pub mod tabular;

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::safety::TrialArm;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("walking {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("parsing JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("parsing CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("unsupported file type: {0}")]
    UnsupportedFormat(PathBuf),
    #[error("arm {arm_code}: invalid {field}: {reason}")]
    Invalid {
        arm_code: String,
        field: &'static str,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Csv,
}

fn detect_format(path: &Path) -> Option<Format> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "json" => Some(Format::Json),
        "csv" => Some(Format::Csv),
        _ => None,
    }
}

/// Load arms from a single file or, recursively, from every JSON/CSV file
/// under a directory (in path order).
pub fn load_path(path: &Path) -> Result<Vec<TrialArm>, DataError> {
    let arms = if path.is_dir() {
        load_dir(path)?
    } else {
        let format =
            detect_format(path).ok_or_else(|| DataError::UnsupportedFormat(path.to_path_buf()))?;
        load_file(path, format)?
    };
    warn_duplicate_codes(&arms);
    info!(path = %path.display(), arms = arms.len(), "loaded trial arms");
    Ok(arms)
}

fn load_dir(root: &Path) -> Result<Vec<TrialArm>, DataError> {
    let mut arms = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|source| DataError::Walk {
            path: root.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        match detect_format(entry.path()) {
            Some(format) => arms.extend(load_file(entry.path(), format)?),
            None => debug!(path = %entry.path().display(), "skipping non-data file"),
        }
    }
    Ok(arms)
}

fn load_file(path: &Path, format: Format) -> Result<Vec<TrialArm>, DataError> {
    match format {
        Format::Json => {
            let text = std::fs::read_to_string(path).map_err(|source| DataError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            arms::parse_json(&text, path)
        }
        Format::Csv => tabular::read_csv(path),
    }
}

fn warn_duplicate_codes(arms: &[TrialArm]) {
    let mut seen = HashSet::new();
    for arm in arms {
        let key = (arm.nct_number.as_deref(), arm.arm_code.as_str());
        if !seen.insert(key) {
            warn!(arm = %arm.arm_code, nct = ?arm.nct_number, "duplicate trial arm record");
        }
    }
}
