//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the statutory
//! limit table from YAML files.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::StatutoryLimitEntry;

use super::types::{LimitRevision, SchemeMetadata, StatutoryLimits};

/// Loads and provides access to the statutory limit table.
///
/// # Directory Structure
///
/// ```text
/// config/rps/
/// ├── scheme.yaml          # Scheme metadata
/// └── limits/
///     ├── 2024-04-06.yaml  # Weekly cap effective from this date
///     └── 2025-04-06.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use entitlement_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/rps").unwrap();
///
/// let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
/// println!("Weekly cap: £{}", loader.weekly_cap_on(date));
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    limits: StatutoryLimits,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `scheme.yaml` or the `limits/` directory is missing
    /// - Any file contains invalid YAML
    /// - Two limit files share an effective date
    ///
    /// An empty `limits/` directory loads an empty table; calculations then
    /// fall back to the default weekly cap.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use entitlement_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/rps")?;
    /// # Ok::<(), entitlement_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let scheme_path = path.join("scheme.yaml");
        let scheme = Self::load_yaml::<SchemeMetadata>(&scheme_path)?;

        let limits_dir = path.join("limits");
        let entries = Self::load_limits(&limits_dir)?;

        debug!(
            scheme = %scheme.code,
            entries = entries.len(),
            "Loaded statutory limits"
        );

        Ok(Self {
            limits: StatutoryLimits::new(scheme, entries),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all limit revision files from the limits directory.
    fn load_limits(limits_dir: &Path) -> EngineResult<Vec<StatutoryLimitEntry>> {
        let limits_dir_str = limits_dir.display().to_string();

        if !limits_dir.exists() {
            return Err(EngineError::ConfigNotFound {
                path: limits_dir_str,
            });
        }

        let dir_entries = fs::read_dir(limits_dir).map_err(|_| EngineError::ConfigNotFound {
            path: limits_dir_str.clone(),
        })?;

        let mut entries = Vec::new();
        let mut seen: HashSet<NaiveDate> = HashSet::new();

        for dir_entry in dir_entries {
            let dir_entry = dir_entry.map_err(|_| EngineError::ConfigNotFound {
                path: limits_dir_str.clone(),
            })?;

            let path = dir_entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let revision = Self::load_yaml::<LimitRevision>(&path)?;
                if !seen.insert(revision.effective_date) {
                    return Err(EngineError::DuplicateLimitEntry {
                        date: revision.effective_date,
                    });
                }
                if revision.weekly_cap <= Decimal::ZERO {
                    warn!(
                        path = %path.display(),
                        weekly_cap = %revision.weekly_cap,
                        "Statutory limit has a non-positive weekly cap"
                    );
                }
                entries.push(revision.into());
            }
        }

        if entries.is_empty() {
            warn!(
                path = %limits_dir_str,
                "No statutory limit files found, the fallback weekly cap will apply"
            );
        }

        Ok(entries)
    }

    /// Returns the limit entries, oldest first.
    pub fn entries(&self) -> &[StatutoryLimitEntry] {
        self.limits.entries()
    }

    /// Returns the scheme metadata.
    pub fn scheme(&self) -> &SchemeMetadata {
        self.limits.scheme()
    }

    /// Returns the weekly cap in force on `date`.
    pub fn weekly_cap_on(&self, date: NaiveDate) -> Decimal {
        self.limits.weekly_cap_on(date)
    }
}
