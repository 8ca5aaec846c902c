//! Configuration types for the statutory limit source.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::calculation::lookup_weekly_cap;
use crate::models::StatutoryLimitEntry;

/// Metadata about the payment scheme the limits belong to.
#[derive(Debug, Clone, Deserialize)]
pub struct SchemeMetadata {
    /// Short scheme code (e.g., "RPS").
    pub code: String,
    /// The human-readable name of the scheme.
    pub name: String,
    /// The version or last revision date of the limit data.
    pub version: String,
    /// URL to the official published limits.
    pub source_url: String,
}

/// One limit revision file (`limits/<effective_date>.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct LimitRevision {
    /// The date from which this cap applies.
    pub effective_date: NaiveDate,
    /// The weekly pay cap.
    pub weekly_cap: Decimal,
}

impl From<LimitRevision> for StatutoryLimitEntry {
    fn from(revision: LimitRevision) -> Self {
        StatutoryLimitEntry::new(revision.effective_date, revision.weekly_cap)
    }
}

/// The statutory limit table loaded from YAML files.
#[derive(Debug, Clone)]
pub struct StatutoryLimits {
    /// Scheme metadata.
    scheme: SchemeMetadata,
    /// Limit entries by effective date (sorted oldest first).
    entries: Vec<StatutoryLimitEntry>,
}

impl StatutoryLimits {
    /// Creates a new table from its component parts, sorting entries oldest first.
    pub fn new(scheme: SchemeMetadata, entries: Vec<StatutoryLimitEntry>) -> Self {
        let mut sorted_entries = entries;
        sorted_entries.sort_by(|a, b| a.effective_date.cmp(&b.effective_date));
        Self {
            scheme,
            entries: sorted_entries,
        }
    }

    /// Returns the scheme metadata.
    pub fn scheme(&self) -> &SchemeMetadata {
        &self.scheme
    }

    /// Returns all limit entries, oldest first.
    pub fn entries(&self) -> &[StatutoryLimitEntry] {
        &self.entries
    }

    /// Returns the weekly cap in force on `date`.
    pub fn weekly_cap_on(&self, date: NaiveDate) -> Decimal {
        lookup_weekly_cap(&self.entries, Some(date))
    }
}
