//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the engine. Request
//! handling never reads environment variables, so two requests in the same process always see
//! the same season override and catalog.

use crate::constants::{DISEASES_FILENAME, LOCATIONS_FILENAME, OUTBREAKS_FILENAME};
use crate::{DiagnosisError, DiagnosisResult};
use chrono::{Datelike, Utc};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    season_month: Option<u32>,
    catalog_dir: Option<PathBuf>,
    include_outbreak_context: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            season_month: None,
            catalog_dir: None,
            include_outbreak_context: true,
        }
    }
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// `season_month` is zero-based (January = 0). When set, the seasonal rule uses it instead of
    /// the wall clock.
    pub fn new(
        season_month: Option<u32>,
        catalog_dir: Option<PathBuf>,
        include_outbreak_context: bool,
    ) -> DiagnosisResult<Self> {
        if let Some(month) = season_month {
            if month > 11 {
                return Err(DiagnosisError::InvalidInput(format!(
                    "season month must be 0-11, got {}",
                    month
                )));
            }
        }

        Ok(Self {
            season_month,
            catalog_dir,
            include_outbreak_context,
        })
    }

    /// Config pinned to a fixed month. Mostly useful in tests and reproducible reports.
    pub fn with_season_month(month0: u32) -> DiagnosisResult<Self> {
        Self::new(Some(month0), None, true)
    }

    pub fn season_month(&self) -> Option<u32> {
        self.season_month
    }

    pub fn catalog_dir(&self) -> Option<&Path> {
        self.catalog_dir.as_deref()
    }

    pub fn include_outbreak_context(&self) -> bool {
        self.include_outbreak_context
    }

    /// Zero-based month used by the seasonal rule.
    pub fn current_month0(&self) -> u32 {
        self.season_month.unwrap_or_else(|| Utc::now().month0())
    }
}

/// Parse the season override from an optional environment value.
///
/// The environment uses calendar months (1-12); the result is zero-based. `None` or blank means
/// "use the clock".
pub fn season_month_from_env_value(value: Option<String>) -> DiagnosisResult<Option<u32>> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    let Some(raw) = value else {
        return Ok(None);
    };

    let month: u32 = raw.parse().map_err(|_| {
        DiagnosisError::InvalidInput(format!("CHW_SEASON_MONTH must be 1-12, got '{}'", raw))
    })?;
    if !(1..=12).contains(&month) {
        return Err(DiagnosisError::InvalidInput(format!(
            "CHW_SEASON_MONTH must be 1-12, got {}",
            month
        )));
    }

    Ok(Some(month - 1))
}

/// Parse the outbreak-context default. Blank or missing means enabled.
pub fn outbreak_context_from_env_value(value: Option<String>) -> DiagnosisResult<bool> {
    let value = value
        .map(|v| v.trim().to_ascii_lowercase())
        .filter(|v| !v.is_empty());

    match value.as_deref() {
        None | Some("1" | "true" | "yes" | "on") => Ok(true),
        Some("0" | "false" | "no" | "off") => Ok(false),
        Some(other) => Err(DiagnosisError::InvalidInput(format!(
            "CHW_OUTBREAK_CONTEXT must be a boolean, got '{}'",
            other
        ))),
    }
}

/// Validate an optional catalog override directory.
///
/// When provided it must be a directory holding `diseases.yaml`, `outbreaks.yaml` and
/// `locations.yaml`. `None` selects the embedded catalog.
pub fn resolve_catalog_dir(override_dir: Option<PathBuf>) -> DiagnosisResult<Option<PathBuf>> {
    let Some(dir) = override_dir else {
        return Ok(None);
    };

    if !dir.is_dir() {
        return Err(DiagnosisError::InvalidInput(format!(
            "catalog directory does not exist: {}",
            dir.display()
        )));
    }

    for name in [DISEASES_FILENAME, OUTBREAKS_FILENAME, LOCATIONS_FILENAME] {
        if !dir.join(name).is_file() {
            return Err(DiagnosisError::InvalidInput(format!(
                "catalog directory {} is missing {}",
                dir.display(),
                name
            )));
        }
    }

    Ok(Some(dir))
}
