//! Catalog record types.
//!
//! Field names serialise in camelCase, both in the YAML catalog and in API responses.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Broad grouping used by the age/category scoring rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum DiseaseCategory {
    Infectious,
    Parasitic,
    Respiratory,
    Nutritional,
    Chronic,
    Maternal,
    #[serde(rename = "Child Health")]
    ChildHealth,
}

/// Coarse urgency of a disease, driving referral policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum TriageLevel {
    Low,
    Medium,
    High,
    Emergency,
}

impl TriageLevel {
    /// High and emergency diseases are referred to a facility.
    pub fn requires_referral(self) -> bool {
        matches!(self, TriageLevel::High | TriageLevel::Emergency)
    }
}

/// One disease in the knowledge base. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct DiseaseDefinition {
    pub id: String,
    pub name: String,
    pub category: DiseaseCategory,
    /// Never empty; the knowledge base rejects definitions without symptoms.
    pub common_symptoms: Vec<String>,
    #[serde(default)]
    pub risk_factors: Vec<String>,
    #[serde(default)]
    pub prevalent_regions: Vec<String>,
    #[serde(default)]
    pub seasonality: Option<String>,
    #[serde(default)]
    pub treatment_guidelines: Vec<String>,
    #[serde(default)]
    pub prevention_measures: Vec<String>,
    #[serde(default)]
    pub emergency_signals: Vec<String>,
    pub triage_level: TriageLevel,
    /// Informational baseline prevalence; not used in scoring.
    #[serde(default)]
    pub prevalence_score: u32,
}

impl DiseaseDefinition {
    pub fn is_prevalent_in(&self, location: &str) -> bool {
        self.prevalent_regions.iter().any(|r| r == location)
    }

    /// Case-sensitive check, matching how the catalog words its seasons.
    pub fn has_rainy_season(&self) -> bool {
        self.seasonality
            .as_deref()
            .is_some_and(|s| s.contains(crate::constants::RAINY_MARKER))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Watch,
    Warning,
    Emergency,
}

/// An active outbreak reported for a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct OutbreakRecord {
    pub id: String,
    pub disease: String,
    pub location: String,
    pub cases: u32,
    pub alert_level: AlertLevel,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = Date))]
    pub start_date: NaiveDate,
    pub description: String,
}

impl OutbreakRecord {
    /// Whether this outbreak concerns `disease_name` at `location`.
    ///
    /// Location must match exactly; the disease check is a case-insensitive containment of the
    /// catalog name in the outbreak's disease label.
    pub fn concerns(&self, disease_name: &str, location: &str) -> bool {
        self.location == location
            && self
                .disease
                .to_lowercase()
                .contains(&disease_name.to_lowercase())
    }

    /// Warning and emergency outbreaks are surfaced as alerts; watch-level ones are not.
    pub fn is_alerting(&self) -> bool {
        self.alert_level >= AlertLevel::Warning
    }
}
