//! The engine's output record and its parts.
//!
//! There is exactly one result shape. The fallback path fills the same struct, so callers can
//! rely on every field being present.

use crate::knowledge::TriageLevel;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "kebab-case")]
pub enum Urgency {
    Immediate,
    Urgent,
    Routine,
    SelfCare,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum ReferralUrgency {
    Immediate,
    #[serde(rename = "within_24h")]
    Within24h,
    WithinWeek,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum RiskFlagType {
    Dehydration,
    Malnutrition,
    RespiratoryDistress,
    FeverCluster,
    OutbreakRisk,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// A symptom-pattern advisory, raised independently of disease ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RiskFlag {
    #[serde(rename = "type")]
    pub kind: RiskFlagType,
    pub severity: Severity,
    pub message: String,
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct DifferentialEntry {
    pub name: String,
    pub confidence: u32,
    pub reasoning: String,
    pub urgency: Urgency,
    pub next_steps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct TreatmentGuidance {
    pub immediate: Vec<String>,
    pub follow_up: Vec<String>,
    pub referral_needed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referral_urgency: Option<ReferralUrgency>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct LocationContext {
    pub prevalent_in_region: bool,
    pub seasonal_risk: bool,
    pub outbreak_risk: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub primary_diagnosis: String,
    /// Rounded confidence, 5-95 for a matched disease or 40 for the fallback.
    pub confidence: u32,
    pub triage_level: TriageLevel,
    /// At most five entries, non-increasing by confidence.
    pub differential_diagnoses: Vec<DifferentialEntry>,
    pub treatment_guidance: TreatmentGuidance,
    pub risk_flags: Vec<RiskFlag>,
    pub location_context: LocationContext,
    pub clinical_reasoning: String,
    pub red_flags: Vec<String>,
}

impl AnalysisResult {
    /// True when no disease cleared the confidence threshold.
    pub fn is_fallback(&self) -> bool {
        self.primary_diagnosis == crate::constants::FALLBACK_DIAGNOSIS
    }
}
