//! Constants used throughout the CHW core crate.
//!
//! Scoring weights, thresholds and the fixed wording of generated guidance live here so the
//! scoring, classification and narrative modules agree on them.

/// Maximum contribution of symptom overlap to a disease score.
pub const SYMPTOM_WEIGHT: f64 = 40.0;

/// Bonus when the location is one of the disease's prevalent regions.
pub const REGION_WEIGHT: f64 = 25.0;

/// Bonus for a matching age band and disease category.
pub const AGE_CATEGORY_WEIGHT: f64 = 15.0;

/// Bonus for rainy-season diseases during a rainy month.
pub const SEASON_WEIGHT: f64 = 10.0;

/// Bonus for an active outbreak of the disease at the location.
pub const OUTBREAK_WEIGHT: f64 = 10.0;

/// Lower clamp for a disease score.
pub const MIN_SCORE: f64 = 5.0;

/// Upper clamp for a disease score.
pub const MAX_SCORE: f64 = 95.0;

/// Candidates must score strictly above this to be reported.
pub const CONFIDENCE_THRESHOLD: f64 = 15.0;

/// Maximum number of differential diagnoses returned.
pub const MAX_DIFFERENTIALS: usize = 5;

/// Ages strictly below this are treated as under-fives.
pub const UNDER_FIVE_AGE: u32 = 5;

/// Reproductive age band used for the maternal bonus (inclusive).
pub const REPRODUCTIVE_AGE_MIN: u32 = 15;
pub const REPRODUCTIVE_AGE_MAX: u32 = 49;

/// Seasonality descriptors containing this marker get the seasonal bonus.
pub const RAINY_MARKER: &str = "rainy";

/// Number of corrections reported by regional learnings.
pub const MAX_COMMON_CORRECTIONS: usize = 3;

/// Symptom tokens shorter than this are discarded by the tokenizer.
pub const MIN_TOKEN_LEN: usize = 3;

pub const FALLBACK_DIAGNOSIS: &str = "Comprehensive clinical assessment needed";
pub const FALLBACK_CONFIDENCE: u32 = 40;
pub const FALLBACK_REASONING: &str = "Symptoms do not clearly match common regional disease patterns. Requires further clinical assessment and possibly laboratory investigation.";

pub const DEFAULT_CANDIDATE_REASONING: &str = "Based on symptom pattern analysis.";

pub const REFERRAL_STEP: &str = "Immediate referral to health facility";
pub const UNDER_FIVE_MONITOR_STEP: &str = "Monitor closely for deterioration";

/// Filenames expected inside a catalog override directory.
pub const DISEASES_FILENAME: &str = "diseases.yaml";
pub const OUTBREAKS_FILENAME: &str = "outbreaks.yaml";
pub const LOCATIONS_FILENAME: &str = "locations.yaml";

/// Facilities offering this service are eligible for immediate referrals.
pub const EMERGENCY_SERVICE: &str = "Emergency";
