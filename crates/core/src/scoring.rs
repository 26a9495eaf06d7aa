//! Weighted multi-factor disease scoring and ranking.
//!
//! Each disease gets a confidence out of 100 built from five rules:
//!
//! | rule                  | weight |
//! |-----------------------|--------|
//! | symptom overlap       | 40 (proportional) |
//! | regional prevalence   | 25 |
//! | age/category          | 15 + 15 |
//! | rainy season          | 10 |
//! | active outbreak       | 10 |
//!
//! The total is clamped to 5..=95. Candidates above 15 are ranked by a stable descending sort,
//! so ties keep catalog order.

use crate::constants::{
    AGE_CATEGORY_WEIGHT, CONFIDENCE_THRESHOLD, DEFAULT_CANDIDATE_REASONING, MAX_SCORE, MIN_SCORE,
    OUTBREAK_WEIGHT, REGION_WEIGHT, REPRODUCTIVE_AGE_MAX, REPRODUCTIVE_AGE_MIN, SEASON_WEIGHT,
    SYMPTOM_WEIGHT,
};
use crate::knowledge::{DiseaseCategory, DiseaseDefinition, KnowledgeBase};
use crate::patient::PatientProfile;
use crate::symptoms::overlaps;

/// Zero-based months of the long (Mar-May) and short (Oct-Dec) rains.
pub fn is_rainy_month(month0: u32) -> bool {
    matches!(month0, 2..=4 | 9..=11)
}

/// Everything besides the disease itself that a score depends on.
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext<'a> {
    pub profile: &'a PatientProfile,
    /// `None` when the caller gave no location or an empty one.
    pub location: Option<&'a str>,
    pub include_outbreak_context: bool,
    pub month0: u32,
}

/// A disease with its computed confidence. Produced per call, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate<'kb> {
    pub disease: &'kb DiseaseDefinition,
    /// Clamped to 5..=95.
    pub confidence: f64,
    pub matched_symptoms: Vec<&'kb str>,
    pub reasoning: String,
}

/// Common symptoms of `disease` that overlap some input token, in catalog order.
pub fn matched_symptoms<'kb, S: AsRef<str>>(
    disease: &'kb DiseaseDefinition,
    symptoms: &[S],
) -> Vec<&'kb str> {
    disease
        .common_symptoms
        .iter()
        .filter(|s| symptoms.iter().any(|t| overlaps(t.as_ref(), s)))
        .map(String::as_str)
        .collect()
}

/// Score one disease.
pub fn score_disease<'kb, S: AsRef<str>>(
    kb: &'kb KnowledgeBase,
    disease: &'kb DiseaseDefinition,
    symptoms: &[S],
    ctx: &ScoringContext<'_>,
) -> ScoredCandidate<'kb> {
    let mut score: f64 = 0.0;
    let mut reasoning = String::new();

    let matched = matched_symptoms(disease, symptoms);
    score += SYMPTOM_WEIGHT * matched.len() as f64 / disease.common_symptoms.len() as f64;
    if !matched.is_empty() {
        reasoning.push_str(&format!("Symptoms match: {}. ", matched.join(", ")));
    }

    if let Some(location) = ctx.location {
        if disease.is_prevalent_in(location) {
            score += REGION_WEIGHT;
            reasoning.push_str(&format!("High prevalence in {}. ", location));
        }
    }

    let age = ctx.profile.age;
    if ctx.profile.is_under_five() && disease.category == DiseaseCategory::ChildHealth {
        score += AGE_CATEGORY_WEIGHT;
        reasoning.push_str("Common in children under 5. ");
    }
    if (REPRODUCTIVE_AGE_MIN..=REPRODUCTIVE_AGE_MAX).contains(&age)
        && disease.category == DiseaseCategory::Maternal
    {
        score += AGE_CATEGORY_WEIGHT;
        reasoning.push_str("Relevant for reproductive age group. ");
    }

    if disease.has_rainy_season() && is_rainy_month(ctx.month0) {
        score += SEASON_WEIGHT;
        reasoning.push_str("Currently in high-risk season. ");
    }

    if ctx.include_outbreak_context {
        if let Some(outbreak) = ctx.location.and_then(|loc| kb.outbreak_for(disease, loc)) {
            score += OUTBREAK_WEIGHT;
            reasoning.push_str(&format!("Active outbreak in area ({} cases). ", outbreak.cases));
        }
    }

    let reasoning = reasoning.trim_end().to_string();
    ScoredCandidate {
        disease,
        confidence: score.clamp(MIN_SCORE, MAX_SCORE),
        matched_symptoms: matched,
        reasoning: if reasoning.is_empty() {
            DEFAULT_CANDIDATE_REASONING.to_string()
        } else {
            reasoning
        },
    }
}

/// Score every disease and keep those above the threshold, best first.
pub fn rank_diseases<'kb, S: AsRef<str>>(
    kb: &'kb KnowledgeBase,
    symptoms: &[S],
    ctx: &ScoringContext<'_>,
) -> Vec<ScoredCandidate<'kb>> {
    let mut ranked: Vec<ScoredCandidate<'kb>> = kb
        .diseases()
        .iter()
        .map(|d| score_disease(kb, d, symptoms, ctx))
        .filter(|c| c.confidence > CONFIDENCE_THRESHOLD)
        .collect();

    // `sort_by` is stable, so equal scores keep catalog order.
    ranked.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    ranked
}
