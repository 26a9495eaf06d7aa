//! Diagnosis engine: the entry point that ties scoring, classification, narrative and feedback
//! together.

use crate::analysis::{AnalysisResult, DifferentialEntry, LocationContext, TreatmentGuidance, Urgency};
use crate::classify::{next_steps, risk_flags, treatment_guidance, urgency};
use crate::constants::{FALLBACK_CONFIDENCE, FALLBACK_DIAGNOSIS, FALLBACK_REASONING, MAX_DIFFERENTIALS};
use crate::feedback::{
    FeedbackRecord, FeedbackStore, FeedbackSubmission, InMemoryFeedbackLog, RegionalLearnings,
    ValidatedFeedback,
};
use crate::knowledge::{KnowledgeBase, TriageLevel};
use crate::narrative::{clinical_reasoning, red_flags};
use crate::patient::PatientProfile;
use crate::scoring::{is_rainy_month, rank_diseases, ScoredCandidate, ScoringContext};
use crate::validation::normalise_symptoms;
use crate::{CoreConfig, DiagnosisResult};
use std::sync::Arc;

/// Symptom analysis and feedback service.
///
/// Cheap to clone; clones share the knowledge base and feedback store.
#[derive(Clone)]
pub struct DiagnosisEngine {
    cfg: Arc<CoreConfig>,
    kb: Arc<KnowledgeBase>,
    feedback: Arc<dyn FeedbackStore>,
}

impl DiagnosisEngine {
    pub fn new(
        cfg: Arc<CoreConfig>,
        kb: Arc<KnowledgeBase>,
        feedback: Arc<dyn FeedbackStore>,
    ) -> Self {
        Self { cfg, kb, feedback }
    }

    /// Engine backed by a fresh in-memory feedback log.
    pub fn with_in_memory_feedback(cfg: Arc<CoreConfig>, kb: Arc<KnowledgeBase>) -> Self {
        Self::new(cfg, kb, Arc::new(InMemoryFeedbackLog::new()))
    }

    pub fn config(&self) -> &CoreConfig {
        &self.cfg
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.kb
    }

    /// Rank the catalog against `symptoms` and build the full analysis.
    ///
    /// An empty `location` is treated the same as `None`. When no disease scores above the
    /// threshold a fixed fallback result is returned; that is not an error.
    ///
    /// # Errors
    ///
    /// Returns a validation error if no non-blank symptom is given.
    pub fn analyze<S: AsRef<str>>(
        &self,
        symptoms: &[S],
        profile: &PatientProfile,
        location: Option<&str>,
        include_outbreak_context: bool,
    ) -> DiagnosisResult<AnalysisResult> {
        let tokens = normalise_symptoms(symptoms)?;
        let symptoms = tokens.as_slice();
        let location = location.filter(|l| !l.is_empty());
        let month0 = self.cfg.current_month0();

        let ctx = ScoringContext {
            profile,
            location,
            include_outbreak_context,
            month0,
        };
        let ranked = rank_diseases(&self.kb, symptoms, &ctx);

        tracing::debug!(
            symptoms = symptoms.len(),
            candidates = ranked.len(),
            month0,
            "symptom analysis scored"
        );

        let Some(primary) = ranked.first() else {
            tracing::warn!(
                symptoms = symptoms.len(),
                location = location.unwrap_or(""),
                "no disease above confidence threshold, returning fallback"
            );
            return Ok(fallback_result(symptoms, profile, location));
        };

        let differential_diagnoses = ranked
            .iter()
            .take(MAX_DIFFERENTIALS)
            .map(|c| differential_entry(c, symptoms, profile))
            .collect();

        let disease = primary.disease;
        Ok(AnalysisResult {
            primary_diagnosis: disease.name.clone(),
            confidence: round_confidence(primary.confidence),
            triage_level: disease.triage_level,
            differential_diagnoses,
            treatment_guidance: treatment_guidance(disease),
            risk_flags: risk_flags(symptoms, profile, location),
            location_context: LocationContext {
                prevalent_in_region: location.is_some_and(|l| disease.is_prevalent_in(l)),
                seasonal_risk: disease.has_rainy_season() && is_rainy_month(month0),
                outbreak_risk: location
                    .and_then(|l| self.kb.outbreak_for(disease, l))
                    .is_some(),
            },
            clinical_reasoning: clinical_reasoning(symptoms, profile, disease, location),
            red_flags: red_flags(symptoms, disease),
        })
    }

    /// Validate and append feedback, returning the stored record.
    pub fn submit_feedback(&self, submission: FeedbackSubmission) -> DiagnosisResult<FeedbackRecord> {
        let feedback = ValidatedFeedback::try_from(submission)?;
        let record = self.feedback.append(feedback)?;
        tracing::info!(
            id = %record.id,
            diagnosis_id = %record.diagnosis_id,
            is_correct = record.is_correct,
            location = %record.location,
            "diagnosis feedback recorded"
        );
        Ok(record)
    }

    /// Accuracy summary of the feedback recorded for `location`.
    pub fn regional_learnings(&self, location: &str) -> DiagnosisResult<RegionalLearnings> {
        let records = self.feedback.by_location(location)?;
        Ok(RegionalLearnings::from_records(&records))
    }
}

fn round_confidence(score: f64) -> u32 {
    // Scores are clamped to 5..=95 before they get here.
    score.round() as u32
}

fn differential_entry(
    candidate: &ScoredCandidate<'_>,
    symptoms: &[String],
    profile: &PatientProfile,
) -> DifferentialEntry {
    DifferentialEntry {
        name: candidate.disease.name.clone(),
        confidence: round_confidence(candidate.confidence),
        reasoning: candidate.reasoning.clone(),
        urgency: urgency(candidate.disease, symptoms),
        next_steps: next_steps(candidate.disease, profile),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn fallback_result(
    symptoms: &[String],
    profile: &PatientProfile,
    location: Option<&str>,
) -> AnalysisResult {
    AnalysisResult {
        primary_diagnosis: FALLBACK_DIAGNOSIS.to_string(),
        confidence: FALLBACK_CONFIDENCE,
        triage_level: TriageLevel::Medium,
        differential_diagnoses: vec![
            DifferentialEntry {
                name: "Viral syndrome".into(),
                confidence: 60,
                reasoning: "Common viral illness with non-specific symptoms".into(),
                urgency: Urgency::Routine,
                next_steps: strings(&[
                    "Symptomatic treatment",
                    "Monitor for deterioration",
                    "Return if symptoms worsen",
                ]),
            },
            DifferentialEntry {
                name: "Bacterial infection".into(),
                confidence: 40,
                reasoning: "Possible bacterial cause requiring investigation".into(),
                urgency: Urgency::Urgent,
                next_steps: strings(&[
                    "Consider antibiotics",
                    "Laboratory tests if available",
                    "Follow up in 24-48 hours",
                ]),
            },
        ],
        treatment_guidance: TreatmentGuidance {
            immediate: strings(&[
                "Symptomatic relief",
                "Maintain hydration",
                "Monitor vital signs",
            ]),
            follow_up: strings(&[
                "Return if symptoms persist >3 days",
                "Seek immediate care if deteriorating",
            ]),
            referral_needed: false,
            referral_urgency: None,
        },
        risk_flags: risk_flags(symptoms, profile, location),
        location_context: LocationContext::default(),
        clinical_reasoning: FALLBACK_REASONING.to_string(),
        red_flags: Vec::new(),
    }
}
