//! Differential and risk classification.
//!
//! Urgency, next steps and treatment guidance are derived from a ranked disease. Risk flags are
//! raised from the raw symptom tokens alone and do not depend on which disease ranked first.

use crate::analysis::{ReferralUrgency, RiskFlag, RiskFlagType, Severity, TreatmentGuidance, Urgency};
use crate::constants::{REFERRAL_STEP, UNDER_FIVE_MONITOR_STEP};
use crate::knowledge::{DiseaseDefinition, TriageLevel};
use crate::patient::PatientProfile;
use crate::symptoms::{any_contains, any_overlap};

/// Number of guideline entries copied into steps and guidance.
const GUIDANCE_ITEMS: usize = 2;

// ── Keyword sets ────────────────────────────────────────────

static DEHYDRATION_KEYWORDS: &[&str] = &["diarrhea", "vomiting", "dry mouth", "sunken eyes"];

static MALNUTRITION_KEYWORDS: &[&str] = &["weight loss", "poor growth", "weakness"];

static RESPIRATORY_KEYWORDS: &[&str] = &["difficulty breathing", "fast breathing", "chest pain"];

static FEVER_KEYWORDS: &[&str] = &["fever"];

/// Urgency label for a differential entry.
///
/// Emergency triage is always immediate. Any symptom overlapping one of the disease's emergency
/// signals escalates to immediate regardless of triage level.
pub fn urgency<S: AsRef<str>>(disease: &DiseaseDefinition, symptoms: &[S]) -> Urgency {
    if disease.triage_level == TriageLevel::Emergency
        || any_overlap(symptoms, &disease.emergency_signals)
    {
        return Urgency::Immediate;
    }

    match disease.triage_level {
        TriageLevel::High | TriageLevel::Medium => Urgency::Urgent,
        _ => Urgency::Routine,
    }
}

pub fn next_steps(disease: &DiseaseDefinition, profile: &PatientProfile) -> Vec<String> {
    let mut steps = Vec::new();
    if disease.triage_level.requires_referral() {
        steps.push(REFERRAL_STEP.to_string());
    }
    steps.extend(
        disease
            .treatment_guidelines
            .iter()
            .take(GUIDANCE_ITEMS)
            .cloned(),
    );
    if profile.is_under_five() {
        steps.push(UNDER_FIVE_MONITOR_STEP.to_string());
    }
    steps
}

pub fn treatment_guidance(disease: &DiseaseDefinition) -> TreatmentGuidance {
    let referral_urgency = if disease.triage_level == TriageLevel::Emergency {
        ReferralUrgency::Immediate
    } else {
        ReferralUrgency::Within24h
    };

    TreatmentGuidance {
        immediate: first_items(&disease.treatment_guidelines),
        follow_up: first_items(&disease.prevention_measures),
        referral_needed: disease.triage_level.requires_referral(),
        referral_urgency: Some(referral_urgency),
    }
}

fn first_items(items: &[String]) -> Vec<String> {
    items.iter().take(GUIDANCE_ITEMS).cloned().collect()
}

/// Symptom-pattern advisories, in a fixed order, each raised at most once.
///
/// `location` of `None` or `Some("")` suppresses the fever-cluster flag.
pub fn risk_flags<S: AsRef<str>>(
    symptoms: &[S],
    profile: &PatientProfile,
    location: Option<&str>,
) -> Vec<RiskFlag> {
    let mut flags = Vec::new();
    let under_five = profile.is_under_five();

    if any_contains(symptoms, DEHYDRATION_KEYWORDS) {
        flags.push(RiskFlag {
            kind: RiskFlagType::Dehydration,
            severity: if under_five {
                Severity::High
            } else {
                Severity::Medium
            },
            message: "High probability of dehydration detected".into(),
            action: "Assess hydration status immediately and consider ORS".into(),
        });
    }

    if under_five && any_contains(symptoms, MALNUTRITION_KEYWORDS) {
        flags.push(RiskFlag {
            kind: RiskFlagType::Malnutrition,
            severity: Severity::High,
            message: "Possible acute malnutrition in child under 5".into(),
            action: "Measure MUAC and refer for nutrition assessment".into(),
        });
    }

    if any_contains(symptoms, RESPIRATORY_KEYWORDS) {
        flags.push(RiskFlag {
            kind: RiskFlagType::RespiratoryDistress,
            severity: Severity::High,
            message: "Respiratory distress detected".into(),
            action: "Monitor breathing rate and oxygen saturation if available".into(),
        });
    }

    if let Some(location) = location.filter(|l| !l.is_empty()) {
        if any_contains(symptoms, FEVER_KEYWORDS) {
            flags.push(RiskFlag {
                kind: RiskFlagType::FeverCluster,
                severity: Severity::Medium,
                message: format!("Fever case in {} - monitor for outbreak patterns", location),
                action: "Report to surveillance system and follow up contacts".into(),
            });
        }
    }

    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::DiseaseCategory;
    use crate::patient::Gender;

    fn disease(triage_level: TriageLevel) -> DiseaseDefinition {
        DiseaseDefinition {
            id: "d".into(),
            name: "D".into(),
            category: DiseaseCategory::Infectious,
            common_symptoms: vec!["fever".into()],
            risk_factors: vec![],
            prevalent_regions: vec![],
            seasonality: None,
            treatment_guidelines: vec!["First".into(), "Second".into(), "Third".into()],
            prevention_measures: vec!["Net".into()],
            emergency_signals: vec!["convulsions".into()],
            triage_level,
            prevalence_score: 0,
        }
    }

    fn adult() -> PatientProfile {
        PatientProfile::new(30, Gender::Male, "").unwrap()
    }

    fn child() -> PatientProfile {
        PatientProfile::new(3, Gender::Female, "").unwrap()
    }

    fn kinds(flags: &[RiskFlag]) -> Vec<RiskFlagType> {
        flags.iter().map(|f| f.kind).collect()
    }

    #[test]
    fn urgency_follows_triage_level() {
        let none: [&str; 0] = [];
        assert_eq!(urgency(&disease(TriageLevel::Emergency), &none), Urgency::Immediate);
        assert_eq!(urgency(&disease(TriageLevel::High), &none), Urgency::Urgent);
        assert_eq!(urgency(&disease(TriageLevel::Medium), &none), Urgency::Urgent);
        assert_eq!(urgency(&disease(TriageLevel::Low), &none), Urgency::Routine);
    }

    #[test]
    fn emergency_signal_escalates_any_triage_level() {
        for level in [TriageLevel::Low, TriageLevel::Medium, TriageLevel::High] {
            assert_eq!(
                urgency(&disease(level), &["fever", "convulsions"]),
                Urgency::Immediate
            );
        }
        // Overlap works in both directions.
        assert_eq!(
            urgency(&disease(TriageLevel::Low), &["child had convulsions overnight"]),
            Urgency::Immediate
        );
    }

    #[test]
    fn next_steps_add_referral_and_under_five_monitoring() {
        assert_eq!(
            next_steps(&disease(TriageLevel::High), &child()),
            vec![
                REFERRAL_STEP.to_string(),
                "First".into(),
                "Second".into(),
                UNDER_FIVE_MONITOR_STEP.into(),
            ]
        );
        assert_eq!(
            next_steps(&disease(TriageLevel::Low), &adult()),
            vec!["First".to_string(), "Second".into()]
        );
    }

    #[test]
    fn guidance_referral_depends_on_triage() {
        let emergency = treatment_guidance(&disease(TriageLevel::Emergency));
        assert!(emergency.referral_needed);
        assert_eq!(emergency.referral_urgency, Some(ReferralUrgency::Immediate));
        assert_eq!(emergency.immediate, vec!["First", "Second"]);
        assert_eq!(emergency.follow_up, vec!["Net"]);

        let low = treatment_guidance(&disease(TriageLevel::Low));
        assert!(!low.referral_needed);
        assert_eq!(low.referral_urgency, Some(ReferralUrgency::Within24h));
    }

    #[test]
    fn dehydration_severity_depends_on_age() {
        let symptoms = ["watery diarrhea", "vomiting"];
        let child_flags = risk_flags(&symptoms, &child(), None);
        assert_eq!(kinds(&child_flags), vec![RiskFlagType::Dehydration]);
        assert_eq!(child_flags[0].severity, Severity::High);

        let adult_flags = risk_flags(&symptoms, &adult(), None);
        assert_eq!(adult_flags[0].severity, Severity::Medium);
    }

    #[test]
    fn malnutrition_only_for_under_fives() {
        assert_eq!(
            kinds(&risk_flags(&["weight loss"], &child(), None)),
            vec![RiskFlagType::Malnutrition]
        );
        assert!(risk_flags(&["weight loss"], &adult(), None).is_empty());
    }

    #[test]
    fn fever_cluster_needs_location() {
        let flags = risk_flags(&["fever"], &adult(), Some("Kilifi"));
        assert_eq!(kinds(&flags), vec![RiskFlagType::FeverCluster]);
        assert_eq!(flags[0].message, "Fever case in Kilifi - monitor for outbreak patterns");

        assert!(risk_flags(&["fever"], &adult(), Some("")).is_empty());
        assert!(risk_flags(&["fever"], &adult(), None).is_empty());
    }

    #[test]
    fn flags_come_in_fixed_order_and_once_each() {
        let symptoms = [
            "high fever",
            "fast breathing",
            "poor growth",
            "diarrhea",
            "vomiting",
        ];
        let flags = risk_flags(&symptoms, &child(), Some("Turkana"));
        assert_eq!(
            kinds(&flags),
            vec![
                RiskFlagType::Dehydration,
                RiskFlagType::Malnutrition,
                RiskFlagType::RespiratoryDistress,
                RiskFlagType::FeverCluster,
            ]
        );
    }

    #[test]
    fn risk_keywords_match_one_direction_only() {
        // "dry" is a substring of the keyword but does not contain it.
        assert!(risk_flags(&["dry"], &adult(), None).is_empty());
    }
}
