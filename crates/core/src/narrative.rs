//! Clinical reasoning text and red-flag phrases for the primary diagnosis.

use crate::knowledge::DiseaseDefinition;
use crate::patient::PatientProfile;
use crate::symptoms::overlaps;

/// Human-readable reasoning paragraph for `disease`.
///
/// The output is fully determined by the arguments; the same inputs always give the same bytes.
pub fn clinical_reasoning<S: AsRef<str>>(
    symptoms: &[S],
    profile: &PatientProfile,
    disease: &DiseaseDefinition,
    location: Option<&str>,
) -> String {
    let listed: Vec<&str> = symptoms.iter().map(|s| s.as_ref()).collect();

    let mut text = format!(
        "Patient presents with {}. Given the {}-year-old {} patient profile ",
        listed.join(", "),
        profile.age,
        profile.gender
    );

    if let Some(location) = location {
        let prevalence = if disease.is_prevalent_in(location) {
            "prevalent"
        } else {
            "less common"
        };
        text.push_str(&format!(
            "in {}, where {} is {}, ",
            location, disease.name, prevalence
        ));
    }

    text.push_str(&format!(
        "the constellation of symptoms most likely suggests {}. ",
        disease.name
    ));
    text.push_str("This diagnosis is supported by the regional epidemiology and symptom pattern. ");
    text.push_str(
        "Confidence level reflects the specificity of symptoms and local disease prevalence.",
    );
    text
}

/// One phrase per symptom that overlaps an emergency signal of `disease`, in input order.
/// Repeated symptoms produce repeated phrases.
pub fn red_flags<S: AsRef<str>>(symptoms: &[S], disease: &DiseaseDefinition) -> Vec<String> {
    symptoms
        .iter()
        .map(|s| s.as_ref())
        .filter(|s| disease.emergency_signals.iter().any(|sig| overlaps(s, sig)))
        .map(|s| format!("{} - requires immediate attention", s))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::{DiseaseCategory, TriageLevel};
    use crate::patient::Gender;

    fn malaria() -> DiseaseDefinition {
        DiseaseDefinition {
            id: "malaria".into(),
            name: "Malaria".into(),
            category: DiseaseCategory::Parasitic,
            common_symptoms: vec!["fever".into()],
            risk_factors: vec![],
            prevalent_regions: vec!["Kilifi".into()],
            seasonality: None,
            treatment_guidelines: vec![],
            prevention_measures: vec![],
            emergency_signals: vec!["convulsions".into(), "unconscious".into()],
            triage_level: TriageLevel::High,
            prevalence_score: 0,
        }
    }

    #[test]
    fn reasoning_with_prevalent_location() {
        let profile = PatientProfile::new(4, Gender::Female, "Kilifi").unwrap();
        let text = clinical_reasoning(&["fever", "chills"], &profile, &malaria(), Some("Kilifi"));
        assert_eq!(
            text,
            "Patient presents with fever, chills. Given the 4-year-old female patient profile \
             in Kilifi, where Malaria is prevalent, the constellation of symptoms most likely \
             suggests Malaria. This diagnosis is supported by the regional epidemiology and \
             symptom pattern. Confidence level reflects the specificity of symptoms and local \
             disease prevalence."
        );
    }

    #[test]
    fn reasoning_without_location_skips_clause() {
        let profile = PatientProfile::new(40, Gender::Male, "").unwrap();
        let text = clinical_reasoning(&["fever"], &profile, &malaria(), None);
        assert!(text.starts_with(
            "Patient presents with fever. Given the 40-year-old male patient profile the \
             constellation"
        ));

        let elsewhere = clinical_reasoning(&["fever"], &profile, &malaria(), Some("Wajir"));
        assert!(elsewhere.contains("in Wajir, where Malaria is less common, "));
    }

    #[test]
    fn red_flags_keep_order_and_duplicates() {
        let flags = red_flags(&["convulsions", "fever", "convulsions", "unconscious"], &malaria());
        assert_eq!(
            flags,
            vec![
                "convulsions - requires immediate attention",
                "convulsions - requires immediate attention",
                "unconscious - requires immediate attention",
            ]
        );
        assert!(red_flags(&["cough"], &malaria()).is_empty());
    }
}
