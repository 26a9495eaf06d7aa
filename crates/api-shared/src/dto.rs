//! Request and response bodies for the CHW APIs.
//!
//! Wire names are camelCase to match the analysis result the engine serialises.

use chw_core::{
    tokenize_symptoms, Gender, PatientProfile, PregnancyStatus, ReferralUrgency, ValidationError,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Patient details as sent by a client. Age is signed so a negative value can be rejected with
/// a validation error instead of a deserialisation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileReq {
    pub age: i64,
    pub gender: Gender,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub medical_history: Option<Vec<String>>,
    #[serde(default)]
    pub pregnancy_status: Option<PregnancyStatus>,
}

impl ProfileReq {
    pub fn to_profile(&self) -> Result<PatientProfile, ValidationError> {
        let mut profile = PatientProfile::new(self.age, self.gender, self.location.clone())?;
        if let Some(history) = &self.medical_history {
            profile = profile.with_medical_history(history.clone());
        }
        if let Some(status) = self.pregnancy_status {
            profile = profile.with_pregnancy_status(status);
        }
        Ok(profile)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeReq {
    /// Symptom tokens, already split.
    #[serde(default)]
    pub symptoms: Vec<String>,
    /// Free text; tokenized and appended after `symptoms`.
    #[serde(default)]
    pub symptom_text: Option<String>,
    pub profile: ProfileReq,
    /// Falls back to the profile location when absent.
    #[serde(default)]
    pub location: Option<String>,
    /// Falls back to the server default when absent.
    #[serde(default)]
    pub include_outbreak_context: Option<bool>,
}

impl AnalyzeReq {
    /// All symptom tokens: explicit ones first, then those parsed from `symptom_text`.
    pub fn symptom_tokens(&self) -> Vec<String> {
        let mut tokens = self.symptoms.clone();
        if let Some(text) = &self.symptom_text {
            tokens.extend(tokenize_symptoms(text));
        }
        tokens
    }

    pub fn location(&self) -> Option<&str> {
        self.location
            .as_deref()
            .or(Some(self.profile.location.as_str()))
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OutbreakQuery {
    /// Exact location name.
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FacilityQuery {
    /// Exact county name.
    pub county: Option<String>,
    /// Case-insensitive free-text search.
    pub q: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReferralQuery {
    /// Defaults to `within_24h`.
    pub urgency: Option<ReferralUrgency>,
}

impl ReferralQuery {
    pub fn urgency(&self) -> ReferralUrgency {
        self.urgency.unwrap_or(ReferralUrgency::Within24h)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

impl ErrorRes {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: serde_json::Value) -> AnalyzeReq {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn tokens_combine_list_and_text() {
        let req = request(serde_json::json!({
            "symptoms": ["fever"],
            "symptomText": "Chills, body aches. ok",
            "profile": {"age": 4, "gender": "female"}
        }));
        assert_eq!(req.symptom_tokens(), vec!["fever", "chills", "body", "aches"]);
    }

    #[test]
    fn location_defaults_to_profile() {
        let req = request(serde_json::json!({
            "profile": {"age": 30, "gender": "male", "location": "Wajir"}
        }));
        assert_eq!(req.location(), Some("Wajir"));

        let req = request(serde_json::json!({
            "location": "Kitui",
            "profile": {"age": 30, "gender": "male", "location": "Wajir"}
        }));
        assert_eq!(req.location(), Some("Kitui"));
    }

    #[test]
    fn negative_age_is_a_validation_error() {
        let req = request(serde_json::json!({
            "profile": {"age": -3, "gender": "male"}
        }));
        assert_eq!(
            req.profile.to_profile().unwrap_err(),
            ValidationError::NegativeAge(-3)
        );
    }

    #[test]
    fn profile_carries_optional_fields() {
        let req = request(serde_json::json!({
            "profile": {"age": 24, "gender": "female", "pregnancyStatus": "pregnant"}
        }));
        let profile = req.profile.to_profile().unwrap();
        assert_eq!(profile.pregnancy_status, Some(PregnancyStatus::Pregnant));
        assert!(profile.medical_history.is_none());
    }
}
