//! Patient profile supplied with each analysis request.
//!
//! Profiles are never stored; one lives for the duration of a single `analyze` call.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => f.write_str("male"),
            Gender::Female => f.write_str("female"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "kebab-case")]
pub enum PregnancyStatus {
    Pregnant,
    NotPregnant,
    Postpartum,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct PatientProfile {
    /// Age in whole years.
    pub age: u32,
    pub gender: Gender,
    /// Home location of the patient; may be empty.
    #[serde(default)]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medical_history: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pregnancy_status: Option<PregnancyStatus>,
}

impl PatientProfile {
    /// Create a profile, rejecting a negative age.
    ///
    /// Age arrives as a signed value from forms and request bodies; it is checked here rather
    /// than clamped so an invalid age never reaches the scoring rules.
    pub fn new(
        age: i64,
        gender: Gender,
        location: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        if age < 0 {
            return Err(ValidationError::NegativeAge(age));
        }
        let age = u32::try_from(age).map_err(|_| ValidationError::AgeOutOfRange(age))?;
        Ok(Self {
            age,
            gender,
            location: location.into(),
            medical_history: None,
            pregnancy_status: None,
        })
    }

    pub fn with_medical_history(mut self, history: Vec<String>) -> Self {
        self.medical_history = Some(history);
        self
    }

    pub fn with_pregnancy_status(mut self, status: PregnancyStatus) -> Self {
        self.pregnancy_status = Some(status);
        self
    }

    pub fn is_under_five(&self) -> bool {
        self.age < crate::constants::UNDER_FIVE_AGE
    }
}
