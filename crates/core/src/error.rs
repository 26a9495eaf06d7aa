/// Input that the engine refuses to score or record.
///
/// These are surfaced to the caller unchanged; the engine never coerces an invalid value
/// into a default.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("at least one symptom is required")]
    EmptySymptoms,
    #[error("age must be non-negative, got {0}")]
    NegativeAge(i64),
    #[error("age {0} is out of range")]
    AgeOutOfRange(i64),
    #[error("diagnosis_id is required")]
    MissingDiagnosisId,
    #[error("chw_id is required")]
    MissingChwId,
}

#[derive(Debug, thiserror::Error)]
pub enum DiagnosisError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to read catalog file: {0}")]
    CatalogRead(std::io::Error),
    #[error("failed to parse catalog YAML: {0}")]
    CatalogParse(serde_yaml::Error),
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),
    #[error("feedback log lock poisoned")]
    FeedbackLogPoisoned,
}

impl DiagnosisError {
    /// True when the caller supplied bad input, as opposed to a server-side fault.
    pub fn is_validation(&self) -> bool {
        matches!(self, DiagnosisError::Validation(_))
    }
}

pub type DiagnosisResult<T> = std::result::Result<T, DiagnosisError>;
