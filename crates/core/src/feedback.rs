//! Diagnosis feedback: an append-only log of CHW corrections and per-location aggregates.
//!
//! The log sits behind [`FeedbackStore`] so the engine can be handed any backing store. The
//! bundled [`InMemoryFeedbackLog`] keeps records for the life of the process only.

use crate::constants::MAX_COMMON_CORRECTIONS;
use crate::error::ValidationError;
use crate::validation::require_text;
use crate::{DiagnosisError, DiagnosisResult};
use chrono::{DateTime, Utc};
use chw_types::NonEmptyText;
use chw_uuid::TimestampUuid;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

/// Feedback as submitted by a CHW, before an id and timestamp are assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct FeedbackSubmission {
    pub diagnosis_id: String,
    pub chw_id: String,
    pub is_correct: bool,
    #[serde(default)]
    pub actual_diagnosis: Option<String>,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub location: String,
}

/// A stored feedback entry. Never modified after it is appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRecord {
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub id: TimestampUuid,
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub diagnosis_id: NonEmptyText,
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub chw_id: NonEmptyText,
    pub is_correct: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_diagnosis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = DateTime))]
    pub timestamp: DateTime<Utc>,
    pub location: String,
}

/// Feedback with its required fields checked, ready to be stamped by a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedFeedback {
    pub diagnosis_id: NonEmptyText,
    pub chw_id: NonEmptyText,
    pub is_correct: bool,
    pub actual_diagnosis: Option<String>,
    pub comments: Option<String>,
    pub location: String,
}

impl TryFrom<FeedbackSubmission> for ValidatedFeedback {
    type Error = ValidationError;

    fn try_from(submission: FeedbackSubmission) -> Result<Self, Self::Error> {
        Ok(Self {
            diagnosis_id: require_text(
                &submission.diagnosis_id,
                ValidationError::MissingDiagnosisId,
            )?,
            chw_id: require_text(&submission.chw_id, ValidationError::MissingChwId)?,
            is_correct: submission.is_correct,
            actual_diagnosis: submission.actual_diagnosis,
            comments: submission.comments,
            location: submission.location,
        })
    }
}

/// Append-only feedback storage.
pub trait FeedbackStore: Send + Sync {
    /// Assign an id and timestamp, store the record and return it.
    ///
    /// Ids returned by one store are strictly increasing.
    fn append(&self, feedback: ValidatedFeedback) -> DiagnosisResult<FeedbackRecord>;

    /// Records whose location equals `location` exactly, in insertion order.
    fn by_location(&self, location: &str) -> DiagnosisResult<Vec<FeedbackRecord>>;
}

/// Process-local feedback log guarded by a read/write lock.
#[derive(Debug, Default)]
pub struct InMemoryFeedbackLog {
    records: RwLock<Vec<FeedbackRecord>>,
}

impl InMemoryFeedbackLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> DiagnosisResult<usize> {
        let records = self
            .records
            .read()
            .map_err(|_| DiagnosisError::FeedbackLogPoisoned)?;
        Ok(records.len())
    }

    pub fn is_empty(&self) -> DiagnosisResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl FeedbackStore for InMemoryFeedbackLog {
    fn append(&self, feedback: ValidatedFeedback) -> DiagnosisResult<FeedbackRecord> {
        let mut records = self
            .records
            .write()
            .map_err(|_| DiagnosisError::FeedbackLogPoisoned)?;

        // Generated under the write lock so ids follow append order.
        let id = TimestampUuid::generate(records.last().map(|r| &r.id));
        let record = FeedbackRecord {
            timestamp: id.timestamp(),
            id,
            diagnosis_id: feedback.diagnosis_id,
            chw_id: feedback.chw_id,
            is_correct: feedback.is_correct,
            actual_diagnosis: feedback.actual_diagnosis,
            comments: feedback.comments,
            location: feedback.location,
        };
        records.push(record.clone());
        Ok(record)
    }

    fn by_location(&self, location: &str) -> DiagnosisResult<Vec<FeedbackRecord>> {
        let records = self
            .records
            .read()
            .map_err(|_| DiagnosisError::FeedbackLogPoisoned)?;
        Ok(records
            .iter()
            .filter(|r| r.location == location)
            .cloned()
            .collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CorrectionCount {
    pub diagnosis: String,
    pub count: usize,
}

/// Accuracy summary for one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct RegionalLearnings {
    pub total_feedback: usize,
    /// Fraction of correct diagnoses in 0..=1; 0 when there is no feedback.
    pub accuracy_rate: f64,
    pub common_corrections: Vec<CorrectionCount>,
}

impl RegionalLearnings {
    /// Summarise records already filtered to one location.
    pub fn from_records(records: &[FeedbackRecord]) -> Self {
        let total_feedback = records.len();
        let correct = records.iter().filter(|r| r.is_correct).count();
        let accuracy_rate = if total_feedback == 0 {
            0.0
        } else {
            correct as f64 / total_feedback as f64
        };

        // Counted in first-seen order so the stable sort breaks ties by first appearance.
        let mut corrections: Vec<CorrectionCount> = Vec::new();
        let actuals = records
            .iter()
            .filter(|r| !r.is_correct)
            .filter_map(|r| r.actual_diagnosis.as_deref())
            .filter(|d| !d.is_empty());
        for actual in actuals {
            match corrections.iter_mut().find(|c| c.diagnosis == actual) {
                Some(entry) => entry.count += 1,
                None => corrections.push(CorrectionCount {
                    diagnosis: actual.to_string(),
                    count: 1,
                }),
            }
        }
        corrections.sort_by(|a, b| b.count.cmp(&a.count));
        corrections.truncate(MAX_COMMON_CORRECTIONS);

        Self {
            total_feedback,
            accuracy_rate,
            common_corrections: corrections,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(location: &str, is_correct: bool, actual: Option<&str>) -> FeedbackSubmission {
        FeedbackSubmission {
            diagnosis_id: "dx-1".into(),
            chw_id: "chw-7".into(),
            is_correct,
            actual_diagnosis: actual.map(str::to_string),
            comments: None,
            location: location.into(),
        }
    }

    fn append(log: &InMemoryFeedbackLog, s: FeedbackSubmission) -> FeedbackRecord {
        log.append(ValidatedFeedback::try_from(s).unwrap()).unwrap()
    }

    #[test]
    fn blank_ids_are_rejected() {
        let mut s = submission("Kitui", true, None);
        s.diagnosis_id = "   ".into();
        assert_eq!(
            ValidatedFeedback::try_from(s).unwrap_err(),
            ValidationError::MissingDiagnosisId
        );

        let mut s = submission("Kitui", true, None);
        s.chw_id = String::new();
        assert_eq!(
            ValidatedFeedback::try_from(s).unwrap_err(),
            ValidationError::MissingChwId
        );
    }

    #[test]
    fn append_assigns_increasing_ids() {
        let log = InMemoryFeedbackLog::new();
        let ids: Vec<_> = (0..20)
            .map(|_| append(&log, submission("Kitui", true, None)).id)
            .collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(log.len().unwrap(), 20);
    }

    #[test]
    fn record_timestamp_matches_id() {
        let log = InMemoryFeedbackLog::new();
        let record = append(&log, submission("Kitui", true, None));
        assert_eq!(record.timestamp, record.id.timestamp());
        assert_eq!(record.diagnosis_id.as_str(), "dx-1");
    }

    #[test]
    fn by_location_matches_exactly() {
        let log = InMemoryFeedbackLog::new();
        append(&log, submission("Kitui", true, None));
        append(&log, submission("kitui", true, None));
        append(&log, submission("Wajir", false, None));
        assert_eq!(log.by_location("Kitui").unwrap().len(), 1);
        assert!(log.by_location("Garissa").unwrap().is_empty());
    }

    #[test]
    fn learnings_on_empty_history_are_zero() {
        let learnings = RegionalLearnings::from_records(&[]);
        assert_eq!(learnings.total_feedback, 0);
        assert_eq!(learnings.accuracy_rate, 0.0);
        assert!(learnings.common_corrections.is_empty());
    }

    #[test]
    fn learnings_rank_corrections_with_first_seen_ties() {
        let log = InMemoryFeedbackLog::new();
        for s in [
            submission("Kilifi", false, Some("Typhoid Fever")),
            submission("Kilifi", false, Some("Pneumonia")),
            submission("Kilifi", false, Some("Cholera")),
            submission("Kilifi", false, Some("Pneumonia")),
            submission("Kilifi", false, Some("Tuberculosis")),
            submission("Kilifi", false, Some("")),
            submission("Kilifi", false, None),
            submission("Kilifi", true, Some("Malaria")),
        ] {
            append(&log, s);
        }

        let learnings = RegionalLearnings::from_records(&log.by_location("Kilifi").unwrap());
        assert_eq!(learnings.total_feedback, 8);
        assert_eq!(learnings.accuracy_rate, 1.0 / 8.0);
        let ranked: Vec<_> = learnings
            .common_corrections
            .iter()
            .map(|c| (c.diagnosis.as_str(), c.count))
            .collect();
        assert_eq!(
            ranked,
            vec![("Pneumonia", 2), ("Typhoid Fever", 1), ("Cholera", 1)]
        );
    }

    #[test]
    fn record_serialises_id_as_string() {
        let log = InMemoryFeedbackLog::new();
        let record = append(&log, submission("Kitui", true, None));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["id"], record.id.to_string());
        assert_eq!(json["chwId"], "chw-7");
        assert!(json.get("actualDiagnosis").is_none());

        let back: FeedbackRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
