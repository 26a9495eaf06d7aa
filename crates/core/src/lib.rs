//! # CHW Core
//!
//! Symptom-to-diagnosis scoring for community health workers in rural Kenya.
//!
//! This crate contains the pure domain logic:
//! - a read-only knowledge base of diseases, outbreaks, counties and facilities
//! - weighted scoring and ranking of diseases against reported symptoms
//! - risk flags, treatment guidance and clinical narrative for the top candidate
//! - an append-only feedback log with per-location accuracy summaries
//!
//! **No API concerns**: HTTP servers and CLI parsing belong in `api-rest`, `api-shared` and
//! `cli`.

pub mod analysis;
pub mod classify;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod feedback;
pub mod knowledge;
pub mod narrative;
pub mod patient;
pub mod scoring;
pub mod symptoms;
pub mod validation;

pub use analysis::{
    AnalysisResult, DifferentialEntry, LocationContext, ReferralUrgency, RiskFlag, RiskFlagType,
    Severity, TreatmentGuidance, Urgency,
};
pub use config::CoreConfig;
pub use engine::DiagnosisEngine;
pub use error::{DiagnosisError, DiagnosisResult, ValidationError};
pub use feedback::{
    CorrectionCount, FeedbackRecord, FeedbackStore, FeedbackSubmission, InMemoryFeedbackLog,
    RegionalLearnings,
};
pub use knowledge::{
    AlertLevel, County, CountyCaseTotal, DiseaseCategory, DiseaseDefinition, FacilityLevel,
    HealthFacility, KnowledgeBase, OutbreakRecord, TriageLevel,
};
pub use patient::{Gender, PatientProfile, PregnancyStatus};
pub use symptoms::tokenize_symptoms;

pub use chw_types::NonEmptyText;
pub use chw_uuid::TimestampUuid;
