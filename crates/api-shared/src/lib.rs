//! # API Shared
//!
//! Shared request/response types and services for the CHW APIs.
//!
//! Contains:
//! - Request and response bodies (`dto` module) with OpenAPI schemas
//! - Shared services like `HealthService`
//!
//! Used by `api-rest` and the CLI-facing binaries for common functionality.

pub mod dto;
pub mod health;

pub use dto::{AnalyzeReq, ErrorRes, FacilityQuery, OutbreakQuery, ProfileReq, ReferralQuery};
pub use health::{HealthRes, HealthService};
