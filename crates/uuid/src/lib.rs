//! Identifier utilities for the CHW workspace.
//!
//! Two identifier shapes are used:
//! - [`UuidService`]: a canonical UUID, **32 lowercase hexadecimal characters** with no hyphens
//!   (the value of `Uuid::new_v4().simple().to_string()`).
//! - [`TimestampUuid`]: a time-prefixed identifier, `YYYYMMDDTHHMMSS.mmmZ-<canonical uuid>`.
//!   Feedback records are keyed by these so that ids sort in submission order.
//!
//! Externally supplied identifiers must already be canonical; non-canonical values (uppercase,
//! hyphenated, wrong length, non-hex) are rejected rather than normalised.

mod service;

pub use service::{TimestampUuid, Uuid, UuidService};

/// Error type for UUID operations.
#[derive(Debug, thiserror::Error)]
pub enum UuidError {
    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for UUID operations.
pub type UuidResult<T> = Result<T, UuidError>;
