//! crates/examgen_core/src/ports.rs
//!
//! Defines the service contract (trait) for the application's core logic.
//! The trait forms the boundary of the hexagonal architecture, allowing the
//! core to be independent of any specific generation backend and letting
//! tests substitute a fake client.

use async_trait::async_trait;
use crate::domain::{ExamData, GenerationConfig};

//=========================================================================================
// Generation Error and Result Types
//=========================================================================================

/// Error type for the generation port.
///
/// Every transport, service, and response-shape failure is collapsed into
/// [`GenerationError::Failed`]: callers never see provider-specific error
/// shapes, and the `Display` strings are exactly what the user reads. The
/// underlying causes belong in the tracing diagnostics, not here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    /// The credential needed to reach the service is not configured. Raised
    /// before any network call is attempted.
    #[error("API Key is missing. Please check your environment variables.")]
    MissingApiKey,

    /// The single generic "generation failed" outcome: network error,
    /// non-success response, empty body, or malformed/non-conforming JSON.
    #[error("Failed to generate exam. Please try again with less content or fewer questions.")]
    Failed,
}

/// A convenience type alias for `Result<T, GenerationError>`.
pub type GenerationResult<T> = Result<T, GenerationError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// The outbound boundary to the generative service that authors exams.
///
/// One call per invocation: no internal retry, no request coalescing. A
/// failed call surfaces immediately and re-triggering is the caller's
/// responsibility.
#[async_trait]
pub trait ExamGenerationService: Send + Sync {
    /// Generates a complete exam from the user's configuration, either
    /// returning a fully-shaped [`ExamData`] or one collapsed failure. A
    /// partially-filled exam is never returned.
    async fn generate_exam(&self, config: &GenerationConfig) -> GenerationResult<ExamData>;
}
