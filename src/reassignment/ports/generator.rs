//! Port for the external Suggestion Generator.

use crate::reassignment::domain::{RawSuggestion, SuggestionRequest};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for suggestion generation.
pub type SuggestionGeneratorResult<T> = Result<T, SuggestionGeneratorError>;

/// Produces handoff suggestions for at-risk tasks.
///
/// Output is advisory and untrusted. Callers validate every returned
/// identifier and treat any error as "no suggestions".
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SuggestionGenerator: Send + Sync {
    /// Generates suggestions for the tasks in `request`.
    ///
    /// # Errors
    ///
    /// Returns [`SuggestionGeneratorError`] when the generator is
    /// unreachable, times out, or produces output it cannot read.
    async fn generate(
        &self,
        request: &SuggestionRequest,
    ) -> SuggestionGeneratorResult<Vec<RawSuggestion>>;
}

/// Failure reported by a suggestion generator.
///
/// Callers never branch on the cause: any failure degrades to an empty
/// proposal.
#[derive(Debug, Clone, Error)]
#[error("suggestion generator failed: {0}")]
pub struct SuggestionGeneratorError(Arc<dyn std::error::Error + Send + Sync>);

impl SuggestionGeneratorError {
    /// Wraps the underlying failure.
    pub fn new(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(Arc::new(err))
    }
}
