//! Domain model for task handoffs.

mod batch;
mod candidate;
mod error;
mod ids;
mod record;
mod suggestion;

pub use batch::{BatchFailure, BatchRevertReport, CoverageBatch, RevertOutcome};
pub use candidate::{CandidateProfile, TaskContext, coverage_window, rank_candidates};
pub use error::{ParseReassignmentStatusError, ReassignmentDomainError};
pub use ids::{CoverageBatchId, ReassignmentId};
pub use record::{HandoffOrigin, ReassignmentParams, ReassignmentRecord, ReassignmentStatus};
pub use suggestion::{Confidence, RawSuggestion, Suggestion, SuggestionRequest};
