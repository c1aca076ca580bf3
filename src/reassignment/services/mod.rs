//! Service layer for the reassignment workflow.

mod error;
mod handoff;
mod requests;
mod workflow;

pub use error::{ReassignmentServiceError, ReassignmentServiceResult};
pub use handoff::{MANUAL_REASONING, render_manual_handoff};
pub use requests::{
    ApprovalOutcome, ApproveRequest, DropReason, DroppedSuggestion, Proposal, ProposalScope,
    RevertedHandoff,
};
pub use workflow::{ReassignmentService, ReassignmentStores};
