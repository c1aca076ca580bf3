//! Pure workload and risk rules.
//!
//! Every function here is total: empty and degenerate inputs produce a
//! value, never an error.

mod deadline;
mod risk;
mod score;

pub use deadline::{DeadlineUrgency, is_within_days, time_until_deadline};
pub use risk::{RiskAssessment, RiskReason, assess};
pub use score::{
    MemberWorkload, OVERLOAD_GATE, RAW_SCORE_CEILING, WorkloadLevel, WorkloadScore,
    priority_weight,
};
