//! Service layer for live workload and risk classification.

mod error;
mod risk;
mod workload;

pub use error::{WorkloadServiceError, WorkloadServiceResult};
pub use risk::{MemberRiskReport, RiskService};
pub use workload::WorkloadService;
