//! Service layer for availability declarations and queries.

mod availability;

pub use availability::{
    AvailabilityService, AvailabilityServiceError, AvailabilityServiceResult, Declaration,
    DeclareAvailabilityRequest,
};
