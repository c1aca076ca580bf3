//! Application services for team records.

mod members;
mod tasks;

pub use members::{MemberService, MemberServiceError, RegisterMemberRequest};
pub use tasks::{CreateTaskRequest, TaskService, TaskServiceError, TaskServiceResult};
