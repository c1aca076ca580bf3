//! Domain model for team tasks and members.
//!
//! Records arriving from the document store are held in these typed
//! aggregates so scoring and workflow logic never touches untyped maps.

mod actor;
mod comment;
mod error;
mod ids;
mod member;
mod task;

pub use actor::{Actor, NotAuthorized};
pub use comment::TaskComment;
pub use error::{
    ParseCompletionStatusError, ParseMemberRoleError, ParseTaskPriorityError,
    ParseTaskStatusError, TeamDomainError,
};
pub use ids::{CommentId, ExternalIdentity, MemberId, TaskId};
pub use member::{Member, MemberParams, MemberRole};
pub use task::{
    AssignmentState, CompletionFeedback, CompletionStatus, Task, TaskParams, TaskPriority,
    TaskStatus,
};
