//! Live workload summaries.

use super::{WorkloadServiceError, WorkloadServiceResult};
use crate::team::{
    domain::MemberId,
    ports::{MemberRepository, TaskRepository},
};
use crate::workload::domain::MemberWorkload;
use mockable::Clock;
use std::sync::Arc;

/// Computes workload from the members' current tasks on every call.
pub struct WorkloadService<T, M, C>
where
    T: TaskRepository,
    M: MemberRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    members: Arc<M>,
    clock: Arc<C>,
}

impl<T, M, C> WorkloadService<T, M, C>
where
    T: TaskRepository,
    M: MemberRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new workload service.
    #[must_use]
    pub const fn new(tasks: Arc<T>, members: Arc<M>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            members,
            clock,
        }
    }

    /// Scores one member.
    ///
    /// # Errors
    ///
    /// Returns [`WorkloadServiceError::MemberNotFound`] when the member does
    /// not exist, or a repository error when a lookup fails.
    pub async fn member_workload(
        &self,
        member: MemberId,
    ) -> WorkloadServiceResult<MemberWorkload> {
        if self.members.find_by_id(member).await?.is_none() {
            return Err(WorkloadServiceError::MemberNotFound(member));
        }
        let open = self.tasks.list_open_by_assignee(member).await?;
        Ok(MemberWorkload::compute(member, &open, self.clock.utc()))
    }

    /// Scores every member, in member listing order.
    ///
    /// # Errors
    ///
    /// Returns a repository error when a lookup fails.
    pub async fn team_workload(&self) -> WorkloadServiceResult<Vec<MemberWorkload>> {
        let now = self.clock.utc();
        let mut summaries = Vec::new();
        for member in self.members.list_all().await? {
            let open = self.tasks.list_open_by_assignee(member.id()).await?;
            summaries.push(MemberWorkload::compute(member.id(), &open, now));
        }
        Ok(summaries)
    }
}
