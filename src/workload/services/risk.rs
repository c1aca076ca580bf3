//! Risk classification and at-risk flag maintenance.

use super::{WorkloadServiceError, WorkloadServiceResult};
use crate::availability::ports::AvailabilityRepository;
use crate::policy::CoveragePolicy;
use crate::team::{
    domain::{Actor, MemberId, Task, TaskId},
    ports::{MemberRepository, TaskRepository},
};
use crate::workload::domain::{MemberWorkload, RiskAssessment, WorkloadScore, assess};
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, info};

/// Result of re-running the rules for one member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRiskReport {
    /// Live workload at classification time.
    pub workload: MemberWorkload,
    /// One assessment per open task, in task creation order.
    pub assessments: Vec<RiskAssessment>,
    /// Tasks whose flag was raised by this run.
    pub newly_flagged: Vec<TaskId>,
}

/// Applies the risk rules against live store state.
pub struct RiskService<T, M, A, C>
where
    T: TaskRepository,
    M: MemberRepository,
    A: AvailabilityRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    members: Arc<M>,
    availability: Arc<A>,
    clock: Arc<C>,
    policy: CoveragePolicy,
}

impl<T, M, A, C> RiskService<T, M, A, C>
where
    T: TaskRepository,
    M: MemberRepository,
    A: AvailabilityRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new risk service with the default policy.
    #[must_use]
    pub fn new(tasks: Arc<T>, members: Arc<M>, availability: Arc<A>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            members,
            availability,
            clock,
            policy: CoveragePolicy::default(),
        }
    }

    /// Replaces the coverage policy.
    #[must_use]
    pub fn with_policy(mut self, policy: CoveragePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Classifies one task without changing it.
    ///
    /// # Errors
    ///
    /// Returns [`WorkloadServiceError::TaskNotFound`] when the task does not
    /// exist, or a repository error when a lookup fails.
    pub async fn assess_task(&self, task_id: TaskId) -> WorkloadServiceResult<RiskAssessment> {
        let task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or(WorkloadServiceError::TaskNotFound(task_id))?;
        let now = self.clock.utc();
        let open = self.tasks.list_open_by_assignee(task.assignee()).await?;
        let score = WorkloadScore::from_tasks(&open, now);
        let entries = self.availability.list_for_member(task.assignee()).await?;
        Ok(assess(&task, score, &entries, &self.policy, now))
    }

    /// Re-runs the rules over a member's open tasks and raises the flag on
    /// every task with at least one reason.
    ///
    /// Flags are never cleared here; only an approved reassignment clears
    /// them. The member's cached workload is refreshed as a side effect.
    ///
    /// # Errors
    ///
    /// Returns [`WorkloadServiceError`] when the actor may not act for the
    /// member, the member does not exist, or a store operation fails.
    pub async fn refresh_member(
        &self,
        actor: Actor,
        member_id: MemberId,
    ) -> WorkloadServiceResult<MemberRiskReport> {
        actor.ensure_acts_for(member_id, "refresh risk flags")?;
        let mut member = self
            .members
            .find_by_id(member_id)
            .await?
            .ok_or(WorkloadServiceError::MemberNotFound(member_id))?;
        let now = self.clock.utc();
        let open = self.tasks.list_open_by_assignee(member_id).await?;
        let entries = self.availability.list_for_member(member_id).await?;
        let workload = MemberWorkload::compute(member_id, &open, now);

        let mut assessments = Vec::with_capacity(open.len());
        let mut newly_flagged = Vec::new();
        for mut task in open {
            let assessment = assess(&task, workload.score, &entries, &self.policy, now);
            if assessment.is_at_risk() && !task.is_at_risk() {
                task.mark_at_risk(&*self.clock);
                self.tasks.update(&task).await?;
                debug!(task_id = %task.id(), reasons = ?assessment.reasons, "task flagged at risk");
                newly_flagged.push(task.id());
            }
            assessments.push(assessment);
        }

        member.record_workload(workload.score.value(), &*self.clock);
        self.members.update(&member).await?;
        Ok(MemberRiskReport {
            workload,
            assessments,
            newly_flagged,
        })
    }

    /// Flags every open task of a member as at risk without evaluating the
    /// rules.
    ///
    /// Used when a member suddenly becomes unavailable.
    ///
    /// # Errors
    ///
    /// Returns [`WorkloadServiceError`] when the actor is not a manager, the
    /// member does not exist, or a store operation fails.
    pub async fn mark_member_tasks_at_risk(
        &self,
        actor: Actor,
        member_id: MemberId,
    ) -> WorkloadServiceResult<Vec<Task>> {
        actor.ensure_manager("mark tasks at risk")?;
        if self.members.find_by_id(member_id).await?.is_none() {
            return Err(WorkloadServiceError::MemberNotFound(member_id));
        }
        let mut flagged = self.tasks.list_open_by_assignee(member_id).await?;
        for task in &mut flagged {
            task.mark_at_risk(&*self.clock);
            self.tasks.update(task).await?;
        }
        info!(
            member = %member_id,
            manager = %actor.member_id,
            count = flagged.len(),
            "marked member tasks at risk"
        );
        Ok(flagged)
    }

    /// Lists every task currently flagged at risk.
    ///
    /// # Errors
    ///
    /// Returns [`WorkloadServiceError::Tasks`] when the lookup fails.
    pub async fn at_risk_tasks(&self) -> WorkloadServiceResult<Vec<Task>> {
        Ok(self.tasks.list_at_risk().await?)
    }
}
