//! Orchestrates proposals, approvals, rejections, and reverts.

use super::{
    ApprovalOutcome, ApproveRequest, DropReason, DroppedSuggestion, MANUAL_REASONING, Proposal,
    ProposalScope, ReassignmentServiceError, ReassignmentServiceResult, RevertedHandoff,
    render_manual_handoff,
};
use crate::availability::ports::AvailabilityRepository;
use crate::policy::CoveragePolicy;
use crate::reassignment::{
    domain::{
        BatchFailure, BatchRevertReport, CandidateProfile, CoverageBatch, CoverageBatchId,
        HandoffOrigin, RawSuggestion, ReassignmentId, ReassignmentParams, ReassignmentRecord, RevertOutcome,
        Suggestion, SuggestionRequest, TaskContext, rank_candidates,
    },
    ports::{ReassignmentRepository, SuggestionGenerator},
};
use crate::team::{
    domain::{Actor, Member, MemberId, Task, TaskId},
    ports::{MemberRepository, TaskRepository},
};
use mockable::Clock;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Reassignment workflow service.
///
/// Holds no state of its own; every decision re-reads the stores.
pub struct ReassignmentService<T, M, A, R, G, C>
where
    T: TaskRepository,
    M: MemberRepository,
    A: AvailabilityRepository,
    R: ReassignmentRepository,
    G: SuggestionGenerator,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    members: Arc<M>,
    availability: Arc<A>,
    records: Arc<R>,
    generator: Arc<G>,
    clock: Arc<C>,
    policy: CoveragePolicy,
}

impl<T, M, A, R, G, C> Clone for ReassignmentService<T, M, A, R, G, C>
where
    T: TaskRepository,
    M: MemberRepository,
    A: AvailabilityRepository,
    R: ReassignmentRepository,
    G: SuggestionGenerator,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            tasks: Arc::clone(&self.tasks),
            members: Arc::clone(&self.members),
            availability: Arc::clone(&self.availability),
            records: Arc::clone(&self.records),
            generator: Arc::clone(&self.generator),
            clock: Arc::clone(&self.clock),
            policy: self.policy.clone(),
        }
    }
}

/// Store handles used by [`ReassignmentService::new`].
#[derive(Debug)]
pub struct ReassignmentStores<T, M, A, R> {
    /// Task store.
    pub tasks: Arc<T>,
    /// Member store.
    pub members: Arc<M>,
    /// Availability store.
    pub availability: Arc<A>,
    /// Reassignment record store.
    pub records: Arc<R>,
}

impl<T, M, A, R, G, C> ReassignmentService<T, M, A, R, G, C>
where
    T: TaskRepository,
    M: MemberRepository,
    A: AvailabilityRepository,
    R: ReassignmentRepository,
    G: SuggestionGenerator,
    C: Clock + Send + Sync,
{
    /// Creates a new workflow service with the default policy.
    #[must_use]
    pub fn new(stores: ReassignmentStores<T, M, A, R>, generator: Arc<G>, clock: Arc<C>) -> Self {
        Self {
            tasks: stores.tasks,
            members: stores.members,
            availability: stores.availability,
            records: stores.records,
            generator,
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

    /// Builds a live profile for every member.
    ///
    /// # Errors
    ///
    /// Returns a repository error when a lookup fails.
    pub async fn candidate_pool(&self) -> ReassignmentServiceResult<Vec<CandidateProfile>> {
        let now = self.clock.utc();
        let mut pool = Vec::new();
        for member in self.members.list_all().await? {
            let open = self.tasks.list_open_by_assignee(member.id()).await?;
            let entries = self.availability.list_for_member(member.id()).await?;
            pool.push(CandidateProfile::from_member(&member, &open, entries, now));
        }
        Ok(pool)
    }

    /// Asks the generator for handoff suggestions and keeps the valid ones.
    ///
    /// Generator failures yield an empty proposal. Nothing is persisted.
    ///
    /// # Errors
    ///
    /// Returns [`ReassignmentServiceError`] when the actor is not a manager
    /// or a store lookup fails.
    pub async fn propose(
        &self,
        actor: Actor,
        scope: ProposalScope,
    ) -> ReassignmentServiceResult<Proposal> {
        actor.ensure_manager("propose reassignments")?;
        let targets = self.load_targets(scope).await?;
        if targets.is_empty() {
            return Ok(Proposal::default());
        }

        let candidates = self.candidate_pool().await?;
        let today = self.clock.utc().date_naive();
        let mut contexts = Vec::with_capacity(targets.len());
        for task in targets {
            let recent_comments = self
                .tasks
                .recent_comments(task.id(), self.policy.recent_comment_limit)
                .await?;
            let ranked_candidates = rank_candidates(&task, &candidates, today)
                .into_iter()
                .map(|profile| profile.member)
                .collect();
            contexts.push(TaskContext {
                task,
                recent_comments,
                ranked_candidates,
            });
        }
        let request = SuggestionRequest {
            as_of: today,
            tasks: contexts,
            candidates,
        };

        let raw = match self.generator.generate(&request).await {
            Ok(raw) => raw,
            Err(err) => {
                warn!(error = %err, tasks = request.tasks.len(), "suggestion generator failed");
                return Ok(Proposal::default());
            }
        };
        self.validate(&request, raw).await
    }

    /// Records a proposal as `pending` without touching the task.
    ///
    /// # Errors
    ///
    /// Returns [`ReassignmentServiceError`] when the actor is not a manager,
    /// the task or member does not exist, the member already holds the
    /// task, or a store operation fails.
    pub async fn submit(
        &self,
        actor: Actor,
        request: ApproveRequest,
    ) -> ReassignmentServiceResult<ReassignmentRecord> {
        actor.ensure_manager("submit reassignments")?;
        let (task, to) = self.load_target_pair(request.task_id(), request.to_member()).await?;
        let record = self.open_record(actor, &task, &to, request).await?;
        info!(record = %record.id(), task_id = %task.id(), to = %to.id(), "reassignment submitted");
        Ok(record)
    }

    /// Hands a task to a new assignee in one step.
    ///
    /// A pending record is stored first, then approved with the task's
    /// prior assignment as snapshot, and the task is updated. On success
    /// the record is approved and the task's at-risk flag is clear.
    ///
    /// # Errors
    ///
    /// Returns [`ReassignmentServiceError`] when the actor is not a manager,
    /// the task or member does not exist, the member already holds the
    /// task, the manual template fails, or a store operation fails. The
    /// task is left unchanged on error and the record opened for the
    /// attempt is closed as rejected.
    pub async fn approve(
        &self,
        actor: Actor,
        request: ApproveRequest,
    ) -> ReassignmentServiceResult<ApprovalOutcome> {
        actor.ensure_manager("approve reassignments")?;
        let (task, to) = self.load_target_pair(request.task_id(), request.to_member()).await?;
        let record = self.open_record(actor, &task, &to, request).await?;
        let record_id = record.id();
        let outcome = self.apply_approval(record, task, to.id()).await;
        if let Err(err) = &outcome {
            self.abandon(record_id, &err.to_string()).await;
        }
        outcome
    }

    /// Approves a previously submitted record, optionally for a different
    /// assignee.
    ///
    /// A handoff document rendered from the manual template is rendered
    /// again when the assignee changes. On error the record stays pending
    /// and the call may be retried.
    ///
    /// # Errors
    ///
    /// Returns [`ReassignmentServiceError`] when the actor is not a manager,
    /// the record is missing or not pending, the task or member does not
    /// exist, the member already holds the task, the manual template
    /// fails, or a store operation fails.
    pub async fn approve_pending(
        &self,
        actor: Actor,
        record_id: ReassignmentId,
        assignee_override: Option<MemberId>,
    ) -> ReassignmentServiceResult<ApprovalOutcome> {
        actor.ensure_manager("approve reassignments")?;
        let mut record = self.load_record(record_id).await?;
        let to_member = assignee_override.unwrap_or_else(|| record.to_member());
        let (task, to) = self.load_target_pair(record.task_id(), to_member).await?;
        if to.id() != record.to_member() && record.handoff_origin() == HandoffOrigin::Template {
            let handoff_doc = self.manual_handoff(&task, &to).await?;
            record.rewrite_handoff(handoff_doc)?;
        }
        self.apply_approval(record, task, to.id()).await
    }

    /// Declines a pending record. The task is not touched.
    ///
    /// # Errors
    ///
    /// Returns [`ReassignmentServiceError`] when the actor is not a manager,
    /// the record is missing or not pending, or the store fails.
    pub async fn reject(
        &self,
        actor: Actor,
        record_id: ReassignmentId,
        reason: Option<&str>,
    ) -> ReassignmentServiceResult<ReassignmentRecord> {
        actor.ensure_manager("reject reassignments")?;
        let mut record = self.load_record(record_id).await?;
        record.reject(reason.map(str::to_owned), &*self.clock)?;
        self.records.update(&record).await?;
        info!(record = %record.id(), task_id = %record.task_id(), "reassignment rejected");
        Ok(record)
    }

    /// Restores the task to its state before the record's approval.
    ///
    /// The record is marked before the task is restored, and the mark is
    /// withdrawn when the task write fails, so a failed revert can be
    /// retried.
    ///
    /// # Errors
    ///
    /// Returns [`ReassignmentServiceError`] when the actor is not a manager,
    /// the record or task is missing, the record is not revertible, or a
    /// store operation fails. A task handed on again since the approval
    /// fails with [`crate::reassignment::domain::ReassignmentDomainError::RevertConflict`].
    pub async fn revert(
        &self,
        actor: Actor,
        record_id: ReassignmentId,
    ) -> ReassignmentServiceResult<RevertedHandoff> {
        actor.ensure_manager("revert reassignments")?;
        let unmarked = self.load_record(record_id).await?;
        let mut task = self.load_task(unmarked.task_id()).await?;
        let snapshot = unmarked.revert_snapshot(&task)?.clone();

        let mut record = unmarked.clone();
        record.mark_reverted(actor.member_id, &*self.clock);
        self.records.update(&record).await?;
        task.restore_assignment(snapshot, &*self.clock);
        if let Err(err) = self.tasks.update(&task).await {
            if let Err(rollback_err) = self.records.update(&unmarked).await {
                warn!(
                    record = %record_id,
                    error = %rollback_err,
                    "failed to withdraw revert mark after task update failure"
                );
            }
            return Err(err.into());
        }
        info!(
            record = %record.id(),
            task_id = %task.id(),
            restored = %task.assignee(),
            "reassignment reverted"
        );
        Ok(RevertedHandoff { record, task })
    }

    /// Reverts every record of a batch independently.
    ///
    /// # Errors
    ///
    /// Returns [`ReassignmentServiceError`] when the actor is not a manager,
    /// the batch does not exist, or the batch cannot be updated. Failures
    /// of individual records are reported in the outcome list instead.
    pub async fn revert_batch(
        &self,
        actor: Actor,
        batch_id: CoverageBatchId,
    ) -> ReassignmentServiceResult<BatchRevertReport> {
        actor.ensure_manager("revert reassignments")?;
        let mut batch = self
            .records
            .find_batch(batch_id)
            .await?
            .ok_or(ReassignmentServiceError::BatchNotFound(batch_id))?;

        let mut outcomes = Vec::with_capacity(batch.records().len());
        for record in batch.records().iter().copied() {
            let outcome = match self.revert(actor, record).await {
                Ok(_) => RevertOutcome::Reverted { record },
                Err(err) => RevertOutcome::Failed {
                    record,
                    reason: err.to_string(),
                },
            };
            outcomes.push(outcome);
        }
        batch.mark_reverted(&*self.clock);
        self.records.update_batch(&batch).await?;

        let report = BatchRevertReport {
            batch: batch_id,
            outcomes,
        };
        info!(
            batch = %batch_id,
            reverted = report.reverted_count(),
            total = report.outcomes.len(),
            "coverage batch reverted"
        );
        Ok(report)
    }

    /// Lists every record for a task, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`ReassignmentServiceError::Records`] when the lookup fails.
    pub async fn history(
        &self,
        task_id: TaskId,
    ) -> ReassignmentServiceResult<Vec<ReassignmentRecord>> {
        Ok(self.records.list_for_task(task_id).await?)
    }

    /// Finds a coverage batch.
    ///
    /// # Errors
    ///
    /// Returns [`ReassignmentServiceError::Records`] when the lookup fails.
    pub async fn find_batch(
        &self,
        batch_id: CoverageBatchId,
    ) -> ReassignmentServiceResult<Option<CoverageBatch>> {
        Ok(self.records.find_batch(batch_id).await?)
    }

    async fn load_targets(&self, scope: ProposalScope) -> ReassignmentServiceResult<Vec<Task>> {
        let found = match scope {
            ProposalScope::AllAtRisk => self.tasks.list_at_risk().await?,
            ProposalScope::Tasks(ids) => {
                let mut seen = HashSet::new();
                let mut found = Vec::with_capacity(ids.len());
                for id in ids {
                    if !seen.insert(id) {
                        continue;
                    }
                    match self.tasks.find_by_id(id).await? {
                        Some(task) => found.push(task),
                        None => debug!(task_id = %id, "skipping missing task in proposal scope"),
                    }
                }
                found
            }
        };
        Ok(found.into_iter().filter(Task::is_open).collect())
    }

    async fn validate(
        &self,
        request: &SuggestionRequest,
        raw: Vec<RawSuggestion>,
    ) -> ReassignmentServiceResult<Proposal> {
        let mut proposal = Proposal::default();
        let mut covered = HashSet::new();
        for candidate in raw {
            match self.check(request, &candidate, &covered).await? {
                Ok(suggestion) => {
                    covered.insert(suggestion.task_id);
                    proposal.suggestions.push(suggestion);
                }
                Err(reason) => {
                    debug!(
                        task_id = %candidate.task_id,
                        assignee = %candidate.suggested_assignee_id,
                        reason = %reason,
                        "dropped suggestion"
                    );
                    proposal.dropped.push(DroppedSuggestion {
                        raw: candidate,
                        reason,
                    });
                }
            }
        }
        Ok(proposal)
    }

    async fn check(
        &self,
        request: &SuggestionRequest,
        raw: &RawSuggestion,
        covered: &HashSet<TaskId>,
    ) -> ReassignmentServiceResult<Result<Suggestion, DropReason>> {
        let Ok(task_id) = TaskId::parse_str(raw.task_id.trim()) else {
            return Ok(Err(DropReason::MalformedTaskId));
        };
        let Some(context) = request.task(task_id) else {
            return Ok(Err(DropReason::UnknownTask));
        };
        if covered.contains(&task_id) {
            return Ok(Err(DropReason::DuplicateTask));
        }
        let Ok(to_member) = MemberId::parse_str(raw.suggested_assignee_id.trim()) else {
            return Ok(Err(DropReason::MalformedAssigneeId));
        };
        let Some(live) = self.tasks.find_by_id(task_id).await?.filter(Task::is_open) else {
            return Ok(Err(DropReason::TaskGone));
        };
        if live.assignee() == to_member {
            return Ok(Err(DropReason::CurrentAssignee));
        }
        if !context.ranked_candidates.contains(&to_member) {
            return Ok(Err(DropReason::IneligibleAssignee));
        }
        Ok(Ok(Suggestion {
            task_id,
            from_member: live.assignee(),
            to_member,
            reasoning: raw.reasoning.trim().to_owned(),
            handoff_doc: raw.handoff_doc.trim().to_owned(),
            confidence: raw.confidence(),
        }))
    }

    async fn load_task(&self, task_id: TaskId) -> ReassignmentServiceResult<Task> {
        self.tasks
            .find_by_id(task_id)
            .await?
            .ok_or(ReassignmentServiceError::TaskNotFound(task_id))
    }

    async fn load_member(&self, member_id: MemberId) -> ReassignmentServiceResult<Member> {
        self.members
            .find_by_id(member_id)
            .await?
            .ok_or(ReassignmentServiceError::MemberNotFound(member_id))
    }

    async fn load_record(
        &self,
        record_id: ReassignmentId,
    ) -> ReassignmentServiceResult<ReassignmentRecord> {
        self.records
            .find_by_id(record_id)
            .await?
            .ok_or(ReassignmentServiceError::RecordNotFound(record_id))
    }

    async fn load_target_pair(
        &self,
        task_id: TaskId,
        to_member: MemberId,
    ) -> ReassignmentServiceResult<(Task, Member)> {
        let task = self.load_task(task_id).await?;
        let to = self.load_member(to_member).await?;
        if task.assignee() == to.id() {
            return Err(ReassignmentServiceError::AlreadyAssigned {
                task: task_id,
                member: to.id(),
            });
        }
        Ok((task, to))
    }

    async fn open_record(
        &self,
        actor: Actor,
        task: &Task,
        to: &Member,
        request: ApproveRequest,
    ) -> ReassignmentServiceResult<ReassignmentRecord> {
        let (supplied_doc, reasoning) = request.into_parts();
        let (handoff_doc, handoff_origin) =
            match supplied_doc.filter(|text| !text.trim().is_empty()) {
                Some(text) => (text, HandoffOrigin::Supplied),
                None => (self.manual_handoff(task, to).await?, HandoffOrigin::Template),
            };
        let record = ReassignmentRecord::new_pending(
            ReassignmentParams {
                task_id: task.id(),
                from_member: task.assignee(),
                to_member: to.id(),
                initiated_by: actor.member_id,
                handoff_doc,
                handoff_origin,
                reasoning: reasoning.unwrap_or_else(|| MANUAL_REASONING.to_owned()),
            },
            &*self.clock,
        );
        self.records.store(&record).await?;
        Ok(record)
    }

    async fn manual_handoff(&self, task: &Task, to: &Member) -> ReassignmentServiceResult<String> {
        let from = self.members.find_by_id(task.assignee()).await?;
        Ok(render_manual_handoff(
            &self.policy.manual_handoff_template,
            task,
            from.as_ref(),
            to,
        )?)
    }

    async fn apply_approval(
        &self,
        mut record: ReassignmentRecord,
        mut task: Task,
        to_member: MemberId,
    ) -> ReassignmentServiceResult<ApprovalOutcome> {
        let prior = task.assignment_state();
        record.approve(to_member, prior.clone(), &*self.clock)?;
        task.reassign(to_member, record.handoff_doc(), &*self.clock);

        self.tasks.update(&task).await?;
        if let Err(err) = self.records.update(&record).await {
            task.restore_assignment(prior, &*self.clock);
            if let Err(restore_err) = self.tasks.update(&task).await {
                warn!(
                    task_id = %task.id(),
                    error = %restore_err,
                    "failed to restore task after record update failure"
                );
            }
            return Err(err.into());
        }
        info!(
            record = %record.id(),
            task_id = %task.id(),
            from = %record.from_member(),
            to = %record.to_member(),
            "reassignment approved"
        );
        Ok(ApprovalOutcome { record, task })
    }

    async fn abandon(&self, record_id: ReassignmentId, reason: &str) {
        let Ok(Some(mut stored)) = self.records.find_by_id(record_id).await else {
            return;
        };
        if stored
            .reject(Some(format!("approval failed: {reason}")), &*self.clock)
            .is_err()
        {
            return;
        }
        if let Err(err) = self.records.update(&stored).await {
            warn!(record = %record_id, error = %err, "failed to close abandoned record");
        }
    }
}

impl<T, M, A, R, G, C> ReassignmentService<T, M, A, R, G, C>
where
    T: TaskRepository + 'static,
    M: MemberRepository + 'static,
    A: AvailabilityRepository + 'static,
    R: ReassignmentRepository + 'static,
    G: SuggestionGenerator + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Approves every suggestion concurrently and stores the batch.
    ///
    /// Each approval stands alone: a failure is recorded in the batch and
    /// does not affect the others.
    ///
    /// # Errors
    ///
    /// Returns [`ReassignmentServiceError`] when the actor is not a manager
    /// or the batch cannot be stored.
    pub async fn approve_all(
        &self,
        actor: Actor,
        suggestions: &[Suggestion],
    ) -> ReassignmentServiceResult<CoverageBatch> {
        actor.ensure_manager("approve reassignments")?;
        let mut workers = JoinSet::new();
        for (index, suggestion) in suggestions.iter().enumerate() {
            let service = self.clone();
            let request = ApproveRequest::from_suggestion(suggestion);
            let task_id = suggestion.task_id;
            workers.spawn(async move {
                let outcome = service.approve(actor, request).await;
                (index, task_id, outcome)
            });
        }

        let mut slots: Vec<Option<Result<ReassignmentId, BatchFailure>>> =
            suggestions.iter().map(|_| None).collect();
        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok((index, task_id, outcome)) => {
                    let slot = outcome
                        .map(|approved| approved.record.id())
                        .map_err(|err| BatchFailure {
                            task_id,
                            reason: err.to_string(),
                        });
                    if let Some(entry) = slots.get_mut(index) {
                        *entry = Some(slot);
                    }
                }
                Err(err) => warn!(error = %err, "approval worker did not finish"),
            }
        }

        let mut records = Vec::new();
        let mut failures = Vec::new();
        for (slot, suggestion) in slots.into_iter().zip(suggestions) {
            match slot {
                Some(Ok(record)) => records.push(record),
                Some(Err(failure)) => failures.push(failure),
                None => failures.push(BatchFailure {
                    task_id: suggestion.task_id,
                    reason: "approval worker did not finish".to_owned(),
                }),
            }
        }
        let batch = CoverageBatch::new(actor.member_id, records, failures, &*self.clock);
        self.records.store_batch(&batch).await?;
        info!(
            batch = %batch.id(),
            approved = batch.records().len(),
            failed = batch.failures().len(),
            "coverage batch approved"
        );
        Ok(batch)
    }
}
