//! Shared world state for coverage workflow BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use coverly::{
    availability::{adapters::memory::InMemoryAvailabilityRepository, services::AvailabilityService},
    reassignment::{
        adapters::{HeuristicSuggestionGenerator, memory::InMemoryReassignmentRepository},
        domain::ReassignmentRecord,
        services::{Proposal, ReassignmentService, ReassignmentStores},
    },
    team::{
        adapters::memory::{InMemoryMemberRepository, InMemoryTaskRepository},
        domain::{Actor, Member, Task},
        services::{MemberService, TaskService},
    },
    workload::services::{RiskService, WorkloadService},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Workflow type used by the BDD world.
pub type TestWorkflow = ReassignmentService<
    InMemoryTaskRepository,
    InMemoryMemberRepository,
    InMemoryAvailabilityRepository,
    InMemoryReassignmentRepository,
    HeuristicSuggestionGenerator,
    DefaultClock,
>;

/// Scenario world for coverage behaviour tests.
pub struct CoverageWorld {
    pub members: MemberService<InMemoryMemberRepository, DefaultClock>,
    pub tasks: TaskService<InMemoryTaskRepository, InMemoryMemberRepository, DefaultClock>,
    pub availability:
        AvailabilityService<InMemoryAvailabilityRepository, InMemoryMemberRepository, DefaultClock>,
    pub workload: WorkloadService<InMemoryTaskRepository, InMemoryMemberRepository, DefaultClock>,
    pub risk: RiskService<
        InMemoryTaskRepository,
        InMemoryMemberRepository,
        InMemoryAvailabilityRepository,
        DefaultClock,
    >,
    pub workflow: TestWorkflow,
    pub manager: Option<Actor>,
    pub people: HashMap<String, Member>,
    pub tasks_by_title: HashMap<String, Task>,
    pub last_proposal: Option<Proposal>,
    pub last_record: Option<ReassignmentRecord>,
}

impl CoverageWorld {
    /// Creates a world over empty in-memory stores.
    #[must_use]
    pub fn new() -> Self {
        let clock = Arc::new(DefaultClock);
        let tasks = Arc::new(InMemoryTaskRepository::new());
        let members = Arc::new(InMemoryMemberRepository::new());
        let availability = Arc::new(InMemoryAvailabilityRepository::new());
        let records = Arc::new(InMemoryReassignmentRepository::new());
        Self {
            members: MemberService::new(Arc::clone(&members), Arc::clone(&clock)),
            tasks: TaskService::new(Arc::clone(&tasks), Arc::clone(&members), Arc::clone(&clock)),
            availability: AvailabilityService::new(
                Arc::clone(&availability),
                Arc::clone(&members),
                Arc::clone(&clock),
            ),
            workload: WorkloadService::new(
                Arc::clone(&tasks),
                Arc::clone(&members),
                Arc::clone(&clock),
            ),
            risk: RiskService::new(
                Arc::clone(&tasks),
                Arc::clone(&members),
                Arc::clone(&availability),
                Arc::clone(&clock),
            ),
            workflow: ReassignmentService::new(
                ReassignmentStores {
                    tasks,
                    members,
                    availability,
                    records,
                },
                Arc::new(HeuristicSuggestionGenerator::new()),
                clock,
            ),
            manager: None,
            people: HashMap::new(),
            tasks_by_title: HashMap::new(),
            last_proposal: None,
            last_record: None,
        }
    }

    /// Returns the scenario's manager identity.
    ///
    /// # Errors
    ///
    /// Returns an error when no manager has been registered.
    pub fn manager(&self) -> Result<Actor, eyre::Report> {
        self.manager
            .ok_or_else(|| eyre::eyre!("no manager registered in scenario world"))
    }

    /// Looks up a registered member by display name.
    ///
    /// # Errors
    ///
    /// Returns an error when the name is unknown.
    pub fn person(&self, name: &str) -> Result<&Member, eyre::Report> {
        self.people
            .get(name)
            .ok_or_else(|| eyre::eyre!("unknown member '{name}' in scenario world"))
    }

    /// Reloads a task created earlier in the scenario by title.
    ///
    /// # Errors
    ///
    /// Returns an error when the title is unknown or the task is gone.
    pub fn task(&self, title: &str) -> Result<Task, eyre::Report> {
        let created = self
            .tasks_by_title
            .get(title)
            .ok_or_else(|| eyre::eyre!("unknown task '{title}' in scenario world"))?;
        run_async(self.tasks.find_task(created.id()))?
            .ok_or_else(|| eyre::eyre!("task '{title}' no longer exists"))
    }
}

impl Default for CoverageWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> CoverageWorld {
    CoverageWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
