//! Shared wiring for in-memory integration tests.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone, Utc};
use coverly::{
    availability::{adapters::memory::InMemoryAvailabilityRepository, services::AvailabilityService},
    reassignment::{
        adapters::{HeuristicSuggestionGenerator, memory::InMemoryReassignmentRepository},
        services::{ReassignmentService, ReassignmentStores},
    },
    team::{
        adapters::memory::{InMemoryMemberRepository, InMemoryTaskRepository},
        domain::{Actor, Member, MemberRole},
        services::{MemberService, RegisterMemberRequest, TaskService},
    },
    workload::services::{RiskService, WorkloadService},
};
use mockable::Clock;
use rstest::fixture;

/// Clock pinned to a settable instant.
#[derive(Debug)]
pub struct FixedClock(Mutex<DateTime<Utc>>);

impl FixedClock {
    /// Pins the clock to 09:00 UTC on the given date.
    pub fn on(year: i32, month: u32, day: u32) -> Self {
        let instant = Utc
            .with_ymd_and_hms(year, month, day, 9, 0, 0)
            .single()
            .expect("valid fixed instant");
        Self(Mutex::new(instant))
    }

    /// Moves the clock forward.
    pub fn advance(&self, by: Duration) {
        let mut guard = self.0.lock().expect("clock lock");
        *guard += by;
    }

    /// Returns the date `days` after today.
    pub fn days_from_today(&self, days: i64) -> NaiveDate {
        self.utc().date_naive() + Duration::days(days)
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.0.lock().expect("clock lock")
    }
}

/// Reassignment workflow wired to the in-memory stores.
pub type Workflow = ReassignmentService<
    InMemoryTaskRepository,
    InMemoryMemberRepository,
    InMemoryAvailabilityRepository,
    InMemoryReassignmentRepository,
    HeuristicSuggestionGenerator,
    FixedClock,
>;

/// In-memory stores shared by every service in one test.
pub struct Stores {
    /// Pinned clock.
    pub clock: Arc<FixedClock>,
    /// Task store.
    pub tasks: Arc<InMemoryTaskRepository>,
    /// Member store.
    pub members: Arc<InMemoryMemberRepository>,
    /// Availability store.
    pub availability: Arc<InMemoryAvailabilityRepository>,
    /// Reassignment record store.
    pub records: Arc<InMemoryReassignmentRepository>,
}

impl Stores {
    /// Member registration service.
    pub fn member_service(&self) -> MemberService<InMemoryMemberRepository, FixedClock> {
        MemberService::new(Arc::clone(&self.members), Arc::clone(&self.clock))
    }

    /// Task service.
    pub fn task_service(
        &self,
    ) -> TaskService<InMemoryTaskRepository, InMemoryMemberRepository, FixedClock> {
        TaskService::new(
            Arc::clone(&self.tasks),
            Arc::clone(&self.members),
            Arc::clone(&self.clock),
        )
    }

    /// Availability service.
    pub fn availability_service(
        &self,
    ) -> AvailabilityService<InMemoryAvailabilityRepository, InMemoryMemberRepository, FixedClock>
    {
        AvailabilityService::new(
            Arc::clone(&self.availability),
            Arc::clone(&self.members),
            Arc::clone(&self.clock),
        )
    }

    /// Workload service.
    pub fn workload_service(
        &self,
    ) -> WorkloadService<InMemoryTaskRepository, InMemoryMemberRepository, FixedClock> {
        WorkloadService::new(
            Arc::clone(&self.tasks),
            Arc::clone(&self.members),
            Arc::clone(&self.clock),
        )
    }

    /// Risk service.
    pub fn risk_service(
        &self,
    ) -> RiskService<
        InMemoryTaskRepository,
        InMemoryMemberRepository,
        InMemoryAvailabilityRepository,
        FixedClock,
    > {
        RiskService::new(
            Arc::clone(&self.tasks),
            Arc::clone(&self.members),
            Arc::clone(&self.availability),
            Arc::clone(&self.clock),
        )
    }

    /// Reassignment workflow using the heuristic generator.
    pub fn workflow(&self) -> Workflow {
        ReassignmentService::new(
            ReassignmentStores {
                tasks: Arc::clone(&self.tasks),
                members: Arc::clone(&self.members),
                availability: Arc::clone(&self.availability),
                records: Arc::clone(&self.records),
            },
            Arc::new(HeuristicSuggestionGenerator::new()),
            Arc::clone(&self.clock),
        )
    }

    /// Registers a member with the given skills.
    ///
    /// # Errors
    ///
    /// Returns an error when registration fails.
    pub async fn register(
        &self,
        name: &str,
        role: MemberRole,
        skills: &[&str],
    ) -> Result<Member, eyre::Report> {
        let request = RegisterMemberRequest::new(
            format!("gh|{}", name.to_lowercase()),
            name,
            format!("{}@example.com", name.to_lowercase()),
            role,
        )
        .with_skills(skills.iter().copied());
        Ok(self.member_service().register(request).await?)
    }

    /// Registers a manager and returns the acting identity.
    ///
    /// # Errors
    ///
    /// Returns an error when registration fails.
    pub async fn manager(&self) -> Result<Actor, eyre::Report> {
        let manager = self.register("Mona", MemberRole::Manager, &[]).await?;
        Ok(Actor::manager(manager.id()))
    }
}

/// Fresh stores pinned to Monday 2 March 2026, 09:00 UTC.
#[fixture]
pub fn stores() -> Stores {
    Stores {
        clock: Arc::new(FixedClock::on(2026, 3, 2)),
        tasks: Arc::new(InMemoryTaskRepository::new()),
        members: Arc::new(InMemoryMemberRepository::new()),
        availability: Arc::new(InMemoryAvailabilityRepository::new()),
        records: Arc::new(InMemoryReassignmentRepository::new()),
    }
}
