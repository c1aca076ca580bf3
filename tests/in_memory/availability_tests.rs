//! Availability declarations through the service layer.

use super::helpers::{Stores, stores};
use chrono::NaiveDate;
use coverly::{
    availability::{
        domain::{AvailabilityKind, AvailabilityStatus},
        services::{AvailabilityServiceError, DeclareAvailabilityRequest},
    },
    team::domain::{Actor, MemberRole},
};
use rstest::rstest;

fn jan(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, day).expect("valid January date")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[expect(
    clippy::panic_in_result_fn,
    reason = "Test uses assertions for verification while returning Result for error propagation"
)]
async fn later_declaration_replaces_overlapping_one(stores: Stores) -> Result<(), eyre::Report> {
    let ada = stores.register("Ada", MemberRole::Member, &[]).await?;
    let actor = Actor::member(ada.id());
    let service = stores.availability_service();
    service
        .declare(actor, DeclareAvailabilityRequest::new(ada.id(), "ooo", jan(1), jan(10)))
        .await?;

    let second = service
        .declare(
            actor,
            DeclareAvailabilityRequest::new(ada.id(), "partial", jan(5), jan(15))
                .with_note("mornings only"),
        )
        .await?;

    assert_eq!(second.replaced.len(), 1);
    assert_eq!(
        service.status_on_date(ada.id(), jan(6)).await?,
        AvailabilityStatus::Declared(AvailabilityKind::Partial)
    );
    assert_eq!(
        service.status_on_date(ada.id(), jan(2)).await?,
        AvailabilityStatus::Available
    );
    let listing = service.list_for_member(ada.id()).await?;
    let covering: Vec<_> = listing
        .iter()
        .filter(|entry| entry.range().contains(jan(6)))
        .collect();
    assert_eq!(covering.len(), 1);
    assert_eq!(covering.first().map(|e| e.id()), Some(second.entry.id()));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[expect(
    clippy::panic_in_result_fn,
    reason = "Test uses assertions for verification while returning Result for error propagation"
)]
async fn members_cannot_declare_for_colleagues(stores: Stores) -> Result<(), eyre::Report> {
    let boss = stores.manager().await?;
    let ada = stores.register("Ada", MemberRole::Member, &[]).await?;
    let ben = stores.register("Ben", MemberRole::Member, &[]).await?;
    let service = stores.availability_service();
    let request = || DeclareAvailabilityRequest::new(ben.id(), "ooo", jan(3), jan(4));

    let refused = service.declare(Actor::member(ada.id()), request()).await;
    assert!(matches!(refused, Err(AvailabilityServiceError::NotAuthorized(_))));

    service.declare(boss, request()).await?;
    assert!(service.is_unavailable(ben.id(), jan(3)).await?);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[expect(
    clippy::panic_in_result_fn,
    reason = "Test uses assertions for verification while returning Result for error propagation"
)]
async fn inverted_ranges_are_rejected(stores: Stores) -> Result<(), eyre::Report> {
    let ada = stores.register("Ada", MemberRole::Member, &[]).await?;
    let service = stores.availability_service();

    let result = service
        .declare(
            Actor::member(ada.id()),
            DeclareAvailabilityRequest::new(ada.id(), "ooo", jan(9), jan(2)),
        )
        .await;

    assert!(matches!(result, Err(AvailabilityServiceError::Domain(_))));
    assert!(service.list_for_member(ada.id()).await?.is_empty());
    Ok(())
}
