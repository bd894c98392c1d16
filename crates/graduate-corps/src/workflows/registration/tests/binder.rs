use std::sync::{Arc, Barrier};
use std::thread;

use super::common::*;
use crate::workflows::registration::domain::AccountCredentials;
use crate::workflows::registration::repository::ProfileRepositoryError;
use crate::workflows::registration::service::{RegistrationError, RegistrationService};
use crate::workflows::registration::status::ApplicationStatus;
use crate::workflows::roster::domain::RosterRowId;
use crate::workflows::roster::repository::RosterRepositoryError;

#[test]
fn register_copies_identity_and_marks_row_claimed() {
    let (service, roster, _, _) = build_service();
    let row = sample_row("row-000101");
    roster.seed(row.clone());

    let profile = service
        .register(&row.id, registration_form())
        .expect("registration succeeds");

    assert_eq!(profile.roster_row_id, row.id);
    assert_eq!(profile.first_name, row.first_name);
    assert_eq!(profile.surname, row.surname);
    assert_eq!(profile.gender, row.gender);
    assert_eq!(profile.phone_number, row.phone_number);
    assert_eq!(profile.university, row.university);
    assert_eq!(profile.course, row.course);
    assert_eq!(profile.graduation_year, row.graduation_year);
    assert_eq!(profile.status, ApplicationStatus::UnderReview);
    assert!(profile.service_department_id.is_none());

    let stored = roster.row(&row.id).expect("row present");
    assert!(stored.claimed);
    assert!(stored.claimed_at.is_some());
}

#[test]
fn invalid_form_reports_every_violation_and_leaves_row_unclaimed() {
    let (service, roster, profiles, _) = build_service();
    let row = sample_row("row-000102");
    roster.seed(row.clone());

    let mut form = registration_form();
    form.personal.email = "not-an-email".to_string();
    form.family.next_of_kin_name = "  ".to_string();
    form.credentials = AccountCredentials {
        password: "short".to_string(),
        confirm_password: "different".to_string(),
    };

    match service.register(&row.id, form) {
        Err(RegistrationError::Validation { errors }) => {
            assert!(errors.contains(&"Email must be a valid email address".to_string()));
            assert!(errors.contains(&"Next of kin name is required".to_string()));
            assert!(errors.contains(&"Password must be at least 8 characters".to_string()));
            assert!(errors.contains(&"Password confirmation does not match".to_string()));
        }
        other => panic!("expected validation error, got {other:?}"),
    }

    let stored = roster.row(&row.id).expect("row present");
    assert!(!stored.claimed, "validation failure must not claim the row");
    assert_eq!(profiles.count(), 0);
}

#[test]
fn register_fails_on_unknown_row() {
    let (service, _, _, _) = build_service();

    match service.register(&RosterRowId("row-missing".to_string()), registration_form()) {
        Err(RegistrationError::Roster(RosterRepositoryError::NotFound)) => {}
        other => panic!("expected not found error, got {other:?}"),
    }
}

#[test]
fn second_registration_sees_already_claimed() {
    let (service, roster, _, _) = build_service();
    let row = sample_row("row-000103");
    roster.seed(row.clone());

    service
        .register(&row.id, registration_form())
        .expect("first registration succeeds");

    match service.register(&row.id, registration_form()) {
        Err(RegistrationError::Roster(RosterRepositoryError::AlreadyClaimed)) => {}
        other => panic!("expected already claimed error, got {other:?}"),
    }
}

#[test]
fn concurrent_binds_allow_exactly_one_profile() {
    let (service, roster, profiles, _) = build_service();
    let row = sample_row("row-000104");
    roster.seed(row.clone());

    let service = Arc::new(service);
    let barrier = Arc::new(Barrier::new(2));

    let handles: Vec<_> = (0..2)
        .map(|_| {
            let service = service.clone();
            let barrier = barrier.clone();
            let row_id = row.id.clone();
            thread::spawn(move || {
                barrier.wait();
                service.register(&row_id, registration_form())
            })
        })
        .collect();

    let results: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().expect("bind thread panicked"))
        .collect();

    let successes = results.iter().filter(|result| result.is_ok()).count();
    let conflicts = results
        .iter()
        .filter(|result| {
            matches!(
                result,
                Err(RegistrationError::Roster(RosterRepositoryError::AlreadyClaimed))
            )
        })
        .count();

    assert_eq!(successes, 1, "exactly one bind must win");
    assert_eq!(conflicts, 1, "the loser must see AlreadyClaimed");
    assert_eq!(profiles.count(), 1);
}

#[test]
fn claim_is_released_when_profile_insert_conflicts() {
    let roster = Arc::new(MemoryRoster::default());
    let ledger = Arc::new(MemoryLedger::default());
    let service = RegistrationService::new(roster.clone(), Arc::new(ConflictProfiles), ledger);

    let row = sample_row("row-000105");
    roster.seed(row.clone());

    match service.register(&row.id, registration_form()) {
        Err(RegistrationError::Profile(ProfileRepositoryError::Conflict)) => {}
        other => panic!("expected profile conflict, got {other:?}"),
    }

    let stored = roster.row(&row.id).expect("row present");
    assert!(!stored.claimed, "failed bind must release the claim");
    assert!(stored.claimed_at.is_none());
}

#[test]
fn search_matches_exactly_and_reports_claimed_state() {
    let (service, roster, _, _) = build_service();
    let row = sample_row("row-000106");
    roster.seed(row.clone());

    let mut other = sample_row("row-000107");
    other.surname = "Okafor".to_string();
    roster.seed(other);

    let matches = service.search(&query_for(&row)).expect("search succeeds");
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].id, row.id);
    assert!(!matches[0].claimed);

    service
        .register(&row.id, registration_form())
        .expect("registration succeeds");

    let matches = service.search(&query_for(&row)).expect("search succeeds");
    assert_eq!(matches.len(), 1, "claimed rows stay visible");
    assert!(matches[0].claimed);
}

#[test]
fn search_with_no_match_returns_empty() {
    let (service, roster, _, _) = build_service();
    let row = sample_row("row-000108");
    roster.seed(row.clone());

    let mut query = query_for(&row);
    query.phone_number = "+2340000000000".to_string();

    let matches = service.search(&query).expect("search succeeds");
    assert!(matches.is_empty());
}
