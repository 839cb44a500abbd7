use fundflow_core::donations::{DonationServiceTrait, NewDonation};
use fundflow_core::projects::{NewProject, ProjectError, ProjectServiceTrait, ProjectUpdate};
use fundflow_core::Error;

mod common;

fn new_project(name: &str, full_amount: i64) -> NewProject {
    NewProject {
        id: None,
        name: name.to_string(),
        description: "Shelter renovation".to_string(),
        full_amount,
    }
}

fn new_donation(user_id: &str, full_amount: i64) -> NewDonation {
    NewDonation {
        id: None,
        user_id: user_id.to_string(),
        comment: None,
        full_amount,
    }
}

#[test]
fn test_project_created_into_empty_pool_stays_untouched() {
    let (_dir, pool) = common::setup_pool();
    let (projects, _donations) = common::build_services(pool);

    let (project, contributors) = projects.create_project(new_project("Food bank", 1000)).unwrap();

    assert!(contributors.is_empty());
    assert_eq!(project.invested_amount, 0);
    assert!(!project.fully_invested);
    assert_eq!(project.close_date, None);
}

#[test]
fn test_exact_match_closes_both_records_with_equal_close_date() {
    let (_dir, pool) = common::setup_pool();
    let (projects, donations) = common::build_services(pool);

    let (waiting, _) = donations.create_donation(new_donation("user-1", 500)).unwrap();
    let (project, contributors) = projects.create_project(new_project("Vaccination", 500)).unwrap();

    assert_eq!(contributors.len(), 1);
    assert_eq!(contributors[0].id, waiting.id);
    assert!(project.fully_invested);
    assert!(contributors[0].fully_invested);
    assert_eq!(project.close_date, contributors[0].close_date);
    assert!(project.close_date.is_some());
}

#[test]
fn test_project_drains_waiting_donations_in_arrival_order() {
    let (_dir, pool) = common::setup_pool();
    let (projects, donations) = common::build_services(pool);

    let (d1, _) = donations.create_donation(new_donation("user-1", 300)).unwrap();
    let (d2, _) = donations.create_donation(new_donation("user-2", 400)).unwrap();

    let (project, contributors) = projects.create_project(new_project("New roof", 500)).unwrap();

    assert_eq!(
        contributors.iter().map(|d| d.id.as_str()).collect::<Vec<_>>(),
        vec![d1.id.as_str(), d2.id.as_str()]
    );
    assert!(project.fully_invested);
    assert_eq!(project.invested_amount, 500);
    assert!(contributors[0].fully_invested);
    assert_eq!(contributors[0].invested_amount, 300);
    assert!(!contributors[1].fully_invested);
    assert_eq!(contributors[1].invested_amount, 200);

    // The partially drained donation is persisted and feeds the next project.
    let (next_project, next_contributors) =
        projects.create_project(new_project("Medicine", 200)).unwrap();
    assert!(next_project.fully_invested);
    assert_eq!(next_contributors.len(), 1);
    assert_eq!(next_contributors[0].id, d2.id);
    assert!(next_contributors[0].fully_invested);
}

#[test]
fn test_donation_carries_over_across_projects_and_future_runs() {
    let (_dir, pool) = common::setup_pool();
    let (projects, donations) = common::build_services(pool);

    projects.create_project(new_project("Kennels", 300)).unwrap();
    projects.create_project(new_project("Heating", 400)).unwrap();

    let (donation, funded) = donations.create_donation(new_donation("user-1", 1000)).unwrap();

    assert_eq!(funded.len(), 2);
    assert!(funded.iter().all(|p| p.fully_invested));
    assert_eq!(donation.invested_amount, 700);
    assert!(!donation.fully_invested);

    let (_, contributors) = projects.create_project(new_project("Food", 300)).unwrap();
    assert_eq!(contributors.len(), 1);
    assert_eq!(contributors[0].id, donation.id);
    assert!(contributors[0].fully_invested);
    assert_eq!(contributors[0].invested_amount, 1000);
}

#[test]
fn test_update_below_invested_amount_is_rejected_and_state_unchanged() {
    let (_dir, pool) = common::setup_pool();
    let (projects, donations) = common::build_services(pool);

    let (project, _) = projects.create_project(new_project("Sterilization", 500)).unwrap();
    donations.create_donation(new_donation("user-1", 200)).unwrap();

    let update = ProjectUpdate {
        full_amount: Some(100),
        ..Default::default()
    };
    let err = projects.update_project(&project.id, update).unwrap_err();
    assert!(matches!(
        err,
        Error::Project(ProjectError::FullAmountBelowInvested { invested: 200, .. })
    ));

    let unchanged = projects.get_project(&project.id).unwrap();
    assert_eq!(unchanged.full_amount, 500);
    assert_eq!(unchanged.invested_amount, 200);
    assert!(!unchanged.fully_invested);
}

#[test]
fn test_delete_of_invested_project_is_blocked() {
    let (_dir, pool) = common::setup_pool();
    let (projects, donations) = common::build_services(pool);

    let (project, _) = projects.create_project(new_project("Aviary", 500)).unwrap();
    donations.create_donation(new_donation("user-1", 50)).unwrap();

    let err = projects.delete_project(&project.id).unwrap_err();
    assert!(matches!(
        err,
        Error::Project(ProjectError::AlreadyInvested(_))
    ));
    assert!(projects.get_project(&project.id).is_ok());
}

#[test]
fn test_delete_of_untouched_project_succeeds() {
    let (_dir, pool) = common::setup_pool();
    let (projects, _donations) = common::build_services(pool);

    let (project, _) = projects.create_project(new_project("Aviary", 500)).unwrap();
    projects.delete_project(&project.id).unwrap();

    let err = projects.get_project(&project.id).unwrap_err();
    assert!(matches!(err, Error::Project(ProjectError::NotFound(_))));
}

#[test]
fn test_duplicate_project_name_is_rejected() {
    let (_dir, pool) = common::setup_pool();
    let (projects, _donations) = common::build_services(pool);

    projects.create_project(new_project("Aviary", 500)).unwrap();
    let err = projects.create_project(new_project("Aviary", 900)).unwrap_err();

    assert!(matches!(err, Error::Project(ProjectError::DuplicateName(_))));
}

#[test]
fn test_closed_project_cannot_be_edited() {
    let (_dir, pool) = common::setup_pool();
    let (projects, donations) = common::build_services(pool);

    let (project, _) = projects.create_project(new_project("Aviary", 300)).unwrap();
    donations.create_donation(new_donation("user-1", 300)).unwrap();

    let update = ProjectUpdate {
        name: Some("Bigger aviary".to_string()),
        ..Default::default()
    };
    let err = projects.update_project(&project.id, update).unwrap_err();
    assert!(matches!(err, Error::Project(ProjectError::Closed(_))));
}

#[test]
fn test_lowering_full_amount_to_invested_closes_the_project() {
    let (_dir, pool) = common::setup_pool();
    let (projects, donations) = common::build_services(pool);

    let (project, _) = projects.create_project(new_project("Aviary", 500)).unwrap();
    donations.create_donation(new_donation("user-1", 200)).unwrap();

    let update = ProjectUpdate {
        full_amount: Some(200),
        ..Default::default()
    };
    let (updated, contributors) = projects.update_project(&project.id, update).unwrap();

    assert!(contributors.is_empty());
    assert!(updated.fully_invested);
    assert_eq!(updated.invested_amount, 200);
    assert!(updated.close_date.is_some());
}

#[test]
fn test_raising_full_amount_keeps_project_open_for_new_donations() {
    let (_dir, pool) = common::setup_pool();
    let (projects, donations) = common::build_services(pool);

    let (project, _) = projects.create_project(new_project("Aviary", 300)).unwrap();
    donations.create_donation(new_donation("user-1", 250)).unwrap();

    let update = ProjectUpdate {
        full_amount: Some(600),
        ..Default::default()
    };
    let (updated, _) = projects.update_project(&project.id, update).unwrap();
    assert_eq!(updated.full_amount, 600);
    assert_eq!(updated.invested_amount, 250);
    assert!(!updated.fully_invested);

    let (_, funded) = donations.create_donation(new_donation("user-2", 350)).unwrap();
    assert_eq!(funded.len(), 1);
    assert!(funded[0].fully_invested);
    assert_eq!(funded[0].invested_amount, 600);
}

#[test]
fn test_donations_are_immutable_aggregates_per_user() {
    let (_dir, pool) = common::setup_pool();
    let (_projects, donations) = common::build_services(pool);

    donations.create_donation(new_donation("user-1", 100)).unwrap();
    donations.create_donation(new_donation("user-2", 200)).unwrap();
    donations.create_donation(new_donation("user-1", 300)).unwrap();

    let mine = donations.get_donations_by_user("user-1").unwrap();
    assert_eq!(mine.len(), 2);
    assert_eq!(
        mine.iter().map(|d| d.full_amount).collect::<Vec<_>>(),
        vec![100, 300]
    );
    assert_eq!(donations.get_donations().unwrap().len(), 3);
}

#[test]
fn test_closed_projects_report_orders_by_funding_duration() {
    let (_dir, pool) = common::setup_pool();
    let (projects, donations) = common::build_services(pool);

    // p1 waits through two allocation runs, p2 is funded in its own run.
    let (p1, _) = projects.create_project(new_project("Slow project", 400)).unwrap();
    donations.create_donation(new_donation("user-1", 100)).unwrap();
    let (p2, _) = projects.create_project(new_project("Fast project", 50)).unwrap();
    donations.create_donation(new_donation("user-2", 350)).unwrap();

    let report = projects.get_closed_projects_by_duration().unwrap();
    assert_eq!(report.len(), 2);
    assert!(report.iter().all(|p| p.fully_invested));
    // Both close in the final run; p2 was created later, so it funded faster.
    assert_eq!(report[0].id, p2.id);
    assert_eq!(report[1].id, p1.id);
}

#[test]
fn test_allocation_results_survive_a_fresh_service() {
    let (_dir, pool) = common::setup_pool();
    let (projects, donations) = common::build_services(pool.clone());

    let (project, _) = projects.create_project(new_project("Aviary", 500)).unwrap();
    let (donation, _) = donations.create_donation(new_donation("user-1", 200)).unwrap();

    let (projects, donations) = common::build_services(pool);
    let reloaded_project = projects.get_project(&project.id).unwrap();
    let reloaded_donation = donations.get_donation(&donation.id).unwrap();

    assert_eq!(reloaded_project.invested_amount, 200);
    assert!(reloaded_donation.fully_invested);
    assert!(reloaded_donation.close_date.is_some());
}

#[test]
fn test_invalid_inputs_are_rejected_before_any_allocation() {
    let (_dir, pool) = common::setup_pool();
    let (projects, donations) = common::build_services(pool);

    assert!(projects.create_project(new_project("", 100)).is_err());
    assert!(projects.create_project(new_project("Aviary", 0)).is_err());
    assert!(donations.create_donation(new_donation("user-1", -5)).is_err());
    assert!(donations.create_donation(new_donation("", 100)).is_err());

    assert!(projects.get_projects().unwrap().is_empty());
    assert!(donations.get_donations().unwrap().is_empty());
}
