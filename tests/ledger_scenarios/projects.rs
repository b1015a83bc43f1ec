//! Project ledger scenarios

use landledger::{Command, Output, Parcel, Project, ProjectStatus};

use crate::*;

fn setup() -> landledger::Executor {
    let ledger = ledger();
    register(&ledger, &Parcel::new("P1", "alice"));
    register(&ledger, &Parcel::new("P2", "carol"));
    create(&ledger, &Project::new("J1", "P1", "bob").with_goal(1000));
    ledger
}

fn project_ids(out: Output) -> Vec<String> {
    match out {
        Output::Projects(ps) => ps.into_iter().map(|p| p.id).collect(),
        other => panic!("Expected Projects output, got {:?}", other),
    }
}

#[test]
fn create_starts_unfunded_and_stamped() {
    let ledger = setup();
    let project = get_project(&ledger, "J1");
    assert_eq!(project.status, ProjectStatus::Created);
    assert_eq!(project.funded, 0);
    assert!(project.created_at.is_some());
    assert_eq!(project.created_at, project.updated_at);
}

#[test]
fn create_rejects_prefunded_records() {
    let ledger = setup();
    let mut project = Project::new("J2", "P1", "bob");
    project.funded = 10;
    let json = serde_json::to_string(&project).unwrap();
    let err = run(&ledger, Command::CreateProject { project: json }).unwrap_err();
    assert_eq!(err.code(), "invalid_argument");
}

#[test]
fn create_rejects_preset_voters_and_status() {
    let ledger = setup();

    let mut voted = Project::new("J2", "P1", "bob");
    voted.voters.insert("x".into());
    voted.voters.insert("y".into());
    let json = serde_json::to_string(&voted).unwrap();
    let err = run(&ledger, Command::CreateProject { project: json }).unwrap_err();
    assert_eq!(err.code(), "invalid_argument");

    let mut done = Project::new("J2", "P1", "bob");
    done.status = ProjectStatus::Completed;
    let json = serde_json::to_string(&done).unwrap();
    let err = run(&ledger, Command::CreateProject { project: json }).unwrap_err();
    assert_eq!(err.code(), "invalid_argument");

    // Status spelling is case-insensitive on the way in.
    let json = r#"{"projectId":"J2","parcelId":"P1","owner":"bob","status":"Created"}"#;
    run(&ledger, Command::CreateProject { project: json.into() }).unwrap();
    assert_eq!(get_project(&ledger, "J2").status, ProjectStatus::Created);
    assert!(get_project(&ledger, "J2").voters.is_empty());
}

#[test]
fn repeat_vote_keeps_voter_set_size() {
    let ledger = setup();
    for voter in ["v1", "v2", "v1"] {
        ledger
            .invoke("Vote", &["J1".into(), voter.into()])
            .unwrap();
    }
    let version = ledger.store().current_version();
    ledger.invoke("Vote", &["J1".into(), "v2".into()]).unwrap();

    assert_eq!(get_project(&ledger, "J1").voters.len(), 2);
    assert_eq!(ledger.store().current_version(), version);
}

#[test]
fn fund_rejects_non_positive_and_garbage_amounts() {
    let ledger = setup();
    for bad in ["0", "-1", "12abc", "", "1.5"] {
        let err = fund(&ledger, "J1", bad).unwrap_err();
        assert_eq!(err.code(), "invalid_argument", "amount {:?}", bad);
    }
    fund(&ledger, "J1", " 42 ").unwrap();
    assert_eq!(get_project(&ledger, "J1").funded, 42);

    let err = fund(&ledger, "J404", "1").unwrap_err();
    assert_eq!(err.code(), "not_found");
}

#[test]
fn funded_only_drops_through_release() {
    let ledger = setup();
    ledger
        .invoke("AddMilestone", &["J1".into(), "a".into(), "30".into()])
        .unwrap();
    ledger
        .invoke("AddMilestone", &["J1".into(), "b".into(), "50".into()])
        .unwrap();

    for step in ["fund:40", "release:a", "fund:60", "release:b", "release:a", "fund:5"] {
        let (kind, arg) = step.split_once(':').unwrap();
        let before = get_project(&ledger, "J1").funded;
        match kind {
            "fund" => {
                fund(&ledger, "J1", arg).unwrap();
                assert!(get_project(&ledger, "J1").funded > before);
            }
            _ => {
                let milestone = get_project(&ledger, "J1")
                    .milestone(arg)
                    .cloned()
                    .unwrap();
                release(&ledger, "J1", arg).unwrap();
                let after = get_project(&ledger, "J1").funded;
                if milestone.released {
                    assert_eq!(after, before);
                } else {
                    assert_eq!(after, before - milestone.amount);
                }
            }
        }
    }
    assert_eq!(get_project(&ledger, "J1").funded, 40 - 30 + 60 - 50 + 5);
}

#[test]
fn release_of_unknown_label_is_not_found() {
    let ledger = setup();
    let err = release(&ledger, "J1", "ghost").unwrap_err();
    assert_eq!(err.code(), "not_found");
}

#[test]
fn duplicate_milestone_label_rejected() {
    let ledger = setup();
    ledger
        .invoke("AddMilestone", &["J1".into(), "a".into(), "30".into()])
        .unwrap();
    let err = ledger
        .invoke("AddMilestone", &["J1".into(), "a".into(), "10".into()])
        .unwrap_err();
    assert_eq!(err.code(), "already_exists");
}

#[test]
fn status_follows_lifecycle() {
    let ledger = setup();
    let status = |s: &str| ledger.invoke("UpdateProjectStatus", &["J1".into(), s.into()]);

    assert_eq!(status("funded").unwrap_err().code(), "invalid_argument");
    status("Active").unwrap();
    status("funded").unwrap();
    status("completed").unwrap();
    assert_eq!(status("cancelled").unwrap_err().code(), "invalid_argument");
    assert_eq!(status("paused").unwrap_err().code(), "invalid_argument");
    assert_eq!(status("  ").unwrap_err().code(), "invalid_argument");

    assert_eq!(get_project(&ledger, "J1").status, ProjectStatus::Completed);
}

#[test]
fn listings_follow_parcel_and_owner_indexes() {
    let ledger = setup();
    create(&ledger, &Project::new("J2", "P2", "bob"));
    create(&ledger, &Project::new("J3", "P1", "dave"));

    let by_parcel = project_ids(
        run(&ledger, Command::ListProjectsByParcel { parcel_id: "P1".into() }).unwrap(),
    );
    assert_eq!(by_parcel, vec!["J1", "J3"]);

    let by_owner = project_ids(
        run(&ledger, Command::ListProjectsByOwner { owner: "bob".into() }).unwrap(),
    );
    assert_eq!(by_owner, vec!["J1", "J2"]);

    run(&ledger, Command::DeleteProject { id: "J1".into() }).unwrap();
    let by_owner = project_ids(
        run(&ledger, Command::ListProjectsByOwner { owner: "bob".into() }).unwrap(),
    );
    assert_eq!(by_owner, vec!["J2"]);
    assert_eq!(
        project_ids(run(&ledger, Command::ListProjects).unwrap()),
        vec!["J2", "J3"]
    );
}

#[test]
fn contractor_assignment_refreshes_updated_at() {
    let ledger = setup();
    let before = get_project(&ledger, "J1").updated_at;
    ledger
        .invoke("SetContractor", &["J1".into(), "acme".into()])
        .unwrap();
    let project = get_project(&ledger, "J1");
    assert_eq!(project.contractor, "acme");
    assert!(project.updated_at >= before);
}

#[test]
fn project_history_tracks_every_mutation() {
    let ledger = setup();
    fund(&ledger, "J1", "10").unwrap();
    fund(&ledger, "J1", "15").unwrap();
    run(&ledger, Command::DeleteProject { id: "J1".into() }).unwrap();

    let history = match run(&ledger, Command::ProjectHistory { id: "J1".into() }).unwrap() {
        Output::ProjectHistory(h) => h,
        other => panic!("Expected ProjectHistory output, got {:?}", other),
    };
    let funded: Vec<Option<u64>> = history
        .iter()
        .map(|e| e.value.as_ref().map(|p| p.funded))
        .collect();
    assert_eq!(funded, vec![Some(0), Some(10), Some(25), None]);
    assert!(history.last().unwrap().is_delete);
    assert!(history.windows(2).all(|w| w[0].version < w[1].version));
}
