//! Parcel registration through milestone payout

use landledger::{Command, LedgerError, Output, Parcel, Project};

use crate::*;

#[test]
fn parcel_to_payout() {
    let ledger = ledger();

    // Register with an empty title: the title defaults to the id.
    let registered = register(&ledger, &Parcel::new("P1", "alice"));
    assert_eq!(registered.title_number, "P1");

    run(
        &ledger,
        Command::TransferOwner {
            id: "P1".into(),
            new_owner: "bob".into(),
        },
    )
    .unwrap();
    assert!(owned_by(&ledger, "alice").is_empty());
    assert_eq!(owned_by(&ledger, "bob"), vec!["P1"]);

    create(&ledger, &Project::new("J1", "P1", "bob").with_goal(1000));
    run(
        &ledger,
        Command::AddMilestone {
            id: "J1".into(),
            label: "phase1".into(),
            amount: "400".into(),
        },
    )
    .unwrap();

    fund(&ledger, "J1", "300").unwrap();
    assert_eq!(get_project(&ledger, "J1").funded, 300);

    let err = release(&ledger, "J1", "phase1").unwrap_err();
    assert!(matches!(err, LedgerError::InsufficientFunds(_)));
    assert_eq!(get_project(&ledger, "J1").funded, 300);

    fund(&ledger, "J1", "200").unwrap();
    assert_eq!(get_project(&ledger, "J1").funded, 500);

    assert_eq!(release(&ledger, "J1", "phase1").unwrap(), Output::Unit);
    let project = get_project(&ledger, "J1");
    assert_eq!(project.funded, 100);
    assert!(project.milestone("phase1").unwrap().released);

    let version = ledger.store().current_version();
    release(&ledger, "J1", "phase1").unwrap();
    assert_eq!(get_project(&ledger, "J1").funded, 100);
    assert_eq!(ledger.store().current_version(), version);
}

#[test]
fn parcel_history_after_transfer_and_delete() {
    let ledger = ledger();
    register(&ledger, &Parcel::new("P1", "alice"));
    run(
        &ledger,
        Command::TransferOwner {
            id: "P1".into(),
            new_owner: "bob".into(),
        },
    )
    .unwrap();
    run(&ledger, Command::DeleteParcel { id: "P1".into() }).unwrap();

    let history = match run(&ledger, Command::ParcelHistory { id: "P1".into() }).unwrap() {
        Output::ParcelHistory(h) => h,
        other => panic!("Expected ParcelHistory output, got {:?}", other),
    };
    let owners: Vec<Option<&str>> = history
        .iter()
        .map(|e| e.value.as_ref().map(|p| p.owner.as_str()))
        .collect();
    assert_eq!(owners, vec![Some("alice"), Some("bob"), None]);
    assert!(history[2].is_delete);

    // Re-registering starts a new life on the same key.
    register(&ledger, &Parcel::new("P1", "carol"));
    assert_eq!(owned_by(&ledger, "carol"), vec!["P1"]);
}

#[test]
fn unknown_history_is_empty() {
    let ledger = ledger();
    assert_eq!(ledger.invoke("GetProjectHistory", &["J9".into()]).unwrap(), "[]");
}
