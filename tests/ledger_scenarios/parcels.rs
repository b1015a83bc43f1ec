//! Parcel registry scenarios

use std::collections::BTreeMap;

use landledger::{Command, Output, Parcel};
use landledger_core::{Key, RecordStore, TypeTag};
use proptest::prelude::*;

use crate::*;

fn index_markers(ledger: &landledger::Executor) -> usize {
    let mut inv = ledger.store().begin();
    let count = inv.scan_prefix(&Key::prefix(TypeTag::Index)).unwrap().count();
    count
}

#[test]
fn register_fills_defaults() {
    let ledger = ledger();
    register(&ledger, &Parcel::new("P1", "alice"));

    let parcel = get_parcel(&ledger, "P1").unwrap();
    assert_eq!(parcel.title_number, "P1");
    assert!(!parcel.verified);
    assert!(parcel.created_at.is_some());
    assert_eq!(titled(&ledger, "P1"), vec!["P1"]);
}

#[test]
fn duplicate_and_missing_ids() {
    let ledger = ledger();
    register(&ledger, &Parcel::new("P1", "alice"));

    let json = serde_json::to_string(&Parcel::new("P1", "mallory")).unwrap();
    let err = run(&ledger, Command::RegisterParcel { parcel: json }).unwrap_err();
    assert_eq!(err.code(), "already_exists");
    assert_eq!(get_parcel(&ledger, "P1").unwrap().owner, "alice");

    let err = get_parcel(&ledger, "P404").unwrap_err();
    assert_eq!(err.code(), "not_found");
}

#[test]
fn transfer_moves_owner_index_entry() {
    let ledger = ledger();
    register(&ledger, &Parcel::new("P1", "alice"));
    register(&ledger, &Parcel::new("P2", "alice"));

    run(
        &ledger,
        Command::TransferOwner {
            id: "P1".into(),
            new_owner: "bob".into(),
        },
    )
    .unwrap();

    assert_eq!(owned_by(&ledger, "alice"), vec!["P2"]);
    assert_eq!(owned_by(&ledger, "bob"), vec!["P1"]);
    assert_eq!(index_markers(&ledger), 4);
}

#[test]
fn delete_removes_record_and_both_index_entries() {
    let ledger = ledger();
    register(&ledger, &Parcel::new("P1", "alice").with_title("T-77"));
    assert_eq!(index_markers(&ledger), 2);

    run(&ledger, Command::DeleteParcel { id: "P1".into() }).unwrap();

    assert_eq!(get_parcel(&ledger, "P1").unwrap_err().code(), "not_found");
    assert!(owned_by(&ledger, "alice").is_empty());
    assert!(titled(&ledger, "T-77").is_empty());
    assert_eq!(index_markers(&ledger), 0);

    let err = run(&ledger, Command::DeleteParcel { id: "P1".into() }).unwrap_err();
    assert_eq!(err.code(), "not_found");
}

#[test]
fn descriptive_updates_leave_indexes_alone() {
    let ledger = ledger();
    register(&ledger, &Parcel::new("P1", "alice"));

    ledger
        .invoke("UpdateDescription", &["P1".into(), "river frontage".into()])
        .unwrap();
    ledger
        .invoke(
            "UpdateGeometry",
            &[
                "P1".into(),
                r#"[{"lat":-1.29,"lng":36.82},{"lat":-1.30,"lng":36.83}]"#.into(),
                " 2.5 ".into(),
            ],
        )
        .unwrap();
    ledger
        .invoke("VerifyParcel", &["P1".into(), "true".into()])
        .unwrap();

    let parcel = get_parcel(&ledger, "P1").unwrap();
    assert_eq!(parcel.description, "river frontage");
    assert_eq!(parcel.coordinates.len(), 2);
    assert_eq!(parcel.area_sq_km, 2.5);
    assert!(parcel.verified);
    assert_eq!(owned_by(&ledger, "alice"), vec!["P1"]);
    assert_eq!(index_markers(&ledger), 2);
}

#[test]
fn bad_geometry_is_rejected_whole() {
    let ledger = ledger();
    register(&ledger, &Parcel::new("P1", "alice"));
    let before = ledger.store().current_version();

    let err = ledger
        .invoke(
            "UpdateGeometry",
            &["P1".into(), r#"[{"lat":95.0,"lng":0.0}]"#.into(), "1".into()],
        )
        .unwrap_err();
    assert_eq!(err.code(), "invalid_argument");
    assert_eq!(ledger.store().current_version(), before);
}

#[test]
fn list_returns_every_parcel_in_id_order() {
    let ledger = ledger();
    for (id, owner) in [("P3", "c"), ("P1", "a"), ("P2", "b")] {
        register(&ledger, &Parcel::new(id, owner));
    }
    let ids = parcel_ids(run(&ledger, Command::ListParcels).unwrap());
    assert_eq!(ids, vec!["P1", "P2", "P3"]);
}

#[derive(Debug, Clone)]
enum Op {
    Register(u8, u8),
    Transfer(u8, u8),
    Delete(u8),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..4, 0u8..3).prop_map(|(p, o)| Op::Register(p, o)),
        (0u8..4, 0u8..3).prop_map(|(p, o)| Op::Transfer(p, o)),
        (0u8..4).prop_map(Op::Delete),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn query_by_owner_matches_current_owners(ops in prop::collection::vec(op(), 1..30)) {
        let ledger = landledger::Executor::in_memory();
        let mut model: BTreeMap<String, String> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Register(p, o) => {
                    let (id, owner) = (format!("P{}", p), format!("o{}", o));
                    let json = serde_json::to_string(&Parcel::new(id.clone(), owner.clone())).unwrap();
                    if ledger.execute(Command::RegisterParcel { parcel: json }).is_ok() {
                        model.insert(id, owner);
                    }
                }
                Op::Transfer(p, o) => {
                    let (id, owner) = (format!("P{}", p), format!("o{}", o));
                    let cmd = Command::TransferOwner { id: id.clone(), new_owner: owner.clone() };
                    if ledger.execute(cmd).is_ok() {
                        model.insert(id, owner);
                    }
                }
                Op::Delete(p) => {
                    let id = format!("P{}", p);
                    if ledger.execute(Command::DeleteParcel { id: id.clone() }).is_ok() {
                        model.remove(&id);
                    }
                }
            }
        }

        for o in 0u8..3 {
            let owner = format!("o{}", o);
            let expected: Vec<String> = model
                .iter()
                .filter(|(_, current)| **current == owner)
                .map(|(id, _)| id.clone())
                .collect();
            let found = match ledger.execute(Command::QueryByOwner { owner }).unwrap() {
                Output::Parcels(ps) => ps.into_iter().map(|p| p.id).collect::<Vec<_>>(),
                other => panic!("Expected Parcels output, got {:?}", other),
            };
            prop_assert_eq!(found, expected);
        }
    }
}
