//! Overlapping commands on a shared store

use std::sync::{Arc, Barrier};
use std::thread;

use landledger::{Executor, LedgerConfig, Parcel, Project, VersionedStore};

use crate::*;

#[test]
fn executors_share_one_store() {
    init_tracing();
    let store = Arc::new(VersionedStore::new());
    let a = Executor::new(Arc::clone(&store), LedgerConfig::default());
    let b = Executor::new(Arc::clone(&store), LedgerConfig::default());

    register(&a, &Parcel::new("P1", "alice"));
    assert_eq!(get_parcel(&b, "P1").unwrap().owner, "alice");
}

#[test]
fn racing_transfers_leave_one_consistent_owner() {
    let ledger = ledger();
    register(&ledger, &Parcel::new("P1", "alice"));

    let barrier = Arc::new(Barrier::new(4));
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let ledger = ledger.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                ledger
                    .invoke("TransferOwner", &["P1".into(), format!("owner-{}", i)])
                    .map_err(|e| e.code())
            })
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert!(results.iter().any(|r| r.is_ok()));
    for r in &results {
        if let Err(code) = r {
            assert_eq!(*code, "store_io");
        }
    }

    // Exactly one owner index entry, matching the record.
    let owner = get_parcel(&ledger, "P1").unwrap().owner;
    let mut holders = Vec::new();
    for candidate in ["alice", "owner-0", "owner-1", "owner-2", "owner-3"] {
        if !owned_by(&ledger, candidate).is_empty() {
            holders.push(candidate.to_string());
        }
    }
    assert_eq!(holders, vec![owner]);
}

#[test]
fn concurrent_funding_counts_every_success() {
    let ledger = ledger();
    register(&ledger, &Parcel::new("P1", "alice"));
    create(&ledger, &Project::new("J1", "P1", "bob"));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let ledger = ledger.clone();
            thread::spawn(move || {
                (0..20)
                    .filter(|_| fund(&ledger, "J1", "5").is_ok())
                    .count() as u64
            })
        })
        .collect();
    let committed: u64 = handles.into_iter().map(|h| h.join().unwrap()).sum();

    assert!(committed > 0);
    assert_eq!(get_project(&ledger, "J1").funded, committed * 5);
}
