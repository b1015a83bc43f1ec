//! Ledger Scenario Test Suite
//!
//! Drives the ledger through its public command API only, the way a host
//! would: JSON payloads and text arguments in, outputs or typed errors out.
//!
//! ## Modules
//!
//! - `parcels`: registration, ownership queries, deletion
//! - `projects`: voting, funding, milestone release
//! - `end_to_end`: the full parcel-to-payout walkthrough
//! - `concurrency`: overlapping commands on a shared store
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test ledger_scenarios
//! cargo test --test ledger_scenarios projects::
//! ```

use std::sync::Once;

use landledger::{Command, Executor, LedgerError, Output, Parcel, Project};

mod concurrency;
mod end_to_end;
mod parcels;
mod projects;

static TRACING: Once = Once::new();

/// Install a test-writer subscriber once per process
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

/// Fresh ledger with default switches
pub fn ledger() -> Executor {
    init_tracing();
    Executor::in_memory()
}

pub fn run(ledger: &Executor, cmd: Command) -> Result<Output, LedgerError> {
    ledger.execute(cmd)
}

pub fn register(ledger: &Executor, parcel: &Parcel) -> Parcel {
    let json = serde_json::to_string(parcel).unwrap();
    match run(ledger, Command::RegisterParcel { parcel: json }).unwrap() {
        Output::Parcel(p) => p,
        other => panic!("Expected Parcel output, got {:?}", other),
    }
}

pub fn create(ledger: &Executor, project: &Project) -> Project {
    let json = serde_json::to_string(project).unwrap();
    match run(ledger, Command::CreateProject { project: json }).unwrap() {
        Output::Project(p) => p,
        other => panic!("Expected Project output, got {:?}", other),
    }
}

pub fn get_parcel(ledger: &Executor, id: &str) -> Result<Parcel, LedgerError> {
    match run(ledger, Command::GetParcel { id: id.into() })? {
        Output::Parcel(p) => Ok(p),
        other => panic!("Expected Parcel output, got {:?}", other),
    }
}

pub fn get_project(ledger: &Executor, id: &str) -> Project {
    match run(ledger, Command::GetProject { id: id.into() }).unwrap() {
        Output::Project(p) => p,
        other => panic!("Expected Project output, got {:?}", other),
    }
}

/// Ids of the parcels a query returned, in result order
pub fn parcel_ids(out: Output) -> Vec<String> {
    match out {
        Output::Parcels(ps) => ps.into_iter().map(|p| p.id).collect(),
        other => panic!("Expected Parcels output, got {:?}", other),
    }
}

pub fn owned_by(ledger: &Executor, owner: &str) -> Vec<String> {
    parcel_ids(run(ledger, Command::QueryByOwner { owner: owner.into() }).unwrap())
}

pub fn titled(ledger: &Executor, title: &str) -> Vec<String> {
    parcel_ids(run(ledger, Command::QueryByTitle { title: title.into() }).unwrap())
}

pub fn fund(ledger: &Executor, id: &str, amount: &str) -> Result<Output, LedgerError> {
    run(
        ledger,
        Command::Fund {
            id: id.into(),
            amount: amount.into(),
        },
    )
}

pub fn release(ledger: &Executor, id: &str, label: &str) -> Result<Output, LedgerError> {
    run(
        ledger,
        Command::ReleaseMilestone {
            id: id.into(),
            label: label.into(),
        },
    )
}
