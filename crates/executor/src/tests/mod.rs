//! Test modules for the executor crate.


use crate::{Executor, Output, Parcel, Project};

/// Fresh executor over an in-memory store with default switches.
pub(crate) fn create_test_executor() -> Executor {
    Executor::in_memory()
}

pub(crate) fn parcel_json(id: &str, owner: &str) -> String {
    serde_json::to_string(&Parcel::new(id, owner)).unwrap()
}

pub(crate) fn project_json(id: &str, parcel_id: &str, owner: &str) -> String {
    serde_json::to_string(&Project::new(id, parcel_id, owner)).unwrap()
}

pub(crate) fn expect_project(out: Output) -> Project {
    match out {
        Output::Project(p) => p,
        other => panic!("Expected Project output, got {:?}", other),
    }
}
