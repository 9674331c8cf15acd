//! Walk through an authoring session: create an automaton, wire up its
//! transitions, mark start/accept states, add test cases and watch the store
//! publish each change.
//!
//! Run with: `cargo run --example authoring`

use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use automaton_lab_core::{Automaton, TestCase, Transition};
use automaton_lab_store::{AutomatonStore, JsonFileStore};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .init();

    let dir = tempfile::tempdir()?;
    let backend = Arc::new(JsonFileStore::new(dir.path()));
    let store = AutomatonStore::open(backend.clone());

    let mut rx = store.subscribe();

    // An automaton accepting binary strings with an even number of zeros.
    store.create(Automaton::new("even-zeros"))?;
    store.add_transition("even-zeros", Transition::new("even", '0', "odd"))?;
    store.add_transition("even-zeros", Transition::new("odd", '0', "even"))?;
    store.add_transition("even-zeros", Transition::new("even", '1', "even"))?;
    store.add_transition("even-zeros", Transition::new("odd", '1', "odd"))?;
    store.set_start_state("even-zeros", "even")?;
    store.add_accept_state("even-zeros", "even")?;

    store.add_test_case("even-zeros", TestCase::new("1001", true))?;
    store.add_test_case("even-zeros", TestCase::new("10", false))?;

    let latest = rx.borrow_and_update().clone();
    println!(
        "published {} automaton(s); '{}' has {} transitions and {} test cases",
        latest.len(),
        latest[0].name,
        latest[0].transitions.len(),
        latest[0].test_cases.len(),
    );

    // Everything above is already on disk; a fresh store sees the same data.
    let reopened = AutomatonStore::open(backend);
    println!(
        "reopened store from {} and found {} automaton(s)",
        dir.path().display(),
        reopened.len(),
    );

    Ok(())
}
