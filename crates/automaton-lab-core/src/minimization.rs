//! The remotely proposed minimization of an automaton.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::automaton::Automaton;

/// A proposed replacement for an automaton's transitions, accept states and
/// start state, computed remotely.
///
/// The proposal only takes effect once it is explicitly persisted through the
/// store, so a user can preview the minimized automaton before committing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Minimization {
    /// The minimized equivalent of the original automaton. Carries the same
    /// name, which is how the store locates the automaton to overwrite.
    pub new_automaton: Automaton,
    /// States of the original automaton that no longer exist.
    pub removed_states: Vec<String>,
    /// Maps each merged state name to the original state names it absorbed.
    pub renaming_operations: BTreeMap<String, Vec<String>>,
}

impl Minimization {
    /// Whether the proposal merged any states. Used to decide if the renaming
    /// summary is worth showing.
    pub fn has_renaming_operations(&self) -> bool {
        !self.renaming_operations.is_empty()
    }
}
