//! The automaton definition and its derived state set.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::testing::TestCase;

/// A single edge of the automaton: reading `input` in `state` moves the
/// automaton to `next_state`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// State the transition originates from.
    pub state: String,
    /// Input character consumed by the transition.
    pub input: char,
    /// State the transition leads to.
    pub next_state: String,
}

impl Transition {
    /// Create a transition from string-ish parts.
    pub fn new(state: impl Into<String>, input: char, next_state: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            input,
            next_state: next_state.into(),
        }
    }
}

/// A named finite-state machine definition.
///
/// `name` is the primary key: unique across the collection and never changed
/// after creation. States are not stored explicitly; the state set is the
/// union of every `state` and `next_state` across all transitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Automaton {
    /// Unique name identifying the automaton.
    pub name: String,
    /// The start state, if one has been chosen. Must be a member of the
    /// derived state set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_state: Option<String>,
    /// Accepting states. Every entry must be a member of the derived state
    /// set.
    #[serde(default)]
    pub accept_states: Vec<String>,
    /// All transitions of the automaton.
    #[serde(default)]
    pub transitions: Vec<Transition>,
    /// Example inputs with expected outcomes. Order is user-controlled.
    #[serde(default)]
    pub test_cases: Vec<TestCase>,
}

impl Automaton {
    /// Create an empty automaton with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start_state: None,
            accept_states: Vec::new(),
            transitions: Vec::new(),
            test_cases: Vec::new(),
        }
    }

    /// The derived state set: every state mentioned by any transition, in
    /// lexicographic order. Ordering is load-bearing for the graph
    /// projection, which must be stable across recomputations.
    pub fn states(&self) -> BTreeSet<String> {
        self.transitions
            .iter()
            .flat_map(|t| [t.state.clone(), t.next_state.clone()])
            .collect()
    }

    /// Whether a state name appears in any transition.
    pub fn has_state(&self, state: &str) -> bool {
        self.transitions
            .iter()
            .any(|t| t.state == state || t.next_state == state)
    }

    /// Whether adding `candidate` would duplicate the `(state, input)` pair of
    /// an existing transition. The target state is deliberately ignored: the
    /// rule models determinism intent, not a hard constraint.
    pub fn is_transition_redundant(&self, candidate: &Transition) -> bool {
        self.transitions
            .iter()
            .any(|t| t.state == candidate.state && t.input == candidate.input)
    }

    /// Strip `start_state` and `accept_states` entries that no longer refer
    /// to a state in the derived state set.
    ///
    /// Called after transitions have been removed. Without this, re-adding a
    /// previously removed state would silently revive its old start/accept
    /// roles, which is not what a user expects from a fresh state.
    pub fn repair_references(&mut self) {
        let states = self.states();
        if let Some(start) = &self.start_state {
            if !states.contains(start) {
                self.start_state = None;
            }
        }
        self.accept_states.retain(|s| states.contains(s));
    }
}
