//! The reactive automaton collection.

use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use automaton_lab_core::{Automaton, Minimization, TestCase, Transition};

use crate::backend::KeyValueStore;
use crate::error::{StoreError, StoreResult};

/// The fixed key the collection is persisted under.
pub const AUTOMATA_KEY: &str = "automata";

/// The authoritative, observable collection of automata.
///
/// Mutations are atomic: each one computes a complete new collection under an
/// internal mutex, publishes it on the watch channel and writes it to the
/// backend before returning. Subscribers always observe the latest full
/// collection.
pub struct AutomatonStore {
    backend: Arc<dyn KeyValueStore>,
    /// Authoritative current collection, guarded so the whole
    /// read-modify-publish-persist cycle is a single critical section.
    current: Mutex<Vec<Automaton>>,
    tx: watch::Sender<Vec<Automaton>>,
}

impl AutomatonStore {
    /// Open the store, loading any previously persisted collection.
    ///
    /// A missing key, unreadable backend or malformed payload falls back to
    /// the empty collection; loading never fails. The loaded value is not
    /// written back: persistence only happens on mutation.
    pub fn open(backend: Arc<dyn KeyValueStore>) -> Self {
        let automata = match backend.get(AUTOMATA_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Automaton>>(&raw) {
                Ok(automata) => {
                    info!(count = automata.len(), "Loaded automata collection");
                    automata
                }
                Err(e) => {
                    warn!(error = %e, "Stored automata collection is malformed, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => {
                debug!("No stored automata collection, starting empty");
                Vec::new()
            }
            Err(e) => {
                warn!(error = %e, "Could not read stored automata collection, starting empty");
                Vec::new()
            }
        };

        let (tx, _) = watch::channel(automata.clone());
        Self {
            backend,
            current: Mutex::new(automata),
            tx,
        }
    }

    // =========================================================================
    // Observation
    // =========================================================================

    /// Subscribe to the collection. The receiver immediately holds the
    /// current full collection and is notified with the full new collection
    /// on every mutation.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Automaton>> {
        self.tx.subscribe()
    }

    /// A copy of the current collection.
    pub fn snapshot(&self) -> Vec<Automaton> {
        self.current.lock().expect("store lock poisoned").clone()
    }

    /// Look up an automaton by name in the current collection.
    pub fn find_by_name(&self, name: &str) -> Option<Automaton> {
        self.current
            .lock()
            .expect("store lock poisoned")
            .iter()
            .find(|a| a.name == name)
            .cloned()
    }

    /// A live view of one automaton that re-evaluates on every emission.
    /// Yields `None` while no automaton with the name exists.
    pub fn watch_by_name(&self, name: impl Into<String>) -> AutomatonView {
        AutomatonView {
            rx: self.tx.subscribe(),
            name: name.into(),
        }
    }

    /// Number of automata in the collection.
    pub fn len(&self) -> usize {
        self.current.lock().expect("store lock poisoned").len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // =========================================================================
    // Collection-level mutations
    // =========================================================================

    /// Append a new automaton. Name uniqueness is enforced here, not at the
    /// call sites: the name is the collection's primary key.
    pub fn create(&self, automaton: Automaton) -> StoreResult<()> {
        let mut guard = self.current.lock().expect("store lock poisoned");
        if guard.iter().any(|a| a.name == automaton.name) {
            return Err(StoreError::DuplicateName {
                name: automaton.name,
            });
        }
        info!(name = %automaton.name, "Creating automaton");
        let mut next = guard.clone();
        next.push(automaton);
        self.commit(&mut guard, next)
    }

    /// Remove the automaton with the given name. A no-op (that still
    /// republishes) when no automaton matches.
    pub fn delete(&self, name: &str) -> StoreResult<()> {
        let mut guard = self.current.lock().expect("store lock poisoned");
        let mut next = guard.clone();
        next.retain(|a| a.name != name);
        if next.len() < guard.len() {
            info!(name, "Deleted automaton");
        }
        self.commit(&mut guard, next)
    }

    /// Locate an automaton by name and apply `mutation` to it, then publish
    /// and persist. When no automaton matches, the collection is republished
    /// unchanged and no error is raised.
    pub fn update(&self, name: &str, mutation: impl FnOnce(&mut Automaton)) -> StoreResult<()> {
        self.update_checked(name, |automaton| {
            mutation(automaton);
            Ok(())
        })
    }

    // =========================================================================
    // Automaton-level mutations
    // =========================================================================

    /// Append a transition. Redundancy (an existing transition with the same
    /// state and input) is advisory and checked at the edit form via
    /// [`Automaton::is_transition_redundant`]; the store does not reject it.
    pub fn add_transition(&self, name: &str, transition: Transition) -> StoreResult<()> {
        self.update(name, |automaton| {
            automaton.transitions.push(transition);
        })
    }

    /// Remove the transition at `index` and strip start/accept states that
    /// the removal orphaned. Out-of-range indices are ignored.
    pub fn remove_transition(&self, name: &str, index: usize) -> StoreResult<()> {
        self.update(name, |automaton| {
            if index < automaton.transitions.len() {
                automaton.transitions.remove(index);
            }
            automaton.repair_references();
        })
    }

    /// Remove a state entirely: every transition mentioning it as source or
    /// target goes away, then orphaned start/accept references are stripped.
    pub fn remove_state(&self, name: &str, state: &str) -> StoreResult<()> {
        self.update(name, |automaton| {
            automaton
                .transitions
                .retain(|t| t.state != state && t.next_state != state);
            automaton.repair_references();
        })
    }

    /// Set the start state. The state must appear in some transition.
    pub fn set_start_state(&self, name: &str, start_state: &str) -> StoreResult<()> {
        self.update_checked(name, |automaton| {
            if !automaton.has_state(start_state) {
                return Err(StoreError::UnknownState {
                    automaton: automaton.name.clone(),
                    state: start_state.to_string(),
                });
            }
            automaton.start_state = Some(start_state.to_string());
            Ok(())
        })
    }

    /// Unset the start state.
    pub fn clear_start_state(&self, name: &str) -> StoreResult<()> {
        self.update(name, |automaton| {
            automaton.start_state = None;
        })
    }

    /// Mark a state as accepting. The state must appear in some transition;
    /// an empty name is silently dropped.
    pub fn add_accept_state(&self, name: &str, accept_state: &str) -> StoreResult<()> {
        self.update_checked(name, |automaton| {
            if accept_state.is_empty() {
                return Ok(());
            }
            if !automaton.has_state(accept_state) {
                return Err(StoreError::UnknownState {
                    automaton: automaton.name.clone(),
                    state: accept_state.to_string(),
                });
            }
            automaton.accept_states.push(accept_state.to_string());
            Ok(())
        })
    }

    /// Remove every occurrence of a state from the accept set.
    pub fn remove_accept_state(&self, name: &str, accept_state: &str) -> StoreResult<()> {
        self.update(name, |automaton| {
            automaton.accept_states.retain(|s| s != accept_state);
        })
    }

    /// Append a test case. Input uniqueness is an edit-form concern
    /// (`automaton_lab_core::validation::validate_test_input`); the store
    /// stores what it is given.
    pub fn add_test_case(&self, name: &str, test_case: TestCase) -> StoreResult<()> {
        self.update(name, |automaton| {
            automaton.test_cases.push(test_case);
        })
    }

    /// Remove the test case at `index`. Out-of-range indices are ignored.
    pub fn remove_test_case(&self, name: &str, index: usize) -> StoreResult<()> {
        self.update(name, |automaton| {
            if index < automaton.test_cases.len() {
                automaton.test_cases.remove(index);
            }
        })
    }

    /// Move a test case from one position to another, shifting the entries in
    /// between. Indices are clamped into range.
    pub fn move_test_case(&self, name: &str, from: usize, to: usize) -> StoreResult<()> {
        self.update(name, |automaton| {
            let len = automaton.test_cases.len();
            if len == 0 {
                return;
            }
            let from = from.min(len - 1);
            let to = to.min(len - 1);
            if from == to {
                return;
            }
            let test_case = automaton.test_cases.remove(from);
            automaton.test_cases.insert(to, test_case);
        })
    }

    /// Commit a previously proposed minimization: overwrite the automaton's
    /// transitions, accept states and start state with the proposal. The
    /// proposal carries the automaton name it belongs to.
    pub fn apply_minimization(&self, minimization: &Minimization) -> StoreResult<()> {
        let proposal = &minimization.new_automaton;
        info!(
            name = %proposal.name,
            removed = minimization.removed_states.len(),
            "Applying minimization"
        );
        self.update(&proposal.name, |automaton| {
            automaton.transitions = proposal.transitions.clone();
            automaton.accept_states = proposal.accept_states.clone();
            automaton.start_state = proposal.start_state.clone();
        })
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn update_checked(
        &self,
        name: &str,
        mutation: impl FnOnce(&mut Automaton) -> StoreResult<()>,
    ) -> StoreResult<()> {
        let mut guard = self.current.lock().expect("store lock poisoned");
        let mut next = guard.clone();
        if let Some(automaton) = next.iter_mut().find(|a| a.name == name) {
            mutation(automaton)?;
        } else {
            debug!(name, "Update targeted an unknown automaton, republishing unchanged");
        }
        self.commit(&mut guard, next)
    }

    /// Publish a new collection and persist it, in that order, inside the
    /// caller's critical section.
    fn commit(
        &self,
        guard: &mut std::sync::MutexGuard<'_, Vec<Automaton>>,
        next: Vec<Automaton>,
    ) -> StoreResult<()> {
        **guard = next.clone();
        self.tx.send_replace(next);

        let serialized = serde_json::to_string(&**guard)?;
        self.backend.put(AUTOMATA_KEY, &serialized)?;
        debug!(count = guard.len(), "Published and persisted collection");
        Ok(())
    }
}

/// Live view of a single automaton, keyed by name.
///
/// The view follows the name, not an automaton instance: it starts yielding
/// `Some` once an automaton with the name is created and falls back to `None`
/// after a deletion.
#[derive(Debug, Clone)]
pub struct AutomatonView {
    rx: watch::Receiver<Vec<Automaton>>,
    name: String,
}

impl AutomatonView {
    /// The name this view follows.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The automaton as of the latest emission.
    pub fn current(&self) -> Option<Automaton> {
        self.rx.borrow().iter().find(|a| a.name == self.name).cloned()
    }

    /// Wait for the next emission of the collection. Errors only when the
    /// store has been dropped.
    pub async fn changed(&mut self) -> Result<(), watch::error::RecvError> {
        self.rx.changed().await
    }
}

impl std::fmt::Debug for AutomatonStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutomatonStore")
            .field("count", &self.len())
            .finish()
    }
}
