//! Entity model for interactively authored finite-state automata.
//!
//! An [`Automaton`] is a named definition built up incrementally by a user:
//! transitions, an optional start state, accept states, and a list of example
//! [`TestCase`]s. States are implied by transitions rather than declared
//! separately, so the set of known states is always derived from the
//! transition list.
//!
//! Acceptance checking and minimization are computed remotely; this crate only
//! defines the shapes that cross that boundary ([`TestCaseResult`],
//! [`Minimization`]) and the invariants the authoring store must preserve.

mod automaton;
mod minimization;
mod testing;
pub mod validation;

pub use automaton::{Automaton, Transition};
pub use minimization::Minimization;
pub use testing::{TestCase, TestCaseResult};
pub use validation::{ValidationError, ValidationResult};
