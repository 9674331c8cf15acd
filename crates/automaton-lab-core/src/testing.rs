//! Test cases and their remotely computed results.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An example input together with the expectation that the automaton either
/// accepts or rejects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    /// The input string fed to the automaton.
    pub test_input: String,
    /// Whether the automaton should accept the input.
    pub expectation: bool,
}

impl TestCase {
    /// Create a test case.
    pub fn new(test_input: impl Into<String>, expectation: bool) -> Self {
        Self {
            test_input: test_input.into(),
            expectation,
        }
    }
}

/// Outcome of running one test case against the automaton on the remote
/// execution backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCaseResult {
    /// The test case this result belongs to.
    pub test_case: TestCase,
    /// Whether the automaton accepted the input.
    pub has_input_been_accepted: bool,
    /// Every state the automaton visited while consuming the input, in
    /// visiting order. Starts with the start state.
    pub visited_states: Vec<String>,
    /// True when the actual outcome matches the expectation. For example, if
    /// we expect the automaton to reject the input and it is actually
    /// rejected, this is true.
    pub was_test_successful: bool,
    /// The opaque error payload reported by the backend, if the test case
    /// failed to execute at all. Distinguishable from an ordinary rejection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

impl TestCaseResult {
    /// Build a result from a successful backend response.
    pub fn from_outcome(test_case: TestCase, accepted: bool, visited_states: Vec<String>) -> Self {
        let was_test_successful = accepted == test_case.expectation;
        Self {
            test_case,
            has_input_been_accepted: accepted,
            visited_states,
            was_test_successful,
            error: None,
        }
    }

    /// Build a result for a test case the backend failed to execute. The
    /// input counts as not accepted and no states were visited.
    pub fn from_error(test_case: TestCase, error: Value) -> Self {
        Self {
            test_case,
            has_input_been_accepted: false,
            visited_states: Vec::new(),
            was_test_successful: false,
            error: Some(error),
        }
    }

    /// Whether this result represents an execution failure rather than an
    /// accept/reject verdict.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
