//! Step-by-step replay of automaton execution traces.
//!
//! A [`SimulationStepper`] walks a cursor through the `visited_states` trace
//! of one [`TestCaseResult`], so a user can follow how the automaton consumed
//! the input one character at a time. It is a pure state machine over the
//! cursor: `next`/`previous` move it within bounds, everything else is
//! derived.

use automaton_lab_core::TestCaseResult;

/// Cursor over one execution trace.
///
/// The cursor starts at 0 (the start state) and is always within
/// `[0, visited_states.len() - 1]`. Callers are expected to gate stepping on
/// the availability flags; out-of-bounds steps are no-ops.
#[derive(Debug, Clone)]
pub struct SimulationStepper {
    result: TestCaseResult,
    cursor: usize,
}

impl SimulationStepper {
    /// Start a replay of the given result at the first visited state.
    pub fn new(result: TestCaseResult) -> Self {
        Self { result, cursor: 0 }
    }

    /// The result being replayed.
    pub fn result(&self) -> &TestCaseResult {
        &self.result
    }

    /// The current cursor position.
    pub fn current_step(&self) -> usize {
        self.cursor
    }

    /// The state the automaton is in at the current step. `None` only when
    /// the trace is empty (a test case that failed to execute).
    pub fn current_state(&self) -> Option<&str> {
        self.result
            .visited_states
            .get(self.cursor)
            .map(String::as_str)
    }

    /// Whether the cursor can move forward.
    pub fn is_next_step_available(&self) -> bool {
        self.cursor + 1 < self.result.visited_states.len()
    }

    /// Whether the cursor can move backward.
    pub fn is_previous_step_available(&self) -> bool {
        self.cursor > 0
    }

    /// Advance to the next visited state. No-op at the end of the trace.
    pub fn next(&mut self) {
        if self.is_next_step_available() {
            self.cursor += 1;
        }
    }

    /// Go back to the previous visited state. No-op at the beginning.
    pub fn previous(&mut self) {
        if self.is_previous_step_available() {
            self.cursor -= 1;
        }
    }

    /// The input characters already consumed at the current step.
    pub fn processed_input(&self) -> String {
        self.result
            .test_case
            .test_input
            .chars()
            .take(self.cursor)
            .collect()
    }

    /// The input characters still to be consumed.
    pub fn upcoming_input(&self) -> String {
        self.result
            .test_case
            .test_input
            .chars()
            .skip(self.cursor)
            .collect()
    }

    /// A narrative explanation of what happens at the current step.
    ///
    /// Mid-trace this names the consumed character and the transition it
    /// causes. At the last visited state it either announces the verdict
    /// (all input consumed) or explains that the automaton got stuck on the
    /// next character.
    pub fn explanation(&self) -> String {
        let visited = &self.result.visited_states;
        let input = &self.result.test_case.test_input;

        let Some(current_state) = self.current_state() else {
            return "The automaton did not record any visited states for this input.".to_string();
        };

        if let Some(next_state) = visited.get(self.cursor + 1) {
            let character = input.chars().nth(self.cursor).unwrap_or('?');
            return format!(
                "Reading the input character '{character}' in state '{current_state}' \
                 will lead the automaton to transition to state '{next_state}'"
            );
        }

        let input_len = input.chars().count();
        if input_len <= visited.len() - 1 {
            let verdict = if self.result.has_input_been_accepted {
                format!(
                    "The automaton is in the accepting state '{current_state}' \
                     and thus accepted the input."
                )
            } else {
                format!(
                    "The automaton is in the rejecting state '{current_state}' \
                     and thus rejected the input."
                )
            };
            return format!("There are no more input characters to process. {verdict}");
        }

        let stuck_on = input.chars().nth(self.cursor).unwrap_or('?');
        format!(
            "In the current state '{current_state}', there is no transition for the next \
             character '{stuck_on}' which is why the automaton rejects the input."
        )
    }
}
