//! Edit-form validation.
//!
//! These checks belong to the entry point of an edit, not to the store: the
//! store accepts whatever a caller hands it (with the exception of name
//! uniqueness on creation, which the store enforces itself). A form rejects
//! duplicates before they ever reach a mutation.

use thiserror::Error;

use crate::automaton::Automaton;

/// Result alias for validation checks.
pub type ValidationResult = Result<(), ValidationError>;

/// A reason an edit-form value was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The automaton name is empty.
    #[error("automaton name must not be empty")]
    EmptyName,

    /// An automaton with this name already exists.
    #[error("an automaton named '{name}' already exists")]
    DuplicateName { name: String },

    /// The automaton already has a test case with this input.
    #[error("a test case with input '{test_input}' already exists")]
    DuplicateTestInput { test_input: String },
}

/// Validate the name for a new automaton against the existing collection.
pub fn validate_automaton_name(existing: &[Automaton], name: &str) -> ValidationResult {
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if existing.iter().any(|a| a.name == name) {
        return Err(ValidationError::DuplicateName {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Validate a new test input against an automaton's existing test cases.
/// The empty input is a perfectly good test string; only duplicates are
/// rejected.
pub fn validate_test_input(automaton: &Automaton, test_input: &str) -> ValidationResult {
    if automaton
        .test_cases
        .iter()
        .any(|t| t.test_input == test_input)
    {
        return Err(ValidationError::DuplicateTestInput {
            test_input: test_input.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestCase;

    #[test]
    fn name_must_be_unique_and_non_empty() {
        let existing = vec![Automaton::new("binary-counter")];

        assert_eq!(
            validate_automaton_name(&existing, ""),
            Err(ValidationError::EmptyName)
        );
        assert_eq!(
            validate_automaton_name(&existing, "binary-counter"),
            Err(ValidationError::DuplicateName {
                name: "binary-counter".into()
            })
        );
        assert_eq!(validate_automaton_name(&existing, "parity"), Ok(()));
    }

    #[test]
    fn duplicate_test_input_is_rejected() {
        let mut automaton = Automaton::new("parity");
        automaton.test_cases.push(TestCase::new("0101", true));

        assert_eq!(
            validate_test_input(&automaton, "0101"),
            Err(ValidationError::DuplicateTestInput {
                test_input: "0101".into()
            })
        );
        assert_eq!(validate_test_input(&automaton, "0100"), Ok(()));
        // The empty string is a valid, frequently useful test input.
        assert_eq!(validate_test_input(&automaton, ""), Ok(()));
    }
}
