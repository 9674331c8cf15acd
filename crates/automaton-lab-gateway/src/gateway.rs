//! The execution gateway client.

use std::time::Duration;

use tracing::{debug, warn};

use automaton_lab_core::{Automaton, Minimization, TestCaseResult};

use crate::error::{GatewayError, GatewayResult};
use crate::protocol::{CheckRequest, CheckResponse, MinimizeRequest, MinimizeResponse};

/// Configuration for the gateway. The endpoint is injected by the embedding
/// application; it is the only piece of environment the gateway needs.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// HTTP endpoint all JSON-RPC calls are POSTed to.
    pub endpoint: String,
    /// Per-request timeout. The original client had none, which left callers
    /// hanging on a dead backend.
    pub timeout: Duration,
}

impl GatewayConfig {
    /// Config for the given endpoint with the default timeout.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Client for the remote execution backend.
///
/// The gateway never mutates the automaton store. In particular a
/// minimization proposal it returns only takes effect once the caller
/// explicitly applies it to the store.
#[derive(Debug, Clone)]
pub struct ExecutionGateway {
    client: reqwest::Client,
    endpoint: String,
}

impl ExecutionGateway {
    /// Build the gateway from its config.
    pub fn new(config: GatewayConfig) -> GatewayResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint,
        })
    }

    /// Run every test case of the automaton on the backend.
    ///
    /// All test cases go out as one batched call, one `check` request per
    /// test case with the test case's index as correlation id. Results come
    /// back in test-case order. A test case the backend reports an error for
    /// yields an error-flavored [`TestCaseResult`]; only a failure of the
    /// whole batch is a [`GatewayError`].
    pub async fn run_tests(&self, automaton: &Automaton) -> GatewayResult<Vec<TestCaseResult>> {
        if automaton.test_cases.is_empty() {
            return Ok(Vec::new());
        }

        let batch: Vec<CheckRequest> = automaton
            .test_cases
            .iter()
            .enumerate()
            .map(|(index, test_case)| {
                CheckRequest::new(index, automaton.clone(), test_case.test_input.clone())
            })
            .collect();

        debug!(
            automaton = %automaton.name,
            batch_size = batch.len(),
            "Sending check batch"
        );
        let responses: Vec<CheckResponse> = self
            .client
            .post(&self.endpoint)
            .json(&batch)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        self.correlate(automaton, responses)
    }

    /// Ask the backend how the automaton **would** be minimized. Returns
    /// `Ok(None)` when the backend reports it cannot minimize; persisting an
    /// accepted proposal is a separate, explicit store operation.
    pub async fn propose_minimization(
        &self,
        automaton: &Automaton,
    ) -> GatewayResult<Option<Minimization>> {
        let request = MinimizeRequest::new(automaton.clone());

        debug!(automaton = %automaton.name, "Requesting minimization proposal");
        let response: MinimizeResponse = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(error) = response.error {
            warn!(automaton = %automaton.name, %error, "Backend could not minimize");
            return Ok(None);
        }
        let Some((new_automaton, removed_states, renaming_operations)) = response.result else {
            return Err(GatewayError::EmptyResponseEntry { id: response.id });
        };

        Ok(Some(Minimization {
            new_automaton,
            removed_states,
            renaming_operations,
        }))
    }

    /// Map each response entry back to its originating test case by
    /// correlation id and assemble results in test-case order.
    fn correlate(
        &self,
        automaton: &Automaton,
        responses: Vec<CheckResponse>,
    ) -> GatewayResult<Vec<TestCaseResult>> {
        let mut slots: Vec<Option<TestCaseResult>> = vec![None; automaton.test_cases.len()];

        for response in responses {
            let id = response.id;
            let Some(test_case) = automaton.test_cases.get(id) else {
                return Err(GatewayError::UnknownCorrelationId { id });
            };
            if slots[id].is_some() {
                return Err(GatewayError::DuplicateCorrelationId { id });
            }

            let result = if let Some(error) = response.error {
                TestCaseResult::from_error(test_case.clone(), error)
            } else {
                let Some((accepted, visited_states)) = response.result else {
                    return Err(GatewayError::EmptyResponseEntry { id });
                };
                TestCaseResult::from_outcome(test_case.clone(), accepted, visited_states)
            };
            slots[id] = Some(result);
        }

        slots
            .into_iter()
            .enumerate()
            .map(|(id, slot)| slot.ok_or(GatewayError::MissingResponseEntry { id }))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use automaton_lab_core::TestCase;
    use serde_json::json;

    fn gateway() -> ExecutionGateway {
        ExecutionGateway::new(GatewayConfig::new("http://localhost:0/rpc")).unwrap()
    }

    fn automaton_with_tests(inputs: &[&str]) -> Automaton {
        let mut automaton = Automaton::new("parity");
        automaton.test_cases = inputs
            .iter()
            .map(|input| TestCase::new(*input, true))
            .collect();
        automaton
    }

    fn success(id: usize, accepted: bool, states: &[&str]) -> CheckResponse {
        CheckResponse {
            id,
            result: Some((accepted, states.iter().map(|s| s.to_string()).collect())),
            error: None,
        }
    }

    #[test]
    fn correlation_reorders_by_id() {
        let automaton = automaton_with_tests(&["a", "b", "c"]);
        let responses = vec![
            success(2, false, &["q0"]),
            success(0, true, &["q0", "q1"]),
            success(1, true, &["q0"]),
        ];

        let results = gateway().correlate(&automaton, responses).unwrap();
        assert_eq!(results[0].test_case.test_input, "a");
        assert!(results[0].has_input_been_accepted);
        assert_eq!(results[0].visited_states, vec!["q0", "q1"]);
        assert_eq!(results[2].test_case.test_input, "c");
        assert!(!results[2].has_input_been_accepted);
    }

    #[test]
    fn per_entry_error_is_absorbed_into_its_result() {
        let automaton = automaton_with_tests(&["a", "b", "c"]);
        let responses = vec![
            success(0, true, &["q0", "q1"]),
            CheckResponse {
                id: 1,
                result: None,
                error: Some(json!({"message": "no start state"})),
            },
            success(2, true, &["q0", "q0"]),
        ];

        let results = gateway().correlate(&automaton, responses).unwrap();
        assert!(!results[1].has_input_been_accepted);
        assert!(results[1].visited_states.is_empty());
        assert!(results[1].is_error());
        assert!(results[0].was_test_successful);
        assert!(results[2].was_test_successful);
    }

    #[test]
    fn unknown_and_duplicate_ids_are_rejected() {
        let automaton = automaton_with_tests(&["a"]);

        let err = gateway()
            .correlate(&automaton, vec![success(7, true, &[])])
            .unwrap_err();
        assert!(matches!(err, GatewayError::UnknownCorrelationId { id: 7 }));

        let err = gateway()
            .correlate(
                &automaton,
                vec![success(0, true, &[]), success(0, false, &[])],
            )
            .unwrap_err();
        assert!(matches!(err, GatewayError::DuplicateCorrelationId { id: 0 }));
    }

    #[test]
    fn missing_entries_are_rejected() {
        let automaton = automaton_with_tests(&["a", "b"]);
        let err = gateway()
            .correlate(&automaton, vec![success(1, true, &[])])
            .unwrap_err();
        assert!(matches!(err, GatewayError::MissingResponseEntry { id: 0 }));
    }
}
