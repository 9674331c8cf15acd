//! JSON-RPC 2.0 wire shapes for the execution backend.
//!
//! Params and results are positional, serialized as tuples:
//!
//! ```text
//! check:    params [Automaton, input]     -> result [accepted, visited_states]
//! minimize: params [Automaton]            -> result [automaton, removed, renamings]
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use automaton_lab_core::Automaton;

const JSONRPC_VERSION: &str = "2.0";

/// One `check` call: run `params.1` as input on the automaton `params.0`.
#[derive(Debug, Clone, Serialize)]
pub struct CheckRequest {
    /// Correlation id: the test case's index in the automaton's list.
    pub id: usize,
    pub jsonrpc: &'static str,
    pub method: &'static str,
    pub params: (Automaton, String),
}

impl CheckRequest {
    /// Build the request for one test case of the batch.
    pub fn new(id: usize, automaton: Automaton, test_input: String) -> Self {
        Self {
            id,
            jsonrpc: JSONRPC_VERSION,
            method: "check",
            params: (automaton, test_input),
        }
    }
}

/// Response to one `check` call. Exactly one of `result`/`error` is set.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckResponse {
    /// Correlation id echoed back by the backend.
    pub id: usize,
    /// `(accepted, visited_states)` on success.
    #[serde(default)]
    pub result: Option<(bool, Vec<String>)>,
    /// Opaque error payload when this test case failed to execute.
    #[serde(default)]
    pub error: Option<Value>,
}

/// One `minimize` call carrying the automaton to minimize.
#[derive(Debug, Clone, Serialize)]
pub struct MinimizeRequest {
    pub id: usize,
    pub jsonrpc: &'static str,
    pub method: &'static str,
    pub params: (Automaton,),
}

impl MinimizeRequest {
    /// Build the request. Minimize calls are not batched, so the id is fixed.
    pub fn new(automaton: Automaton) -> Self {
        Self {
            id: 1,
            jsonrpc: JSONRPC_VERSION,
            method: "minimize",
            params: (automaton,),
        }
    }
}

/// Response to a `minimize` call. Exactly one of `result`/`error` is set.
#[derive(Debug, Clone, Deserialize)]
pub struct MinimizeResponse {
    pub id: usize,
    /// `(new_automaton, removed_states, renaming_operations)` on success.
    #[serde(default)]
    pub result: Option<(Automaton, Vec<String>, BTreeMap<String, Vec<String>>)>,
    /// Opaque error payload when the backend could not minimize.
    #[serde(default)]
    pub error: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn check_request_serializes_positionally() {
        let request = CheckRequest::new(3, Automaton::new("parity"), "0101".to_string());
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["id"], 3);
        assert_eq!(value["jsonrpc"], "2.0");
        assert_eq!(value["method"], "check");
        assert_eq!(value["params"][0]["name"], "parity");
        assert_eq!(value["params"][1], "0101");
    }

    #[test]
    fn check_response_parses_result_tuple() {
        let response: CheckResponse = serde_json::from_value(json!({
            "id": 0,
            "jsonrpc": "2.0",
            "result": [true, ["q0", "q1"]],
        }))
        .unwrap();

        assert_eq!(response.id, 0);
        assert_eq!(
            response.result,
            Some((true, vec!["q0".to_string(), "q1".to_string()]))
        );
        assert_eq!(response.error, None);
    }

    #[test]
    fn minimize_response_parses_error() {
        let response: MinimizeResponse = serde_json::from_value(json!({
            "id": 1,
            "jsonrpc": "2.0",
            "error": {"code": -32000, "message": "automaton has no start state"},
        }))
        .unwrap();

        assert!(response.result.is_none());
        assert!(response.error.is_some());
    }
}
