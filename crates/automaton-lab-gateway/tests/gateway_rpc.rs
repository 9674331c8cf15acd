//! End-to-end gateway tests against an in-process JSON-RPC server.

use std::net::SocketAddr;

use axum::{routing::post, Json, Router};
use serde_json::{json, Value};

use automaton_lab_core::{Automaton, TestCase, Transition};
use automaton_lab_gateway::{ExecutionGateway, GatewayConfig};

/// Walk the automaton over the input the way the real backend would: start at
/// the start state, follow matching transitions, stop when stuck.
fn execute(automaton: &Automaton, input: &str) -> Result<(bool, Vec<String>), String> {
    let Some(start) = automaton.start_state.clone() else {
        return Err("automaton has no start state".to_string());
    };

    let mut current = start;
    let mut visited = vec![current.clone()];
    let mut consumed = 0usize;
    for character in input.chars() {
        let next = automaton
            .transitions
            .iter()
            .find(|t| t.state == current && t.input == character);
        match next {
            Some(t) => {
                current = t.next_state.clone();
                visited.push(current.clone());
                consumed += 1;
            }
            None => break,
        }
    }

    let accepted =
        consumed == input.chars().count() && automaton.accept_states.iter().any(|s| *s == current);
    Ok((accepted, visited))
}

fn answer(call: &Value) -> Value {
    let id = call["id"].clone();
    match call["method"].as_str() {
        Some("check") => {
            let automaton: Automaton = serde_json::from_value(call["params"][0].clone()).unwrap();
            let input = call["params"][1].as_str().unwrap();
            match execute(&automaton, input) {
                Ok((accepted, visited)) => json!({
                    "id": id, "jsonrpc": "2.0", "result": [accepted, visited],
                }),
                Err(message) => json!({
                    "id": id, "jsonrpc": "2.0", "error": {"code": -32000, "message": message},
                }),
            }
        }
        Some("minimize") => {
            let automaton: Automaton = serde_json::from_value(call["params"][0].clone()).unwrap();
            if automaton.transitions.is_empty() {
                return json!({
                    "id": id, "jsonrpc": "2.0",
                    "error": {"code": -32000, "message": "nothing to minimize"},
                });
            }
            // A canned proposal: collapse everything into q0.
            json!({
                "id": id, "jsonrpc": "2.0",
                "result": [
                    {
                        "name": automaton.name,
                        "start_state": "q0",
                        "accept_states": ["q0"],
                        "transitions": [{"state": "q0", "input": "a", "next_state": "q0"}],
                        "test_cases": [],
                    },
                    ["q1"],
                    {"q0": ["q0", "q1"]},
                ],
            })
        }
        _ => json!({
            "id": id, "jsonrpc": "2.0",
            "error": {"code": -32601, "message": "method not found"},
        }),
    }
}

async fn rpc_handler(Json(payload): Json<Value>) -> Json<Value> {
    match payload {
        Value::Array(calls) => {
            // Answer in reverse order so correlation actually has to reorder.
            let responses: Vec<Value> = calls.iter().rev().map(answer).collect();
            Json(Value::Array(responses))
        }
        call => Json(answer(&call)),
    }
}

async fn spawn_backend() -> SocketAddr {
    let app = Router::new().route("/rpc", post(rpc_handler));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn gateway_for(addr: SocketAddr) -> ExecutionGateway {
    ExecutionGateway::new(GatewayConfig::new(format!("http://{addr}/rpc"))).unwrap()
}

fn even_a_automaton() -> Automaton {
    let mut automaton = Automaton::new("even-a");
    automaton.transitions = vec![
        Transition::new("q0", 'a', "q1"),
        Transition::new("q1", 'a', "q0"),
    ];
    automaton.start_state = Some("q0".to_string());
    automaton.accept_states = vec!["q0".to_string()];
    automaton
}

#[tokio::test]
async fn run_tests_correlates_batched_results() {
    let addr = spawn_backend().await;
    let gateway = gateway_for(addr);

    let mut automaton = even_a_automaton();
    automaton.test_cases = vec![
        TestCase::new("aa", true),
        TestCase::new("a", true),
        TestCase::new("", true),
    ];

    let results = gateway.run_tests(&automaton).await.unwrap();
    assert_eq!(results.len(), 3);

    // "aa": q0 -> q1 -> q0, accepted, matches the expectation.
    assert_eq!(results[0].test_case.test_input, "aa");
    assert!(results[0].has_input_been_accepted);
    assert_eq!(results[0].visited_states, vec!["q0", "q1", "q0"]);
    assert!(results[0].was_test_successful);

    // "a": ends in q1, rejected, expectation was accept.
    assert!(!results[1].has_input_been_accepted);
    assert!(!results[1].was_test_successful);

    // "": start state is accepting.
    assert!(results[2].has_input_been_accepted);
    assert_eq!(results[2].visited_states, vec!["q0"]);
}

#[tokio::test]
async fn per_test_case_backend_error_becomes_error_result() {
    let addr = spawn_backend().await;
    let gateway = gateway_for(addr);

    // The backend refuses to execute an automaton without a start state.
    let mut automaton = even_a_automaton();
    automaton.start_state = None;
    automaton.test_cases = vec![TestCase::new("aa", false)];

    let results = gateway.run_tests(&automaton).await.unwrap();
    assert_eq!(results.len(), 1);
    assert!(results[0].is_error());
    assert!(!results[0].has_input_been_accepted);
    assert!(results[0].visited_states.is_empty());
    assert!(!results[0].was_test_successful);
}

#[tokio::test]
async fn empty_test_case_list_skips_the_network() {
    // Unroutable endpoint: any actual call would fail loudly.
    let gateway = ExecutionGateway::new(GatewayConfig::new("http://127.0.0.1:1/rpc")).unwrap();
    let automaton = even_a_automaton();

    let results = gateway.run_tests(&automaton).await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn minimization_proposal_round_trips() {
    let addr = spawn_backend().await;
    let gateway = gateway_for(addr);

    let proposal = gateway
        .propose_minimization(&even_a_automaton())
        .await
        .unwrap()
        .expect("backend should propose a minimization");

    assert_eq!(proposal.new_automaton.name, "even-a");
    assert_eq!(proposal.removed_states, vec!["q1"]);
    assert!(proposal.has_renaming_operations());
}

#[tokio::test]
async fn minimization_backend_error_means_no_proposal() {
    let addr = spawn_backend().await;
    let gateway = gateway_for(addr);

    let proposal = gateway
        .propose_minimization(&Automaton::new("empty"))
        .await
        .unwrap();
    assert!(proposal.is_none());
}

#[tokio::test]
async fn transport_failure_is_an_error() {
    let gateway = ExecutionGateway::new(
        GatewayConfig::new("http://127.0.0.1:1/rpc")
            .with_timeout(std::time::Duration::from_millis(500)),
    )
    .unwrap();

    let mut automaton = even_a_automaton();
    automaton.test_cases = vec![TestCase::new("a", true)];

    assert!(gateway.run_tests(&automaton).await.is_err());
    assert!(gateway.propose_minimization(&automaton).await.is_err());
}
