//! Deriving render models from an automaton.

use std::collections::HashMap;

use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use serde::{Deserialize, Serialize};

use automaton_lab_core::Automaton;

/// Id of the edge that comes "out of nowhere" to the start state, indicating
/// where the start state is. Reserved: it never maps back to a transition.
pub const START_EDGE_ID: &str = "start";

/// Prefix for edge ids that encode a transition index, e.g. `link-6`.
///
/// Graph widgets tend to mishandle ids that parse as plain numbers, so the
/// index is never used as an id on its own.
pub const TRANSITION_EDGE_PREFIX: &str = "link-";

/// A renderable node. One per distinct state of the automaton.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Node id; equals the state name.
    pub id: String,
    /// Display label; equals the state name.
    pub label: String,
}

/// A renderable edge. One per transition, plus the synthetic start edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    /// Edge id: `link-<transition index>`, or [`START_EDGE_ID`].
    pub id: String,
    /// Source state. `None` only for the start edge.
    pub source: Option<String>,
    /// Target state.
    pub target: String,
    /// The transition's input character. `None` only for the start edge.
    pub label: Option<char>,
}

/// One node per distinct state, in lexicographic order so repeated
/// projections of the same automaton render identically.
pub fn project_nodes(automaton: &Automaton) -> Vec<GraphNode> {
    automaton
        .states()
        .into_iter()
        .map(|state| GraphNode {
            id: state.clone(),
            label: state,
        })
        .collect()
}

/// One edge per transition, in transition order. If the automaton has a start
/// state, a final synthetic edge with no source points at it.
pub fn project_edges(automaton: &Automaton) -> Vec<GraphEdge> {
    let mut edges: Vec<GraphEdge> = automaton
        .transitions
        .iter()
        .enumerate()
        .map(|(index, transition)| GraphEdge {
            id: format!("{TRANSITION_EDGE_PREFIX}{index}"),
            source: Some(transition.state.clone()),
            target: transition.next_state.clone(),
            label: Some(transition.input),
        })
        .collect();

    if let Some(start_state) = &automaton.start_state {
        edges.push(GraphEdge {
            id: START_EDGE_ID.to_string(),
            source: None,
            target: start_state.clone(),
            label: None,
        });
    }

    edges
}

/// The full projection of one automaton.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomatonGraph {
    /// All nodes, lexicographically ordered by state name.
    pub nodes: Vec<GraphNode>,
    /// All edges, in transition order, start edge last.
    pub edges: Vec<GraphEdge>,
}

impl AutomatonGraph {
    /// Project an automaton into its render model.
    pub fn project(automaton: &Automaton) -> Self {
        Self {
            nodes: project_nodes(automaton),
            edges: project_edges(automaton),
        }
    }

    /// Convert to a petgraph `StableDiGraph` for layout or analysis. Edge
    /// weights are the edge ids; the returned map recovers the `NodeIndex`
    /// for a state name. The sourceless start edge is not representable as a
    /// petgraph edge and is skipped.
    pub fn to_petgraph(&self) -> (StableDiGraph<GraphNode, String>, HashMap<String, NodeIndex>) {
        let mut graph = StableDiGraph::new();
        let mut id_to_index = HashMap::new();

        for node in &self.nodes {
            let idx = graph.add_node(node.clone());
            id_to_index.insert(node.id.clone(), idx);
        }

        for edge in &self.edges {
            let source = edge.source.as_ref().and_then(|s| id_to_index.get(s));
            let target = id_to_index.get(&edge.target);
            if let (Some(&source), Some(&target)) = (source, target) {
                graph.add_edge(source, target, edge.id.clone());
            }
        }

        (graph, id_to_index)
    }
}
