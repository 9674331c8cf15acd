//! Mapping UI click identifiers back to domain objects.

use serde::{Deserialize, Serialize};

use crate::projection::{GraphEdge, GraphNode, START_EDGE_ID, TRANSITION_EDGE_PREFIX};

/// What the user currently has selected in the graph view.
///
/// The original encoding was "a string is a state name, a number is a
/// transition index"; here it is an honest sum type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    /// A state node is selected, identified by its name.
    State(String),
    /// A transition edge is selected, identified by the transition's index in
    /// the automaton's transition list.
    Transition(usize),
}

impl Selection {
    /// Selection resulting from a click on a node.
    pub fn from_node_id(node_id: &str) -> Self {
        Selection::State(node_id.to_string())
    }

    /// Selection resulting from a click on an edge, recovered by stripping
    /// the transition prefix from the edge id. Returns `None` for the
    /// reserved start edge (clicking it is a no-op) and for ids this
    /// projection never produced.
    pub fn from_edge_id(edge_id: &str) -> Option<Self> {
        if edge_id == START_EDGE_ID {
            return None;
        }
        let index = edge_id.strip_prefix(TRANSITION_EDGE_PREFIX)?;
        index.parse().ok().map(Selection::Transition)
    }

    /// The edge id a transition selection corresponds to.
    pub fn edge_id_for_transition(index: usize) -> String {
        format!("{TRANSITION_EDGE_PREFIX}{index}")
    }

    /// Whether this selection highlights the given node.
    pub fn is_node_selected(&self, node: &GraphNode) -> bool {
        matches!(self, Selection::State(name) if *name == node.id)
    }

    /// Whether this selection highlights the given edge.
    pub fn is_edge_selected(&self, edge: &GraphEdge) -> bool {
        matches!(self, Selection::Transition(index)
            if Selection::edge_id_for_transition(*index) == edge.id)
    }
}
