//! Node/edge projection of automaton definitions for graph rendering.
//!
//! The projection is a pure derivation: one node per distinct state, one edge
//! per transition, plus a synthetic edge pointing at the start state "out of
//! nowhere". Edge ids encode the transition index so a UI click on an edge
//! can be mapped back to the transition it represents; see [`Selection`].
//!
//! Rendering and layout are out of scope; [`AutomatonGraph::to_petgraph`]
//! hands the projection to whatever layout/analysis consumer wants it.

mod projection;
mod selection;

pub use projection::{
    project_edges, project_nodes, AutomatonGraph, GraphEdge, GraphNode, START_EDGE_ID,
    TRANSITION_EDGE_PREFIX,
};
pub use selection::Selection;
