//! In-memory representation of the labeled state-transition graph.
//!
//! `Nodes` and `Links` mirror the fixed protobuf schema in
//! `smc-io/proto/graph.proto` one-to-one; `smc-core` does not depend on
//! `prost` itself, so loaders in `smc-io` translate the generated message
//! types into these plain structs at the load boundary.

/// Per-state opaque JSON blobs, indexed by state id.
///
/// Used only by external formatters (the CLI's state-summary line); the
/// analysis core never inspects the contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Nodes {
    pub json: Vec<String>,
}

/// A single directed transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub src: usize,
    pub dst: usize,
    pub weight: f64,
    pub labels: Vec<String>,
}

/// The merged adjacency structure for a graph of `total_nodes` states.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Links {
    pub total_nodes: usize,
    pub links: Vec<Link>,
}

/// A fully loaded graph: nodes plus their outgoing links.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    pub nodes: Nodes,
    pub links: Links,
}

impl Graph {
    /// Total number of states, `N`. State `0` is the unique initial state.
    pub fn state_count(&self) -> usize {
        self.links.total_nodes
    }
}

impl Link {
    /// Whether this edge carries any label at all.
    pub fn is_labeled(&self) -> bool {
        !self.labels.is_empty()
    }

    /// The structural out-degree of `src`, recovered from this edge's
    /// weight under the generation-time convention `w = 1/out_degree(src)`.
    pub fn structural_out_degree(&self) -> usize {
        (1.0 / self.weight).round() as usize
    }
}
