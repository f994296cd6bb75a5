//! Undirected document graph over dependency-parse tokens.

use petgraph::graph::{node_index, UnGraph};

use crate::{error::PipelineError, nlp::ParsedDoc};

/// One node per token, node `i` being document token `i`.
///
/// Edges are parent/child dependency arcs plus one edge between the roots of
/// each pair of consecutive sentences, so a well-formed parse always yields a
/// connected graph.
#[derive(Debug, Clone)]
pub struct DocGraph {
    graph: UnGraph<usize, ()>,
    surface: Vec<String>,
}

impl DocGraph {
    pub fn build(parsed: &ParsedDoc) -> Result<Self, PipelineError> {
        let surface: Vec<String> = parsed.tokens().map(|t| t.text.clone()).collect();
        let mut edges = Vec::with_capacity(surface.len());
        let mut last_root: Option<usize> = None;
        for (position, token) in parsed.tokens().enumerate() {
            if token.index != position {
                return Err(PipelineError::malformed(format!(
                    "token {position} carries index {}",
                    token.index
                )));
            }
            if let Some(head) = token.head {
                edges.push((head, position));
            }
        }
        for sentence in &parsed.sentences {
            let Some(root) = sentence.root() else {
                continue;
            };
            if let Some(previous) = last_root {
                edges.push((previous, root.index));
            }
            last_root = Some(root.index);
        }
        Self::from_edges(surface, &edges)
    }

    /// Graph over `surface.len()` nodes. Self-loops and repeated edges are dropped.
    pub fn from_edges(surface: Vec<String>, edges: &[(usize, usize)]) -> Result<Self, PipelineError> {
        let mut graph: UnGraph<usize, ()> = UnGraph::with_capacity(surface.len(), edges.len());
        for position in 0..surface.len() {
            graph.add_node(position);
        }
        for &(a, b) in edges {
            if a >= surface.len() || b >= surface.len() {
                return Err(PipelineError::malformed(format!(
                    "edge {a}-{b} outside {} tokens",
                    surface.len()
                )));
            }
            if a != b {
                graph.update_edge(node_index(a), node_index(b), ());
            }
        }
        Ok(Self { graph, surface })
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Neighbours of `node` in ascending order.
    pub fn neighbors(&self, node: usize) -> Vec<usize> {
        let mut out: Vec<usize> = self
            .graph
            .neighbors(node_index(node))
            .map(|n| n.index())
            .collect();
        out.sort_unstable();
        out
    }

    pub fn contains(&self, node: usize) -> bool {
        node < self.surface.len()
    }

    pub fn surface(&self, node: usize) -> &str {
        &self.surface[node]
    }
}
