//! Grouping of models into trees of layers.
//!
//! The layout engine does not decide which models share a column; it asks a
//! [`LayeringAdapter`] for a [`Layering`]: an ordered list of trees (weakly
//! connected components), each an ordered list of layers, each an ordered
//! list of model names. Any adapter is acceptable as long as every name
//! appears exactly once and, for every [`Edge`], the source's layer index is
//! less than or equal to the target's within their tree.
//!
//! [`LongestPathLayering`] is the adapter used by default.

use std::collections::HashMap;

use indexmap::IndexMap;
use log::{debug, trace};
use petgraph::{
    Direction,
    algo::tarjan_scc,
    graph::{DiGraph, NodeIndex},
    unionfind::UnionFind,
    visit::EdgeRef,
};
use thiserror::Error;

use erd_core::model::Model;

/// Errors produced by a layering adapter.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayeringError {
    #[error("relation edge has an empty model name")]
    EmptyName,

    #[error("model `{0}` appears more than once in the layering")]
    Duplicate(String),

    #[error("relation `{source_model}` -> `{target_model}` is not ordered by layer")]
    Unordered {
        source_model: String,
        target_model: String,
    },

    #[error("{0}")]
    Adapter(String),
}

/// A directed relation between two models.
///
/// The source is the referenced model and the target is the model holding
/// the foreign key, so referenced models are placed in earlier layers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge {
    source: String,
    target: String,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

/// Collects one edge per field that owns a foreign key.
pub fn edges_from_models(models: &[Model]) -> Vec<Edge> {
    models
        .iter()
        .flat_map(|model| {
            model
                .fields()
                .iter()
                .filter(|field| field.owns_foreign_key())
                .map(|field| Edge::new(field.field_type(), model.name()))
        })
        .collect()
}

/// Trees of layers of model names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layering {
    trees: Vec<Vec<Vec<String>>>,
}

impl Layering {
    /// Wraps an already computed layering.
    pub fn from_trees(trees: Vec<Vec<Vec<String>>>) -> Self {
        Self { trees }
    }

    pub fn trees(&self) -> &[Vec<Vec<String>>] {
        &self.trees
    }

    /// Finds the `(tree, layer)` position of a model name.
    pub fn position_of(&self, name: &str) -> Option<(usize, usize)> {
        self.trees.iter().enumerate().find_map(|(tree_idx, tree)| {
            tree.iter()
                .position(|layer| layer.iter().any(|n| n == name))
                .map(|layer_idx| (tree_idx, layer_idx))
        })
    }

    /// Checks the ordering contract against a set of edges.
    ///
    /// The layout engine trusts adapters and never calls this; it exists for
    /// adapter implementations and their tests.
    pub fn verify(&self, edges: &[Edge]) -> Result<(), LayeringError> {
        let mut positions: HashMap<&str, (usize, usize)> = HashMap::new();
        for (tree_idx, tree) in self.trees.iter().enumerate() {
            for (layer_idx, layer) in tree.iter().enumerate() {
                for name in layer {
                    if positions
                        .insert(name.as_str(), (tree_idx, layer_idx))
                        .is_some()
                    {
                        return Err(LayeringError::Duplicate(name.clone()));
                    }
                }
            }
        }

        for edge in edges {
            let (Some(source), Some(target)) =
                (positions.get(edge.source()), positions.get(edge.target()))
            else {
                continue;
            };
            if source.0 != target.0 || source.1 > target.1 {
                return Err(LayeringError::Unordered {
                    source_model: edge.source.clone(),
                    target_model: edge.target.clone(),
                });
            }
        }

        Ok(())
    }
}

/// Computes a [`Layering`] from model names and relation edges.
pub trait LayeringAdapter {
    /// `nodes` lists the models in input order; `edges` may mention names
    /// that are not in `nodes`.
    fn layer(&self, nodes: &[&str], edges: &[Edge]) -> Result<Layering, LayeringError>;
}

/// Longest-path layering over the condensation of the relation graph.
///
/// - Every node and every edge endpoint becomes a node, in first-seen order.
/// - Self relations are ignored.
/// - Weakly connected components become trees, ordered by their first node.
/// - Nodes in the same strongly connected component share a layer, which
///   keeps the ordering contract satisfiable for relation cycles.
/// - A component's layer is one past the deepest component pointing at it.
/// - Inside a layer, names keep first-seen order.
#[derive(Debug, Default, Clone, Copy)]
pub struct LongestPathLayering;

impl LayeringAdapter for LongestPathLayering {
    fn layer(&self, nodes: &[&str], edges: &[Edge]) -> Result<Layering, LayeringError> {
        let mut graph: DiGraph<&str, ()> = DiGraph::new();
        let mut index: IndexMap<&str, NodeIndex> = IndexMap::new();

        let endpoints = edges.iter().flat_map(|e| [e.source(), e.target()]);
        for name in nodes.iter().copied().chain(endpoints) {
            if name.is_empty() {
                return Err(LayeringError::EmptyName);
            }
            index
                .entry(name)
                .or_insert_with(|| graph.add_node(name));
        }

        for edge in edges {
            if edge.source() == edge.target() {
                trace!(model = edge.source(); "Ignoring self relation");
                continue;
            }
            graph.update_edge(index[edge.source()], index[edge.target()], ());
        }

        // Trees
        let mut components = UnionFind::<usize>::new(graph.node_count());
        for edge in graph.edge_references() {
            components.union(edge.source().index(), edge.target().index());
        }

        // Depth of every strongly connected component, visited in topological order
        let sccs = tarjan_scc(&graph);
        let mut scc_of = vec![0; graph.node_count()];
        for (scc_idx, scc) in sccs.iter().enumerate() {
            for node in scc {
                scc_of[node.index()] = scc_idx;
            }
        }

        let mut scc_depth = vec![0usize; sccs.len()];
        for (scc_idx, scc) in sccs.iter().enumerate().rev() {
            let depth = scc
                .iter()
                .flat_map(|&node| graph.neighbors_directed(node, Direction::Incoming))
                .map(|pred| scc_of[pred.index()])
                .filter(|&pred_scc| pred_scc != scc_idx)
                .map(|pred_scc| scc_depth[pred_scc] + 1)
                .max()
                .unwrap_or(0);
            scc_depth[scc_idx] = depth;
        }

        let mut trees: IndexMap<usize, Vec<Vec<String>>> = IndexMap::new();
        for (&name, &node) in &index {
            let depth = scc_depth[scc_of[node.index()]];
            let layers = trees.entry(components.find(node.index())).or_default();
            if layers.len() <= depth {
                layers.resize_with(depth + 1, Vec::new);
            }
            layers[depth].push(name.to_string());
        }

        debug!(
            nodes_count = graph.node_count(),
            edges_count = graph.edge_count(),
            trees_count = trees.len();
            "Layering computed",
        );

        Ok(Layering::from_trees(trees.into_values().collect()))
    }
}
