use std::collections::HashMap;

use itertools::Itertools;
use petgraph::{
    graph::{DefaultIx, NodeIndex},
    Directed, Direction, Graph,
};
use serde_json::{json, Value};

use crate::model::{HierarchyEdge, HierarchyNode};

/// Which way to walk the child→parent edges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LinkDirection {
    /// Follow outgoing edges: the node's parents.
    ToParents,
    /// Follow incoming edges: the node's children.
    FromChildren,
}

/// The directed-adjacency capability the lineage engine needs.  Kept as a
/// trait so the engine never depends on how a particular rendering or
/// storage layer owns its adjacency; anything that can answer "who is
/// connected to this node, in this direction" can drive a traversal.
pub trait GraphQuery {
    fn connected_nodes(&self, node_id: &str, direction: LinkDirection) -> Vec<String>;
}

/**
Hierarchy graph for cultivation types built on top of petgraph.

Conceptually we want to operate in terms of node IRIs, but petgraph's
`Graph` wants to be driven by the `NodeIndex` values handed out by
`add_node`, so we keep id↔index maps alongside the graph and translate at
the boundary.  The graph is built append-only from the deduplicated
node/edge lists the model builder produced and is never mutated afterwards;
every highlight recomputation reads it as an immutable input.

Node payloads are the full `HierarchyNode` records so the highlight engine
can reach memberships without a second lookup structure.
*/
pub struct CropGraph {
    graph: Graph<HierarchyNode, (), Directed>,
    node_id_to_ix: HashMap<String, DefaultIx>,
    edges: Vec<HierarchyEdge>,
}

impl CropGraph {
    pub fn from_parts(nodes: Vec<HierarchyNode>, edges: Vec<HierarchyEdge>) -> CropGraph {
        let mut graph = Graph::new();
        let mut node_id_to_ix = HashMap::new();

        for node in nodes {
            let id = node.id.clone();
            let ix = graph.add_node(node).index() as DefaultIx;
            node_id_to_ix.insert(id, ix);
        }

        let mut kept_edges = vec![];
        for edge in edges {
            let from_ix = node_id_to_ix.get(&edge.from);
            let to_ix = node_id_to_ix.get(&edge.to);
            if let (Some(from_ix), Some(to_ix)) = (from_ix, to_ix) {
                graph.add_edge(
                    NodeIndex::new(*from_ix as usize),
                    NodeIndex::new(*to_ix as usize),
                    (),
                );
                kept_edges.push(edge);
            } else {
                warn!(edge_id = edge.id.as_str(), "dropping edge with unknown endpoint");
            }
        }

        CropGraph {
            graph,
            node_id_to_ix,
            edges: kept_edges,
        }
    }

    pub fn node(&self, node_id: &str) -> Option<&HierarchyNode> {
        self.node_id_to_ix
            .get(node_id)
            .map(|ix| &self.graph[NodeIndex::new(*ix as usize)])
    }

    /// Replace a node's payload with an enriched one, as produced by the
    /// detail CONSTRUCT.  Identity must match; an unknown id is ignored.
    pub fn enrich_node(&mut self, node: HierarchyNode) {
        if let Some(ix) = self.node_id_to_ix.get(&node.id) {
            self.graph[NodeIndex::new(*ix as usize)] = node;
        }
    }

    pub fn nodes(&self) -> impl Iterator<Item = &HierarchyNode> {
        self.graph.node_weights()
    }

    pub fn edges(&self) -> &[HierarchyEdge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Sorted `{ nodes, edges }` rep for output and snapshot stability.
    pub fn to_json(&self) -> Value {
        let nodes: Vec<&HierarchyNode> = self.nodes().sorted_by(|a, b| a.id.cmp(&b.id)).collect();
        json!({
            "nodes": nodes,
            "edges": self.edges,
        })
    }
}

impl GraphQuery for CropGraph {
    fn connected_nodes(&self, node_id: &str, direction: LinkDirection) -> Vec<String> {
        let ix = match self.node_id_to_ix.get(node_id) {
            Some(ix) => NodeIndex::new(*ix as usize),
            None => return vec![],
        };
        let petgraph_direction = match direction {
            LinkDirection::ToParents => Direction::Outgoing,
            LinkDirection::FromChildren => Direction::Incoming,
        };
        self.graph
            .neighbors_directed(ix, petgraph_direction)
            .map(|neighbor_ix| self.graph[neighbor_ix].id.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain_graph() -> CropGraph {
        // A is a child of B, B is a child of C.
        let nodes = vec![
            HierarchyNode::bare("A", "Sorte A"),
            HierarchyNode::bare("B", "Gruppe B"),
            HierarchyNode::bare("C", "Wurzel C"),
        ];
        let edges = vec![
            HierarchyEdge {
                id: "A-B".to_string(),
                from: "A".to_string(),
                to: "B".to_string(),
            },
            HierarchyEdge {
                id: "B-C".to_string(),
                from: "B".to_string(),
                to: "C".to_string(),
            },
        ];
        CropGraph::from_parts(nodes, edges)
    }

    #[test]
    fn test_connected_nodes_by_direction() {
        let graph = chain_graph();
        assert_eq!(
            graph.connected_nodes("B", LinkDirection::ToParents),
            vec!["C".to_string()]
        );
        assert_eq!(
            graph.connected_nodes("B", LinkDirection::FromChildren),
            vec!["A".to_string()]
        );
        assert!(graph
            .connected_nodes("C", LinkDirection::ToParents)
            .is_empty());
        assert!(graph
            .connected_nodes("unknown", LinkDirection::ToParents)
            .is_empty());
    }

    #[test]
    fn test_edges_with_unknown_endpoints_are_dropped() {
        let nodes = vec![HierarchyNode::bare("A", "Sorte A")];
        let edges = vec![HierarchyEdge {
            id: "A-missing".to_string(),
            from: "A".to_string(),
            to: "missing".to_string(),
        }];
        let graph = CropGraph::from_parts(nodes, edges);
        assert!(graph.edges().is_empty());
    }

    #[test]
    fn test_enrich_node_swaps_payload() {
        let mut graph = chain_graph();
        let mut enriched = HierarchyNode::bare("B", "Gruppe B");
        enriched.description = Some("Die mittlere Gruppe".to_string());
        graph.enrich_node(enriched);
        assert_eq!(
            graph.node("B").unwrap().description.as_deref(),
            Some("Die mittlere Gruppe")
        );
    }
}
