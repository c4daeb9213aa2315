//! Lineage computation and multi-state recoloring for the hierarchy view.
//!
//! Selecting a node recolors the whole graph: the selection gets the focus
//! style, every ancestor and descendant lights up, everything else dims, and
//! edges light up only when both endpoints are in the lineage.  An optional
//! source-system filter layers a fourth state on top: lineage members whose
//! membership in the filtered system is valid on the filter date.

use std::collections::HashSet;

use chrono::{Local, NaiveDate};
use serde::Serialize;
use url::Url;

use super::crop_graph::{CropGraph, GraphQuery, LinkDirection};
use crate::model::HierarchyNode;

/// Visual state of a node or edge, recomputed on every selection change.
/// Assignment is by priority: `Focus` beats `SystemActive` beats
/// `Highlighted` beats `Dimmed`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum VisualState {
    Normal,
    Focus,
    Highlighted,
    Dimmed,
    SystemActive,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NodeStyle {
    pub id: String,
    pub state: VisualState,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EdgeStyle {
    pub id: String,
    pub state: VisualState,
}

/// Bulk style assignment for one recoloring pass.  Pushing it at an actual
/// rendering surface happens through `HighlightSink`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HighlightUpdate {
    pub node_styles: Vec<NodeStyle>,
    pub edge_styles: Vec<EdgeStyle>,
}

/// Rendering collaborator accepting bulk style updates.  The engine only
/// computes assignments; applying them is somebody else's concern.
pub trait HighlightSink {
    fn update_node_styles(&mut self, styles: &[NodeStyle]);
    fn update_edge_styles(&mut self, styles: &[EdgeStyle]);
}

impl HighlightUpdate {
    pub fn apply_to(&self, sink: &mut dyn HighlightSink) {
        sink.update_node_styles(&self.node_styles);
        sink.update_edge_styles(&self.edge_styles);
    }
}

/// The source-system highlight filter, usually arriving via the `system`
/// and `date` URL parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct SystemFilter {
    pub system_name: Option<String>,
    pub as_of_date: NaiveDate,
}

impl SystemFilter {
    pub fn none() -> SystemFilter {
        SystemFilter {
            system_name: None,
            as_of_date: Local::now().date_naive(),
        }
    }

    pub fn new(system_name: &str, as_of_date: NaiveDate) -> SystemFilter {
        SystemFilter {
            system_name: Some(system_name.to_string()),
            as_of_date,
        }
    }

    /// Read `system` and `date` off a page URL; a missing or unparsable
    /// `date` falls back to today.
    pub fn from_url(url: &Url) -> SystemFilter {
        let mut filter = SystemFilter::none();
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "system" if !value.is_empty() => {
                    filter.system_name = Some(value.to_string());
                }
                "date" => {
                    if let Ok(date) = NaiveDate::parse_from_str(&value, "%Y-%m-%d") {
                        filter.as_of_date = date;
                    }
                }
                _ => {}
            }
        }
        filter
    }
}

/// Is the node tied to the filtered source system on the filter date?
///
/// False without a system name.  Otherwise true iff any membership matches
/// the name and the date lies inside the inclusive validity interval; a
/// missing bound imposes no constraint on that side.
pub fn is_system_active(node: &HierarchyNode, filter: &SystemFilter) -> bool {
    let system_name = match &filter.system_name {
        Some(name) => name,
        None => return false,
    };
    node.memberships.iter().any(|membership| {
        membership.system_name == *system_name
            && membership
                .valid_from
                .map_or(true, |from| filter.as_of_date >= from)
            && membership
                .valid_to
                .map_or(true, |to| filter.as_of_date <= to)
    })
}

fn collect_reachable(
    graph: &dyn GraphQuery,
    node_id: &str,
    direction: LinkDirection,
    visited: &mut HashSet<String>,
) {
    // A node already visited is never re-expanded, so a cycle in the data
    // cannot recurse forever.
    if !visited.insert(node_id.to_string()) {
        return;
    }
    for neighbor_id in graph.connected_nodes(node_id, direction) {
        collect_reachable(graph, &neighbor_id, direction, visited);
    }
}

/// All ancestors and all descendants of the selected node, including the
/// node itself.  One O(V+E) pass per selection event; nothing is maintained
/// incrementally.
pub fn compute_lineage(graph: &dyn GraphQuery, selected_node_id: &str) -> HashSet<String> {
    let mut lineage = HashSet::new();
    collect_reachable(graph, selected_node_id, LinkDirection::ToParents, &mut lineage);
    collect_reachable(
        graph,
        selected_node_id,
        LinkDirection::FromChildren,
        &mut lineage,
    );
    lineage
}

/// Style assignment for an active selection.
pub fn apply_highlight(
    graph: &CropGraph,
    selected_node_id: &str,
    filter: &SystemFilter,
) -> HighlightUpdate {
    let lineage = compute_lineage(graph, selected_node_id);

    let node_styles = graph
        .nodes()
        .map(|node| {
            let state = if node.id == selected_node_id {
                VisualState::Focus
            } else if lineage.contains(&node.id) && is_system_active(node, filter) {
                VisualState::SystemActive
            } else if lineage.contains(&node.id) {
                VisualState::Highlighted
            } else {
                VisualState::Dimmed
            };
            NodeStyle {
                id: node.id.clone(),
                state,
            }
        })
        .collect();

    // The traversal puts the selected node in its own lineage, so edges
    // touching the selection resolve to Highlighted here.
    let edge_styles = graph
        .edges()
        .iter()
        .map(|edge| {
            let state = if lineage.contains(&edge.from) && lineage.contains(&edge.to) {
                VisualState::Highlighted
            } else {
                VisualState::Dimmed
            };
            EdgeStyle {
                id: edge.id.clone(),
                state,
            }
        })
        .collect();

    HighlightUpdate {
        node_styles,
        edge_styles,
    }
}

/// Style assignment with no selection active: system-active nodes keep their
/// marker, everything else returns to normal.
pub fn reset_highlight(graph: &CropGraph, filter: &SystemFilter) -> HighlightUpdate {
    let node_styles = graph
        .nodes()
        .map(|node| NodeStyle {
            id: node.id.clone(),
            state: if is_system_active(node, filter) {
                VisualState::SystemActive
            } else {
                VisualState::Normal
            },
        })
        .collect();

    let edge_styles = graph
        .edges()
        .iter()
        .map(|edge| EdgeStyle {
            id: edge.id.clone(),
            state: VisualState::Normal,
        })
        .collect();

    HighlightUpdate {
        node_styles,
        edge_styles,
    }
}
