use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

use crate::abstract_server::{ErrorDetails, ErrorLayer, Result, ServerError};

/// A cultivation type as a node in the hierarchy graph.
///
/// The edge-list SELECT only gives us identity and label; the detail
/// CONSTRUCT fills in description, botanical info, memberships and
/// attributes for a single node on demand.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HierarchyNode {
    /// IRI of the cultivation type.
    pub id: String,
    /// Display label, wrapped/truncated for the rendering surface.
    pub label: String,
    /// The full, unwrapped name.
    pub title: String,
    pub description: Option<String>,
    /// Botanical taxon name, when the node has a botanical plant.
    pub taxon_name: Option<String>,
    /// German common names of the botanical plant.
    pub common_names: Vec<String>,
    pub memberships: Vec<Membership>,
    pub attributes: Vec<TypedAttribute>,
}

impl HierarchyNode {
    pub fn bare(id: &str, title: &str) -> HierarchyNode {
        HierarchyNode {
            id: id.to_string(),
            label: wrap_label(title),
            title: title.to_string(),
            description: None,
            taxon_name: None,
            common_names: vec![],
            memberships: vec![],
            attributes: vec![],
        }
    }
}

/// Child→parent edge.  Identity is `"{child}-{parent}"` and the builder
/// never emits the same pair twice.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HierarchyEdge {
    pub id: String,
    /// The child end.
    pub from: String,
    /// The parent end.
    pub to: String,
}

/// A node's tie to a named external source system, valid over an optional
/// closed-or-open date interval.  Both bounds are inclusive; a missing bound
/// imposes no constraint on that side.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Membership {
    pub system_name: String,
    pub identifier: Option<String>,
    pub valid_from: Option<NaiveDate>,
    pub valid_to: Option<NaiveDate>,
}

/// (type name, value name) pair off a node's typed attribute list.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TypedAttribute {
    pub type_name: String,
    pub value_name: String,
}

/// Wrap a node label onto at most two lines (line length 20) and truncate
/// past 40 characters with an ellipsis, the way the hierarchy view has
/// always displayed labels.
pub fn wrap_label(label: &str) -> String {
    const MAX_LINE: usize = 20;
    const MAX_TOTAL: usize = 40;

    let chars: Vec<char> = label.chars().collect();
    let chars: Vec<char> = if chars.len() > MAX_TOTAL {
        let mut truncated: Vec<char> = chars[..MAX_TOTAL - 3].to_vec();
        truncated.extend(['.', '.', '.']);
        truncated
    } else {
        chars
    };

    if chars.len() <= MAX_LINE {
        return chars.into_iter().collect();
    }

    // Break at the last space within the first line, falling back to a hard
    // break when the first word alone overflows the line.
    let break_point = chars[..=MAX_LINE]
        .iter()
        .rposition(|c| *c == ' ')
        .unwrap_or(MAX_LINE);
    let head: String = chars[..break_point].iter().collect();
    let tail: String = chars[break_point + 1..].iter().collect();
    format!("{}\n{}", head, tail.trim())
}

fn binding_str(binding: &Value, var: &str) -> Option<String> {
    binding
        .pointer(&format!("/{}/value", var))
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

/// Build the deduplicated node and edge lists from the hierarchy edge-list
/// SELECT.  Each binding row names a child/parent pair with labels; a node
/// appearing in many rows is created once, and so is an edge.
pub fn graph_parts_from_bindings(
    results: &Value,
) -> Result<(Vec<HierarchyNode>, Vec<HierarchyEdge>)> {
    let bindings = results
        .pointer("/results/bindings")
        .and_then(|v| v.as_array())
        .ok_or_else(|| {
            ServerError::StickyProblem(ErrorDetails {
                layer: ErrorLayer::DataLayer,
                message: "SELECT response lacks results.bindings".to_string(),
            })
        })?;

    let mut nodes: BTreeMap<String, HierarchyNode> = BTreeMap::new();
    let mut seen_edges: HashSet<String> = HashSet::new();
    let mut edges = vec![];

    for binding in bindings {
        let child = match binding_str(binding, "child") {
            Some(v) => v,
            None => continue,
        };
        let parent = match binding_str(binding, "parent") {
            Some(v) => v,
            None => continue,
        };
        let child_name = binding_str(binding, "childName").unwrap_or_default();
        let parent_name = binding_str(binding, "parentName").unwrap_or_default();

        nodes
            .entry(child.clone())
            .or_insert_with(|| HierarchyNode::bare(&child, &child_name));
        nodes
            .entry(parent.clone())
            .or_insert_with(|| HierarchyNode::bare(&parent, &parent_name));

        let edge_id = format!("{}-{}", child, parent);
        if seen_edges.insert(edge_id.clone()) {
            edges.push(HierarchyEdge {
                id: edge_id,
                from: child,
                to: parent,
            });
        }
    }

    info!(
        node_count = nodes.len(),
        edge_count = edges.len(),
        "built hierarchy graph parts"
    );
    Ok((nodes.into_values().collect(), edges))
}

/// JSON-LD is loosely shaped: a field can be a plain string or a
/// `{"@value": ...}` wrapper depending on how the frame compacted it.  All
/// shape ambiguity is resolved here so nothing downstream ever branches on
/// it.
fn ld_str(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => map.get("@value").and_then(|v| v.as_str()).map(String::from),
        _ => None,
    }
}

fn ld_date(value: &Value) -> Option<NaiveDate> {
    ld_str(value).and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok())
}

/// A framed field holding zero, one, or many node objects.
fn ld_vec(value: Option<&Value>) -> Vec<Value> {
    match value {
        None | Some(Value::Null) => vec![],
        Some(Value::Array(items)) => items.clone(),
        Some(other) => vec![other.clone()],
    }
}

/// Normalize one framed CONSTRUCT response into a typed `HierarchyNode`.
///
/// The frame nests the botanical plant, memberships and attributes under the
/// node object in `@graph`; we take the node matching `node_iri` (or the
/// only node, when the frame already reduced to one).
pub fn node_from_framed_details(framed: &Value, node_iri: &str) -> Result<HierarchyNode> {
    let graph = ld_vec(framed.get("@graph"));
    let node_obj = graph
        .iter()
        .find(|obj| obj.get("@id").and_then(|v| v.as_str()) == Some(node_iri))
        .or_else(|| graph.first())
        .ok_or_else(|| {
            ServerError::StickyProblem(ErrorDetails {
                layer: ErrorLayer::DataLayer,
                message: format!("framed response holds no node for {}", node_iri),
            })
        })?;

    let title = node_obj
        .get("name")
        .and_then(|v| ld_str(v))
        .unwrap_or_default();

    let mut node = HierarchyNode::bare(node_iri, &title);
    node.description = node_obj.get("description").and_then(|v| ld_str(v));

    if let Some(plant) = ld_vec(node_obj.get("botanicalPlant")).first() {
        node.taxon_name = plant.get("taxonName").and_then(|v| ld_str(v));
        node.common_names = ld_vec(plant.get("name"))
            .iter()
            .filter_map(|v| ld_str(v))
            .collect();
    }

    for membership in ld_vec(node_obj.get("membership")) {
        let system_name = match membership.get("system").and_then(|v| ld_str(v)) {
            Some(name) => name,
            None => continue,
        };
        node.memberships.push(Membership {
            system_name,
            identifier: membership.get("identifier").and_then(|v| ld_str(v)),
            valid_from: membership.get("validFrom").and_then(|v| ld_date(v)),
            valid_to: membership.get("validThrough").and_then(|v| ld_date(v)),
        });
    }

    for attribute in ld_vec(node_obj.get("attribute")) {
        let type_name = attribute.get("attributeType").and_then(|v| ld_str(v));
        let value_name = attribute.get("attributeValue").and_then(|v| ld_str(v));
        if let (Some(type_name), Some(value_name)) = (type_name, value_name) {
            node.attributes.push(TypedAttribute {
                type_name,
                value_name,
            });
        }
    }

    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wrap_label_short_is_untouched() {
        assert_eq!(wrap_label("Weizen"), "Weizen");
    }

    #[test]
    fn test_wrap_label_breaks_at_space() {
        assert_eq!(
            wrap_label("Sommerweizen und Dinkel"),
            "Sommerweizen und\nDinkel"
        );
    }

    #[test]
    fn test_wrap_label_hard_breaks_long_words() {
        let wrapped = wrap_label("Donaudampfschifffahrtsgesellschaft");
        let mut lines = wrapped.split('\n');
        assert_eq!(lines.next().unwrap().chars().count(), 20);
        assert!(lines.next().is_some());
    }

    #[test]
    fn test_wrap_label_truncates_with_ellipsis() {
        let long = "a".repeat(60);
        let wrapped = wrap_label(&long);
        assert!(wrapped.ends_with("..."));
        assert!(wrapped.chars().filter(|c| *c != '\n').count() <= 40);
    }

    fn edge_binding(child: &str, parent: &str) -> Value {
        json!({
            "child": { "value": child },
            "childName": { "value": format!("{} name", child) },
            "parent": { "value": parent },
            "parentName": { "value": format!("{} name", parent) },
        })
    }

    #[test]
    fn test_graph_parts_dedup() {
        let results = json!({
            "results": { "bindings": [
                edge_binding("a", "b"),
                edge_binding("a", "b"),
                edge_binding("b", "c"),
            ]}
        });
        let (nodes, edges) = graph_parts_from_bindings(&results).unwrap();
        assert_eq!(nodes.len(), 3);
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0].id, "a-b");
        assert_eq!(edges[1].id, "b-c");
    }

    #[test]
    fn test_framed_node_normalizes_value_wrappers() {
        let framed = json!({
            "@graph": [{
                "@id": "https://example.org/crops/1",
                "name": { "@value": "Kartoffel", "@language": "de" },
                "botanicalPlant": {
                    "taxonName": "Solanum tuberosum",
                    "name": ["Erdapfel", { "@value": "Grundbirne" }]
                },
                "membership": {
                    "system": "AGIS",
                    "identifier": { "@value": "553" },
                    "validFrom": { "@value": "2020-01-01", "@type": "xsd:date" }
                }
            }]
        });
        let node = node_from_framed_details(&framed, "https://example.org/crops/1").unwrap();
        assert_eq!(node.title, "Kartoffel");
        assert_eq!(node.taxon_name.as_deref(), Some("Solanum tuberosum"));
        assert_eq!(node.common_names, vec!["Erdapfel", "Grundbirne"]);
        assert_eq!(node.memberships.len(), 1);
        let membership = &node.memberships[0];
        assert_eq!(membership.system_name, "AGIS");
        assert_eq!(membership.identifier.as_deref(), Some("553"));
        assert_eq!(
            membership.valid_from,
            NaiveDate::from_ymd_opt(2020, 1, 1)
        );
        assert_eq!(membership.valid_to, None);
    }

    #[test]
    fn test_framed_response_without_graph_is_sticky() {
        let err = node_from_framed_details(&json!({}), "x").unwrap_err();
        match err {
            ServerError::StickyProblem(_) => {}
            other => panic!("expected sticky problem, got {:?}", other),
        }
    }
}
