use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::Value;

use crate::abstract_server::{ErrorDetails, ErrorLayer, Result, ServerError};

/// One flattened row of the search corpus.  All the name fields are the
/// comma-joined GROUP_CONCAT display strings straight off the wire; the
/// scorer only ever substring-matches against them, so there is no value in
/// re-splitting them here.
///
/// Invariant: `name` is non-empty.  Rows without a German label are dropped
/// by `corpus_from_bindings`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CropRecord {
    /// IRI of the cultivation type.
    pub id: String,
    pub name: String,
    pub taxon_names: String,
    pub common_names: String,
    pub direct_parent_names: String,
    pub all_parent_names: String,
    pub direct_child_names: String,
    pub all_child_names: String,
    pub description: String,
    /// The rdf types of the record.  Space-joined on the wire, but
    /// semantically a set, so we normalize it into one here instead of
    /// making the category filter do substring matching.
    pub class_tags: BTreeSet<String>,
}

/// A `CropRecord` that survived scoring.  Produced fresh per query.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScoredRecord {
    #[serde(flatten)]
    pub record: CropRecord,
    pub score: u32,
}

fn binding_str(binding: &Value, var: &str) -> String {
    binding
        .pointer(&format!("/{}/value", var))
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string()
}

/// Flatten a `application/sparql-results+json` document into the corpus.
///
/// Missing optional variables become empty strings so the scorer never has
/// to branch on presence; rows without a name are excluded entirely.
pub fn corpus_from_bindings(results: &Value) -> Result<Vec<CropRecord>> {
    let bindings = results
        .pointer("/results/bindings")
        .and_then(|v| v.as_array())
        .ok_or_else(|| {
            ServerError::StickyProblem(ErrorDetails {
                layer: ErrorLayer::DataLayer,
                message: "SELECT response lacks results.bindings".to_string(),
            })
        })?;

    let mut corpus = vec![];
    for binding in bindings {
        let name = binding_str(binding, "name");
        if name.is_empty() {
            continue;
        }
        corpus.push(CropRecord {
            id: binding_str(binding, "crop"),
            name,
            taxon_names: binding_str(binding, "taxonName"),
            common_names: binding_str(binding, "commonNames"),
            direct_parent_names: binding_str(binding, "directParentNames"),
            all_parent_names: binding_str(binding, "allParentNames"),
            direct_child_names: binding_str(binding, "directChildNames"),
            all_child_names: binding_str(binding, "allChildNames"),
            description: binding_str(binding, "description"),
            class_tags: binding_str(binding, "classes")
                .split_whitespace()
                .map(|s| s.to_string())
                .collect(),
        });
    }

    info!(record_count = corpus.len(), "flattened crop corpus");
    Ok(corpus)
}
