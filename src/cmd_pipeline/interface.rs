use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, to_value, Value};
use std::fmt::Debug;

pub use crate::abstract_server::{Result, SparqlServer};
use crate::graph::{CropGraph, HighlightUpdate};
use crate::model::{CropRecord, HierarchyNode, ScoredRecord};

/// The flattened search corpus moving between pipeline stages.
#[derive(Serialize)]
pub struct CropCorpus {
    pub records: Vec<CropRecord>,
}

/// Scored search results plus enough metadata for a presenter to tell "no
/// results overall" from "no results in this category": `total_count` is
/// the pre-filter match count for the term.
#[derive(Serialize)]
pub struct ScoredResults {
    pub term: String,
    pub total_count: usize,
    pub records: Vec<ScoredRecord>,
}

/// The hierarchy graph; not serialized directly since `CropGraph` knows its
/// own stable JSON rep.
pub struct HierarchyGraphValue {
    pub graph: CropGraph,
}

#[derive(Serialize)]
pub struct LineageSet {
    pub selected: String,
    /// Sorted for output stability.
    pub node_ids: Vec<String>,
}

#[derive(Serialize)]
pub struct JsonValue {
    pub value: Value,
}

/// The values that can be passed from one pipeline command to the next.
pub enum PipelineValues {
    Void,
    CropCorpus(CropCorpus),
    ScoredResults(ScoredResults),
    HierarchyGraph(HierarchyGraphValue),
    LineageSet(LineageSet),
    HighlightBundle(HighlightUpdate),
    NodeDetails(HierarchyNode),
    JsonValue(JsonValue),
}

impl PipelineValues {
    /// JSON rep of the final pipeline value for printing and for tests.
    pub fn to_json(&self) -> Value {
        match self {
            PipelineValues::Void => json!("void"),
            PipelineValues::CropCorpus(corpus) => {
                to_value(&corpus.records).unwrap_or(Value::Null)
            }
            PipelineValues::ScoredResults(results) => to_value(results).unwrap_or(Value::Null),
            PipelineValues::HierarchyGraph(hier) => hier.graph.to_json(),
            PipelineValues::LineageSet(lineage) => to_value(lineage).unwrap_or(Value::Null),
            PipelineValues::HighlightBundle(update) => to_value(update).unwrap_or(Value::Null),
            PipelineValues::NodeDetails(node) => to_value(node).unwrap_or(Value::Null),
            PipelineValues::JsonValue(jv) => jv.value.clone(),
        }
    }
}

/// One stage of a command pipeline: takes the previous stage's value plus
/// the shared server, produces the next value.
#[async_trait]
pub trait PipelineCommand: Debug {
    async fn execute(
        &self,
        server: &Box<dyn SparqlServer + Send + Sync>,
        input: PipelineValues,
    ) -> Result<PipelineValues>;
}

pub struct ServerPipeline {
    pub server_kind: String,
    pub server: Box<dyn SparqlServer + Send + Sync>,
    pub commands: Vec<Box<dyn PipelineCommand + Send + Sync>>,
}

impl ServerPipeline {
    pub async fn run(&self) -> Result<PipelineValues> {
        let mut cur_values = PipelineValues::Void;
        for cmd in &self.commands {
            cur_values = cmd.execute(&self.server, cur_values).await?;
        }
        Ok(cur_values)
    }
}
