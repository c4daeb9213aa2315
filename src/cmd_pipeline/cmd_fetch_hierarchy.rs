use async_trait::async_trait;
use clap::Args;

use super::interface::{HierarchyGraphValue, PipelineCommand, PipelineValues};

use crate::abstract_server::{Result, SparqlServer};
use crate::graph::CropGraph;
use crate::model::graph_parts_from_bindings;
use crate::queries::{hierarchy_edges_query, HIERARCHY_ROOT};

/// Fetch the transitive part-of closure under a root node and assemble it
/// into the hierarchy graph.
#[derive(Debug, Args)]
pub struct FetchHierarchy {
    /// IRI of the hierarchy root.
    #[clap(long, default_value = HIERARCHY_ROOT)]
    root: String,
}

#[derive(Debug)]
pub struct FetchHierarchyCommand {
    pub args: FetchHierarchy,
}

#[async_trait]
impl PipelineCommand for FetchHierarchyCommand {
    async fn execute(
        &self,
        server: &Box<dyn SparqlServer + Send + Sync>,
        _input: PipelineValues,
    ) -> Result<PipelineValues> {
        let results = server.select(&hierarchy_edges_query(&self.args.root)).await?;
        let (nodes, edges) = graph_parts_from_bindings(&results)?;
        let graph = CropGraph::from_parts(nodes, edges);
        info!(
            node_count = graph.node_count(),
            edge_count = graph.edges().len(),
            "assembled hierarchy graph"
        );
        Ok(PipelineValues::HierarchyGraph(HierarchyGraphValue {
            graph,
        }))
    }
}
