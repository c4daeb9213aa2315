use async_trait::async_trait;
use clap::Args;

use super::interface::{LineageSet, PipelineCommand, PipelineValues};

use crate::abstract_server::{ErrorDetails, ErrorLayer, Result, ServerError, SparqlServer};
use crate::graph::compute_lineage;

/// Compute the full lineage of a node in a piped-in hierarchy graph: every
/// transitive ancestor, every transitive descendant, and the node itself.
#[derive(Debug, Args)]
pub struct Lineage {
    /// IRI of the node whose lineage to walk.
    node: String,
}

#[derive(Debug)]
pub struct LineageCommand {
    pub args: Lineage,
}

#[async_trait]
impl PipelineCommand for LineageCommand {
    async fn execute(
        &self,
        _server: &Box<dyn SparqlServer + Send + Sync>,
        input: PipelineValues,
    ) -> Result<PipelineValues> {
        let hier = match input {
            PipelineValues::HierarchyGraph(hier) => hier,
            _ => {
                return Err(ServerError::StickyProblem(ErrorDetails {
                    layer: ErrorLayer::ConfigLayer,
                    message: "lineage needs a HierarchyGraph".to_string(),
                }));
            }
        };

        let lineage = compute_lineage(&hier.graph, &self.args.node);
        let mut node_ids: Vec<String> = lineage.into_iter().collect();
        node_ids.sort();

        Ok(PipelineValues::LineageSet(LineageSet {
            selected: self.args.node.clone(),
            node_ids,
        }))
    }
}
