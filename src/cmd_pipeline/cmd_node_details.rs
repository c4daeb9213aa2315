use async_trait::async_trait;
use clap::Args;

use super::interface::{PipelineCommand, PipelineValues};

use crate::abstract_server::{Result, SparqlServer};
use crate::model::node_from_framed_details;
use crate::queries::node_details_query;

/// Fetch the detail payload for one node: memberships with their validity
/// intervals plus any typed attributes, the data the detail panel renders.
///
/// When a hierarchy graph is piped in, the fetched details are merged into
/// the graph's copy of the node and the graph travels onward, so a later
/// `highlight` stage can see the memberships.  Standalone, the enriched node
/// itself is the output.
#[derive(Debug, Args)]
pub struct NodeDetails {
    /// IRI of the node to describe.
    node: String,
}

#[derive(Debug)]
pub struct NodeDetailsCommand {
    pub args: NodeDetails,
}

#[async_trait]
impl PipelineCommand for NodeDetailsCommand {
    async fn execute(
        &self,
        server: &Box<dyn SparqlServer + Send + Sync>,
        input: PipelineValues,
    ) -> Result<PipelineValues> {
        let framed = server
            .construct(&node_details_query(&self.args.node))
            .await?;
        let mut node = node_from_framed_details(&framed, &self.args.node)?;

        if let PipelineValues::HierarchyGraph(mut hier) = input {
            // The hierarchy query already produced the display label and
            // title; keep those rather than recomputing them.
            if let Some(known) = hier.graph.node(&self.args.node) {
                node.label = known.label.clone();
                node.title = known.title.clone();
            }
            hier.graph.enrich_node(node);
            return Ok(PipelineValues::HierarchyGraph(hier));
        }

        Ok(PipelineValues::NodeDetails(node))
    }
}
