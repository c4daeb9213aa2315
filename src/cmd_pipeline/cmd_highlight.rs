use async_trait::async_trait;
use chrono::NaiveDate;
use clap::Args;

use super::interface::{PipelineCommand, PipelineValues};

use crate::abstract_server::{ErrorDetails, ErrorLayer, Result, ServerError, SparqlServer};
use crate::graph::{apply_highlight, reset_highlight, SystemFilter};

/// Recolor a piped-in hierarchy graph.  With a node, its lineage is
/// highlighted and everything else dims; without one, every node returns to
/// its resting state.  Either way nodes active in the named source system on
/// the given date take the system style.
#[derive(Debug, Args)]
pub struct Highlight {
    /// IRI of the node to focus, or nothing to clear the highlight.
    node: Option<String>,

    /// Source system name to mark active memberships for.
    #[clap(long)]
    system: Option<String>,

    /// Reference date (YYYY-MM-DD) for membership checks; defaults to today.
    #[clap(long)]
    date: Option<String>,
}

impl Highlight {
    fn system_filter(&self) -> SystemFilter {
        let mut filter = SystemFilter::none();
        filter.system_name = self.system.clone();
        if let Some(raw) = &self.date {
            // An unparsable date degrades to today rather than erroring,
            // matching how the page treats a mangled query string.
            if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
                filter.as_of_date = date;
            } else {
                warn!(date = raw.as_str(), "ignoring unparsable reference date");
            }
        }
        filter
    }
}

#[derive(Debug)]
pub struct HighlightCommand {
    pub args: Highlight,
}

#[async_trait]
impl PipelineCommand for HighlightCommand {
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
                    message: "highlight needs a HierarchyGraph".to_string(),
                }));
            }
        };

        let filter = self.args.system_filter();
        let update = match &self.args.node {
            Some(node_id) => apply_highlight(&hier.graph, node_id, &filter),
            None => reset_highlight(&hier.graph, &filter),
        };

        Ok(PipelineValues::HighlightBundle(update))
    }
}
