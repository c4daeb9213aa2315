use async_trait::async_trait;
use clap::Args;

use super::interface::{PipelineCommand, PipelineValues, ScoredResults};

use crate::abstract_server::{ErrorDetails, ErrorLayer, Result, ServerError, SparqlServer};

/// Narrow piped-in scored results to one category tab.  This only removes
/// entries; scores and ordering come through untouched, and `total_count`
/// keeps the pre-filter match count.
#[derive(Debug, Args)]
pub struct FilterClass {
    /// The class-tag IRI to keep.
    tag: String,
}

#[derive(Debug)]
pub struct FilterClassCommand {
    pub args: FilterClass,
}

#[async_trait]
impl PipelineCommand for FilterClassCommand {
    async fn execute(
        &self,
        _server: &Box<dyn SparqlServer + Send + Sync>,
        input: PipelineValues,
    ) -> Result<PipelineValues> {
        let results = match input {
            PipelineValues::ScoredResults(results) => results,
            _ => {
                return Err(ServerError::StickyProblem(ErrorDetails {
                    layer: ErrorLayer::ConfigLayer,
                    message: "filter-class needs ScoredResults".to_string(),
                }));
            }
        };

        let records = results
            .records
            .into_iter()
            .filter(|scored| scored.record.class_tags.contains(&self.args.tag))
            .collect();

        Ok(PipelineValues::ScoredResults(ScoredResults {
            term: results.term,
            total_count: results.total_count,
            records,
        }))
    }
}
