use std::path::PathBuf;

use async_trait::async_trait;
use clap::Args;
use serde_json::to_value;

use super::interface::{JsonValue, PipelineCommand, PipelineValues};

use crate::abstract_server::{Result, SparqlServer};
use crate::model::corpus_from_bindings;
use crate::queries::crop_corpus_query;
use crate::search::SearchHistory;

/// Produce typeahead suggestions for a partially typed term: previously
/// searched terms first, then matching corpus names.
#[derive(Debug, Args)]
pub struct Suggest {
    /// The prefix typed so far.
    partial: String,

    /// Directory holding the search history file.
    #[clap(long, env = "GOOGRAIN_HISTORY_DIR")]
    history_dir: Option<PathBuf>,
}

#[derive(Debug)]
pub struct SuggestCommand {
    pub args: Suggest,
}

#[async_trait]
impl PipelineCommand for SuggestCommand {
    async fn execute(
        &self,
        server: &Box<dyn SparqlServer + Send + Sync>,
        input: PipelineValues,
    ) -> Result<PipelineValues> {
        let records = match input {
            PipelineValues::CropCorpus(corpus) => corpus.records,
            _ => {
                let results = server.select(&crop_corpus_query()).await?;
                corpus_from_bindings(&results)?
            }
        };

        let history = match &self.args.history_dir {
            Some(dir) => SearchHistory::load(dir),
            None => SearchHistory::new(),
        };

        let suggestions = history.suggest(&self.args.partial, &records);
        Ok(PipelineValues::JsonValue(JsonValue {
            value: to_value(&suggestions)?,
        }))
    }
}
