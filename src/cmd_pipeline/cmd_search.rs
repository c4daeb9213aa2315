use std::path::PathBuf;

use async_trait::async_trait;
use clap::Args;

use super::interface::{PipelineCommand, PipelineValues, ScoredResults};

use crate::abstract_server::{Result, SparqlServer};
use crate::model::corpus_from_bindings;
use crate::queries::crop_corpus_query;
use crate::search::{score_corpus, SearchHistory};

/// Score a corpus against a search term.  The corpus is taken from the
/// pipeline when `fetch-crops` ran earlier, otherwise it is fetched here.
#[derive(Debug, Args)]
pub struct Search {
    /// The search term; multiple words accumulate per-word bonuses.
    term: Vec<String>,

    /// Directory holding the search history file.  When set, the term is
    /// recorded there the way the search page logs submitted queries.
    #[clap(long, env = "GOOGRAIN_HISTORY_DIR")]
    history_dir: Option<PathBuf>,
}

#[derive(Debug)]
pub struct SearchCommand {
    pub args: Search,
}

#[async_trait]
impl PipelineCommand for SearchCommand {
    async fn execute(
        &self,
        server: &Box<dyn SparqlServer + Send + Sync>,
        input: PipelineValues,
    ) -> Result<PipelineValues> {
        let records = match input {
            PipelineValues::CropCorpus(corpus) => corpus.records,
            PipelineValues::Void => {
                let results = server.select(&crop_corpus_query()).await?;
                corpus_from_bindings(&results)?
            }
            _ => {
                return Ok(PipelineValues::Void);
            }
        };

        let term = self.args.term.join(" ");
        let scored = score_corpus(&term, &records);
        info!(term = term.as_str(), match_count = scored.len(), "scored corpus");

        // History is presentation-adjacent bookkeeping; the scorer itself
        // stays side-effect free.
        if let Some(dir) = &self.args.history_dir {
            let mut history = SearchHistory::load(dir);
            history.record(&term);
            if let Err(err) = history.save(dir) {
                warn!(error = %err, "unable to persist search history");
            }
        }

        Ok(PipelineValues::ScoredResults(ScoredResults {
            term,
            total_count: scored.len(),
            records: scored,
        }))
    }
}
