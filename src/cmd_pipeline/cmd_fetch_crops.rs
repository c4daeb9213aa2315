use async_trait::async_trait;
use clap::Args;

use super::interface::{CropCorpus, PipelineCommand, PipelineValues};

use crate::abstract_server::{Result, SparqlServer};
use crate::model::corpus_from_bindings;
use crate::queries::crop_corpus_query;

/// Fetch the flattened search corpus: one record per cultivation type with
/// all the name aggregates the scorer consumes.
#[derive(Debug, Args)]
pub struct FetchCrops {}

#[derive(Debug)]
pub struct FetchCropsCommand {
    pub args: FetchCrops,
}

#[async_trait]
impl PipelineCommand for FetchCropsCommand {
    async fn execute(
        &self,
        server: &Box<dyn SparqlServer + Send + Sync>,
        _input: PipelineValues,
    ) -> Result<PipelineValues> {
        let results = server.select(&crop_corpus_query()).await?;
        let records = corpus_from_bindings(&results)?;
        Ok(PipelineValues::CropCorpus(CropCorpus { records }))
    }
}
