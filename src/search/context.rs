use crate::abstract_server::{Result, SparqlServer};
use crate::model::{corpus_from_bindings, CropRecord, ScoredRecord};
use crate::queries::crop_corpus_query;
use crate::search::scoring::score_corpus;

/// The active category tab: everything, or one class-tag IRI.
#[derive(Clone, Debug, PartialEq)]
pub enum ClassFilter {
    All,
    Tag(String),
}

/// Caller-owned session state for the search page: the fetched corpus, the
/// memoized scored list for the last term, and the active category filter.
///
/// Scoring and category filtering are deliberately decoupled stages:
/// `search` re-scores and memoizes, while `set_filter` +
/// `current_results` only narrow the memoized list, so switching tabs is an
/// O(n) filter with no re-scoring and no re-sorting.  Invalidation is
/// explicit: the corpus is replaced by `replace_corpus`, the scored set by
/// the next `search`, the filter by `set_filter`.  No hidden statics.
pub struct SearchContext {
    corpus: Vec<CropRecord>,
    corpus_loaded: bool,
    last_term: String,
    scored: Vec<ScoredRecord>,
    active_filter: ClassFilter,
}

impl SearchContext {
    pub fn new() -> SearchContext {
        SearchContext {
            corpus: vec![],
            corpus_loaded: false,
            last_term: String::new(),
            scored: vec![],
            active_filter: ClassFilter::All,
        }
    }

    /// Fetch-once-per-session corpus acquisition.  The first call issues the
    /// corpus SELECT; later calls return the cached corpus without touching
    /// the server.  A transport failure leaves the context unloaded so a
    /// later call can try again.
    pub async fn ensure_corpus(
        &mut self,
        server: &(dyn SparqlServer + Send + Sync),
    ) -> Result<&[CropRecord]> {
        if !self.corpus_loaded {
            let results = server.select(&crop_corpus_query()).await?;
            self.replace_corpus(corpus_from_bindings(&results)?);
        }
        Ok(&self.corpus)
    }

    /// Swap in a new corpus, dropping the memoized scored set since it was
    /// computed against the old one.
    pub fn replace_corpus(&mut self, corpus: Vec<CropRecord>) {
        self.corpus = corpus;
        self.corpus_loaded = true;
        self.last_term.clear();
        self.scored.clear();
        self.active_filter = ClassFilter::All;
    }

    pub fn corpus(&self) -> &[CropRecord] {
        &self.corpus
    }

    /// Score the corpus for a term, memoize the result, and reset the
    /// category filter to `All` the way a fresh search always lands on the
    /// "all results" tab.
    pub fn search(&mut self, term: &str) -> &[ScoredRecord] {
        self.last_term = term.to_string();
        self.scored = score_corpus(term, &self.corpus);
        self.active_filter = ClassFilter::All;
        &self.scored
    }

    pub fn last_term(&self) -> &str {
        &self.last_term
    }

    pub fn set_filter(&mut self, filter: ClassFilter) {
        self.active_filter = filter;
    }

    pub fn active_filter(&self) -> &ClassFilter {
        &self.active_filter
    }

    /// The memoized scored list narrowed by the active filter; order and
    /// scores are untouched.
    pub fn current_results(&self) -> Vec<&ScoredRecord> {
        self.scored
            .iter()
            .filter(|scored| match &self.active_filter {
                ClassFilter::All => true,
                ClassFilter::Tag(tag) => scored.record.class_tags.contains(tag),
            })
            .collect()
    }

    /// Total matches for the last term, ignoring the category filter.  Lets
    /// a presenter distinguish "no results overall" from "no results in this
    /// category".
    pub fn total_results(&self) -> usize {
        self.scored.len()
    }
}

impl Default for SearchContext {
    fn default() -> Self {
        Self::new()
    }
}
