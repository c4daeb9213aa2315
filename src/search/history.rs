use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::model::CropRecord;

/// File the history is persisted under, inside a caller-supplied directory.
pub const HISTORY_FILE_NAME: &str = "goograin-history.json";

const HISTORY_LIMIT: usize = 10;
const SUGGESTION_LIMIT: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum SuggestionKind {
    /// A previously searched term.
    History,
    /// A crop name from the loaded corpus.
    Corpus,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Suggestion {
    pub kind: SuggestionKind,
    pub text: String,
}

/// Bounded list of recent search terms: lowercase, trimmed, deduplicated,
/// most-recent-first, at most ten entries.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct SearchHistory {
    terms: Vec<String>,
}

impl SearchHistory {
    pub fn new() -> SearchHistory {
        SearchHistory { terms: vec![] }
    }

    /// Load from `dir/goograin-history.json`.  A missing or malformed file
    /// just means an empty history; stale presentation state is never worth
    /// failing over.
    pub fn load(dir: &Path) -> SearchHistory {
        let path = Self::storage_path(dir);
        match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_default(),
            Err(_) => SearchHistory::new(),
        }
    }

    pub fn save(&self, dir: &Path) -> std::io::Result<()> {
        let raw = serde_json::to_string(self).map_err(std::io::Error::from)?;
        std::fs::write(Self::storage_path(dir), raw)
    }

    pub fn storage_path(dir: &Path) -> PathBuf {
        dir.join(HISTORY_FILE_NAME)
    }

    /// Record a search term: normalize, drop an existing duplicate, push to
    /// the front, clamp to the bound.  Blank terms are ignored.
    pub fn record(&mut self, term: &str) {
        let cleaned = term.to_lowercase().trim().to_string();
        if cleaned.is_empty() {
            return;
        }
        self.terms.retain(|t| t != &cleaned);
        self.terms.insert(0, cleaned);
        self.terms.truncate(HISTORY_LIMIT);
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Prefix suggestions for a partially typed term: matching history
    /// entries first, then corpus names, duplicates dropped, capped at ten.
    /// An empty prefix suggests nothing.
    pub fn suggest(&self, partial: &str, corpus: &[CropRecord]) -> Vec<Suggestion> {
        let prefix = partial.to_lowercase().trim().to_string();
        if prefix.is_empty() {
            return vec![];
        }

        let mut suggestions: Vec<Suggestion> = vec![];
        let mut seen: Vec<String> = vec![];

        for term in &self.terms {
            if term.starts_with(&prefix) {
                seen.push(term.clone());
                suggestions.push(Suggestion {
                    kind: SuggestionKind::History,
                    text: term.clone(),
                });
            }
        }
        for record in corpus {
            if record.name.to_lowercase().starts_with(&prefix)
                && !seen.contains(&record.name.to_lowercase())
            {
                seen.push(record.name.to_lowercase());
                suggestions.push(Suggestion {
                    kind: SuggestionKind::Corpus,
                    text: record.name.clone(),
                });
            }
            if suggestions.len() >= SUGGESTION_LIMIT {
                break;
            }
        }

        suggestions.truncate(SUGGESTION_LIMIT);
        suggestions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn record(name: &str) -> CropRecord {
        CropRecord {
            id: format!("https://example.org/crops/{}", name),
            name: name.to_string(),
            taxon_names: String::new(),
            common_names: String::new(),
            direct_parent_names: String::new(),
            all_parent_names: String::new(),
            direct_child_names: String::new(),
            all_child_names: String::new(),
            description: String::new(),
            class_tags: BTreeSet::new(),
        }
    }

    #[test]
    fn test_record_dedups_and_bounds() {
        let mut history = SearchHistory::new();
        for i in 0..12 {
            history.record(&format!("term{}", i));
        }
        assert_eq!(history.terms().len(), 10);
        assert_eq!(history.terms()[0], "term11");

        // Re-recording an existing term moves it to the front without
        // growing the list.
        history.record("term5");
        assert_eq!(history.terms().len(), 10);
        assert_eq!(history.terms()[0], "term5");
        assert_eq!(
            history.terms().iter().filter(|t| *t == "term5").count(),
            1
        );
    }

    #[test]
    fn test_record_normalizes_and_skips_blank() {
        let mut history = SearchHistory::new();
        history.record("  Kartoffel  ");
        history.record("   ");
        assert_eq!(history.terms(), &["kartoffel".to_string()]);
    }

    #[test]
    fn test_suggest_merges_history_then_corpus() {
        let mut history = SearchHistory::new();
        history.record("weizen");
        let corpus = vec![record("Weizen"), record("Winterweizen"), record("Roggen")];

        let suggestions = history.suggest("we", &corpus);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].kind, SuggestionKind::History);
        assert_eq!(suggestions[0].text, "weizen");

        let suggestions = history.suggest("wi", &corpus);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].kind, SuggestionKind::Corpus);
        assert_eq!(suggestions[0].text, "Winterweizen");

        assert!(history.suggest("", &corpus).is_empty());
    }

    #[test]
    fn test_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let mut history = SearchHistory::new();
        history.record("kartoffel");
        history.record("mais");
        history.save(dir.path()).unwrap();

        let reloaded = SearchHistory::load(dir.path());
        assert_eq!(reloaded.terms(), &["mais".to_string(), "kartoffel".to_string()]);

        // Loading from a directory without a history file starts empty.
        let empty_dir = tempfile::tempdir().unwrap();
        assert!(SearchHistory::load(empty_dir.path()).terms().is_empty());
    }
}
