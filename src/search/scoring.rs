//! Relevance scoring over the flattened crop corpus.
//!
//! The weights encode how a match in each field ranks: a hit on the record's
//! own name dominates, common names and direct relatives follow, matches
//! that only exist somewhere in the transitive parent/child closure barely
//! register, and description hits are a tie-breaker.  Bonuses stack across
//! fields and across repeated query words on purpose; that stacking is the
//! established ranking behavior of the dataset's search page.

use crate::model::{CropRecord, ScoredRecord};

const SCORE_EXACT_NAME: u32 = 1000;
const SCORE_NAME_CONTAINS: u32 = 40;
const SCORE_NAME_STARTS_WITH: u32 = 20;
const SCORE_COMMON_NAMES: u32 = 30;
const SCORE_DIRECT_PARENTS: u32 = 25;
const SCORE_TAXON_NAMES: u32 = 20;
const SCORE_DIRECT_CHILDREN: u32 = 15;
const SCORE_INDIRECT_PARENTS: u32 = 5;
const SCORE_INDIRECT_CHILDREN: u32 = 5;
const SCORE_DESCRIPTION: u32 = 2;

/// Score the corpus against a query.
///
/// Returns only records with a positive score, sorted descending; ties keep
/// their corpus order (the sort is stable).  An empty or whitespace-only
/// query yields an empty result rather than matching everything.  This is a
/// pure function: no caching, no history, no filtering.
pub fn score_corpus(query: &str, corpus: &[CropRecord]) -> Vec<ScoredRecord> {
    let lower_query = query.to_lowercase().trim().to_string();
    if lower_query.is_empty() {
        return vec![];
    }

    let words: Vec<&str> = lower_query.split_whitespace().collect();

    let mut scored: Vec<ScoredRecord> = corpus
        .iter()
        .filter_map(|record| {
            let score = score_record(&lower_query, &words, record);
            if score > 0 {
                Some(ScoredRecord {
                    record: record.clone(),
                    score,
                })
            } else {
                None
            }
        })
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored
}

fn score_record(lower_query: &str, words: &[&str], record: &CropRecord) -> u32 {
    let lower_name = record.name.to_lowercase();
    let lower_common = record.common_names.to_lowercase();
    let lower_taxon = record.taxon_names.to_lowercase();
    let lower_all_parents = record.all_parent_names.to_lowercase();
    let lower_direct_parents = record.direct_parent_names.to_lowercase();
    let lower_all_children = record.all_child_names.to_lowercase();
    let lower_direct_children = record.direct_child_names.to_lowercase();
    let lower_description = record.description.to_lowercase();

    let mut score = 0;

    // Whole normalized query, not per-word.
    if lower_name == lower_query {
        score += SCORE_EXACT_NAME;
    }

    // Per word, per field, independently; a word present in several fields
    // scores in each of them, and repeated words score repeatedly.
    for word in words {
        if lower_name.contains(word) {
            score += SCORE_NAME_CONTAINS;
            if lower_name.starts_with(word) {
                score += SCORE_NAME_STARTS_WITH;
            }
        }
        if lower_common.contains(word) {
            score += SCORE_COMMON_NAMES;
        }
        if lower_direct_parents.contains(word) {
            score += SCORE_DIRECT_PARENTS;
        }
        if lower_taxon.contains(word) {
            score += SCORE_TAXON_NAMES;
        }
        if lower_direct_children.contains(word) {
            score += SCORE_DIRECT_CHILDREN;
        }
        // Ancestor-only and descendant-only matches: the word shows up
        // somewhere in the transitive closure but not among the direct
        // relatives.
        if lower_all_parents.contains(word) && !lower_direct_parents.contains(word) {
            score += SCORE_INDIRECT_PARENTS;
        }
        if lower_all_children.contains(word) && !lower_direct_children.contains(word) {
            score += SCORE_INDIRECT_CHILDREN;
        }
        if lower_description.contains(word) {
            score += SCORE_DESCRIPTION;
        }
    }

    score
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
    fn test_exact_name_match_scores_1060() {
        let mut kartoffel = record("Kartoffel");
        kartoffel.common_names = "Erdapfel".to_string();
        let results = score_corpus("Kartoffel", &[kartoffel]);
        assert_eq!(results.len(), 1);
        // exact (1000) + contains (40) + starts-with (20)
        assert_eq!(results[0].score, 1060);
    }

    #[test]
    fn test_empty_query_yields_nothing() {
        let corpus = vec![record("Weizen"), record("Roggen")];
        assert!(score_corpus("", &corpus).is_empty());
        assert!(score_corpus("   \t ", &corpus).is_empty());
    }

    #[test]
    fn test_zero_score_records_are_excluded() {
        let corpus = vec![record("Weizen"), record("Roggen")];
        let results = score_corpus("weiz", &corpus);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].record.name, "Weizen");
    }

    #[test]
    fn test_sorted_descending_with_stable_ties() {
        let mut by_description = record("Roggen");
        by_description.description = "eine Hafer Sorte".to_string();
        let mut also_by_description = record("Gerste");
        also_by_description.description = "auch eine Hafer Sorte".to_string();
        let corpus = vec![
            by_description.clone(),
            record("Hafer"),
            also_by_description.clone(),
        ];
        let results = score_corpus("hafer", &corpus);
        assert_eq!(results[0].record.name, "Hafer");
        // Tied description-only matches keep their corpus order.
        assert_eq!(results[1].record.name, "Roggen");
        assert_eq!(results[2].record.name, "Gerste");
        assert!(results[0].score > results[1].score);
        assert_eq!(results[1].score, results[2].score);
    }

    #[test]
    fn test_result_set_is_subset_of_corpus() {
        let corpus = vec![record("Weizen"), record("Winterweizen")];
        let results = score_corpus("weizen", &corpus);
        for scored in &results {
            assert!(corpus.iter().any(|r| r.id == scored.record.id));
            assert!(scored.score > 0);
        }
    }

    #[test]
    fn test_field_bonuses_stack_across_fields() {
        let mut rec = record("Dinkelweizen");
        rec.common_names = "Weizenart".to_string();
        rec.taxon_names = "Triticum weizen".to_string();
        let results = score_corpus("weizen", &[rec]);
        // name contains (40) + common (30) + taxon (20); name does not
        // start with the word, no exact match.
        assert_eq!(results[0].score, 90);
    }

    #[test]
    fn test_indirect_only_bonus_requires_absence_from_direct() {
        let mut indirect = record("Kartoffel");
        indirect.all_parent_names = "Hackfrüchte, Knollenfrüchte".to_string();
        indirect.direct_parent_names = "Knollenfrüchte".to_string();
        let results = score_corpus("hackfrüchte", &[indirect.clone()]);
        assert_eq!(results[0].score, 5);

        // Once the word also matches a direct parent, the +25 applies and
        // the indirect-only +5 does not.
        indirect.direct_parent_names = "Hackfrüchte".to_string();
        let results = score_corpus("hackfrüchte", &[indirect]);
        assert_eq!(results[0].score, 25);
    }

    #[test]
    fn test_repeated_words_score_repeatedly() {
        let rec = record("Mais");
        let once = score_corpus("mais", &[rec.clone()]);
        let twice = score_corpus("mais mais", &[rec]);
        // The doubled query no longer exact-matches the name, but each word
        // occurrence accumulates the per-word bonuses again.
        assert_eq!(twice[0].score, 2 * (once[0].score - SCORE_EXACT_NAME));
    }

    #[test]
    fn test_multi_word_query_accumulates_per_word() {
        let mut rec = record("Winterweizen");
        rec.direct_parent_names = "Getreide".to_string();
        let results = score_corpus("winter getreide", &[rec]);
        // "winter": name contains + starts-with (60); "getreide": direct
        // parent (25).
        assert_eq!(results[0].score, 85);
    }
}
