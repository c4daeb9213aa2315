pub mod context;
pub mod history;
pub mod scoring;

pub use context::{ClassFilter, SearchContext};
pub use history::{SearchHistory, Suggestion, SuggestionKind};
pub use scoring::score_corpus;
