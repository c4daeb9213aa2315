pub mod builder;
pub mod interface;
pub mod parser;

mod cmd_fetch_crops;
mod cmd_fetch_hierarchy;
mod cmd_filter_class;
mod cmd_highlight;
mod cmd_lineage;
mod cmd_node_details;
mod cmd_search;
mod cmd_suggest;

pub use builder::build_pipeline;
pub use interface::{PipelineCommand, PipelineValues};
