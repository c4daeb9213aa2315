use clap::{Parser, Subcommand, ValueEnum};

use super::cmd_fetch_crops::FetchCrops;
use super::cmd_fetch_hierarchy::FetchHierarchy;
use super::cmd_filter_class::FilterClass;
use super::cmd_highlight::Highlight;
use super::cmd_lineage::Lineage;
use super::cmd_node_details::NodeDetails;
use super::cmd_search::Search;
use super::cmd_suggest::Suggest;

#[derive(Clone, Debug, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    Pretty,
    /// Un-pretty-printed JSON.
    Concise,
}

#[derive(Debug, Parser)]
pub struct ToolOpts {
    /// URL of the SPARQL endpoint to query, or the path to a canned fixture
    /// file when poking at the tool offline.
    #[clap(
        long,
        default_value = "https://agriculture.ld.admin.ch/query",
        env = "GOOGRAIN_SERVER"
    )]
    pub server: String,

    #[clap(long, short, value_enum, ignore_case = true, default_value = "concise")]
    pub output_format: OutputFormat,

    #[clap(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    FetchCrops(FetchCrops),
    FetchHierarchy(FetchHierarchy),
    FilterClass(FilterClass),
    Highlight(Highlight),
    Lineage(Lineage),
    NodeDetails(NodeDetails),
    Search(Search),
    Suggest(Suggest),
}
