use clap::Parser;
use tracing::{trace, trace_span};
use url::Url;

use crate::abstract_server::{
    make_canned_server, make_remote_server, ErrorDetails, ErrorLayer, Result, ServerError,
};

use super::cmd_fetch_crops::FetchCropsCommand;
use super::cmd_fetch_hierarchy::FetchHierarchyCommand;
use super::cmd_filter_class::FilterClassCommand;
use super::cmd_highlight::HighlightCommand;
use super::cmd_lineage::LineageCommand;
use super::cmd_node_details::NodeDetailsCommand;
use super::cmd_search::SearchCommand;
use super::cmd_suggest::SuggestCommand;
use super::interface::{PipelineCommand, ServerPipeline};
use super::parser::{Command, OutputFormat, ToolOpts};

pub fn fab_command_from_opts(opts: ToolOpts) -> Result<Box<dyn PipelineCommand + Send + Sync>> {
    match opts.cmd {
        Command::FetchCrops(fc) => Ok(Box::new(FetchCropsCommand { args: fc })),

        Command::FetchHierarchy(fh) => Ok(Box::new(FetchHierarchyCommand { args: fh })),

        Command::FilterClass(fc) => Ok(Box::new(FilterClassCommand { args: fc })),

        Command::Highlight(h) => Ok(Box::new(HighlightCommand { args: h })),

        Command::Lineage(l) => Ok(Box::new(LineageCommand { args: l })),

        Command::NodeDetails(nd) => Ok(Box::new(NodeDetailsCommand { args: nd })),

        Command::Search(s) => Ok(Box::new(SearchCommand { args: s })),

        Command::Suggest(s) => Ok(Box::new(SuggestCommand { args: s })),
    }
}

/// Build a command pipeline from a shell-y string where we use pipe
/// boundaries to delineate the separate pipeline steps.
///
/// The shell-words module is used to parse `arg_str` into shell words, which
/// we then break into separate sub-commands whenever we see a `|`.  We then
/// pass these sub-commands to clap's `try_parse_from`, taking care to stuff
/// our binary name into the first arg.  The first segment's `--server` value
/// picks the backing server: a parsable URL means the live endpoint, any
/// other value is treated as a canned fixture path.
pub fn build_pipeline(bin_name: &str, arg_str: &str) -> Result<(ServerPipeline, OutputFormat)> {
    let span = trace_span!("build_pipeline", arg_str);
    let _span_guard = span.enter();

    let all_args = match shell_words::split(arg_str) {
        Ok(parsed) => parsed,
        Err(err) => {
            return Err(ServerError::StickyProblem(ErrorDetails {
                layer: ErrorLayer::BadInput,
                message: err.to_string(),
            }));
        }
    };

    let mut server_kind = "none";
    let mut server = None;
    let mut output_format = None;
    let mut first_time = true;

    let mut commands: Vec<Box<dyn PipelineCommand + Send + Sync>> = vec![];

    for arg_slices in all_args.split(|v| v == "|") {
        let mut fake_args = vec![bin_name.to_string()];
        fake_args.extend(arg_slices.iter().cloned());

        let opts = match ToolOpts::try_parse_from(fake_args) {
            Ok(opts) => opts,
            Err(err) => {
                return Err(ServerError::StickyProblem(ErrorDetails {
                    layer: ErrorLayer::BadInput,
                    message: err.to_string(),
                }));
            }
        };

        if first_time {
            (server_kind, server) = match Url::parse(&opts.server) {
                Ok(url) => ("remote", Some(make_remote_server(url)?)),
                Err(_) => ("canned", Some(make_canned_server(&opts.server)?)),
            };
            output_format = Some(opts.output_format.clone());
            first_time = false;
        }

        trace!(cmd = ?opts.cmd);
        commands.push(fab_command_from_opts(opts)?);
    }

    let server = server.ok_or_else(|| {
        ServerError::StickyProblem(ErrorDetails {
            layer: ErrorLayer::BadInput,
            message: "empty pipeline".to_string(),
        })
    })?;

    Ok((
        ServerPipeline {
            server_kind: server_kind.to_string(),
            server,
            commands,
        },
        output_format.unwrap_or(OutputFormat::Concise),
    ))
}
