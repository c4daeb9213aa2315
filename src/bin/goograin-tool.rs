use std::env::args_os;

use serde_json::to_string_pretty;

use goograin::cmd_pipeline::{builder::build_pipeline, parser::OutputFormat, PipelineValues};
use goograin::logging::init_logging;

#[tokio::main]
async fn main() {
    init_logging();

    let os_args: Vec<String> = args_os()
        .map(|os| os.into_string().unwrap_or("".to_string()))
        .collect();

    if os_args.len() < 2 {
        eprintln!("Usage: {} 'COMMAND [| COMMAND...]'", os_args[0]);
        std::process::exit(1);
    }

    let (pipeline, output_format) = match build_pipeline(&os_args[0], &os_args[1]) {
        Ok(pipeline) => pipeline,
        Err(err) => {
            eprintln!("You did not specify a good pipeline!\n {:?}", err);
            std::process::exit(1);
        }
    };

    let values = match pipeline.run().await {
        Ok(values) => values,
        Err(err) => {
            eprintln!("Pipeline Error!\n{:?}", err);
            std::process::exit(1);
        }
    };

    match values {
        PipelineValues::Void => {
            println!("Void result.");
        }
        other => {
            let value = other.to_json();
            if output_format == OutputFormat::Pretty {
                if let Ok(pretty) = to_string_pretty(&value) {
                    println!("{}", pretty);
                }
            } else {
                println!("{}", value);
            }
        }
    }
}
