extern crate serde;
extern crate serde_json;

extern crate chrono;
extern crate clap;
extern crate itertools;
extern crate petgraph;
#[macro_use]
extern crate tracing;
extern crate tracing_subscriber;

pub mod abstract_server;
pub mod cmd_pipeline;
pub mod graph;
pub mod logging;
pub mod model;
pub mod queries;
pub mod search;
