mod canned_server;
mod remote_server;
mod server_interface;

pub use canned_server::{make_canned_server, CannedServer};
pub use remote_server::make_remote_server;
pub use server_interface::{ErrorDetails, ErrorLayer, Result, ServerError, SparqlServer};
