use async_trait::async_trait;
use serde_json::{from_str, Value};

use super::server_interface::{ErrorDetails, ErrorLayer, Result, ServerError, SparqlServer};

/// A `SparqlServer` that answers from canned response documents instead of
/// talking to a live endpoint.  This is what our integration tests run
/// against, and it also lets the tool be poked at offline.
///
/// Responses are registered with a `needle` that is matched against the
/// query text via substring containment; an empty needle matches any query.
/// Registration order is match order.
pub struct CannedServer {
    select_responses: Vec<(String, Value)>,
    construct_responses: Vec<(String, Value)>,
}

impl CannedServer {
    pub fn new() -> CannedServer {
        CannedServer {
            select_responses: vec![],
            construct_responses: vec![],
        }
    }

    pub fn add_select_response(&mut self, needle: &str, response: Value) {
        self.select_responses.push((needle.to_string(), response));
    }

    pub fn add_construct_response(&mut self, needle: &str, response: Value) {
        self.construct_responses.push((needle.to_string(), response));
    }
}

impl Default for CannedServer {
    fn default() -> Self {
        Self::new()
    }
}

fn lookup(responses: &[(String, Value)], query: &str) -> Result<Value> {
    for (needle, response) in responses {
        if needle.is_empty() || query.contains(needle.as_str()) {
            return Ok(response.clone());
        }
    }
    Err(ServerError::StickyProblem(ErrorDetails {
        layer: ErrorLayer::DataLayer,
        message: "no canned response registered for query".to_string(),
    }))
}

#[async_trait]
impl SparqlServer for CannedServer {
    async fn select(&self, query: &str) -> Result<Value> {
        lookup(&self.select_responses, query)
    }

    async fn construct(&self, query: &str) -> Result<Value> {
        lookup(&self.construct_responses, query)
    }
}

/// Load a canned server from a JSON fixture file of the shape
/// `{ "select": [{ "needle": str, "response": {} }], "construct": [...] }`.
pub fn make_canned_server(fixture_path: &str) -> Result<Box<dyn SparqlServer + Send + Sync>> {
    let raw_str = std::fs::read_to_string(fixture_path).map_err(|err| {
        ServerError::StickyProblem(ErrorDetails {
            layer: ErrorLayer::BadInput,
            message: format!("unable to read fixture {}: {}", fixture_path, err),
        })
    })?;
    let fixture: Value = from_str(&raw_str)?;

    let mut server = CannedServer::new();
    if let Some(Value::Array(entries)) = fixture.get("select") {
        for entry in entries {
            let needle = entry["needle"].as_str().unwrap_or("");
            server.add_select_response(needle, entry["response"].clone());
        }
    }
    if let Some(Value::Array(entries)) = fixture.get("construct") {
        for entry in entries {
            let needle = entry["needle"].as_str().unwrap_or("");
            server.add_construct_response(needle, entry["response"].clone());
        }
    }

    Ok(Box::new(server))
}
