use async_trait::async_trait;
use serde_json::{from_str, Value};
use url::{ParseError, Url};

use super::server_interface::{ErrorDetails, ErrorLayer, Result, ServerError, SparqlServer};

/// reqwest won't return an error for an unhappy status code itself; someone
/// would need to call `Response::error_for_status`, so for now we'll generally
/// assume everything is some kind of transient problem.
impl From<reqwest::Error> for ServerError {
    fn from(err: reqwest::Error) -> ServerError {
        ServerError::TransientProblem(ErrorDetails {
            layer: ErrorLayer::ServerLayer,
            message: err.to_string(),
        })
    }
}

impl From<ParseError> for ServerError {
    fn from(err: ParseError) -> ServerError {
        ServerError::StickyProblem(ErrorDetails {
            layer: ErrorLayer::BadInput,
            message: err.to_string(),
        })
    }
}

#[derive(Debug)]
struct RemoteServer {
    endpoint_url: Url,
    client: reqwest::Client,
}

impl RemoteServer {
    /// POST the query as an URL-encoded form body with a `query` field; the
    /// endpoint picks the response media type off the `Accept` header.
    async fn post_query(&self, query: &str, accept: &str) -> Result<Value> {
        let body = format!("query={}", urlencoding::encode(query));
        let res = self
            .client
            .post(self.endpoint_url.clone())
            .header("Content-Type", "application/x-www-form-urlencoded; charset=UTF-8")
            .header("Accept", accept)
            .body(body)
            .send()
            .await?;

        if !res.status().is_success() {
            if res.status().is_server_error() {
                return Err(ServerError::TransientProblem(ErrorDetails {
                    layer: ErrorLayer::ServerLayer,
                    message: format!("Endpoint status of {}", res.status()),
                }));
            } else {
                return Err(ServerError::StickyProblem(ErrorDetails {
                    layer: ErrorLayer::DataLayer,
                    message: format!("Endpoint status of {}", res.status()),
                }));
            }
        }

        let raw_str = res.text().await?;
        match from_str(&raw_str) {
            Ok(json) => Ok(json),
            Err(err) => Err(ServerError::StickyProblem(ErrorDetails {
                layer: ErrorLayer::DataLayer,
                message: err.to_string(),
            })),
        }
    }
}

#[async_trait]
impl SparqlServer for RemoteServer {
    async fn select(&self, query: &str) -> Result<Value> {
        self.post_query(query, "application/sparql-results+json")
            .await
    }

    async fn construct(&self, query: &str) -> Result<Value> {
        self.post_query(query, "application/ld+json").await
    }
}

pub fn make_remote_server(endpoint_url: Url) -> Result<Box<dyn SparqlServer + Send + Sync>> {
    Ok(Box::new(RemoteServer {
        endpoint_url,
        client: reqwest::Client::new(),
    }))
}
