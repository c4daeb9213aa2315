use async_trait::async_trait;
use serde_json::Value;

pub type Result<T> = std::result::Result<T, ServerError>;

// JSON parse errors are sticky data problems.
impl From<serde_json::Error> for ServerError {
    fn from(err: serde_json::Error) -> ServerError {
        ServerError::StickyProblem(ErrorDetails {
            layer: ErrorLayer::DataLayer,
            message: err.to_string(),
        })
    }
}

/// Express whether the error seems to be happening in the endpoint or the
/// data it returned.
#[derive(Debug)]
pub enum ErrorLayer {
    /// The request itself has structural issues like a malformed URL or an
    /// incorrectly constructed pipeline.  This should not be used for cases
    /// where user input results in a search miss; a miss is part of the
    /// result payload, not an error.
    BadInput,
    /// The error seems to involve the endpoint, like a 5xx status or a
    /// connection failure.
    ServerLayer,
    /// The error seems to be related to the data in question rather than the
    /// endpoint, like a response body that is not the advertised shape.
    DataLayer,
    /// A pipeline was wired together in a way its commands cannot satisfy.
    ConfigLayer,
    /// An internal bookkeeping invariant did not hold.
    RuntimeInvariantViolation,
}

/// ServerError payload to provide details about what went wrong for
/// investigation purposes.
#[derive(Debug)]
pub struct ErrorDetails {
    /// Attempt to distinguish failures due to endpoint bugs from failures due
    /// to data bugs.  A 500 response would be a `ServerLayer` problem, but a
    /// 404 would be a `DataLayer` problem.
    pub layer: ErrorLayer,
    /// Stringified version of the lower level error.
    pub message: String,
}

/// Does a retry make sense or not?
///
/// We do not implement retries; the distinction exists so callers can tell a
/// fetch that might succeed on manual reload apart from one that will keep
/// failing for this data set.
#[derive(Debug)]
pub enum ServerError {
    /// An error that will persist for this data set.  For example a 404 or a
    /// malformed response body.
    StickyProblem(ErrorDetails),
    /// An error that might go away if retried later.  For example a 504
    /// "Gateway timeout".
    TransientProblem(ErrorDetails),
    Unsupported,
}

/// Unified exposure for talking to a SPARQL endpoint over HTTP or to canned
/// fixture responses on disk.
///
/// The endpoint speaks two query verbs with different response media types:
/// SELECT returns `application/sparql-results+json` (a `results.bindings`
/// array of variable/value maps) and CONSTRUCT returns `application/ld+json`
/// (a framed JSON-LD document with an `@graph` array).  Both are surfaced
/// here as untyped `Value`s; flattening into typed records is the model
/// builder's job, not the transport's.
///
/// Acquisition is all-or-nothing: a failed fetch returns an error and no
/// partial bindings are salvaged.
#[async_trait]
pub trait SparqlServer {
    /// Issue a SELECT query, returning the parsed
    /// `application/sparql-results+json` document.
    async fn select(&self, query: &str) -> Result<Value>;

    /// Issue a CONSTRUCT query, returning the parsed framed
    /// `application/ld+json` document.
    async fn construct(&self, query: &str) -> Result<Value>;
}
