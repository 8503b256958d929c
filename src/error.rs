use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::http::request::Method;

/// Errors produced by registration, dispatch and persistence.
///
/// Registration-time errors (`DuplicateRoute`, `InvalidPath`,
/// `InvalidMiddleware`) are fatal to startup and should be propagated by the
/// host application. Request-time errors (`RouteNotFound`, `HandlerFailed`,
/// `HandlerTimeout`) are converted into HTTP responses per request and never
/// terminate the serving loop.
#[derive(Debug, Error)]
pub enum Error {
    /// The same method + versioned path pair was registered twice.
    #[error("method {method} is already registered for {path}")]
    DuplicateRoute { path: String, method: Method },

    /// A route path that does not start with `/` or carries a malformed
    /// `<param>` segment.
    #[error("invalid route path {0:?}")]
    InvalidPath(String),

    /// An attached middleware does not belong to the recognized capability set.
    #[error("{0:?} is not a recognized middleware capability")]
    InvalidMiddleware(String),

    /// No handler matched the requested method + path.
    #[error("route not found")]
    RouteNotFound,

    /// A handler returned an error or panicked during execution.
    #[error("handler failed: {0}")]
    HandlerFailed(String),

    /// A handler did not complete within the configured bound.
    #[error("handler exceeded the {0:?} execution bound")]
    HandlerTimeout(Duration),

    /// A JSON file read or write failed.
    #[error("persistence failure on {}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: PersistenceKind,
    },
}

/// Underlying cause of a [`Error::Persistence`] failure.
#[derive(Debug, Error)]
pub enum PersistenceKind {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
