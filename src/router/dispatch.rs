use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::config::ServerConfig;
use crate::error::Error;
use crate::http::request::Method;
use crate::http::response::{Response, StatusCode};
use crate::router::handler::Context;
use crate::router::table::RouteTable;

/// Resolves incoming requests against a frozen route table and renders the
/// outcome as an HTTP response.
///
/// Handlers run on the blocking pool under a timeout, so one slow or hanging
/// handler cannot stall the connection tasks, and a handler error or panic is
/// confined to the request that triggered it.
pub struct Dispatcher {
    table: Arc<RouteTable>,
    handler_timeout: Duration,
    debug: bool,
}

impl Dispatcher {
    pub fn new(table: Arc<RouteTable>, config: &ServerConfig) -> Self {
        Self {
            table,
            handler_timeout: Duration::from_secs(config.handler_timeout_secs),
            debug: config.debug,
        }
    }

    /// Dispatches a bodyless request, e.g. from tests or health checks.
    pub async fn dispatch(&self, method: Method, raw_target: &str) -> Response {
        self.dispatch_request(method, raw_target, Bytes::new()).await
    }

    /// Resolves `raw_target` against the route table, runs the matched
    /// handler and converts the outcome into a response:
    ///
    /// - match + `Ok(payload)` → 200 with the payload as JSON
    /// - no match (unknown path or unregistered method) → 404
    /// - handler error or panic → 500, logged, never fatal
    /// - handler over the execution bound → 503
    pub async fn dispatch_request(
        &self,
        method: Method,
        raw_target: &str,
        body: Bytes,
    ) -> Response {
        let response = match self.run_route(method, raw_target, body).await {
            Ok(payload) => Response::json(StatusCode::Ok, &payload),
            Err(err) => error_response(&err),
        };

        if self.debug {
            debug!(
                method = %method,
                target = raw_target,
                status = response.status.as_u16(),
                "dispatched"
            );
        }

        response
    }

    async fn run_route(
        &self,
        method: Method,
        raw_target: &str,
        body: Bytes,
    ) -> Result<Value, Error> {
        let (path, query) = split_target(raw_target);

        let matched = self.table.lookup(path, method).ok_or(Error::RouteNotFound)?;
        let handler = matched.handler.clone();

        let ctx = Context {
            method,
            path: path.to_string(),
            params: matched.params,
            query,
            body,
        };

        let join = tokio::task::spawn_blocking(move || handler.call(&ctx));
        match tokio::time::timeout(self.handler_timeout, join).await {
            Ok(Ok(Ok(payload))) => Ok(payload),
            Ok(Ok(Err(err))) => {
                error!(method = %method, path, error = %err, "handler failed");
                Err(Error::HandlerFailed(err.to_string()))
            }
            Ok(Err(join_err)) => {
                error!(method = %method, path, "handler panicked");
                Err(Error::HandlerFailed(join_err.to_string()))
            }
            Err(_) => {
                warn!(method = %method, path, timeout = ?self.handler_timeout, "handler timed out");
                Err(Error::HandlerTimeout(self.handler_timeout))
            }
        }
    }
}

/// Splits a raw request target into its path and decoded query parameters.
fn split_target(raw_target: &str) -> (&str, HashMap<String, String>) {
    match raw_target.split_once('?') {
        Some((path, query)) => {
            let params = url::form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect();
            (path, params)
        }
        None => (raw_target, HashMap::new()),
    }
}

fn error_response(err: &Error) -> Response {
    match err {
        Error::RouteNotFound => Response::not_found(),
        Error::HandlerTimeout(_) => Response::timed_out(),
        _ => Response::internal_error(),
    }
}
