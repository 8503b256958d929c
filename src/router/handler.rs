use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use serde_json::Value;

use crate::http::request::Method;

/// Everything a handler may inspect about the request it is serving.
#[derive(Debug, Clone)]
pub struct Context {
    /// The matched HTTP method.
    pub method: Method,
    /// The clean request path, query string stripped.
    pub path: String,
    /// Bindings for `<name>` segments in the matched route template.
    pub params: HashMap<String, String>,
    /// Decoded query parameters; for repeated keys the last value wins.
    pub query: HashMap<String, String>,
    /// The raw request body.
    pub body: Bytes,
}

impl Context {
    /// A dynamic-segment binding by name.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(|v| v.as_str())
    }

    /// A query parameter by name.
    pub fn query(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(|v| v.as_str())
    }

    /// The request body parsed as JSON.
    pub fn json_body(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

type HandlerFn = dyn Fn(&Context) -> anyhow::Result<Value> + Send + Sync;

/// A named unit of application logic bound to a route.
///
/// The name is what [`RouteTable::list_routes`](crate::router::RouteTable::list_routes)
/// reports for the route; the function produces the JSON payload of a 200
/// response, or an error the dispatcher turns into a 500.
#[derive(Clone)]
pub struct Handler {
    name: String,
    func: Arc<HandlerFn>,
}

impl Handler {
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Context) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, ctx: &Context) -> anyhow::Result<Value> {
        (self.func)(ctx)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler").field("name", &self.name).finish()
    }
}
