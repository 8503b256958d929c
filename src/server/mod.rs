//! Server lifecycle: construction, registration and serving.

pub mod listener;
pub mod tls;

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::json;
use tracing::info;

use crate::config::ServerConfig;
use crate::error::Error;
use crate::http::request::Method;
use crate::middleware::{Middleware, MiddlewareStack};
use crate::router::dispatch::Dispatcher;
use crate::router::handler::Handler;
use crate::router::table::RouteTable;

/// An embedded API server.
///
/// Routes and middleware are registered on the mutable server; serving
/// consumes it, so the route table is guaranteed frozen before the first
/// connection is accepted and dispatch never takes a lock.
///
/// Three routes exist from construction: `GET /`, `GET /version` and
/// `GET /servinfo`, all under the configured `/v{version}` prefix.
pub struct Server {
    config: ServerConfig,
    table: RouteTable,
    middleware: MiddlewareStack,
}

impl Server {
    pub fn new(config: ServerConfig) -> Result<Self, Error> {
        let mut table = RouteTable::new(config.version);
        register_builtin_routes(&mut table, &config)?;

        Ok(Self {
            config,
            table,
            middleware: MiddlewareStack::new(),
        })
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Registers `handler` under `path` for each of `methods`.
    ///
    /// The path is prefixed with `/v{version}`. A method that is already
    /// bound for the path fails the call; methods registered by the same
    /// call before the failing one remain bound.
    pub fn register(
        &mut self,
        path: &str,
        methods: &[Method],
        handler: Handler,
    ) -> Result<(), Error> {
        for method in methods {
            self.table.register(path, *method, handler.clone())?;
        }
        Ok(())
    }

    /// Attaches the built-in middleware registered under `name`.
    pub fn attach(&mut self, name: &str) -> Result<(), Error> {
        self.middleware.attach(name)
    }

    /// Attaches a caller-supplied middleware after capability validation.
    pub fn attach_boxed(&mut self, middleware: Box<dyn Middleware>) -> Result<(), Error> {
        self.middleware.attach_boxed(middleware)
    }

    /// Names of the attached middleware, in attachment order.
    pub fn middleware_names(&self) -> Vec<&'static str> {
        self.middleware.names()
    }

    /// Snapshot of every registered route:
    /// versioned path → method name → handler name.
    pub fn list_routes(&self) -> BTreeMap<String, BTreeMap<String, String>> {
        self.table.list_routes()
    }

    /// Binds the configured address and serves until the task is cancelled
    /// or the listener fails.
    pub async fn run(self) -> anyhow::Result<()> {
        let scheme = if self.config.tls.is_some() {
            "https"
        } else {
            "http"
        };
        info!(
            "API running on {}://{}:{}/v{}/",
            scheme, self.config.host, self.config.port, self.config.version
        );

        let dispatcher = Arc::new(Dispatcher::new(Arc::new(self.table), &self.config));
        listener::serve(&self.config, dispatcher).await
    }
}

fn register_builtin_routes(table: &mut RouteTable, config: &ServerConfig) -> Result<(), Error> {
    table.register(
        "/",
        Method::GET,
        Handler::new("index", |_| Ok(json!({"message": "Welcome to the API!"}))),
    )?;

    let version = config.version;
    table.register(
        "/version",
        Method::GET,
        Handler::new("api_version", move |_| Ok(json!({"version": version}))),
    )?;

    let info = json!({
        "host": config.host.clone(),
        "port": config.port,
        "ssl": enabled_flag(config.tls.is_some()),
        "auth": enabled_flag(config.auth.is_some()),
        "debug": enabled_flag(config.debug),
        "server_version": env!("CARGO_PKG_VERSION"),
    });
    table.register(
        "/servinfo",
        Method::GET,
        Handler::new("server_info", move |_| Ok(info.clone())),
    )?;

    Ok(())
}

fn enabled_flag(on: bool) -> &'static str {
    if on { "enabled" } else { "disabled" }
}
