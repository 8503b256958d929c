//! Route registry and request dispatch.
//!
//! This is the core of the crate: the route table maps versioned paths and
//! methods to named handlers, and the dispatcher resolves incoming requests
//! against it, runs the matched handler and renders the outcome as a JSON
//! response.
//!
//! The table is populated before serving starts and frozen into an `Arc`
//! when the dispatcher is built, so lookups on the request path take no lock.

pub mod dispatch;
pub mod handler;
pub mod table;

pub use dispatch::Dispatcher;
pub use handler::{Context, Handler};
pub use table::RouteTable;
