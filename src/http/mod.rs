//! HTTP protocol implementation.
//!
//! This module implements the HTTP/1.1 plumbing underneath the router: a
//! request parser, response types, a stream writer and the per-connection
//! state machine. Routing itself lives in [`crate::router`]; nothing in this
//! module knows which paths are registered.
//!
//! # Connection State Machine
//!
//! Each client connection cycles through:
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Wait for incoming request data
//!        └──────┬──────┘
//!               │ Request parsed
//!               ▼
//!        ┌──────────────────┐
//!        │   Dispatching    │ ← Resolve the route, run the handler
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ├─ Keep-Alive → Reading (same connection)
//!               └─ Close → Closed
//! ```

pub mod request;
pub mod response;
pub mod parser;
pub mod connection;
pub mod writer;
