//! HTTP adapter for the appeals orchestrator
//!
//! A thin request layer: routes map inbound calls to orchestrator operations
//! and serialize results to JSON. All decisions live in the orchestrator and
//! the lifecycle rules; this crate only parses, dispatches and maps error
//! kinds to status codes.

pub mod error;
pub mod web;
pub mod webserver_impl;

// Re-export main types
pub use error::{WebServerError, WebServerResult};
pub use webserver_impl::WebServer;
