//! LSP Protocol Implementation
//!
//! Publishes crontab diagnostics to editors; protocol handling only.

pub mod backend;
pub mod document;
pub mod handlers;
pub mod server;

pub use backend::Backend;
