//! HTTP API: configuration, routing, and the text-generation adapter.

pub mod app;
pub mod config;
pub mod middleware;
pub mod textgen;
