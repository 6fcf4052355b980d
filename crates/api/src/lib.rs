//! HTTP API: routing, handlers, and request/response mapping.

pub mod app;
