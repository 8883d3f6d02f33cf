//! HTTP surface of the almanac calendar server.

pub mod app;
pub mod error;
pub mod service_handler;
