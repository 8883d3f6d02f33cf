//! Integration tests for the calendar HTTP API.
//!
//! Each test builds its own service over an in-memory store (or a JSON file
//! in a temporary directory) and issues requests through salvo's test client.

mod api;
mod events;
mod helpers;
mod views;
