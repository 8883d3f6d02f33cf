//! Almanac calendar server - integration test support.
//!
//! Re-exports the workspace crates so integration tests can use
//! `almanac_test::` paths.

pub mod component {
    pub use almanac_core::{config, constants, types};
    pub use almanac_engine as engine;
    pub use almanac_service as service;
    pub use almanac_store as store;
}

pub use almanac_app::app;

pub mod handlers {
    pub use almanac_app::service_handler::{EventServiceHandler, SharedEventService};
}
