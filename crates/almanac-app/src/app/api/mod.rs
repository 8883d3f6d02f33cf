mod app_specific;
mod events;

use salvo::writing::Json;
use salvo::{Router, handler};
use serde::Serialize;

// Re-export route constants from core
pub use almanac_core::constants::{
    API_ROUTE_COMPONENT, API_ROUTE_PREFIX, APP_ROUTE_COMPONENT, EVENTS_ROUTE_COMPONENT,
    EVENTS_ROUTE_PREFIX,
};

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[handler]
async fn api_root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Almanac Calendar API".to_string(),
    })
}

/// ## Summary
/// Constructs the main API router.
#[must_use]
pub fn routes() -> Router {
    Router::with_path(API_ROUTE_COMPONENT)
        .get(api_root)
        .push(app_specific::routes())
        .push(events::routes())
}
