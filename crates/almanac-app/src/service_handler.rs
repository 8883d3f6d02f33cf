use std::sync::Arc;

use almanac_core::error::CoreError;
use almanac_service::{EventService, NotificationDispatcher};
use almanac_store::EventStore;
use salvo::async_trait;

use crate::error::AppResult;

/// Event service as shared through the depot.
pub type SharedEventService =
    Arc<EventService<Arc<dyn EventStore>, Arc<dyn NotificationDispatcher>>>;

pub struct EventServiceHandler {
    pub service: SharedEventService,
}

#[async_trait]
impl salvo::Handler for EventServiceHandler {
    #[tracing::instrument(skip(self, _req, depot, _res, _ctrl))]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        depot.inject(Arc::clone(&self.service));
    }
}

/// ## Summary
/// Retrieves the event service from the depot.
///
/// ## Errors
/// Returns an error if the event service is not found in the depot.
pub fn get_service_from_depot(depot: &salvo::Depot) -> AppResult<SharedEventService> {
    depot
        .obtain::<SharedEventService>()
        .cloned()
        .map_err(|_err| CoreError::InvariantViolation("Event service not found in depot").into())
}
