use salvo::Router;

mod healthcheck;

#[must_use]
pub fn routes() -> Router {
    Router::with_path(super::APP_ROUTE_COMPONENT).push(healthcheck::routes())
}
