//! Resource routes built from the record kinds.
//! Each path dispatches on method to the generic handlers; other methods, HEAD
//! included, get 405.

use crate::handlers::docs::{api_doc, OPENAPI_JSON_PATH, SWAGGER_UI_PATH};
use crate::handlers::resource::{create, delete as delete_handler, list, method_not_allowed, update};
use crate::models::{Object, Record, Well, WellDayHistory, WellDayPlan};
use crate::state::AppState;
use axum::{
    routing::{get, MethodRouter},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use utoipa_swagger_ui::SwaggerUi;

/// GET/POST/PUT/DELETE for one record kind.
pub fn resource_route<R: Record>() -> MethodRouter<AppState> {
    get(list::<R>)
        .post(create::<R>)
        .put(update::<R>)
        .delete(delete_handler::<R>)
        .head(method_not_allowed)
        .fallback(method_not_allowed)
}

pub fn resource_routes(state: AppState) -> Router {
    Router::new()
        .route("/objects", resource_route::<Object>())
        .route("/wells", resource_route::<Well>())
        .route("/well_day_histories", resource_route::<WellDayHistory>())
        .route("/well_day_plans", resource_route::<WellDayPlan>())
        .with_state(state)
}

/// Full application: resources, Swagger UI with its OpenAPI document, tracing and body limit.
pub fn app_router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .merge(resource_routes(state))
        .merge(SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_JSON_PATH, api_doc()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(max_body_bytes)),
        )
}
