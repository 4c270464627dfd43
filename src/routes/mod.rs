pub mod applications;
pub mod health;
pub mod interviews;
pub mod job_offers;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::middleware::{cors::workflow_cors, rate_limit};
use crate::AppState;

const MAX_BODY_BYTES: usize = 256 * 1024;

/// Full HTTP surface. Only candidate submission is rate limited.
pub fn router(state: AppState, public_rps: u32) -> Router {
    let submit = post(applications::submit_application).route_layer(
        axum::middleware::from_fn_with_state(
            rate_limit::new_rps_state(public_rps),
            rate_limit::rps_middleware,
        ),
    );

    let api = Router::new()
        .route(
            "/api/job-offers",
            get(job_offers::list_job_offers).post(job_offers::create_job_offer),
        )
        .route(
            "/api/job-offers/:id",
            get(job_offers::get_job_offer).patch(job_offers::update_job_offer),
        )
        .route(
            "/api/job-offers/:id/deactivate",
            post(job_offers::deactivate_job_offer),
        )
        .route(
            "/api/applications",
            submit.get(applications::list_applications),
        )
        .route(
            "/api/applications/:id",
            get(applications::get_application).patch(applications::update_application),
        )
        .route(
            "/api/applications/:id/process",
            put(applications::process_application),
        )
        .route(
            "/api/applications/:id/interviews",
            get(applications::list_application_interviews),
        )
        .route(
            "/api/interviews",
            get(interviews::list_interviews).post(interviews::create_interview),
        )
        .route(
            "/api/interviews/:id",
            get(interviews::get_interview)
                .patch(interviews::update_interview)
                .delete(interviews::cancel_interview),
        );

    Router::new()
        .route("/health", get(health::health))
        .merge(api)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(workflow_cors())
                .layer(DefaultBodyLimit::max(MAX_BODY_BYTES)),
        )
}
