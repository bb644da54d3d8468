pub mod applications;
pub mod auth;
pub mod bot;
pub mod health;
pub mod jobs;

use crate::AppState;
use axum::{
    middleware::from_fn_with_state,
    routing::{get, patch, post},
    Router,
};

/// Full API surface. Auth endpoints and the health probe are open; everything
/// else sits behind the bearer-auth middleware, with per-handler role checks.
pub fn api_router(state: AppState) -> Router<AppState> {
    let open = Router::new()
        .route("/api/health", get(health::health))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login));

    let protected = Router::new()
        .route("/api/auth/me", get(auth::me))
        .route("/api/jobs", get(jobs::list_jobs).post(jobs::create_job))
        .route("/api/jobs/:id", get(jobs::get_job))
        .route(
            "/api/applications",
            get(applications::list_applications).post(applications::create_application),
        )
        .route(
            "/api/applications/detailed",
            post(applications::create_detailed_application),
        )
        .route("/api/applications/my", get(applications::my_applications))
        .route("/api/applications/:id", get(applications::get_application))
        .route(
            "/api/applications/:id/status",
            patch(applications::update_application_status),
        )
        .route(
            "/api/applications/:id/activities",
            get(applications::get_application_activities),
        )
        .route("/api/bot/automate", post(bot::run_automation))
        .layer(from_fn_with_state(state, crate::middleware::auth::require_auth));

    open.merge(protected)
}
