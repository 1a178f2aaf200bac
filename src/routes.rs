//! URL layout. Every page path ends in a slash; state changes are POSTs
//! and each one has a GET confirmation page at the same path.

use axum::Router;
use axum::middleware::map_response_with_state;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::error::render_error_page;
use crate::handlers::{self, checklist, tasks};
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(tasks::upcoming))
        .route("/previous/", get(tasks::previous))
        .route(
            "/task/create/",
            get(tasks::create_form).post(tasks::create),
        )
        .route("/task/{task_id}/", get(tasks::detail))
        .route(
            "/task/{task_id}/delete/",
            get(tasks::confirm_delete).post(tasks::delete),
        )
        .route(
            "/task/{task_id}/checklist/create/",
            get(checklist::create_form).post(checklist::create),
        )
        .route(
            "/task/{task_id}/checklist/{check_id}/update/",
            get(checklist::confirm_toggle).post(checklist::toggle),
        )
        .route(
            "/task/{task_id}/checklist/{check_id}/delete/",
            get(checklist::confirm_delete).post(checklist::delete),
        )
        .route("/health", get(handlers::health_check))
        .fallback(handlers::not_found)
        .layer(map_response_with_state(state.clone(), render_error_page))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
