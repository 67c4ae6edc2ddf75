use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, patch, post},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health))
        .route(
            "/api/players/:user_id",
            get(handlers::get_player).post(handlers::create_player),
        )
        .route("/api/tasks", post(handlers::add_task))
        // GET takes a user id and lists that user's tasks; DELETE takes a
        // task id. One registration, since the router rejects two param
        // names at the same position.
        .route(
            "/api/tasks/:id",
            get(handlers::list_tasks).delete(handlers::delete_task),
        )
        .route("/api/tasks/:id/toggle", patch(handlers::toggle_task))
        .route("/api/admin/summary", get(handlers::admin_summary))
        .route("/api/admin/users", get(handlers::admin_users))
        .route("/api/assistant/suggest", post(handlers::suggest_tasks))
        .with_state(state)
}
