use axum::{
    Router,
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    routing::{delete, get, patch, post},
};

use ptdiary_core::health::{database_ready, healthz};
use ptdiary_core::middleware::{propagate_request_id_layer, request_id_layer, trace_layer};

use crate::domain::types::MAX_IMAGE_BYTES;
use crate::handlers::{
    comment::{create_comment, delete_comment, update_comment},
    diet::{create_diet, get_diet, get_my_diets, get_trainee_diets},
    notification::send_notification,
    pt_contract::{create_pt_contract, get_my_pt_contracts},
    push_token::register_push_token,
};
use crate::state::AppState;

/// Room for the `content` part and multipart framing on top of the image.
const DIET_FORM_LIMIT: usize = MAX_IMAGE_BYTES + 1024 * 1024;

async fn readyz(State(state): State<AppState>) -> StatusCode {
    database_ready(&state.db).await
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Push token
        .route("/users/@me/push-token", post(register_push_token))
        // Diets
        .route(
            "/diets",
            post(create_diet).layer(DefaultBodyLimit::max(DIET_FORM_LIMIT)),
        )
        .route("/diets/{id}", get(get_diet))
        .route("/users/@me/diets", get(get_my_diets))
        .route("/trainees/{trainee_id}/diets", get(get_trainee_diets))
        // Comments
        .route("/comments", post(create_comment))
        .route("/comments", patch(update_comment))
        .route("/comments/{id}", delete(delete_comment))
        // PT contracts
        .route("/users/@me/pt-contracts", get(get_my_pt_contracts))
        .route("/pt-contracts", post(create_pt_contract))
        // Notifications
        .route(
            "/trainees/{trainee_id}/notifications",
            post(send_notification),
        )
        .layer(trace_layer())
        .layer(propagate_request_id_layer())
        .layer(request_id_layer())
        .with_state(state)
}
