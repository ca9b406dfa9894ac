use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use uuid::Uuid;

use ptdiary_auth_types::identity::IdentityHeaders;

use crate::error::{DiaryServiceError, ValidationError};
use crate::handlers::required_text;
use crate::state::AppState;
use crate::usecase::notification::SendNotificationUseCase;

// ── POST /trainees/{trainee_id}/notifications ────────────────────────────────

#[derive(Deserialize)]
pub struct SendNotificationRequest {
    pub kind: Option<String>,
}

/// Queues a push to the trainee. 202: delivery happens after the response.
pub async fn send_notification(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(trainee_id): Path<Uuid>,
    Json(body): Json<SendNotificationRequest>,
) -> Result<StatusCode, DiaryServiceError> {
    let mut errors = ValidationError::default();
    let kind = required_text(body.kind, "kind", &mut errors)
        .ok_or(DiaryServiceError::InvalidRequest(errors))?;

    let usecase = SendNotificationUseCase {
        contracts: state.pt_contract_repo(),
        notifier: state.notification_service(),
    };
    usecase.execute(identity.into(), trainee_id, &kind).await?;
    Ok(StatusCode::ACCEPTED)
}
