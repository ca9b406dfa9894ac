use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

use ptdiary_auth_types::identity::IdentityHeaders;

use crate::error::{DiaryServiceError, ValidationError};
use crate::handlers::required_text;
use crate::state::AppState;
use crate::usecase::push_token::RegisterPushTokenUseCase;

// ── POST /users/@me/push-token ───────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterPushTokenRequest {
    pub token: Option<String>,
}

impl RegisterPushTokenRequest {
    pub fn validate(self) -> Result<String, DiaryServiceError> {
        let mut errors = ValidationError::default();
        required_text(self.token, "token", &mut errors)
            .ok_or(DiaryServiceError::InvalidRequest(errors))
    }
}

pub async fn register_push_token(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<RegisterPushTokenRequest>,
) -> Result<StatusCode, DiaryServiceError> {
    let token = body.validate()?;
    let usecase = RegisterPushTokenUseCase {
        repo: state.push_token_repo(),
    };
    usecase.execute(identity.user_id, token).await?;
    Ok(StatusCode::CREATED)
}
