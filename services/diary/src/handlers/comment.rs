use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ptdiary_auth_types::identity::IdentityHeaders;

use crate::error::{DiaryServiceError, ValidationError};
use crate::handlers::{required_text, required_uuid};
use crate::state::AppState;
use crate::usecase::comment::{
    CreateCommentInput, CreateCommentUseCase, DeleteCommentUseCase, UpdateCommentInput,
    UpdateCommentUseCase,
};

#[derive(Serialize)]
pub struct CreatedResponse {
    pub id: Uuid,
}

// ── POST /comments ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateCommentRequest {
    pub diet_id: Option<String>,
    pub comment: Option<String>,
}

impl CreateCommentRequest {
    pub fn validate(self) -> Result<CreateCommentInput, DiaryServiceError> {
        let mut errors = ValidationError::default();
        let diet_id = required_uuid(self.diet_id.as_deref(), "diet_id", &mut errors);
        let content = required_text(self.comment, "comment", &mut errors);
        match (diet_id, content) {
            (Some(diet_id), Some(content)) => Ok(CreateCommentInput { diet_id, content }),
            _ => Err(DiaryServiceError::InvalidRequest(errors)),
        }
    }
}

pub async fn create_comment(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), DiaryServiceError> {
    let input = body.validate()?;
    let usecase = CreateCommentUseCase {
        diets: state.diet_repo(),
        comments: state.comment_repo(),
        contracts: state.pt_contract_repo(),
        notifier: state.notification_service(),
    };
    let id = usecase.execute(identity.into(), input).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

// ── PATCH /comments ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateCommentRequest {
    pub id: Option<String>,
    pub comment: Option<String>,
}

impl UpdateCommentRequest {
    pub fn validate(self) -> Result<UpdateCommentInput, DiaryServiceError> {
        let mut errors = ValidationError::default();
        let id = required_uuid(self.id.as_deref(), "id", &mut errors);
        let content = required_text(self.comment, "comment", &mut errors);
        match (id, content) {
            (Some(id), Some(content)) => Ok(UpdateCommentInput { id, content }),
            _ => Err(DiaryServiceError::InvalidRequest(errors)),
        }
    }
}

pub async fn update_comment(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<UpdateCommentRequest>,
) -> Result<StatusCode, DiaryServiceError> {
    let input = body.validate()?;
    let usecase = UpdateCommentUseCase {
        repo: state.comment_repo(),
    };
    usecase.execute(identity.into(), input).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── DELETE /comments/{id} ────────────────────────────────────────────────────

pub async fn delete_comment(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, DiaryServiceError> {
    let usecase = DeleteCommentUseCase {
        repo: state.comment_repo(),
    };
    usecase.execute(identity.into(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
