use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ptdiary_auth_types::identity::IdentityHeaders;
use ptdiary_domain::pagination::PageRequest;

use crate::domain::types::{Comment, Diet, DietImageUpload};
use crate::error::{DiaryServiceError, ValidationError};
use crate::handlers::comment::CreatedResponse;
use crate::handlers::required_text;
use crate::state::AppState;
use crate::usecase::diet::{CreateDietInput, CreateDietUseCase, GetDietUseCase, ListDietsUseCase};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct DietResponse {
    pub id: Uuid,
    pub trainee_id: Uuid,
    pub content: String,
    pub image_path: Option<String>,
    #[serde(serialize_with = "ptdiary_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Diet> for DietResponse {
    fn from(diet: Diet) -> Self {
        Self {
            id: diet.id,
            trainee_id: diet.trainee_id,
            content: diet.content,
            image_path: diet.image_path,
            created_at: diet.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct DietDetailResponse {
    #[serde(flatten)]
    pub diet: DietResponse,
    pub comments: Vec<CommentResponse>,
}

#[derive(Serialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub trainer_id: Uuid,
    pub comment: String,
    #[serde(serialize_with = "ptdiary_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "ptdiary_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            trainer_id: comment.trainer_id,
            comment: comment.content,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

// ── Query params ─────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct DietListQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

// ── POST /diets (multipart) ──────────────────────────────────────────────────

/// Reads the `content` text part and the optional `image` file part.
async fn read_diet_form(mut multipart: Multipart) -> Result<CreateDietInput, DiaryServiceError> {
    let mut content = None;
    let mut image = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::debug!(error = %e, "malformed multipart body");
                let mut errors = ValidationError::default();
                errors.push("content");
                return Err(DiaryServiceError::InvalidRequest(errors));
            }
        };
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("content") => {
                content = Some(field.text().await.map_err(|e| {
                    tracing::debug!(error = %e, "unreadable content part");
                    let mut errors = ValidationError::default();
                    errors.push("content");
                    DiaryServiceError::InvalidRequest(errors)
                })?);
            }
            Some("image") => {
                let file_name = field.file_name().unwrap_or_default().to_owned();
                let bytes = field.bytes().await.map_err(|e| {
                    tracing::debug!(error = %e, "unreadable image part");
                    DiaryServiceError::InvalidImage
                })?;
                // Browsers send an empty, unnamed part when no file was picked.
                if !(file_name.is_empty() && bytes.is_empty()) {
                    image = Some(DietImageUpload { file_name, bytes });
                }
            }
            _ => {}
        }
    }

    let mut errors = ValidationError::default();
    let content = required_text(content, "content", &mut errors)
        .ok_or(DiaryServiceError::InvalidRequest(errors))?;
    Ok(CreateDietInput { content, image })
}

pub async fn create_diet(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<CreatedResponse>), DiaryServiceError> {
    let input = read_diet_form(multipart).await?;
    let usecase = CreateDietUseCase {
        repo: state.diet_repo(),
        images: state.image_store(),
    };
    let id = usecase.execute(identity.into(), input).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

// ── GET /diets/{id} ──────────────────────────────────────────────────────────

pub async fn get_diet(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DietDetailResponse>, DiaryServiceError> {
    let usecase = GetDietUseCase {
        diets: state.diet_repo(),
        comments: state.comment_repo(),
        contracts: state.pt_contract_repo(),
    };
    let (diet, comments) = usecase.execute(identity.into(), id).await?;
    Ok(Json(DietDetailResponse {
        diet: diet.into(),
        comments: comments.into_iter().map(CommentResponse::from).collect(),
    }))
}

// ── GET /users/@me/diets ─────────────────────────────────────────────────────

pub async fn get_my_diets(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Query(query): Query<DietListQuery>,
) -> Result<Json<Vec<DietResponse>>, DiaryServiceError> {
    list_diets(state, identity, identity.user_id, query).await
}

// ── GET /trainees/{trainee_id}/diets ─────────────────────────────────────────

pub async fn get_trainee_diets(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(trainee_id): Path<Uuid>,
    Query(query): Query<DietListQuery>,
) -> Result<Json<Vec<DietResponse>>, DiaryServiceError> {
    list_diets(state, identity, trainee_id, query).await
}

async fn list_diets(
    state: AppState,
    identity: IdentityHeaders,
    trainee_id: Uuid,
    query: DietListQuery,
) -> Result<Json<Vec<DietResponse>>, DiaryServiceError> {
    let usecase = ListDietsUseCase {
        diets: state.diet_repo(),
        contracts: state.pt_contract_repo(),
    };
    let page = PageRequest::from_query(query.per_page, query.page);
    let diets = usecase.execute(identity.into(), trainee_id, page).await?;
    Ok(Json(diets.into_iter().map(DietResponse::from).collect()))
}
