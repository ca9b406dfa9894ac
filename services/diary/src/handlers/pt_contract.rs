use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ptdiary_auth_types::identity::IdentityHeaders;

use crate::domain::types::PtContract;
use crate::error::{DiaryServiceError, ValidationError};
use crate::handlers::comment::CreatedResponse;
use crate::handlers::required_uuid;
use crate::state::AppState;
use crate::usecase::pt_contract::{
    CreatePtContractInput, CreatePtContractUseCase, ListPtContractsUseCase,
};

#[derive(Serialize)]
pub struct PtContractResponse {
    pub id: Uuid,
    pub trainer_id: Uuid,
    pub trainee_id: Uuid,
    pub remaining_sessions: u32,
    /// `YYYY-MM-DD`.
    pub updated_at: chrono::NaiveDate,
}

impl From<PtContract> for PtContractResponse {
    fn from(contract: PtContract) -> Self {
        Self {
            id: contract.id,
            trainer_id: contract.trainer_id,
            trainee_id: contract.trainee_id,
            remaining_sessions: contract.remaining_sessions,
            updated_at: contract.updated_at,
        }
    }
}

// ── GET /users/@me/pt-contracts ──────────────────────────────────────────────

pub async fn get_my_pt_contracts(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<Vec<PtContractResponse>>, DiaryServiceError> {
    let usecase = ListPtContractsUseCase {
        repo: state.pt_contract_repo(),
    };
    let contracts = usecase.execute(identity.into()).await?;
    Ok(Json(
        contracts.into_iter().map(PtContractResponse::from).collect(),
    ))
}

// ── POST /pt-contracts ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreatePtContractRequest {
    pub trainee_id: Option<String>,
    pub remaining_sessions: Option<i64>,
}

impl CreatePtContractRequest {
    pub fn validate(self) -> Result<CreatePtContractInput, DiaryServiceError> {
        let mut errors = ValidationError::default();
        let trainee_id = required_uuid(self.trainee_id.as_deref(), "trainee_id", &mut errors);
        // Stored as a non-negative INTEGER.
        let remaining_sessions = self
            .remaining_sessions
            .filter(|n| (0..=i64::from(i32::MAX)).contains(n))
            .and_then(|n| u32::try_from(n).ok());
        if remaining_sessions.is_none() {
            errors.push("remaining_sessions");
        }
        match (trainee_id, remaining_sessions) {
            (Some(trainee_id), Some(remaining_sessions)) => Ok(CreatePtContractInput {
                trainee_id,
                remaining_sessions,
            }),
            _ => Err(DiaryServiceError::InvalidRequest(errors)),
        }
    }
}

pub async fn create_pt_contract(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<CreatePtContractRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), DiaryServiceError> {
    let input = body.validate()?;
    let usecase = CreatePtContractUseCase {
        repo: state.pt_contract_repo(),
    };
    let id = usecase.execute(identity.into(), input).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}
