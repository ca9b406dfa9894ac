use chrono::Utc;
use uuid::Uuid;

use ptdiary_domain::user::UserRole;

use crate::domain::repository::PtContractRepository;
use crate::domain::types::{Actor, PtContract};
use crate::error::DiaryServiceError;

/// Allow the trainee themself, or a trainer holding a contract with them.
pub(crate) async fn ensure_can_access_trainee<P: PtContractRepository>(
    contracts: &P,
    actor: Actor,
    trainee_id: Uuid,
) -> Result<(), DiaryServiceError> {
    let allowed = match actor.role {
        UserRole::Trainee => actor.user_id == trainee_id,
        UserRole::Trainer => contracts.exists_between(actor.user_id, trainee_id).await?,
    };
    if allowed {
        Ok(())
    } else {
        Err(DiaryServiceError::Forbidden)
    }
}

// ── ListPtContracts ──────────────────────────────────────────────────────────

pub struct ListPtContractsUseCase<P: PtContractRepository> {
    pub repo: P,
}

impl<P: PtContractRepository> ListPtContractsUseCase<P> {
    /// Contracts where the caller is the trainer or the trainee, by role.
    pub async fn execute(&self, actor: Actor) -> Result<Vec<PtContract>, DiaryServiceError> {
        match actor.role {
            UserRole::Trainer => self.repo.list_by_trainer(actor.user_id).await,
            UserRole::Trainee => self.repo.list_by_trainee(actor.user_id).await,
        }
    }
}

// ── CreatePtContract ─────────────────────────────────────────────────────────

pub struct CreatePtContractInput {
    pub trainee_id: Uuid,
    pub remaining_sessions: u32,
}

pub struct CreatePtContractUseCase<P: PtContractRepository> {
    pub repo: P,
}

impl<P: PtContractRepository> CreatePtContractUseCase<P> {
    pub async fn execute(
        &self,
        actor: Actor,
        input: CreatePtContractInput,
    ) -> Result<Uuid, DiaryServiceError> {
        if !actor.role.is_trainer() || actor.user_id == input.trainee_id {
            return Err(DiaryServiceError::Forbidden);
        }
        let contract = PtContract {
            id: Uuid::now_v7(),
            trainer_id: actor.user_id,
            trainee_id: input.trainee_id,
            remaining_sessions: input.remaining_sessions,
            updated_at: Utc::now().date_naive(),
        };
        self.repo.create(&contract).await?;
        Ok(contract.id)
    }
}
