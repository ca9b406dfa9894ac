use chrono::Utc;
use tracing::warn;
use uuid::Uuid;

use ptdiary_domain::pagination::PageRequest;

use crate::domain::repository::{
    CommentRepository, DietImageStore, DietRepository, PtContractRepository,
};
use crate::domain::types::{
    Actor, Comment, Diet, DietImageUpload, MAX_IMAGE_BYTES, image_extension,
};
use crate::error::DiaryServiceError;
use crate::usecase::pt_contract::ensure_can_access_trainee;

// ── CreateDiet ───────────────────────────────────────────────────────────────

pub struct CreateDietInput {
    pub content: String,
    pub image: Option<DietImageUpload>,
}

pub struct CreateDietUseCase<R: DietRepository, S: DietImageStore> {
    pub repo: R,
    pub images: S,
}

impl<R: DietRepository, S: DietImageStore> CreateDietUseCase<R, S> {
    pub async fn execute(
        &self,
        actor: Actor,
        input: CreateDietInput,
    ) -> Result<Uuid, DiaryServiceError> {
        if actor.role.is_trainer() {
            return Err(DiaryServiceError::Forbidden);
        }

        // Validate the upload before anything is written.
        let image = match input.image {
            Some(upload) => {
                let ext =
                    image_extension(&upload.file_name).ok_or(DiaryServiceError::InvalidImage)?;
                if upload.bytes.is_empty() || upload.bytes.len() > MAX_IMAGE_BYTES {
                    return Err(DiaryServiceError::InvalidImage);
                }
                Some((ext, upload.bytes))
            }
            None => None,
        };

        let id = Uuid::now_v7();
        let image_path = match image {
            Some((ext, bytes)) => Some(self.images.save(id, &ext, &bytes).await?),
            None => None,
        };

        let diet = Diet {
            id,
            trainee_id: actor.user_id,
            content: input.content,
            image_path,
            created_at: Utc::now(),
        };
        if let Err(e) = self.repo.create(&diet).await {
            // The row never landed, so the image would be unreachable.
            if let Some(path) = &diet.image_path {
                if let Err(cleanup) = self.images.remove(path).await {
                    warn!(%id, path = %path, error = %cleanup, "orphaned diet image left behind");
                }
            }
            return Err(e);
        }
        Ok(id)
    }
}

// ── GetDiet ──────────────────────────────────────────────────────────────────

pub struct GetDietUseCase<D, C, P>
where
    D: DietRepository,
    C: CommentRepository,
    P: PtContractRepository,
{
    pub diets: D,
    pub comments: C,
    pub contracts: P,
}

impl<D, C, P> GetDietUseCase<D, C, P>
where
    D: DietRepository,
    C: CommentRepository,
    P: PtContractRepository,
{
    /// The diet and its comments, oldest comment first.
    pub async fn execute(
        &self,
        actor: Actor,
        diet_id: Uuid,
    ) -> Result<(Diet, Vec<Comment>), DiaryServiceError> {
        let diet = self
            .diets
            .find_by_id(diet_id)
            .await?
            .ok_or(DiaryServiceError::DietNotFound)?;
        ensure_can_access_trainee(&self.contracts, actor, diet.trainee_id).await?;
        let comments = self.comments.list_by_diet(diet.id).await?;
        Ok((diet, comments))
    }
}

// ── ListDiets ────────────────────────────────────────────────────────────────

pub struct ListDietsUseCase<D: DietRepository, P: PtContractRepository> {
    pub diets: D,
    pub contracts: P,
}

impl<D: DietRepository, P: PtContractRepository> ListDietsUseCase<D, P> {
    pub async fn execute(
        &self,
        actor: Actor,
        trainee_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<Diet>, DiaryServiceError> {
        ensure_can_access_trainee(&self.contracts, actor, trainee_id).await?;
        self.diets.list_by_trainee(trainee_id, page.clamped()).await
    }
}
