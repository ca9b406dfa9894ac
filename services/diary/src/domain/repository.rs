#![allow(async_fn_in_trait)]

use uuid::Uuid;

use ptdiary_domain::pagination::PageRequest;

use crate::domain::types::{Comment, Diet, PtContract, PushJob, PushToken};
use crate::error::DiaryServiceError;

/// Device push tokens, one slot per user.
pub trait PushTokenRepository: Send + Sync {
    /// Insert or overwrite the token for `token.user_id`.
    async fn upsert(&self, token: &PushToken) -> Result<(), DiaryServiceError>;

    async fn find_by_user_id(&self, user_id: Uuid)
    -> Result<Option<PushToken>, DiaryServiceError>;
}

/// Repository for diet entries.
pub trait DietRepository: Send + Sync {
    async fn create(&self, diet: &Diet) -> Result<(), DiaryServiceError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Diet>, DiaryServiceError>;

    /// Newest first.
    async fn list_by_trainee(
        &self,
        trainee_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<Diet>, DiaryServiceError>;
}

/// Repository for trainer comments.
pub trait CommentRepository: Send + Sync {
    async fn create(&self, comment: &Comment) -> Result<(), DiaryServiceError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, DiaryServiceError>;

    /// Oldest first.
    async fn list_by_diet(&self, diet_id: Uuid) -> Result<Vec<Comment>, DiaryServiceError>;

    /// Replace the text and `updated_at`; `created_at` is left untouched.
    async fn update_content(
        &self,
        id: Uuid,
        content: &str,
        updated_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<(), DiaryServiceError>;

    /// Returns `true` if a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, DiaryServiceError>;
}

/// Repository for PT contracts.
pub trait PtContractRepository: Send + Sync {
    async fn create(&self, contract: &PtContract) -> Result<(), DiaryServiceError>;

    async fn list_by_trainer(&self, trainer_id: Uuid) -> Result<Vec<PtContract>, DiaryServiceError>;

    async fn list_by_trainee(&self, trainee_id: Uuid) -> Result<Vec<PtContract>, DiaryServiceError>;

    /// Whether any contract links the two users.
    async fn exists_between(
        &self,
        trainer_id: Uuid,
        trainee_id: Uuid,
    ) -> Result<bool, DiaryServiceError>;
}

/// Storage for uploaded diet images.
pub trait DietImageStore: Send + Sync {
    /// Persist the image and return the stored path recorded on the diet.
    async fn save(
        &self,
        diet_id: Uuid,
        extension: &str,
        bytes: &[u8],
    ) -> Result<String, DiaryServiceError>;

    /// Delete an image written by `save`.
    async fn remove(&self, path: &str) -> Result<(), DiaryServiceError>;
}

/// Hands a push job to background delivery. Never blocks and never fails the caller.
pub trait PushDispatchPort: Send + Sync {
    fn dispatch(&self, job: PushJob);
}
