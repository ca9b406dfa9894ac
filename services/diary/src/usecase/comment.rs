use chrono::Utc;
use tracing::warn;
use uuid::Uuid;

use ptdiary_domain::notification::NotificationKind;

use crate::domain::repository::{
    CommentRepository, DietRepository, PtContractRepository, PushDispatchPort,
    PushTokenRepository,
};
use crate::domain::types::{Actor, Comment};
use crate::error::DiaryServiceError;
use crate::usecase::notification::NotificationService;

// ── CreateComment ────────────────────────────────────────────────────────────

pub struct CreateCommentInput {
    pub diet_id: Uuid,
    pub content: String,
}

pub struct CreateCommentUseCase<D, C, P, T, X>
where
    D: DietRepository,
    C: CommentRepository,
    P: PtContractRepository,
    T: PushTokenRepository,
    X: PushDispatchPort,
{
    pub diets: D,
    pub comments: C,
    pub contracts: P,
    pub notifier: NotificationService<T, X>,
}

impl<D, C, P, T, X> CreateCommentUseCase<D, C, P, T, X>
where
    D: DietRepository,
    C: CommentRepository,
    P: PtContractRepository,
    T: PushTokenRepository,
    X: PushDispatchPort,
{
    /// Store the comment, then notify the diet's trainee.
    ///
    /// The notification runs only once the insert has returned. Failing to
    /// look up the trainee's token is logged; the comment is already saved.
    pub async fn execute(
        &self,
        actor: Actor,
        input: CreateCommentInput,
    ) -> Result<Uuid, DiaryServiceError> {
        if !actor.role.is_trainer() {
            return Err(DiaryServiceError::Forbidden);
        }
        let diet = self
            .diets
            .find_by_id(input.diet_id)
            .await?
            .ok_or(DiaryServiceError::DietNotFound)?;
        if !self
            .contracts
            .exists_between(actor.user_id, diet.trainee_id)
            .await?
        {
            return Err(DiaryServiceError::Forbidden);
        }

        let now = Utc::now();
        let comment = Comment {
            id: Uuid::now_v7(),
            diet_id: diet.id,
            trainer_id: actor.user_id,
            content: input.content,
            created_at: now,
            updated_at: now,
        };
        self.comments.create(&comment).await?;

        match self
            .notifier
            .notify(diet.trainee_id, NotificationKind::DietComment.as_str())
            .await
        {
            Err(DiaryServiceError::Internal(e)) => {
                warn!(error = %e, comment_id = %comment.id, "comment saved, notification skipped");
            }
            other => other?,
        }
        Ok(comment.id)
    }
}

// ── UpdateComment ────────────────────────────────────────────────────────────

pub struct UpdateCommentInput {
    pub id: Uuid,
    pub content: String,
}

pub struct UpdateCommentUseCase<C: CommentRepository> {
    pub repo: C,
}

impl<C: CommentRepository> UpdateCommentUseCase<C> {
    /// Replace the text of an existing comment. Only its author may do so.
    pub async fn execute(
        &self,
        actor: Actor,
        input: UpdateCommentInput,
    ) -> Result<(), DiaryServiceError> {
        let comment = self
            .repo
            .find_by_id(input.id)
            .await?
            .ok_or(DiaryServiceError::CommentNotFound)?;
        if comment.trainer_id != actor.user_id {
            return Err(DiaryServiceError::Forbidden);
        }
        self.repo
            .update_content(comment.id, &input.content, Utc::now())
            .await
    }
}

// ── DeleteComment ────────────────────────────────────────────────────────────

pub struct DeleteCommentUseCase<C: CommentRepository> {
    pub repo: C,
}

impl<C: CommentRepository> DeleteCommentUseCase<C> {
    pub async fn execute(&self, actor: Actor, id: Uuid) -> Result<(), DiaryServiceError> {
        let comment = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(DiaryServiceError::CommentNotFound)?;
        if comment.trainer_id != actor.user_id {
            return Err(DiaryServiceError::Forbidden);
        }
        if !self.repo.delete(comment.id).await? {
            return Err(DiaryServiceError::CommentNotFound);
        }
        Ok(())
    }
}
