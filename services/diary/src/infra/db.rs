use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    Insert, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, sea_query::OnConflict,
};
use uuid::Uuid;

use ptdiary_diary_schema::{comments, diets, pt_contracts, push_tokens};
use ptdiary_domain::pagination::PageRequest;

use crate::domain::repository::{
    CommentRepository, DietRepository, PtContractRepository, PushTokenRepository,
};
use crate::domain::types::{Comment, Diet, PtContract, PushToken};
use crate::error::DiaryServiceError;

// ── Push token repository ────────────────────────────────────────────────────

/// One row per user; a second registration overwrites the token in place.
fn upsert_statement(token: &PushToken) -> Insert<push_tokens::ActiveModel> {
    let model = push_tokens::ActiveModel {
        user_id: Set(token.user_id),
        token: Set(token.token.clone()),
        updated_at: Set(token.updated_at),
    };
    push_tokens::Entity::insert(model).on_conflict(
        OnConflict::column(push_tokens::Column::UserId)
            .update_columns([push_tokens::Column::Token, push_tokens::Column::UpdatedAt])
            .to_owned(),
    )
}

#[derive(Clone)]
pub struct DbPushTokenRepository {
    pub db: DatabaseConnection,
}

impl PushTokenRepository for DbPushTokenRepository {
    async fn upsert(&self, token: &PushToken) -> Result<(), DiaryServiceError> {
        upsert_statement(token)
            .exec(&self.db)
            .await
            .context("upsert push token")?;
        Ok(())
    }

    async fn find_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Option<PushToken>, DiaryServiceError> {
        let model = push_tokens::Entity::find_by_id(user_id)
            .one(&self.db)
            .await
            .context("find push token by user id")?;
        Ok(model.map(|m| PushToken {
            user_id: m.user_id,
            token: m.token,
            updated_at: m.updated_at,
        }))
    }
}

/// A comment deleted between the ownership check and the update matches no row.
fn comment_update_error(e: DbErr) -> DiaryServiceError {
    match e {
        DbErr::RecordNotUpdated => DiaryServiceError::CommentNotFound,
        e => anyhow::Error::new(e).context("update comment content").into(),
    }
}

// ── Diet repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbDietRepository {
    pub db: DatabaseConnection,
}

impl DietRepository for DbDietRepository {
    async fn create(&self, diet: &Diet) -> Result<(), DiaryServiceError> {
        diets::ActiveModel {
            id: Set(diet.id),
            trainee_id: Set(diet.trainee_id),
            content: Set(diet.content.clone()),
            image_path: Set(diet.image_path.clone()),
            created_at: Set(diet.created_at),
        }
        .insert(&self.db)
        .await
        .context("create diet")?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Diet>, DiaryServiceError> {
        let model = diets::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find diet by id")?;
        Ok(model.map(diet_from_model))
    }

    async fn list_by_trainee(
        &self,
        trainee_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<Diet>, DiaryServiceError> {
        let page = page.clamped();
        let models = diets::Entity::find()
            .filter(diets::Column::TraineeId.eq(trainee_id))
            .order_by_desc(diets::Column::CreatedAt)
            .order_by_desc(diets::Column::Id)
            .paginate(&self.db, u64::from(page.per_page))
            .fetch_page(page.index())
            .await
            .context("list diets by trainee")?;
        Ok(models.into_iter().map(diet_from_model).collect())
    }
}

fn diet_from_model(model: diets::Model) -> Diet {
    Diet {
        id: model.id,
        trainee_id: model.trainee_id,
        content: model.content,
        image_path: model.image_path,
        created_at: model.created_at,
    }
}

// ── Comment repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCommentRepository {
    pub db: DatabaseConnection,
}

impl CommentRepository for DbCommentRepository {
    async fn create(&self, comment: &Comment) -> Result<(), DiaryServiceError> {
        comments::ActiveModel {
            id: Set(comment.id),
            diet_id: Set(comment.diet_id),
            trainer_id: Set(comment.trainer_id),
            content: Set(comment.content.clone()),
            created_at: Set(comment.created_at),
            updated_at: Set(comment.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create comment")?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, DiaryServiceError> {
        let model = comments::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find comment by id")?;
        Ok(model.map(comment_from_model))
    }

    async fn list_by_diet(&self, diet_id: Uuid) -> Result<Vec<Comment>, DiaryServiceError> {
        let models = comments::Entity::find()
            .filter(comments::Column::DietId.eq(diet_id))
            .order_by_asc(comments::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list comments by diet")?;
        Ok(models.into_iter().map(comment_from_model).collect())
    }

    async fn update_content(
        &self,
        id: Uuid,
        content: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<(), DiaryServiceError> {
        comments::ActiveModel {
            id: Set(id),
            content: Set(content.to_owned()),
            updated_at: Set(updated_at),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(comment_update_error)?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DiaryServiceError> {
        let result = comments::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete comment")?;
        Ok(result.rows_affected > 0)
    }
}

fn comment_from_model(model: comments::Model) -> Comment {
    Comment {
        id: model.id,
        diet_id: model.diet_id,
        trainer_id: model.trainer_id,
        content: model.content,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── PT contract repository ───────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbPtContractRepository {
    pub db: DatabaseConnection,
}

impl PtContractRepository for DbPtContractRepository {
    async fn create(&self, contract: &PtContract) -> Result<(), DiaryServiceError> {
        let remaining_sessions =
            i32::try_from(contract.remaining_sessions).context("remaining sessions overflow")?;
        pt_contracts::ActiveModel {
            id: Set(contract.id),
            trainer_id: Set(contract.trainer_id),
            trainee_id: Set(contract.trainee_id),
            remaining_sessions: Set(remaining_sessions),
            updated_at: Set(contract.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create pt contract")?;
        Ok(())
    }

    async fn list_by_trainer(
        &self,
        trainer_id: Uuid,
    ) -> Result<Vec<PtContract>, DiaryServiceError> {
        let models = pt_contracts::Entity::find()
            .filter(pt_contracts::Column::TrainerId.eq(trainer_id))
            .order_by_desc(pt_contracts::Column::UpdatedAt)
            .all(&self.db)
            .await
            .context("list pt contracts by trainer")?;
        Ok(models.into_iter().map(contract_from_model).collect())
    }

    async fn list_by_trainee(
        &self,
        trainee_id: Uuid,
    ) -> Result<Vec<PtContract>, DiaryServiceError> {
        let models = pt_contracts::Entity::find()
            .filter(pt_contracts::Column::TraineeId.eq(trainee_id))
            .order_by_desc(pt_contracts::Column::UpdatedAt)
            .all(&self.db)
            .await
            .context("list pt contracts by trainee")?;
        Ok(models.into_iter().map(contract_from_model).collect())
    }

    async fn exists_between(
        &self,
        trainer_id: Uuid,
        trainee_id: Uuid,
    ) -> Result<bool, DiaryServiceError> {
        let found = pt_contracts::Entity::find()
            .select_only()
            .column(pt_contracts::Column::Id)
            .filter(pt_contracts::Column::TrainerId.eq(trainer_id))
            .filter(pt_contracts::Column::TraineeId.eq(trainee_id))
            .into_tuple::<Uuid>()
            .one(&self.db)
            .await
            .context("check pt contract")?;
        Ok(found.is_some())
    }
}

fn contract_from_model(model: pt_contracts::Model) -> PtContract {
    PtContract {
        id: model.id,
        trainer_id: model.trainer_id,
        trainee_id: model.trainee_id,
        // Column has a `>= 0` check constraint.
        remaining_sessions: model.remaining_sessions.max(0) as u32,
        updated_at: model.updated_at,
    }
}
