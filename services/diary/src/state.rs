use std::path::PathBuf;

use sea_orm::DatabaseConnection;

use crate::infra::db::{
    DbCommentRepository, DbDietRepository, DbPtContractRepository, DbPushTokenRepository,
};
use crate::infra::push::PushDispatcher;
use crate::infra::storage::LocalImageStore;
use crate::usecase::notification::NotificationService;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub push: PushDispatcher,
    pub upload_dir: PathBuf,
}

impl AppState {
    pub fn push_token_repo(&self) -> DbPushTokenRepository {
        DbPushTokenRepository {
            db: self.db.clone(),
        }
    }

    pub fn diet_repo(&self) -> DbDietRepository {
        DbDietRepository {
            db: self.db.clone(),
        }
    }

    pub fn comment_repo(&self) -> DbCommentRepository {
        DbCommentRepository {
            db: self.db.clone(),
        }
    }

    pub fn pt_contract_repo(&self) -> DbPtContractRepository {
        DbPtContractRepository {
            db: self.db.clone(),
        }
    }

    pub fn image_store(&self) -> LocalImageStore {
        LocalImageStore {
            root: self.upload_dir.clone(),
        }
    }

    pub fn notification_service(
        &self,
    ) -> NotificationService<DbPushTokenRepository, PushDispatcher> {
        NotificationService {
            tokens: self.push_token_repo(),
            push: self.push.clone(),
        }
    }
}
