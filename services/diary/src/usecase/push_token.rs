use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::PushTokenRepository;
use crate::domain::types::PushToken;
use crate::error::{DiaryServiceError, ValidationError};

// ── RegisterPushToken ────────────────────────────────────────────────────────

pub struct RegisterPushTokenUseCase<R: PushTokenRepository> {
    pub repo: R,
}

impl<R: PushTokenRepository> RegisterPushTokenUseCase<R> {
    /// Replace the caller's token. Any previously registered token is discarded.
    pub async fn execute(&self, user_id: Uuid, token: String) -> Result<(), DiaryServiceError> {
        let token = token.trim();
        if token.is_empty() {
            let mut v = ValidationError::default();
            v.push("token");
            return Err(DiaryServiceError::InvalidRequest(v));
        }
        self.repo
            .upsert(&PushToken {
                user_id,
                token: token.to_owned(),
                updated_at: Utc::now(),
            })
            .await
    }
}
