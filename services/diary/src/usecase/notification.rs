use tracing::debug;
use uuid::Uuid;

use ptdiary_domain::notification::NotificationKind;

use crate::domain::repository::{PtContractRepository, PushDispatchPort, PushTokenRepository};
use crate::domain::types::{Actor, PushJob};
use crate::error::DiaryServiceError;

// ── NotificationService ──────────────────────────────────────────────────────

/// Renders a notification and hands it to push delivery.
///
/// Callers invoke [`notify`](Self::notify) only after their own write has
/// succeeded; the push itself runs on the dispatcher's worker.
pub struct NotificationService<T: PushTokenRepository, D: PushDispatchPort> {
    pub tokens: T,
    pub push: D,
}

impl<T: PushTokenRepository, D: PushDispatchPort> NotificationService<T, D> {
    /// Resolve the template for `kind`, then the recipient's token, then enqueue.
    ///
    /// Unknown kinds fail before the token is looked up. A recipient without a
    /// registered token is skipped with `Ok(())`.
    pub async fn notify(&self, recipient_id: Uuid, kind: &str) -> Result<(), DiaryServiceError> {
        let kind = NotificationKind::from_kebab_case(kind)
            .ok_or(DiaryServiceError::UnsupportedNotificationType)?;

        let Some(token) = self.tokens.find_by_user_id(recipient_id).await? else {
            debug!(%recipient_id, kind = kind.as_str(), "no push token, notification skipped");
            return Ok(());
        };

        self.push.dispatch(PushJob {
            token: token.token,
            message: kind.message().to_owned(),
        });
        Ok(())
    }
}

// ── SendNotification (trainer → trainee) ─────────────────────────────────────

pub struct SendNotificationUseCase<P, T, D>
where
    P: PtContractRepository,
    T: PushTokenRepository,
    D: PushDispatchPort,
{
    pub contracts: P,
    pub notifier: NotificationService<T, D>,
}

impl<P, T, D> SendNotificationUseCase<P, T, D>
where
    P: PtContractRepository,
    T: PushTokenRepository,
    D: PushDispatchPort,
{
    pub async fn execute(
        &self,
        actor: Actor,
        trainee_id: Uuid,
        kind: &str,
    ) -> Result<(), DiaryServiceError> {
        if !actor.role.is_trainer() {
            return Err(DiaryServiceError::Forbidden);
        }
        if !self
            .contracts
            .exists_between(actor.user_id, trainee_id)
            .await?
        {
            return Err(DiaryServiceError::Forbidden);
        }
        self.notifier.notify(trainee_id, kind).await
    }
}
