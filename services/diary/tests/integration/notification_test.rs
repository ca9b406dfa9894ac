use uuid::Uuid;

use ptdiary_diary::domain::types::{Actor, PushJob};
use ptdiary_diary::error::DiaryServiceError;
use ptdiary_diary::usecase::notification::SendNotificationUseCase;

use crate::helpers::{MockPtContractRepo, MockPushTokenRepo, RecordingDispatch, notifier};

// ── NotificationService::notify ──────────────────────────────────────────────

#[tokio::test]
async fn should_dispatch_rendered_message_to_registered_token() {
    let trainee_id = Uuid::now_v7();
    let tokens = MockPushTokenRepo::with_token(trainee_id, "device-1");
    let push = RecordingDispatch::default();

    notifier(&tokens, &push)
        .notify(trainee_id, "diet-comment")
        .await
        .unwrap();

    assert_eq!(
        push.jobs(),
        vec![PushJob {
            token: "device-1".to_owned(),
            message: "Your trainer left a comment on your diet.".to_owned(),
        }]
    );
}

#[tokio::test]
async fn should_skip_recipient_without_token() {
    let tokens = MockPushTokenRepo::default();
    let push = RecordingDispatch::default();

    notifier(&tokens, &push)
        .notify(Uuid::now_v7(), "diet-reminder")
        .await
        .unwrap();

    assert_eq!(tokens.lookup_count(), 1);
    assert!(push.jobs().is_empty());
}

#[tokio::test]
async fn should_reject_unknown_kind_before_token_lookup() {
    let trainee_id = Uuid::now_v7();
    let tokens = MockPushTokenRepo::with_token(trainee_id, "device-1");
    let push = RecordingDispatch::default();

    let result = notifier(&tokens, &push).notify(trainee_id, "birthday").await;

    assert!(
        matches!(result, Err(DiaryServiceError::UnsupportedNotificationType)),
        "expected UnsupportedNotificationType, got {result:?}"
    );
    assert_eq!(tokens.lookup_count(), 0);
    assert!(push.jobs().is_empty());
}

#[tokio::test]
async fn should_propagate_token_lookup_failure() {
    let tokens = MockPushTokenRepo::failing();
    let push = RecordingDispatch::default();

    let result = notifier(&tokens, &push)
        .notify(Uuid::now_v7(), "diet-comment")
        .await;

    assert!(matches!(result, Err(DiaryServiceError::Internal(_))));
    assert!(push.jobs().is_empty());
}

// ── SendNotificationUseCase ──────────────────────────────────────────────────

#[tokio::test]
async fn contracted_trainer_should_send_reminder() {
    let trainer = Actor::trainer(Uuid::now_v7());
    let trainee_id = Uuid::now_v7();
    let tokens = MockPushTokenRepo::with_token(trainee_id, "device-1");
    let push = RecordingDispatch::default();
    let usecase = SendNotificationUseCase {
        contracts: MockPtContractRepo::between(trainer.user_id, trainee_id),
        notifier: notifier(&tokens, &push),
    };

    usecase
        .execute(trainer, trainee_id, "diet-reminder")
        .await
        .unwrap();

    let jobs = push.jobs();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].message, "Don't forget to log today's diet.");
}

#[tokio::test]
async fn trainer_without_contract_should_be_forbidden() {
    let trainee_id = Uuid::now_v7();
    let tokens = MockPushTokenRepo::with_token(trainee_id, "device-1");
    let push = RecordingDispatch::default();
    let usecase = SendNotificationUseCase {
        contracts: MockPtContractRepo::default(),
        notifier: notifier(&tokens, &push),
    };

    let result = usecase
        .execute(Actor::trainer(Uuid::now_v7()), trainee_id, "diet-reminder")
        .await;

    assert!(matches!(result, Err(DiaryServiceError::Forbidden)));
    assert_eq!(tokens.lookup_count(), 0);
    assert!(push.jobs().is_empty());
}

#[tokio::test]
async fn trainee_should_not_send_notifications() {
    let trainee_id = Uuid::now_v7();
    let tokens = MockPushTokenRepo::default();
    let push = RecordingDispatch::default();
    let usecase = SendNotificationUseCase {
        contracts: MockPtContractRepo::default(),
        notifier: notifier(&tokens, &push),
    };

    let result = usecase
        .execute(Actor::trainee(trainee_id), trainee_id, "diet-reminder")
        .await;

    assert!(matches!(result, Err(DiaryServiceError::Forbidden)));
}
