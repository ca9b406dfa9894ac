use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};
use uuid::Uuid;

use ptdiary_diary::domain::repository::{
    CommentRepository, DietRepository, PtContractRepository, PushDispatchPort,
    PushTokenRepository,
};
use ptdiary_diary::domain::types::{Comment, Diet, PtContract, PushJob, PushToken};
use ptdiary_diary::error::DiaryServiceError;
use ptdiary_diary::usecase::notification::NotificationService;
use ptdiary_domain::pagination::PageRequest;

// ── MockPushTokenRepo ────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockPushTokenRepo {
    pub tokens: Arc<Mutex<Vec<PushToken>>>,
    pub lookups: Arc<AtomicUsize>,
    /// When set, every lookup fails with an internal error.
    pub fail_lookups: bool,
}

impl MockPushTokenRepo {
    pub fn with_token(user_id: Uuid, token: &str) -> Self {
        let repo = Self::default();
        repo.tokens.lock().unwrap().push(PushToken {
            user_id,
            token: token.to_owned(),
            updated_at: Utc::now(),
        });
        repo
    }

    pub fn failing() -> Self {
        Self {
            fail_lookups: true,
            ..Self::default()
        }
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl PushTokenRepository for MockPushTokenRepo {
    async fn upsert(&self, token: &PushToken) -> Result<(), DiaryServiceError> {
        let mut tokens = self.tokens.lock().unwrap();
        tokens.retain(|t| t.user_id != token.user_id);
        tokens.push(token.clone());
        Ok(())
    }

    async fn find_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Option<PushToken>, DiaryServiceError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.fail_lookups {
            return Err(anyhow::anyhow!("token store unavailable").into());
        }
        Ok(self
            .tokens
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.user_id == user_id)
            .cloned())
    }
}

// ── RecordingDispatch ────────────────────────────────────────────────────────

/// Captures dispatched jobs instead of delivering them.
#[derive(Clone, Default)]
pub struct RecordingDispatch {
    pub jobs: Arc<Mutex<Vec<PushJob>>>,
}

impl RecordingDispatch {
    pub fn jobs(&self) -> Vec<PushJob> {
        self.jobs.lock().unwrap().clone()
    }
}

impl PushDispatchPort for RecordingDispatch {
    fn dispatch(&self, job: PushJob) {
        self.jobs.lock().unwrap().push(job);
    }
}

pub fn notifier(
    tokens: &MockPushTokenRepo,
    push: &RecordingDispatch,
) -> NotificationService<MockPushTokenRepo, RecordingDispatch> {
    NotificationService {
        tokens: tokens.clone(),
        push: push.clone(),
    }
}

// ── MockDietRepo ─────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockDietRepo {
    pub diets: Arc<Mutex<Vec<Diet>>>,
}

impl MockDietRepo {
    pub fn new(diets: Vec<Diet>) -> Self {
        Self {
            diets: Arc::new(Mutex::new(diets)),
        }
    }
}

impl DietRepository for MockDietRepo {
    async fn create(&self, diet: &Diet) -> Result<(), DiaryServiceError> {
        self.diets.lock().unwrap().push(diet.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Diet>, DiaryServiceError> {
        Ok(self.diets.lock().unwrap().iter().find(|d| d.id == id).cloned())
    }

    async fn list_by_trainee(
        &self,
        trainee_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<Diet>, DiaryServiceError> {
        let mut diets: Vec<Diet> = self
            .diets
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.trainee_id == trainee_id)
            .cloned()
            .collect();
        diets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(diets
            .into_iter()
            .skip((page.index() * u64::from(page.per_page)) as usize)
            .take(page.per_page as usize)
            .collect())
    }
}

// ── MockCommentRepo ──────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockCommentRepo {
    pub comments: Arc<Mutex<Vec<Comment>>>,
    pub writes: Arc<AtomicUsize>,
}

impl MockCommentRepo {
    pub fn new(comments: Vec<Comment>) -> Self {
        Self {
            comments: Arc::new(Mutex::new(comments)),
            writes: Arc::default(),
        }
    }

    pub fn snapshot(&self) -> Vec<Comment> {
        self.comments.lock().unwrap().clone()
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl CommentRepository for MockCommentRepo {
    async fn create(&self, comment: &Comment) -> Result<(), DiaryServiceError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.comments.lock().unwrap().push(comment.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, DiaryServiceError> {
        Ok(self
            .comments
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn list_by_diet(&self, diet_id: Uuid) -> Result<Vec<Comment>, DiaryServiceError> {
        let mut comments: Vec<Comment> = self
            .comments
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.diet_id == diet_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(comments)
    }

    async fn update_content(
        &self,
        id: Uuid,
        content: &str,
        updated_at: chrono::DateTime<Utc>,
    ) -> Result<(), DiaryServiceError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut comments = self.comments.lock().unwrap();
        if let Some(c) = comments.iter_mut().find(|c| c.id == id) {
            c.content = content.to_owned();
            c.updated_at = updated_at;
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DiaryServiceError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut comments = self.comments.lock().unwrap();
        let before = comments.len();
        comments.retain(|c| c.id != id);
        Ok(comments.len() < before)
    }
}

// ── MockPtContractRepo ───────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockPtContractRepo {
    pub contracts: Arc<Mutex<Vec<PtContract>>>,
}

impl MockPtContractRepo {
    pub fn between(trainer_id: Uuid, trainee_id: Uuid) -> Self {
        let repo = Self::default();
        repo.contracts.lock().unwrap().push(test_contract(trainer_id, trainee_id));
        repo
    }
}

impl PtContractRepository for MockPtContractRepo {
    async fn create(&self, contract: &PtContract) -> Result<(), DiaryServiceError> {
        self.contracts.lock().unwrap().push(contract.clone());
        Ok(())
    }

    async fn list_by_trainer(
        &self,
        trainer_id: Uuid,
    ) -> Result<Vec<PtContract>, DiaryServiceError> {
        Ok(self
            .contracts
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.trainer_id == trainer_id)
            .cloned()
            .collect())
    }

    async fn list_by_trainee(
        &self,
        trainee_id: Uuid,
    ) -> Result<Vec<PtContract>, DiaryServiceError> {
        Ok(self
            .contracts
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.trainee_id == trainee_id)
            .cloned()
            .collect())
    }

    async fn exists_between(
        &self,
        trainer_id: Uuid,
        trainee_id: Uuid,
    ) -> Result<bool, DiaryServiceError> {
        Ok(self
            .contracts
            .lock()
            .unwrap()
            .iter()
            .any(|c| c.trainer_id == trainer_id && c.trainee_id == trainee_id))
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn test_diet(trainee_id: Uuid) -> Diet {
    Diet {
        id: Uuid::now_v7(),
        trainee_id,
        content: "oatmeal, two eggs".to_owned(),
        image_path: None,
        created_at: Utc::now(),
    }
}

pub fn test_comment(diet_id: Uuid, trainer_id: Uuid) -> Comment {
    let created_at = Utc::now() - Duration::hours(1);
    Comment {
        id: Uuid::now_v7(),
        diet_id,
        trainer_id,
        content: "less sugar please".to_owned(),
        created_at,
        updated_at: created_at,
    }
}

pub fn test_contract(trainer_id: Uuid, trainee_id: Uuid) -> PtContract {
    PtContract {
        id: Uuid::now_v7(),
        trainer_id,
        trainee_id,
        remaining_sessions: 8,
        updated_at: Utc::now().date_naive(),
    }
}
