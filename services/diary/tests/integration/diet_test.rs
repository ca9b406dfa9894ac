use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};
use uuid::Uuid;

use ptdiary_diary::domain::repository::{DietImageStore, DietRepository};
use ptdiary_diary::domain::types::{Actor, Diet, DietImageUpload, MAX_IMAGE_BYTES};
use ptdiary_diary::error::DiaryServiceError;
use ptdiary_diary::infra::storage::LocalImageStore;
use ptdiary_diary::usecase::diet::{
    CreateDietInput, CreateDietUseCase, GetDietUseCase, ListDietsUseCase,
};
use ptdiary_domain::pagination::PageRequest;

use crate::helpers::{MockCommentRepo, MockDietRepo, MockPtContractRepo, test_comment, test_diet};

#[derive(Clone, Default)]
struct MockImageStore {
    saved: Arc<Mutex<Vec<(Uuid, String, usize)>>>,
}

impl DietImageStore for MockImageStore {
    async fn save(
        &self,
        diet_id: Uuid,
        extension: &str,
        bytes: &[u8],
    ) -> Result<String, DiaryServiceError> {
        self.saved
            .lock()
            .unwrap()
            .push((diet_id, extension.to_owned(), bytes.len()));
        Ok(format!("mem/{diet_id}.{extension}"))
    }

    async fn remove(&self, path: &str) -> Result<(), DiaryServiceError> {
        self.saved
            .lock()
            .unwrap()
            .retain(|(id, ext, _)| format!("mem/{id}.{ext}") != path);
        Ok(())
    }
}

/// Rejects every insert.
struct FailingDietRepo;

impl DietRepository for FailingDietRepo {
    async fn create(&self, _diet: &Diet) -> Result<(), DiaryServiceError> {
        Err(anyhow::anyhow!("insert failed").into())
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<Diet>, DiaryServiceError> {
        Ok(None)
    }

    async fn list_by_trainee(
        &self,
        _trainee_id: Uuid,
        _page: PageRequest,
    ) -> Result<Vec<Diet>, DiaryServiceError> {
        Ok(Vec::new())
    }
}

fn upload(file_name: &str, len: usize) -> Option<DietImageUpload> {
    Some(DietImageUpload {
        file_name: file_name.to_owned(),
        bytes: vec![0xAB; len].into(),
    })
}

// ── CreateDietUseCase ────────────────────────────────────────────────────────

#[tokio::test]
async fn trainee_should_create_diet_with_image() {
    let diets = MockDietRepo::default();
    let images = MockImageStore::default();
    let usecase = CreateDietUseCase {
        repo: diets.clone(),
        images: images.clone(),
    };
    let trainee = Actor::trainee(Uuid::now_v7());

    let id = usecase
        .execute(
            trainee,
            CreateDietInput {
                content: "chicken salad".to_owned(),
                image: upload("Lunch.PNG", 16),
            },
        )
        .await
        .unwrap();

    let stored = diets.diets.lock().unwrap().clone();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, id);
    assert_eq!(stored[0].trainee_id, trainee.user_id);
    assert_eq!(stored[0].image_path.as_deref(), Some(format!("mem/{id}.png").as_str()));
    assert_eq!(*images.saved.lock().unwrap(), vec![(id, "png".to_owned(), 16)]);
}

#[tokio::test]
async fn should_reject_unsupported_image_without_writing() {
    let diets = MockDietRepo::default();
    let images = MockImageStore::default();
    let usecase = CreateDietUseCase {
        repo: diets.clone(),
        images: images.clone(),
    };

    let rejected = [
        upload("menu.pdf", 10),
        upload("empty.jpg", 0),
        upload("big.jpg", MAX_IMAGE_BYTES + 1),
    ];
    for image in rejected {
        let result = usecase
            .execute(
                Actor::trainee(Uuid::now_v7()),
                CreateDietInput {
                    content: "rice".to_owned(),
                    image,
                },
            )
            .await;
        assert!(
            matches!(result, Err(DiaryServiceError::InvalidImage)),
            "expected InvalidImage, got {result:?}"
        );
    }

    assert!(diets.diets.lock().unwrap().is_empty());
    assert!(images.saved.lock().unwrap().is_empty());
}

#[tokio::test]
async fn failed_insert_should_not_leave_image_on_disk() {
    let root = std::env::temp_dir().join(format!("ptdiary-diet-{}", Uuid::now_v7()));
    let usecase = CreateDietUseCase {
        repo: FailingDietRepo,
        images: LocalImageStore { root: root.clone() },
    };

    let result = usecase
        .execute(
            Actor::trainee(Uuid::now_v7()),
            CreateDietInput {
                content: "toast".to_owned(),
                image: upload("a.png", 8),
            },
        )
        .await;

    assert!(matches!(result, Err(DiaryServiceError::Internal(_))));
    let leftovers = std::fs::read_dir(&root).unwrap().count();
    assert_eq!(leftovers, 0);
    std::fs::remove_dir_all(root).unwrap();
}

#[tokio::test]
async fn trainer_should_not_create_diet() {
    let usecase = CreateDietUseCase {
        repo: MockDietRepo::default(),
        images: MockImageStore::default(),
    };

    let result = usecase
        .execute(
            Actor::trainer(Uuid::now_v7()),
            CreateDietInput {
                content: "rice".to_owned(),
                image: None,
            },
        )
        .await;

    assert!(matches!(result, Err(DiaryServiceError::Forbidden)));
}

// ── GetDietUseCase ───────────────────────────────────────────────────────────

#[tokio::test]
async fn contracted_trainer_should_read_diet_with_comments_oldest_first() {
    let trainer = Actor::trainer(Uuid::now_v7());
    let trainee_id = Uuid::now_v7();
    let diet = test_diet(trainee_id);
    let mut older = test_comment(diet.id, trainer.user_id);
    older.created_at -= Duration::hours(2);
    let newer = test_comment(diet.id, trainer.user_id);
    let usecase = GetDietUseCase {
        diets: MockDietRepo::new(vec![diet.clone()]),
        comments: MockCommentRepo::new(vec![newer.clone(), older.clone()]),
        contracts: MockPtContractRepo::between(trainer.user_id, trainee_id),
    };

    let (found, comments) = usecase.execute(trainer, diet.id).await.unwrap();

    assert_eq!(found.id, diet.id);
    assert_eq!(
        comments.iter().map(|c| c.id).collect::<Vec<_>>(),
        vec![older.id, newer.id]
    );
}

#[tokio::test]
async fn stranger_should_not_read_diet() {
    let diet = test_diet(Uuid::now_v7());
    let usecase = GetDietUseCase {
        diets: MockDietRepo::new(vec![diet.clone()]),
        comments: MockCommentRepo::default(),
        contracts: MockPtContractRepo::default(),
    };

    let as_trainer = usecase.execute(Actor::trainer(Uuid::now_v7()), diet.id).await;
    let as_trainee = usecase.execute(Actor::trainee(Uuid::now_v7()), diet.id).await;

    assert!(matches!(as_trainer, Err(DiaryServiceError::Forbidden)));
    assert!(matches!(as_trainee, Err(DiaryServiceError::Forbidden)));
}

#[tokio::test]
async fn missing_diet_should_be_not_found() {
    let usecase = GetDietUseCase {
        diets: MockDietRepo::default(),
        comments: MockCommentRepo::default(),
        contracts: MockPtContractRepo::default(),
    };

    let result = usecase
        .execute(Actor::trainee(Uuid::now_v7()), Uuid::now_v7())
        .await;

    assert!(matches!(result, Err(DiaryServiceError::DietNotFound)));
}

// ── ListDietsUseCase ─────────────────────────────────────────────────────────

#[tokio::test]
async fn should_list_own_diets_newest_first_with_paging() {
    let trainee = Actor::trainee(Uuid::now_v7());
    let now = Utc::now();
    let diets: Vec<_> = (0..3)
        .map(|i| {
            let mut diet = test_diet(trainee.user_id);
            diet.created_at = now - Duration::days(i);
            diet
        })
        .collect();
    let usecase = ListDietsUseCase {
        diets: MockDietRepo::new(diets.clone()),
        contracts: MockPtContractRepo::default(),
    };

    let first = usecase
        .execute(trainee, trainee.user_id, PageRequest::from_query(Some(2), Some(1)))
        .await
        .unwrap();
    let second = usecase
        .execute(trainee, trainee.user_id, PageRequest::from_query(Some(2), Some(2)))
        .await
        .unwrap();

    assert_eq!(
        first.iter().map(|d| d.id).collect::<Vec<_>>(),
        vec![diets[0].id, diets[1].id]
    );
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].id, diets[2].id);
}

#[tokio::test]
async fn trainer_should_need_contract_to_list_trainee_diets() {
    let trainer = Actor::trainer(Uuid::now_v7());
    let trainee_id = Uuid::now_v7();
    let usecase = ListDietsUseCase {
        diets: MockDietRepo::new(vec![test_diet(trainee_id)]),
        contracts: MockPtContractRepo::default(),
    };

    let result = usecase
        .execute(trainer, trainee_id, PageRequest::default())
        .await;
    assert!(matches!(result, Err(DiaryServiceError::Forbidden)));

    let usecase = ListDietsUseCase {
        diets: usecase.diets,
        contracts: MockPtContractRepo::between(trainer.user_id, trainee_id),
    };
    let diets = usecase
        .execute(trainer, trainee_id, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(diets.len(), 1);
}
