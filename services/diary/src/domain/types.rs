use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use ptdiary_domain::user::UserRole;

/// Authenticated caller of a use case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: Uuid,
    pub role: UserRole,
}

impl Actor {
    pub fn trainer(user_id: Uuid) -> Self {
        Self {
            user_id,
            role: UserRole::Trainer,
        }
    }

    pub fn trainee(user_id: Uuid) -> Self {
        Self {
            user_id,
            role: UserRole::Trainee,
        }
    }
}

/// Device push token. At most one per user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushToken {
    pub user_id: Uuid,
    pub token: String,
    pub updated_at: DateTime<Utc>,
}

/// A trainee's diet log entry.
#[derive(Debug, Clone)]
pub struct Diet {
    pub id: Uuid,
    pub trainee_id: Uuid,
    pub content: String,
    pub image_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A trainer's comment on a diet entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: Uuid,
    pub diet_id: Uuid,
    pub trainer_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Trainer–trainee relationship with the sessions left on it.
#[derive(Debug, Clone)]
pub struct PtContract {
    pub id: Uuid,
    pub trainer_id: Uuid,
    pub trainee_id: Uuid,
    pub remaining_sessions: u32,
    pub updated_at: NaiveDate,
}

/// One push to deliver: the recipient's device token and the rendered message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushJob {
    pub token: String,
    pub message: String,
}

/// Image file uploaded with a diet entry.
#[derive(Debug, Clone)]
pub struct DietImageUpload {
    pub file_name: String,
    pub bytes: bytes::Bytes,
}

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// 10 MiB.
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Lower-cased extension of an accepted image file name, or `None`.
pub fn image_extension(file_name: &str) -> Option<String> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() {
        return None;
    }
    let ext = ext.to_ascii_lowercase();
    IMAGE_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}
