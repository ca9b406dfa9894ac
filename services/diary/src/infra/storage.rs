use std::path::PathBuf;

use anyhow::Context as _;
use uuid::Uuid;

use crate::domain::repository::DietImageStore;
use crate::error::DiaryServiceError;

/// Stores diet images as `<root>/<diet_id>.<ext>` on the local filesystem.
#[derive(Clone)]
pub struct LocalImageStore {
    pub root: PathBuf,
}

impl DietImageStore for LocalImageStore {
    async fn save(
        &self,
        diet_id: Uuid,
        extension: &str,
        bytes: &[u8],
    ) -> Result<String, DiaryServiceError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .with_context(|| format!("create upload dir {}", self.root.display()))?;
        let path = self.root.join(format!("{diet_id}.{extension}"));
        tokio::fs::write(&path, bytes)
            .await
            .with_context(|| format!("write diet image {}", path.display()))?;
        Ok(path.to_string_lossy().into_owned())
    }

    async fn remove(&self, path: &str) -> Result<(), DiaryServiceError> {
        tokio::fs::remove_file(path)
            .await
            .with_context(|| format!("remove diet image {path}"))?;
        Ok(())
    }
}
