use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::Context as _;
use uuid::Uuid;

use foodgram_domain::image::ImagePayload;

use crate::domain::repository::ImageStore;
use crate::domain::types::ImageFolder;
use crate::error::ApiError;

/// Images on the local filesystem under `root`, served from `base_url`.
#[derive(Clone)]
pub struct LocalImageStore {
    pub root: PathBuf,
    pub base_url: String,
}

impl ImageStore for LocalImageStore {
    async fn save(&self, folder: ImageFolder, image: &ImagePayload) -> Result<String, ApiError> {
        let dir = self.root.join(folder.as_str());
        tokio::fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("create image folder {}", dir.display()))?;

        let file_name = format!("{}.{}", Uuid::new_v4(), image.format.extension());
        tokio::fs::write(dir.join(&file_name), &image.bytes)
            .await
            .with_context(|| format!("write image {file_name}"))?;
        Ok(format!("{}/{file_name}", folder.as_str()))
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        match tokio::fs::remove_file(self.root.join(path)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(anyhow::Error::new(e)
                .context(format!("delete image {path}"))
                .into()),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}
