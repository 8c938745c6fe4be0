use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::fs;
use uuid::Uuid;

use crate::dto::file_dto::FileDto;
use crate::error::Result;
use crate::models::file::File;
use crate::repositories::file_repository::FileRepository;

/// Stores attachment bytes under a directory and tracks them through [`FileRepository`].
#[derive(Clone)]
pub struct FileService {
    repository: Arc<dyn FileRepository>,
    storage_directory: PathBuf,
}

impl FileService {
    /// Creates `storage_directory` if it does not exist yet.
    pub fn new(repository: Arc<dyn FileRepository>, storage_directory: impl Into<PathBuf>) -> Result<Self> {
        let storage_directory = storage_directory.into();
        std::fs::create_dir_all(&storage_directory)?;
        Ok(Self {
            repository,
            storage_directory,
        })
    }

    pub fn storage_directory(&self) -> &Path {
        &self.storage_directory
    }

    pub async fn save(&self, file: FileDto) -> Result<File> {
        let path = self.new_file_path(&file.name);
        fs::write(&path, &file.content).await.map_err(|e| {
            tracing::error!(path = %path.display(), error = %e, "failed to write attachment");
            e
        })?;

        let path_str = path.to_string_lossy().into_owned();
        match self.repository.save(File::new(file.name, path_str)).await {
            Ok(saved) => {
                tracing::debug!(file_id = saved.id, path = %saved.path, "attachment stored");
                Ok(saved)
            }
            Err(e) => {
                if let Err(io) = fs::remove_file(&path).await {
                    tracing::warn!(path = %path.display(), error = %io, "could not remove unreferenced attachment");
                }
                Err(e)
            }
        }
    }

    /// `None` when there is no row or the bytes are gone from disk.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<FileDto>> {
        let Some(file) = self.repository.find_by_id(id).await? else {
            return Ok(None);
        };
        match fs::read(&file.path).await {
            Ok(content) => Ok(Some(FileDto::new(file.name, content))),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(file_id = id, path = %file.path, "attachment row has no bytes on disk");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn delete_by_id(&self, id: i32) -> Result<bool> {
        let Some(file) = self.repository.find_by_id(id).await? else {
            return Ok(false);
        };
        match fs::remove_file(&file.path).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        self.repository.delete_by_id(id).await
    }

    fn new_file_path(&self, source_name: &str) -> PathBuf {
        // Only the final component of the client-supplied name is kept.
        let base = Path::new(source_name)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.storage_directory
            .join(format!("{}{}", Uuid::new_v4(), base))
    }
}
