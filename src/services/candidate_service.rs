use std::sync::Arc;

use crate::dto::file_dto::FileDto;
use crate::error::Result;
use crate::models::candidate::Candidate;
use crate::repositories::candidate_repository::CandidateRepository;
use crate::services::file_service::FileService;

#[derive(Clone)]
pub struct CandidateService {
    repository: Arc<dyn CandidateRepository>,
    file_service: FileService,
}

impl CandidateService {
    pub fn new(repository: Arc<dyn CandidateRepository>, file_service: FileService) -> Self {
        Self {
            repository,
            file_service,
        }
    }

    /// Stores the attachment first, then the candidate pointing at it. The
    /// attachment is removed again if the candidate cannot be stored.
    pub async fn save(&self, mut candidate: Candidate, image: FileDto) -> Result<Candidate> {
        let file = self.file_service.save(image).await?;
        candidate.file_id = file.id;
        let saved = match self.repository.save(candidate).await {
            Ok(saved) => saved,
            Err(e) => {
                self.discard_file(file.id).await;
                return Err(e);
            }
        };
        tracing::info!(candidate_id = saved.id, file_id = saved.file_id, "candidate created");
        Ok(saved)
    }

    /// Returns `false` for an unknown id, in which case no attachment is touched.
    pub async fn delete_by_id(&self, id: i32) -> Result<bool> {
        let Some(candidate) = self.repository.find_by_id(id).await? else {
            return Ok(false);
        };
        let deleted = self.repository.delete_by_id(id).await?;
        self.file_service.delete_by_id(candidate.file_id).await?;
        tracing::info!(candidate_id = id, file_id = candidate.file_id, "candidate deleted");
        Ok(deleted)
    }

    /// An empty `image` keeps the stored attachment. Otherwise the new file is
    /// saved before the row is updated, and the old file is removed only after
    /// the update succeeded.
    pub async fn update(&self, mut candidate: Candidate, image: FileDto) -> Result<bool> {
        let Some(existing) = self.repository.find_by_id(candidate.id).await? else {
            return Ok(false);
        };
        candidate.creation_date = existing.creation_date;

        if image.is_empty() {
            candidate.file_id = existing.file_id;
            return self.repository.update(&candidate).await;
        }

        let old_file_id = existing.file_id;
        let new_file = self.file_service.save(image).await?;
        candidate.file_id = new_file.id;

        let updated = match self.repository.update(&candidate).await {
            Ok(updated) => updated,
            Err(e) => {
                self.discard_file(new_file.id).await;
                return Err(e);
            }
        };

        if updated {
            if let Err(e) = self.file_service.delete_by_id(old_file_id).await {
                tracing::warn!(candidate_id = candidate.id, file_id = old_file_id, error = %e, "old attachment not removed");
            }
        } else {
            self.discard_file(new_file.id).await;
        }
        Ok(updated)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Candidate>> {
        self.repository.find_by_id(id).await
    }

    pub async fn find_all(&self) -> Result<Vec<Candidate>> {
        self.repository.find_all().await
    }

    async fn discard_file(&self, file_id: i32) {
        if let Err(e) = self.file_service.delete_by_id(file_id).await {
            tracing::warn!(file_id, error = %e, "unreferenced attachment not removed");
        }
    }
}
