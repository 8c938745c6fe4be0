use std::sync::Arc;

use crate::dto::file_dto::FileDto;
use crate::error::Result;
use crate::models::vacancy::Vacancy;
use crate::repositories::vacancy_repository::VacancyRepository;
use crate::services::file_service::FileService;

#[derive(Clone)]
pub struct VacancyService {
    repository: Arc<dyn VacancyRepository>,
    file_service: FileService,
}

impl VacancyService {
    pub fn new(repository: Arc<dyn VacancyRepository>, file_service: FileService) -> Self {
        Self {
            repository,
            file_service,
        }
    }

    pub async fn save(&self, mut vacancy: Vacancy, image: FileDto) -> Result<Vacancy> {
        let file = self.file_service.save(image).await?;
        vacancy.file_id = file.id;
        let saved = match self.repository.save(vacancy).await {
            Ok(saved) => saved,
            Err(e) => {
                self.discard_file(file.id).await;
                return Err(e);
            }
        };
        tracing::info!(vacancy_id = saved.id, file_id = saved.file_id, "vacancy created");
        Ok(saved)
    }

    pub async fn delete_by_id(&self, id: i32) -> Result<bool> {
        let Some(vacancy) = self.repository.find_by_id(id).await? else {
            return Ok(false);
        };
        let deleted = self.repository.delete_by_id(id).await?;
        self.file_service.delete_by_id(vacancy.file_id).await?;
        tracing::info!(vacancy_id = id, file_id = vacancy.file_id, "vacancy deleted");
        Ok(deleted)
    }

    /// Same attachment policy as candidates: keep on empty payload, otherwise
    /// save new, update, then drop the old file.
    pub async fn update(&self, mut vacancy: Vacancy, image: FileDto) -> Result<bool> {
        let Some(existing) = self.repository.find_by_id(vacancy.id).await? else {
            return Ok(false);
        };
        vacancy.creation_date = existing.creation_date;

        if image.is_empty() {
            vacancy.file_id = existing.file_id;
            return self.repository.update(&vacancy).await;
        }

        let old_file_id = existing.file_id;
        let new_file = self.file_service.save(image).await?;
        vacancy.file_id = new_file.id;

        let updated = match self.repository.update(&vacancy).await {
            Ok(updated) => updated,
            Err(e) => {
                self.discard_file(new_file.id).await;
                return Err(e);
            }
        };

        if updated {
            if let Err(e) = self.file_service.delete_by_id(old_file_id).await {
                tracing::warn!(vacancy_id = vacancy.id, file_id = old_file_id, error = %e, "old attachment not removed");
            }
        } else {
            self.discard_file(new_file.id).await;
        }
        Ok(updated)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Vacancy>> {
        self.repository.find_by_id(id).await
    }

    pub async fn find_all(&self) -> Result<Vec<Vacancy>> {
        self.repository.find_all().await
    }

    async fn discard_file(&self, file_id: i32) {
        if let Err(e) = self.file_service.delete_by_id(file_id).await {
            tracing::warn!(file_id, error = %e, "unreferenced attachment not removed");
        }
    }
}
