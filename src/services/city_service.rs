use std::sync::Arc;

use crate::error::{Error, Result};
use crate::models::city::City;
use crate::repositories::city_repository::CityRepository;

#[derive(Clone)]
pub struct CityService {
    repository: Arc<dyn CityRepository>,
}

impl CityService {
    pub fn new(repository: Arc<dyn CityRepository>) -> Self {
        Self { repository }
    }

    pub async fn find_all(&self) -> Result<Vec<City>> {
        self.repository.find_all().await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<City>> {
        self.repository.find_by_id(id).await
    }

    /// Resolves a city referenced by a submitted form; an unknown id is a bad request.
    pub async fn require(&self, id: i32) -> Result<City> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| Error::BadRequest(format!("City with id {} does not exist", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::city_repository::MemoryCityRepository;

    fn service() -> CityService {
        CityService::new(Arc::new(MemoryCityRepository::new()))
    }

    #[tokio::test]
    async fn require_returns_seeded_city() {
        assert_eq!(service().require(3).await.unwrap(), City::new(3, "Ekaterinburg"));
    }

    #[tokio::test]
    async fn require_rejects_unknown_city() {
        assert!(matches!(service().require(999).await, Err(Error::BadRequest(_))));
    }
}
