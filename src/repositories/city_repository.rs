use async_trait::async_trait;
use sqlx::PgPool;

use super::memory::MemoryStore;
use crate::error::Result;
use crate::models::city::City;

#[async_trait]
pub trait CityRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<City>>;
    async fn find_by_id(&self, id: i32) -> Result<Option<City>>;
}

#[derive(Clone)]
pub struct PgCityRepository {
    pool: PgPool,
}

impl PgCityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CityRepository for PgCityRepository {
    async fn find_all(&self) -> Result<Vec<City>> {
        let cities = sqlx::query_as::<_, City>("SELECT id, name FROM cities ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(cities)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<City>> {
        let city = sqlx::query_as::<_, City>("SELECT id, name FROM cities WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(city)
    }
}

pub struct MemoryCityRepository {
    store: MemoryStore<City>,
}

impl Default for MemoryCityRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryCityRepository {
    /// Same rows the `cities` migration seeds.
    pub fn new() -> Self {
        let cities = [
            City::new(1, "Moscow"),
            City::new(2, "Saint-Petersburg"),
            City::new(3, "Ekaterinburg"),
            City::new(4, "Forks"),
        ];
        Self {
            store: MemoryStore::with_rows(cities.into_iter().map(|city| (city.id, city))),
        }
    }
}

#[async_trait]
impl CityRepository for MemoryCityRepository {
    async fn find_all(&self) -> Result<Vec<City>> {
        Ok(self.store.all().await)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<City>> {
        Ok(self.store.get(id).await)
    }
}
