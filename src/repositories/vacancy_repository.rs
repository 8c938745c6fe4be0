use async_trait::async_trait;
use sqlx::PgPool;

use super::memory::MemoryStore;
use crate::error::Result;
use crate::models::vacancy::Vacancy;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VacancyRepository: Send + Sync {
    async fn save(&self, vacancy: Vacancy) -> Result<Vacancy>;
    async fn delete_by_id(&self, id: i32) -> Result<bool>;
    async fn update(&self, vacancy: &Vacancy) -> Result<bool>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Vacancy>>;
    async fn find_all(&self) -> Result<Vec<Vacancy>>;
}

#[derive(Clone)]
pub struct PgVacancyRepository {
    pool: PgPool,
}

impl PgVacancyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VacancyRepository for PgVacancyRepository {
    async fn save(&self, vacancy: Vacancy) -> Result<Vacancy> {
        let saved = sqlx::query_as::<_, Vacancy>(
            r#"
            INSERT INTO vacancies (title, description, creation_date, visible, city_id, file_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, title, description, creation_date, visible, city_id, file_id
            "#,
        )
        .bind(&vacancy.title)
        .bind(&vacancy.description)
        .bind(vacancy.creation_date)
        .bind(vacancy.visible)
        .bind(vacancy.city_id)
        .bind(vacancy.file_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(saved)
    }

    async fn delete_by_id(&self, id: i32) -> Result<bool> {
        let res = sqlx::query("DELETE FROM vacancies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn update(&self, vacancy: &Vacancy) -> Result<bool> {
        let res = sqlx::query(
            r#"
            UPDATE vacancies
            SET title = $1, description = $2, creation_date = $3, visible = $4,
                city_id = $5, file_id = $6
            WHERE id = $7
            "#,
        )
        .bind(&vacancy.title)
        .bind(&vacancy.description)
        .bind(vacancy.creation_date)
        .bind(vacancy.visible)
        .bind(vacancy.city_id)
        .bind(vacancy.file_id)
        .bind(vacancy.id)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Vacancy>> {
        let vacancy = sqlx::query_as::<_, Vacancy>(
            r#"
            SELECT id, title, description, creation_date, visible, city_id, file_id
            FROM vacancies
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(vacancy)
    }

    async fn find_all(&self) -> Result<Vec<Vacancy>> {
        let vacancies = sqlx::query_as::<_, Vacancy>(
            r#"
            SELECT id, title, description, creation_date, visible, city_id, file_id
            FROM vacancies
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(vacancies)
    }
}

#[derive(Default)]
pub struct MemoryVacancyRepository {
    store: MemoryStore<Vacancy>,
}

impl MemoryVacancyRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VacancyRepository for MemoryVacancyRepository {
    async fn save(&self, vacancy: Vacancy) -> Result<Vacancy> {
        Ok(self.store.insert_with(move |id| Vacancy { id, ..vacancy }).await)
    }

    async fn delete_by_id(&self, id: i32) -> Result<bool> {
        Ok(self.store.remove(id).await)
    }

    async fn update(&self, vacancy: &Vacancy) -> Result<bool> {
        Ok(self.store.replace(vacancy.id, vacancy.clone()).await)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Vacancy>> {
        Ok(self.store.get(id).await)
    }

    async fn find_all(&self) -> Result<Vec<Vacancy>> {
        Ok(self.store.all().await)
    }
}
