use async_trait::async_trait;
use sqlx::PgPool;

use super::memory::MemoryStore;
use crate::error::Result;
use crate::models::candidate::Candidate;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CandidateRepository: Send + Sync {
    /// Persists a new candidate and returns it with its assigned id.
    async fn save(&self, candidate: Candidate) -> Result<Candidate>;
    async fn delete_by_id(&self, id: i32) -> Result<bool>;
    /// Returns `false` when no row has `candidate.id`.
    async fn update(&self, candidate: &Candidate) -> Result<bool>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Candidate>>;
    async fn find_all(&self) -> Result<Vec<Candidate>>;
}

#[derive(Clone)]
pub struct PgCandidateRepository {
    pool: PgPool,
}

impl PgCandidateRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CandidateRepository for PgCandidateRepository {
    async fn save(&self, candidate: Candidate) -> Result<Candidate> {
        let saved = sqlx::query_as::<_, Candidate>(
            r#"
            INSERT INTO candidates (name, description, creation_date, city_id, file_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, description, creation_date, city_id, file_id
            "#,
        )
        .bind(&candidate.name)
        .bind(&candidate.description)
        .bind(candidate.creation_date)
        .bind(candidate.city_id)
        .bind(candidate.file_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(saved)
    }

    async fn delete_by_id(&self, id: i32) -> Result<bool> {
        let res = sqlx::query("DELETE FROM candidates WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn update(&self, candidate: &Candidate) -> Result<bool> {
        let res = sqlx::query(
            r#"
            UPDATE candidates
            SET name = $1, description = $2, creation_date = $3, city_id = $4, file_id = $5
            WHERE id = $6
            "#,
        )
        .bind(&candidate.name)
        .bind(&candidate.description)
        .bind(candidate.creation_date)
        .bind(candidate.city_id)
        .bind(candidate.file_id)
        .bind(candidate.id)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Candidate>> {
        let candidate = sqlx::query_as::<_, Candidate>(
            r#"
            SELECT id, name, description, creation_date, city_id, file_id
            FROM candidates
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(candidate)
    }

    async fn find_all(&self) -> Result<Vec<Candidate>> {
        let candidates = sqlx::query_as::<_, Candidate>(
            r#"
            SELECT id, name, description, creation_date, city_id, file_id
            FROM candidates
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(candidates)
    }
}

#[derive(Default)]
pub struct MemoryCandidateRepository {
    store: MemoryStore<Candidate>,
}

impl MemoryCandidateRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CandidateRepository for MemoryCandidateRepository {
    async fn save(&self, candidate: Candidate) -> Result<Candidate> {
        Ok(self
            .store
            .insert_with(move |id| Candidate { id, ..candidate })
            .await)
    }

    async fn delete_by_id(&self, id: i32) -> Result<bool> {
        Ok(self.store.remove(id).await)
    }

    async fn update(&self, candidate: &Candidate) -> Result<bool> {
        Ok(self.store.replace(candidate.id, candidate.clone()).await)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Candidate>> {
        Ok(self.store.get(id).await)
    }

    async fn find_all(&self) -> Result<Vec<Candidate>> {
        Ok(self.store.all().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_then_find_returns_same_candidate() {
        let repo = MemoryCandidateRepository::new();
        let saved = repo.save(Candidate::new("Senior", "descr", 1, 1)).await.unwrap();
        assert!(saved.id > 0);
        let found = repo.find_by_id(saved.id).await.unwrap().unwrap();
        assert_eq!(found, saved);
        assert_eq!(found.name, "Senior");
        assert_eq!(found.file_id, 1);
    }

    #[tokio::test]
    async fn update_unknown_id_changes_nothing() {
        let repo = MemoryCandidateRepository::new();
        let saved = repo.save(Candidate::new("Junior", "d", 1, 1)).await.unwrap();
        let ghost = Candidate {
            id: saved.id + 100,
            ..Candidate::new("Ghost", "", 2, 2)
        };
        assert!(!repo.update(&ghost).await.unwrap());
        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Junior");
    }

    #[tokio::test]
    async fn delete_removes_row() {
        let repo = MemoryCandidateRepository::new();
        let saved = repo.save(Candidate::new("Middle", "d", 1, 1)).await.unwrap();
        assert!(repo.delete_by_id(saved.id).await.unwrap());
        assert!(!repo.delete_by_id(saved.id).await.unwrap());
        assert!(repo.find_by_id(saved.id).await.unwrap().is_none());
    }
}
