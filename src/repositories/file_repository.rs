use async_trait::async_trait;
use sqlx::PgPool;

use super::memory::MemoryStore;
use crate::error::Result;
use crate::models::file::File;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FileRepository: Send + Sync {
    async fn save(&self, file: File) -> Result<File>;
    async fn find_by_id(&self, id: i32) -> Result<Option<File>>;
    async fn delete_by_id(&self, id: i32) -> Result<bool>;
}

#[derive(Clone)]
pub struct PgFileRepository {
    pool: PgPool,
}

impl PgFileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileRepository for PgFileRepository {
    async fn save(&self, file: File) -> Result<File> {
        let saved = sqlx::query_as::<_, File>(
            "INSERT INTO files (name, path) VALUES ($1, $2) RETURNING id, name, path",
        )
        .bind(&file.name)
        .bind(&file.path)
        .fetch_one(&self.pool)
        .await?;
        Ok(saved)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<File>> {
        let file = sqlx::query_as::<_, File>("SELECT id, name, path FROM files WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(file)
    }

    async fn delete_by_id(&self, id: i32) -> Result<bool> {
        let res = sqlx::query("DELETE FROM files WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}

#[derive(Default)]
pub struct MemoryFileRepository {
    store: MemoryStore<File>,
}

impl MemoryFileRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FileRepository for MemoryFileRepository {
    async fn save(&self, file: File) -> Result<File> {
        Ok(self.store.insert_with(move |id| File { id, ..file }).await)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<File>> {
        Ok(self.store.get(id).await)
    }

    async fn delete_by_id(&self, id: i32) -> Result<bool> {
        Ok(self.store.remove(id).await)
    }
}
