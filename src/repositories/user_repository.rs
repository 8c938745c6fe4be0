use async_trait::async_trait;
use sqlx::PgPool;

use super::memory::MemoryStore;
use crate::error::Result;
use crate::models::user::User;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// `None` when a user with the same email already exists.
    async fn save(&self, user: User) -> Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn find_all(&self) -> Result<Vec<User>>;
    async fn delete_by_id(&self, id: i32) -> Result<bool>;
}

#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn save(&self, user: User) -> Result<Option<User>> {
        let inserted = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, name, password)
            VALUES ($1, $2, $3)
            RETURNING id, email, name, password
            "#,
        )
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.password)
        .fetch_one(&self.pool)
        .await;

        match inserted {
            Ok(user) => Ok(Some(user)),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                tracing::warn!(email = %user.email, "user with this email already exists");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, name, password FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_all(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>("SELECT id, email, name, password FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    async fn delete_by_id(&self, id: i32) -> Result<bool> {
        let res = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}

#[derive(Default)]
pub struct MemoryUserRepository {
    store: MemoryStore<User>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn save(&self, user: User) -> Result<Option<User>> {
        let email = user.email.clone();
        Ok(self
            .store
            .insert_unique(move |existing| existing.email == email, move |id| User { id, ..user })
            .await)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.store.find(|user| user.email == email).await)
    }

    async fn find_all(&self) -> Result<Vec<User>> {
        Ok(self.store.all().await)
    }

    async fn delete_by_id(&self, id: i32) -> Result<bool> {
        Ok(self.store.remove(id).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let repo = MemoryUserRepository::new();
        let first = repo.save(User::new("test@mail.ru", "Consta", "h")).await.unwrap();
        assert!(first.is_some());
        let second = repo.save(User::new("test@mail.ru", "Other", "h")).await.unwrap();
        assert!(second.is_none());
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn find_by_email_after_delete_is_empty() {
        let repo = MemoryUserRepository::new();
        let saved = repo
            .save(User::new("te@mail.ru", "Cons", "h"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(repo.find_by_email("te@mail.ru").await.unwrap(), Some(saved.clone()));
        assert!(repo.delete_by_id(saved.id).await.unwrap());
        assert!(repo.find_by_email("te@mail.ru").await.unwrap().is_none());
    }
}
