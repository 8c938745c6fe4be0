use std::sync::Arc;

use crate::error::Result;
use crate::models::user::User;
use crate::repositories::user_repository::UserRepository;
use crate::utils::password::{hash_password, verify_password};

#[derive(Clone)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// `user.password` is plain text here and hashed before it is stored.
    /// Returns `None` when the email is already registered.
    pub async fn save(&self, mut user: User) -> Result<Option<User>> {
        user.password = hash_password(&user.password)?;
        let saved = self.repository.save(user).await?;
        if let Some(ref user) = saved {
            tracing::info!(user_id = user.id, "user registered");
        }
        Ok(saved)
    }

    pub async fn find_by_email_and_password(&self, email: &str, password: &str) -> Result<Option<User>> {
        let Some(user) = self.repository.find_by_email(email).await? else {
            return Ok(None);
        };
        if verify_password(password, &user.password)? {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }

    pub async fn find_all(&self) -> Result<Vec<User>> {
        self.repository.find_all().await
    }

    pub async fn delete_by_id(&self, id: i32) -> Result<bool> {
        self.repository.delete_by_id(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::user_repository::MemoryUserRepository;

    fn service() -> UserService {
        UserService::new(Arc::new(MemoryUserRepository::new()))
    }

    #[tokio::test]
    async fn saved_user_can_log_in() {
        let svc = service();
        let saved = svc
            .save(User::new("test@mail.ru", "Consta", "qwerty"))
            .await
            .unwrap()
            .unwrap();
        assert_ne!(saved.password, "qwerty");

        let found = svc
            .find_by_email_and_password("test@mail.ru", "qwerty")
            .await
            .unwrap();
        assert_eq!(found, Some(saved));
    }

    #[tokio::test]
    async fn wrong_password_or_email_finds_nothing() {
        let svc = service();
        svc.save(User::new("test@mail.ru", "Consta", "qwerty")).await.unwrap();
        assert!(svc.find_by_email_and_password("test@mail.ru", "nope").await.unwrap().is_none());
        assert!(svc.find_by_email_and_password("other@mail.ru", "qwerty").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn second_registration_with_same_email_is_none() {
        let svc = service();
        assert!(svc.save(User::new("test", "Consta", "123")).await.unwrap().is_some());
        assert!(svc.save(User::new("test", "Consta", "123")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn deleted_user_cannot_log_in() {
        let svc = service();
        let saved = svc
            .save(User::new("test@mail.ru", "Consta", "qwerty"))
            .await
            .unwrap()
            .unwrap();
        assert!(svc.delete_by_id(saved.id).await.unwrap());
        assert!(svc.find_all().await.unwrap().is_empty());
        assert!(svc
            .find_by_email_and_password("test@mail.ru", "qwerty")
            .await
            .unwrap()
            .is_none());
    }
}
