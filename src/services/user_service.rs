use crate::error::{Error, Result};
use crate::models::user::{NewUser, Role, User};
use crate::storage::Storage;
use crate::utils::crypto::{hash_password, verify_password};
use std::sync::Arc;

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn Storage>,
}

impl UserService {
    pub fn new(store: Arc<dyn Storage>) -> Self {
        Self { store }
    }

    pub async fn register(
        &self,
        email: String,
        password: &str,
        name: String,
        role: Role,
    ) -> Result<User> {
        if self.store.get_user_by_email(&email).await?.is_some() {
            return Err(Error::BadRequest("Email already exists".to_string()));
        }

        let password_hash = hash_password(password)
            .map_err(|e| Error::Internal(format!("Password hashing failed: {}", e)))?;

        self.store
            .create_user(NewUser {
                email,
                password_hash,
                name,
                role,
            })
            .await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let user = self
            .store
            .get_user_by_email(email)
            .await?
            .ok_or_else(|| Error::Unauthorized("Invalid credentials".to_string()))?;

        let valid = verify_password(password, &user.password_hash)
            .map_err(|e| Error::Internal(format!("Password verification failed: {}", e)))?;
        if !valid {
            return Err(Error::Unauthorized("Invalid credentials".to_string()));
        }

        Ok(user)
    }

    pub async fn get(&self, id: i64) -> Result<Option<User>> {
        self.store.get_user(id).await
    }

    /// Seeds the three demo accounts. Idempotent: a second call finds the
    /// applicant account and leaves everything untouched.
    pub async fn seed_users(&self) -> Result<()> {
        if self
            .store
            .get_user_by_email("applicant@example.com")
            .await?
            .is_some()
        {
            tracing::debug!("users already seeded");
            return Ok(());
        }

        self.register(
            "applicant@example.com".to_string(),
            "password123",
            "John Applicant".to_string(),
            Role::Applicant,
        )
        .await?;
        self.register(
            "admin@example.com".to_string(),
            "password123",
            "Admin User".to_string(),
            Role::Admin,
        )
        .await?;
        self.register(
            "bot@example.com".to_string(),
            "password123",
            "Bot Mimic".to_string(),
            Role::BotMimic,
        )
        .await?;

        tracing::info!("seeded applicant, admin and bot accounts");
        Ok(())
    }
}
