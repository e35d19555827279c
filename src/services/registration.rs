use color_eyre::Result;

use crate::db::Db;
use crate::models::{NewUser, Role, User};

// ---------------------------------------------------------------------------
// UserRepository trait
// ---------------------------------------------------------------------------

#[cfg_attr(test, mockall::automock)]
pub trait UserRepository: Send + Sync {
    fn upsert_user(
        &self,
        user: &NewUser,
    ) -> impl std::future::Future<Output = Result<User>> + Send;
}

impl UserRepository for Db {
    fn upsert_user(
        &self,
        user: &NewUser,
    ) -> impl std::future::Future<Output = Result<User>> + Send {
        Db::upsert_user(self, user)
    }
}

pub enum RegisterOutcome {
    /// User stored; carries the id to continue with.
    Registered(User),
    MissingName,
    MissingBirthdate,
    /// No role, or a value outside the known roles.
    MissingRole,
}

pub struct RegistrationService<R: UserRepository = Db> {
    repo: R,
}

impl<R: UserRepository + Clone> Clone for RegistrationService<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

impl<R: UserRepository> RegistrationService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn register(
        &self,
        full_name: &str,
        birthdate: &str,
        role: &str,
    ) -> Result<RegisterOutcome> {
        let Some(role) = Role::parse(role.trim()) else {
            return Ok(RegisterOutcome::MissingRole);
        };

        let full_name = full_name.trim();
        if full_name.is_empty() {
            return Ok(RegisterOutcome::MissingName);
        }

        let birthdate = birthdate.trim();
        if birthdate.is_empty() {
            return Ok(RegisterOutcome::MissingBirthdate);
        }

        let user = self
            .repo
            .upsert_user(&NewUser {
                full_name: full_name.to_string(),
                birthdate: birthdate.to_string(),
                role,
            })
            .await?;

        Ok(RegisterOutcome::Registered(user))
    }
}
