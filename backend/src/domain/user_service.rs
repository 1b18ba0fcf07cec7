//! User account service: registration and listings.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;
use zeroize::Zeroizing;

use crate::domain::ports::{
    NewUserRecord, PasswordHashError, PasswordHasher, UserPersistenceError, UserRegistration,
    UserRepository, UsersQuery,
};
use crate::domain::{Error, PasswordHash, Registration, User, UserId};

pub(crate) fn map_user_repository_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateUsername { username } => {
            Error::invalid_request("username must be unique")
                .with_details(json!({ "field": "username", "username": username }))
        }
    }
}

pub(crate) fn map_hash_error(error: PasswordHashError) -> Error {
    Error::internal(error.to_string())
}

/// Run the password hasher off the async worker threads.
pub(crate) async fn hash_password<H>(
    hasher: &Arc<H>,
    password: &str,
) -> Result<PasswordHash, Error>
where
    H: PasswordHasher + 'static,
{
    let hasher = Arc::clone(hasher);
    let password = Zeroizing::new(password.to_owned());
    tokio::task::spawn_blocking(move || hasher.hash(&password))
        .await
        .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))?
        .map_err(map_hash_error)
}

/// Service implementing [`UserRegistration`] and [`UsersQuery`].
#[derive(Clone)]
pub struct UserService<R, H> {
    user_repo: Arc<R>,
    hasher: Arc<H>,
}

impl<R, H> UserService<R, H> {
    pub fn new(user_repo: Arc<R>, hasher: Arc<H>) -> Self {
        Self { user_repo, hasher }
    }
}

#[async_trait]
impl<R, H> UserRegistration for UserService<R, H>
where
    R: UserRepository,
    H: PasswordHasher + 'static,
{
    async fn register(&self, registration: Registration) -> Result<User, Error> {
        let password_hash = hash_password(&self.hasher, registration.password()).await?;
        let record = NewUserRecord {
            id: UserId::random(),
            username: registration.username().clone(),
            name: registration.name().map(str::to_owned),
            password_hash,
        };
        let user = self
            .user_repo
            .insert(&record)
            .await
            .map_err(map_user_repository_error)?;
        info!(user_id = %user.id(), username = %user.username(), "user registered");
        Ok(user)
    }
}

#[async_trait]
impl<R, H> UsersQuery for UserService<R, H>
where
    R: UserRepository,
    H: Send + Sync,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.user_repo
            .list()
            .await
            .map_err(map_user_repository_error)
    }
}
