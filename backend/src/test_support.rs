//! Test utilities for the bloglist crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`).
//! Compiled only for tests or with the `test-support` feature.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::TimeDelta;

use crate::domain::ports::{
    BlogRepository, BlogRepositoryError, NewUserRecord, TokenError, UserPersistenceError,
    UserRepository,
};
use crate::domain::{
    AuthService, Blog, BlogChanges, BlogId, BlogService, PasswordHash, StoredCredentials, User,
    UserId, UserService,
};
use crate::inbound::http::state::HttpState;
use crate::outbound::security::{BcryptPasswordHasher, JwtTokenService};

/// Signing secret used by [`http_state`].
pub const TEST_TOKEN_SECRET: &str = "bloglist-test-secret";

/// Lowest bcrypt cost, to keep hashing fast in tests.
pub const TEST_BCRYPT_COST: u32 = 4;

#[derive(Debug, Clone)]
struct StoredUser {
    id: UserId,
    username: crate::domain::Username,
    name: Option<String>,
    password_hash: PasswordHash,
}

/// In-memory store implementing both repository ports.
///
/// Blogs keep insertion order. A user's blog list is derived from the blogs
/// that name them as owner, the same way the Diesel adapter does.
///
/// # Examples
/// ```
/// use bloglist::test_support::InMemoryStore;
///
/// let store = InMemoryStore::default();
/// assert_eq!(store.blog_count(), 0);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    users: Mutex<Vec<StoredUser>>,
    blogs: Mutex<Vec<Blog>>,
}

fn poisoned(what: &str) -> String {
    format!("{what} store lock poisoned")
}

impl InMemoryStore {
    fn blogs(&self) -> Result<MutexGuard<'_, Vec<Blog>>, BlogRepositoryError> {
        self.blogs
            .lock()
            .map_err(|_| BlogRepositoryError::query(poisoned("blog")))
    }

    fn users(&self) -> Result<MutexGuard<'_, Vec<StoredUser>>, UserPersistenceError> {
        self.users
            .lock()
            .map_err(|_| UserPersistenceError::query(poisoned("user")))
    }

    fn owned_blog_ids(&self, owner: &UserId) -> Result<Vec<BlogId>, UserPersistenceError> {
        let blogs = self
            .blogs
            .lock()
            .map_err(|_| UserPersistenceError::query(poisoned("blog")))?;
        Ok(blogs
            .iter()
            .filter(|blog| blog.owner() == Some(owner))
            .map(|blog| *blog.id())
            .collect())
    }

    fn to_user(&self, stored: &StoredUser) -> Result<User, UserPersistenceError> {
        Ok(User::new(
            stored.id,
            stored.username.clone(),
            stored.name.clone(),
            self.owned_blog_ids(&stored.id)?,
        ))
    }

    /// Number of stored blogs. Zero if the lock is poisoned.
    pub fn blog_count(&self) -> usize {
        self.blogs.lock().map_or(0, |blogs| blogs.len())
    }

    /// Number of stored users. Zero if the lock is poisoned.
    pub fn user_count(&self) -> usize {
        self.users.lock().map_or(0, |users| users.len())
    }

    /// Snapshot of every stored blog.
    pub fn all_blogs(&self) -> Vec<Blog> {
        self.blogs
            .lock()
            .map_or_else(|_| Vec::new(), |blogs| blogs.clone())
    }

    /// Store `blog` directly, bypassing the services.
    pub fn seed_blog(&self, blog: Blog) {
        if let Ok(mut blogs) = self.blogs.lock() {
            blogs.push(blog);
        }
    }
}

#[async_trait]
impl BlogRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<Blog>, BlogRepositoryError> {
        Ok(self.blogs()?.clone())
    }

    async fn insert(&self, blog: &Blog) -> Result<(), BlogRepositoryError> {
        self.blogs()?.push(blog.clone());
        Ok(())
    }

    async fn update(
        &self,
        id: &BlogId,
        changes: &BlogChanges,
    ) -> Result<Option<Blog>, BlogRepositoryError> {
        let mut blogs = self.blogs()?;
        let Some(slot) = blogs.iter_mut().find(|blog| blog.id() == id) else {
            return Ok(None);
        };
        *slot = slot.clone().with_changes(changes.clone());
        Ok(Some(slot.clone()))
    }

    async fn delete(&self, id: &BlogId) -> Result<bool, BlogRepositoryError> {
        let mut blogs = self.blogs()?;
        let before = blogs.len();
        blogs.retain(|blog| blog.id() != id);
        Ok(blogs.len() < before)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert(&self, record: &NewUserRecord) -> Result<User, UserPersistenceError> {
        let stored = StoredUser {
            id: record.id,
            username: record.username.clone(),
            name: record.name.clone(),
            password_hash: record.password_hash.clone(),
        };
        {
            let mut users = self.users()?;
            if users.iter().any(|user| user.username == stored.username) {
                return Err(UserPersistenceError::duplicate_username(
                    stored.username.as_str(),
                ));
            }
            users.push(stored.clone());
        }
        self.to_user(&stored)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let found = self.users()?.iter().find(|user| user.id == *id).cloned();
        found.map(|stored| self.to_user(&stored)).transpose()
    }

    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError> {
        let found = self
            .users()?
            .iter()
            .find(|user| user.username.as_str() == username)
            .cloned();
        found
            .map(|stored| {
                Ok(StoredCredentials {
                    user: self.to_user(&stored)?,
                    password_hash: stored.password_hash,
                })
            })
            .transpose()
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let users = self.users()?.clone();
        users.iter().map(|stored| self.to_user(stored)).collect()
    }
}

/// Wire every HTTP port to real services over `store`.
///
/// Tokens are signed with [`TEST_TOKEN_SECRET`] and live for an hour.
///
/// # Errors
/// Returns [`TokenError`] if the token service rejects its configuration.
pub fn http_state(store: &Arc<InMemoryStore>) -> Result<HttpState, TokenError> {
    let hasher = Arc::new(BcryptPasswordHasher::new(TEST_BCRYPT_COST));
    let tokens = Arc::new(JwtTokenService::new(TEST_TOKEN_SECRET, TimeDelta::hours(1))?);
    let blogs = Arc::new(BlogService::new(Arc::clone(store)));
    let users = Arc::new(UserService::new(Arc::clone(store), Arc::clone(&hasher)));
    let auth = Arc::new(AuthService::new(Arc::clone(store), hasher, tokens));
    Ok(HttpState {
        blogs: blogs.clone(),
        blogs_query: blogs,
        registration: users.clone(),
        users,
        login: auth.clone(),
        authenticator: auth,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BlogDraft, Username};
    use rstest::{fixture, rstest};

    #[fixture]
    fn store() -> InMemoryStore {
        InMemoryStore::default()
    }

    fn record(username: &str) -> NewUserRecord {
        NewUserRecord {
            id: UserId::random(),
            username: Username::new(username).expect("valid username"),
            name: None,
            password_hash: PasswordHash::new("hash"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_usernames_are_rejected(store: InMemoryStore) {
        UserRepository::insert(&store, &record("root"))
            .await
            .expect("first insert");
        let err = UserRepository::insert(&store, &record("root"))
            .await
            .expect_err("duplicate");
        assert!(matches!(err, UserPersistenceError::DuplicateUsername { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn user_blogs_follow_ownership(store: InMemoryStore) {
        let user = UserRepository::insert(&store, &record("root"))
            .await
            .expect("insert user");
        let draft = BlogDraft::try_new(Some("t".into()), None, Some("u".into()), None)
            .expect("valid draft");
        let blog = Blog::from_draft(BlogId::random(), draft, Some(*user.id()));
        BlogRepository::insert(&store, &blog).await.expect("insert blog");

        let found = store
            .find_by_id(user.id())
            .await
            .expect("lookup")
            .expect("user exists");
        assert_eq!(found.blogs(), &[*blog.id()]);

        assert!(BlogRepository::delete(&store, blog.id()).await.expect("delete"));
        let found = store
            .find_by_id(user.id())
            .await
            .expect("lookup")
            .expect("user exists");
        assert!(found.blogs().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn update_of_missing_blog_returns_none(store: InMemoryStore) {
        let updated = BlogRepository::update(&store, &BlogId::random(), &BlogChanges::likes(1))
            .await
            .expect("update");
        assert!(updated.is_none());
    }
}
