//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! A user's blog list is read from `blogs.user_id`, so it always reflects
//! the blogs that currently exist.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{NewUserRecord, UserPersistenceError, UserRepository};
use crate::domain::{BlogId, PasswordHash, StoredCredentials, User, UserId, Username};

use super::diesel_basic_error_mapping::{
    map_basic_diesel_error, map_basic_pool_error, unique_violation_constraint,
};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{blogs, users};

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    map_basic_pool_error(error, UserPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_basic_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn row_to_user(row: UserRow, blogs: Vec<BlogId>) -> Result<User, UserPersistenceError> {
    let username = Username::new(&row.username).map_err(|err| {
        UserPersistenceError::query(format!("stored user {} is invalid: {err}", row.id))
    })?;
    Ok(User::new(UserId::from_uuid(row.id), username, row.name, blogs))
}

async fn owned_blog_ids(
    conn: &mut AsyncPgConnection,
    user_id: Uuid,
) -> Result<Vec<BlogId>, UserPersistenceError> {
    let ids: Vec<Uuid> = blogs::table
        .filter(blogs::user_id.eq(user_id))
        .order((blogs::created_at.asc(), blogs::id.asc()))
        .select(blogs::id)
        .load(conn)
        .await
        .map_err(map_diesel_error)?;
    Ok(ids.into_iter().map(BlogId::from_uuid).collect())
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, record: &NewUserRecord) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewUserRow {
            id: *record.id.as_uuid(),
            username: record.username.as_str(),
            name: record.name.as_deref(),
            password_hash: record.password_hash.as_str(),
        };

        let inserted = diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await;
        match inserted {
            Ok(_) => Ok(User::new(
                record.id,
                record.username.clone(),
                record.name.clone(),
                Vec::new(),
            )),
            Err(error) => {
                if let Some(constraint) = unique_violation_constraint(&error) {
                    debug!(constraint, "username already registered");
                    return Err(UserPersistenceError::duplicate_username(
                        record.username.as_str(),
                    ));
                }
                Err(map_diesel_error(error))
            }
        }
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let Some(row) = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
        else {
            return Ok(None);
        };
        let blogs = owned_blog_ids(&mut conn, row.id).await?;
        row_to_user(row, blogs).map(Some)
    }

    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let Some(row) = users::table
            .filter(users::username.eq(username))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
        else {
            return Ok(None);
        };
        let blogs = owned_blog_ids(&mut conn, row.id).await?;
        let password_hash = PasswordHash::new(row.password_hash.clone());
        let user = row_to_user(row, blogs)?;
        Ok(Some(StoredCredentials {
            user,
            password_hash,
        }))
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<UserRow> = users::table
            .order((users::created_at.asc(), users::id.asc()))
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let ownership: Vec<(Uuid, Option<Uuid>)> = blogs::table
            .filter(blogs::user_id.is_not_null())
            .order((blogs::created_at.asc(), blogs::id.asc()))
            .select((blogs::id, blogs::user_id))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let mut owned: HashMap<Uuid, Vec<BlogId>> = HashMap::new();
        for (blog_id, owner) in ownership {
            if let Some(owner) = owner {
                owned.entry(owner).or_default().push(BlogId::from_uuid(blog_id));
            }
        }

        rows.into_iter()
            .map(|row| {
                let blogs = owned.remove(&row.id).unwrap_or_default();
                row_to_user(row, blogs)
            })
            .collect()
    }
}
