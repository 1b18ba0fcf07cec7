//! PostgreSQL-backed `BlogRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{BlogRepository, BlogRepositoryError};
use crate::domain::{Blog, BlogChanges, BlogId, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{BlogRow, BlogUpdate, NewBlogRow};
use super::pool::{DbPool, PoolError};
use super::schema::blogs;

/// Diesel-backed implementation of the blog repository port.
#[derive(Clone)]
pub struct DieselBlogRepository {
    pool: DbPool,
}

impl DieselBlogRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> BlogRepositoryError {
    map_basic_pool_error(error, BlogRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> BlogRepositoryError {
    map_basic_diesel_error(
        error,
        BlogRepositoryError::query,
        BlogRepositoryError::connection,
    )
}

fn likes_to_column(likes: u64) -> Result<i64, BlogRepositoryError> {
    i64::try_from(likes).map_err(|_| BlogRepositoryError::query("like count out of range"))
}

pub(super) fn row_to_blog(row: BlogRow) -> Result<Blog, BlogRepositoryError> {
    let BlogRow {
        id,
        title,
        author,
        url,
        likes,
        user_id,
    } = row;
    let likes = u64::try_from(likes)
        .map_err(|_| BlogRepositoryError::query(format!("blog {id} has negative likes")))?;
    Ok(Blog::new(
        BlogId::from_uuid(id),
        title,
        author,
        url,
        likes,
        user_id.map(UserId::from_uuid),
    ))
}

#[async_trait]
impl BlogRepository for DieselBlogRepository {
    async fn list(&self) -> Result<Vec<Blog>, BlogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<BlogRow> = blogs::table
            .order((blogs::created_at.asc(), blogs::id.asc()))
            .select(BlogRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_blog).collect()
    }

    async fn insert(&self, blog: &Blog) -> Result<(), BlogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewBlogRow {
            id: *blog.id().as_uuid(),
            title: blog.title(),
            author: blog.author(),
            url: blog.url(),
            likes: likes_to_column(blog.likes())?,
            user_id: blog.owner().map(|owner| *owner.as_uuid()),
        };
        diesel::insert_into(blogs::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn update(
        &self,
        id: &BlogId,
        changes: &BlogChanges,
    ) -> Result<Option<Blog>, BlogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let update = BlogUpdate {
            title: changes.new_title(),
            author: changes.new_author(),
            url: changes.new_url(),
            likes: changes.new_likes().map(likes_to_column).transpose()?,
        };

        // Diesel rejects an empty changeset, so a no-op update is a read.
        let row = if update.is_empty() {
            blogs::table
                .filter(blogs::id.eq(id.as_uuid()))
                .select(BlogRow::as_select())
                .first(&mut conn)
                .await
        } else {
            diesel::update(blogs::table.filter(blogs::id.eq(id.as_uuid())))
                .set(&update)
                .returning(BlogRow::as_returning())
                .get_result(&mut conn)
                .await
        }
        .optional()
        .map_err(map_diesel_error)?;

        row.map(row_to_blog).transpose()
    }

    async fn delete(&self, id: &BlogId) -> Result<bool, BlogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(blogs::table.filter(blogs::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(removed > 0)
    }
}
