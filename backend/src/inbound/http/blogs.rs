//! Blog API handlers.
//!
//! ```text
//! GET    /api/blogs
//! POST   /api/blogs          (bearer token required)
//! PUT    /api/blogs/{id}
//! DELETE /api/blogs/{id}
//! GET    /api/blogs/stats
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    AuthorBlogCount, AuthorLikes, Blog, BlogChanges, BlogDraft, BlogStats, FavoriteBlog,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::CurrentUser;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{blog_validation_error, parse_blog_id};

/// Sentinel reported by the aggregations when there are no blogs.
pub const NO_BLOGS: &str = "No blogs";

/// Body for creating or updating a blog.
///
/// On create, `title` and `url` are required and `likes` defaults to 0. On
/// update, only the supplied fields change.
#[derive(Debug, Default, Clone, Deserialize, Serialize, ToSchema)]
pub struct BlogRequest {
    #[schema(example = "Go To Statement Considered Harmful")]
    pub title: Option<String>,
    #[schema(example = "Edsger W. Dijkstra")]
    pub author: Option<String>,
    #[schema(example = "https://homepages.cwi.nl/~storm/teaching/reader/Dijkstra68.pdf")]
    pub url: Option<String>,
    #[schema(minimum = 0, example = 5)]
    pub likes: Option<i64>,
}

/// Blog as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BlogResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: u64,
    /// Id of the user who added the blog.
    pub user: Option<String>,
}

impl From<Blog> for BlogResponse {
    fn from(blog: Blog) -> Self {
        Self {
            id: blog.id().to_string(),
            title: blog.title().to_owned(),
            author: blog.author().map(str::to_owned),
            url: blog.url().to_owned(),
            likes: blog.likes(),
            user: blog.owner().map(ToString::to_string),
        }
    }
}

/// An aggregation result, or the `"No blogs"` sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Summary<T> {
    Found(T),
    Empty(&'static str),
}

impl<T, D> From<Option<D>> for Summary<T>
where
    T: From<D>,
{
    fn from(value: Option<D>) -> Self {
        value.map_or(Self::Empty(NO_BLOGS), |found| Self::Found(T::from(found)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FavoriteBlogBody {
    pub title: String,
    pub author: Option<String>,
    pub likes: u64,
}

impl From<FavoriteBlog> for FavoriteBlogBody {
    fn from(value: FavoriteBlog) -> Self {
        Self {
            title: value.title,
            author: value.author,
            likes: value.likes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AuthorBlogsBody {
    /// `null` when the leading group is the blogs without an author.
    pub author: Option<String>,
    pub blogs: u64,
}

impl From<AuthorBlogCount> for AuthorBlogsBody {
    fn from(value: AuthorBlogCount) -> Self {
        Self {
            author: value.author,
            blogs: value.blogs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AuthorLikesBody {
    /// `null` when the leading group is the blogs without an author.
    pub author: Option<String>,
    pub likes: u64,
}

impl From<AuthorLikes> for AuthorLikesBody {
    fn from(value: AuthorLikes) -> Self {
        Self {
            author: value.author,
            likes: value.likes,
        }
    }
}

/// Aggregations over every stored blog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlogStatsResponse {
    pub total_likes: u64,
    /// `FavoriteBlogBody` or `"No blogs"`.
    #[schema(value_type = Object)]
    pub favorite_blog: Summary<FavoriteBlogBody>,
    /// `AuthorBlogsBody` or `"No blogs"`.
    #[schema(value_type = Object)]
    pub most_blogs: Summary<AuthorBlogsBody>,
    /// `AuthorLikesBody` or `"No blogs"`.
    #[schema(value_type = Object)]
    pub most_likes: Summary<AuthorLikesBody>,
}

impl From<BlogStats> for BlogStatsResponse {
    fn from(stats: BlogStats) -> Self {
        Self {
            total_likes: stats.total_likes,
            favorite_blog: stats.favorite_blog.into(),
            most_blogs: stats.most_blogs.into(),
            most_likes: stats.most_likes.into(),
        }
    }
}

/// List every blog.
#[utoipa::path(
    get,
    path = "/api/blogs",
    responses(
        (status = 200, description = "Blogs", body = [BlogResponse]),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["blogs"],
    operation_id = "listBlogs",
    security([])
)]
#[get("/blogs")]
pub async fn list_blogs(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<BlogResponse>>> {
    let blogs = state.blogs_query.list().await?;
    Ok(web::Json(blogs.into_iter().map(BlogResponse::from).collect()))
}

/// Add a blog owned by the authenticated user.
#[utoipa::path(
    post,
    path = "/api/blogs",
    request_body = BlogRequest,
    responses(
        (status = 201, description = "Blog created", body = BlogResponse),
        (status = 400, description = "Missing title or url", body = ErrorSchema),
        (status = 401, description = "Token missing or invalid", body = ErrorSchema)
    ),
    tags = ["blogs"],
    operation_id = "createBlog",
    security(("bearer" = []))
)]
#[post("/blogs")]
pub async fn create_blog(
    state: web::Data<HttpState>,
    user: CurrentUser,
    payload: web::Json<BlogRequest>,
) -> ApiResult<HttpResponse> {
    let BlogRequest {
        title,
        author,
        url,
        likes,
    } = payload.into_inner();
    let draft = BlogDraft::try_new(title, author, url, likes).map_err(blog_validation_error)?;
    let blog = state.blogs.create(&user.0, draft).await?;
    Ok(HttpResponse::Created().json(BlogResponse::from(blog)))
}

/// Change a blog's fields; absent fields are kept.
#[utoipa::path(
    put,
    path = "/api/blogs/{id}",
    params(("id" = String, Path, description = "Blog id")),
    request_body = BlogRequest,
    responses(
        (status = 200, description = "Updated blog", body = BlogResponse),
        (status = 400, description = "Malformed or unknown id, or invalid fields", body = ErrorSchema)
    ),
    tags = ["blogs"],
    operation_id = "updateBlog",
    security([])
)]
#[put("/blogs/{id}")]
pub async fn update_blog(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<BlogRequest>,
) -> ApiResult<web::Json<BlogResponse>> {
    let id = parse_blog_id(&path)?;
    let BlogRequest {
        title,
        author,
        url,
        likes,
    } = payload.into_inner();
    let changes =
        BlogChanges::try_new(title, author, url, likes).map_err(blog_validation_error)?;
    let blog = state.blogs.update(&id, changes).await?;
    Ok(web::Json(blog.into()))
}

/// Remove a blog.
#[utoipa::path(
    delete,
    path = "/api/blogs/{id}",
    params(("id" = String, Path, description = "Blog id")),
    responses(
        (status = 204, description = "Blog removed"),
        (status = 400, description = "Malformed or unknown id", body = ErrorSchema)
    ),
    tags = ["blogs"],
    operation_id = "deleteBlog",
    security([])
)]
#[delete("/blogs/{id}")]
pub async fn delete_blog(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_blog_id(&path)?;
    state.blogs.delete(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Total likes, favourite blog, and the leading authors.
#[utoipa::path(
    get,
    path = "/api/blogs/stats",
    responses(
        (status = 200, description = "Aggregations", body = BlogStatsResponse)
    ),
    tags = ["blogs"],
    operation_id = "blogStats",
    security([])
)]
#[get("/blogs/stats")]
pub async fn blog_stats(state: web::Data<HttpState>) -> ApiResult<web::Json<BlogStatsResponse>> {
    let stats = state.blogs_query.stats().await?;
    Ok(web::Json(stats.into()))
}
