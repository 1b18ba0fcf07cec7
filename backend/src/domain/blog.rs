//! Blog entry model and the validated inputs used to create or change one.

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use super::UserId;

/// Validation errors raised while building blog inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlogValidationError {
    InvalidId,
    MissingTitle,
    MissingUrl,
    NegativeLikes { likes: i64 },
}

impl BlogValidationError {
    /// Name of the offending request field, for error details.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidId => "id",
            Self::MissingTitle => "title",
            Self::MissingUrl => "url",
            Self::NegativeLikes { .. } => "likes",
        }
    }
}

impl fmt::Display for BlogValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "malformatted id"),
            Self::MissingTitle => write!(f, "title is required"),
            Self::MissingUrl => write!(f, "url is required"),
            Self::NegativeLikes { likes } => {
                write!(f, "likes must not be negative (got {likes})")
            }
        }
    }
}

impl std::error::Error for BlogValidationError {}

/// Stable blog identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlogId(Uuid);

impl BlogId {
    /// Parse an identifier from its textual form.
    ///
    /// # Examples
    /// ```
    /// use bloglist::domain::{BlogId, BlogValidationError};
    ///
    /// assert_eq!(BlogId::new("1234"), Err(BlogValidationError::InvalidId));
    /// ```
    pub fn new(id: impl AsRef<str>) -> Result<Self, BlogValidationError> {
        id.as_ref().parse()
    }

    /// Generate a new random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl FromStr for BlogId {
    type Err = BlogValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| BlogValidationError::InvalidId)
    }
}

impl fmt::Display for BlogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

fn required_text(
    value: Option<String>,
    missing: BlogValidationError,
) -> Result<String, BlogValidationError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(missing),
    }
}

fn checked_likes(likes: i64) -> Result<u64, BlogValidationError> {
    u64::try_from(likes).map_err(|_| BlogValidationError::NegativeLikes { likes })
}

/// Validated input for a new blog.
///
/// `likes` defaults to zero when omitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogDraft {
    title: String,
    author: Option<String>,
    url: String,
    likes: u64,
}

impl BlogDraft {
    /// Validate raw request fields.
    ///
    /// # Examples
    /// ```
    /// use bloglist::domain::BlogDraft;
    ///
    /// let draft = BlogDraft::try_new(
    ///     Some("Go To Statement Considered Harmful".into()),
    ///     Some("Edsger W. Dijkstra".into()),
    ///     Some("https://example.com/goto".into()),
    ///     None,
    /// )
    /// .unwrap();
    /// assert_eq!(draft.likes(), 0);
    /// ```
    pub fn try_new(
        title: Option<String>,
        author: Option<String>,
        url: Option<String>,
        likes: Option<i64>,
    ) -> Result<Self, BlogValidationError> {
        let title = required_text(title, BlogValidationError::MissingTitle)?;
        let url = required_text(url, BlogValidationError::MissingUrl)?;
        let likes = checked_likes(likes.unwrap_or(0))?;
        Ok(Self {
            title,
            author,
            url,
            likes,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn likes(&self) -> u64 {
        self.likes
    }
}

/// Partial update to an existing blog. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogChanges {
    title: Option<String>,
    author: Option<String>,
    url: Option<String>,
    likes: Option<u64>,
}

impl BlogChanges {
    /// Validate the fields that were supplied.
    ///
    /// A supplied title or url must not be blank, and supplied likes must
    /// not be negative.
    pub fn try_new(
        title: Option<String>,
        author: Option<String>,
        url: Option<String>,
        likes: Option<i64>,
    ) -> Result<Self, BlogValidationError> {
        let title = title
            .map(|t| required_text(Some(t), BlogValidationError::MissingTitle))
            .transpose()?;
        let url = url
            .map(|u| required_text(Some(u), BlogValidationError::MissingUrl))
            .transpose()?;
        let likes = likes.map(checked_likes).transpose()?;
        Ok(Self {
            title,
            author,
            url,
            likes,
        })
    }

    /// Changes that only set the like count.
    #[must_use]
    pub fn likes(likes: u64) -> Self {
        Self {
            likes: Some(likes),
            ..Self::default()
        }
    }

    pub fn new_title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn new_author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn new_url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn new_likes(&self) -> Option<u64> {
        self.likes
    }
}

/// A stored blog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blog {
    id: BlogId,
    title: String,
    author: Option<String>,
    url: String,
    likes: u64,
    owner: Option<UserId>,
}

impl Blog {
    /// Assemble a blog from persisted parts.
    #[must_use]
    pub fn new(
        id: BlogId,
        title: String,
        author: Option<String>,
        url: String,
        likes: u64,
        owner: Option<UserId>,
    ) -> Self {
        Self {
            id,
            title,
            author,
            url,
            likes,
            owner,
        }
    }

    /// Materialise a draft under a fresh id.
    #[must_use]
    pub fn from_draft(id: BlogId, draft: BlogDraft, owner: Option<UserId>) -> Self {
        let BlogDraft {
            title,
            author,
            url,
            likes,
        } = draft;
        Self::new(id, title, author, url, likes, owner)
    }

    /// Return a copy with `changes` applied.
    #[must_use]
    pub fn with_changes(mut self, changes: BlogChanges) -> Self {
        let BlogChanges {
            title,
            author,
            url,
            likes,
        } = changes;
        if let Some(title) = title {
            self.title = title;
        }
        if author.is_some() {
            self.author = author;
        }
        if let Some(url) = url {
            self.url = url;
        }
        if let Some(likes) = likes {
            self.likes = likes;
        }
        self
    }

    pub fn id(&self) -> &BlogId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn likes(&self) -> u64 {
        self.likes
    }

    /// The user who created the blog. `None` once that user is removed.
    pub fn owner(&self) -> Option<&UserId> {
        self.owner.as_ref()
    }
}

#[cfg(test)]
mod tests;
