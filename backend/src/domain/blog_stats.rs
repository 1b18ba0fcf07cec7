//! Aggregations over a list of blogs.
//!
//! Every helper returns `None` for an empty input; the HTTP layer renders
//! that as the `"No blogs"` sentinel. Ties go to whichever candidate reached
//! the winning value first while walking the list in order.

use std::collections::HashMap;

use super::Blog;

/// The most-liked blog, reduced to the fields clients display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteBlog {
    pub title: String,
    pub author: Option<String>,
    pub likes: u64,
}

/// Author with the most blogs. `None` stands for the blogs without an
/// author, which are grouped together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorBlogCount {
    pub author: Option<String>,
    pub blogs: u64,
}

/// Author with the most likes summed over their blogs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorLikes {
    pub author: Option<String>,
    pub likes: u64,
}

/// Sum of likes over all blogs. Zero for an empty list; saturates at
/// `u64::MAX`.
#[must_use]
pub fn total_likes(blogs: &[Blog]) -> u64 {
    blogs.iter().map(Blog::likes).fold(0, u64::saturating_add)
}

/// The blog with the most likes; the first one wins a tie.
///
/// # Examples
/// ```
/// use bloglist::domain::{Blog, BlogId, favorite_blog};
///
/// let blog = |title: &str, likes| {
///     Blog::new(BlogId::random(), title.into(), None, "u".into(), likes, None)
/// };
/// let blogs = [blog("a", 2), blog("b", 5), blog("c", 5)];
/// assert_eq!(favorite_blog(&blogs).map(|f| f.title), Some("b".to_owned()));
/// assert_eq!(favorite_blog(&[]), None);
/// ```
#[must_use]
pub fn favorite_blog(blogs: &[Blog]) -> Option<FavoriteBlog> {
    let mut best: Option<&Blog> = None;
    for blog in blogs {
        if best.is_none_or(|current| blog.likes() > current.likes()) {
            best = Some(blog);
        }
    }
    best.map(|blog| FavoriteBlog {
        title: blog.title().to_owned(),
        author: blog.author().map(str::to_owned),
        likes: blog.likes(),
    })
}

/// Author with the most blogs.
///
/// Blogs without an author form one anonymous group.
#[must_use]
pub fn most_blogs(blogs: &[Blog]) -> Option<AuthorBlogCount> {
    leading_author(blogs, |_| 1).map(|(author, blogs)| AuthorBlogCount { author, blogs })
}

/// Author whose blogs have the most likes in total.
///
/// Blogs without an author form one anonymous group.
#[must_use]
pub fn most_likes(blogs: &[Blog]) -> Option<AuthorLikes> {
    leading_author(blogs, Blog::likes).map(|(author, likes)| AuthorLikes { author, likes })
}

fn leading_author(
    blogs: &[Blog],
    weight: impl Fn(&Blog) -> u64,
) -> Option<(Option<String>, u64)> {
    let mut totals: HashMap<Option<&str>, u64> = HashMap::new();
    let mut leader: Option<(Option<&str>, u64)> = None;
    for blog in blogs {
        let author = blog.author();
        let total = totals.entry(author).or_insert(0);
        *total = total.saturating_add(weight(blog));
        let total = *total;
        if leader.is_none_or(|(_, best)| total > best) {
            leader = Some((author, total));
        }
    }
    leader.map(|(author, total)| (author.map(str::to_owned), total))
}

/// All four aggregations computed together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogStats {
    pub total_likes: u64,
    pub favorite_blog: Option<FavoriteBlog>,
    pub most_blogs: Option<AuthorBlogCount>,
    pub most_likes: Option<AuthorLikes>,
}

impl BlogStats {
    #[must_use]
    pub fn from_blogs(blogs: &[Blog]) -> Self {
        Self {
            total_likes: total_likes(blogs),
            favorite_blog: favorite_blog(blogs),
            most_blogs: most_blogs(blogs),
            most_likes: most_likes(blogs),
        }
    }
}
