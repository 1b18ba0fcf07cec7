//! Tests for blog inputs.

use super::*;
use rstest::{fixture, rstest};

fn text(value: &str) -> Option<String> {
    Some(value.to_owned())
}

#[fixture]
fn stored_blog() -> Blog {
    Blog::new(
        BlogId::random(),
        "React patterns".to_owned(),
        Some("Michael Chan".to_owned()),
        "https://reactpatterns.com/".to_owned(),
        7,
        Some(UserId::random()),
    )
}

#[rstest]
fn draft_defaults_likes_to_zero() {
    let draft = BlogDraft::try_new(text("title"), None, text("https://x.test"), None)
        .expect("valid draft");
    assert_eq!(draft.likes(), 0);
    assert_eq!(draft.author(), None);
}

#[rstest]
#[case(None, text("https://x.test"), BlogValidationError::MissingTitle)]
#[case(text("  "), text("https://x.test"), BlogValidationError::MissingTitle)]
#[case(text("title"), None, BlogValidationError::MissingUrl)]
#[case(text("title"), text(""), BlogValidationError::MissingUrl)]
#[case(None, None, BlogValidationError::MissingTitle)]
fn draft_requires_title_and_url(
    #[case] title: Option<String>,
    #[case] url: Option<String>,
    #[case] expected: BlogValidationError,
) {
    let result = BlogDraft::try_new(title, text("author"), url, Some(1));
    assert_eq!(result, Err(expected));
}

#[rstest]
fn draft_rejects_negative_likes() {
    let result = BlogDraft::try_new(text("t"), None, text("u"), Some(-1));
    assert_eq!(result, Err(BlogValidationError::NegativeLikes { likes: -1 }));
}

#[rstest]
fn from_draft_keeps_every_field() {
    let owner = UserId::random();
    let id = BlogId::random();
    let draft = BlogDraft::try_new(text("t"), text("a"), text("u"), Some(3)).expect("valid draft");
    let blog = Blog::from_draft(id, draft, Some(owner));

    assert_eq!(blog.id(), &id);
    assert_eq!(blog.title(), "t");
    assert_eq!(blog.author(), Some("a"));
    assert_eq!(blog.url(), "u");
    assert_eq!(blog.likes(), 3);
    assert_eq!(blog.owner(), Some(&owner));
}

#[rstest]
fn changes_only_touch_supplied_fields(stored_blog: Blog) {
    let updated = stored_blog.clone().with_changes(BlogChanges::likes(8));

    assert_eq!(updated.likes(), 8);
    assert_eq!(updated.title(), stored_blog.title());
    assert_eq!(updated.author(), stored_blog.author());
    assert_eq!(updated.url(), stored_blog.url());
    assert_eq!(updated.owner(), stored_blog.owner());
}

#[rstest]
fn changes_replace_text_fields(stored_blog: Blog) {
    let changes = BlogChanges::try_new(text("New"), text("Someone"), text("https://n.test"), None)
        .expect("valid changes");
    let updated = stored_blog.with_changes(changes);

    assert_eq!(updated.title(), "New");
    assert_eq!(updated.author(), Some("Someone"));
    assert_eq!(updated.url(), "https://n.test");
    assert_eq!(updated.likes(), 7);
}

#[rstest]
#[case(text(" "), None, None, BlogValidationError::MissingTitle)]
#[case(None, text(""), None, BlogValidationError::MissingUrl)]
#[case(None, None, Some(-4), BlogValidationError::NegativeLikes { likes: -4 })]
fn changes_validate_supplied_fields(
    #[case] title: Option<String>,
    #[case] url: Option<String>,
    #[case] likes: Option<i64>,
    #[case] expected: BlogValidationError,
) {
    assert_eq!(BlogChanges::try_new(title, None, url, likes), Err(expected));
}

#[rstest]
fn malformed_ids_are_rejected() {
    assert_eq!(BlogId::new("5a3d5da59070081a82a3445"), Err(BlogValidationError::InvalidId));
    assert_eq!(BlogValidationError::InvalidId.field(), "id");
}
