//! Structural validation ahead of any persistence call.
//!
//! Every save path - manual draft save, publish, autosave - runs the
//! same gate. Rules are ordered and the first failure wins, so the
//! operator always sees the most fundamental problem first.

use regex_lite::Regex;
use std::sync::LazyLock;

use crate::post::{EMPTY_BODY_SENTINEL, MAX_TITLE_LEN, PLACEHOLDER_TITLE, Post};

/// Slug charset accepted by the site router.
static SLUG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap());

/// A document failed a structural check.
///
/// Each variant carries the message shown to the operator; variants
/// are ordered the way the gate checks them.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("add a title before saving")]
    MissingTitle,

    #[error("the title can be at most 120 characters")]
    TitleTooLong,

    #[error("the post needs some content before saving")]
    EmptyBody,

    #[error("the slug may only contain letters, digits, dashes and underscores")]
    InvalidSlug,
}

/// Run the gate. First failure wins.
pub fn validate_post(post: &Post) -> Result<(), ValidationError> {
    let title = post.title.trim();
    if title.is_empty() || title == PLACEHOLDER_TITLE {
        return Err(ValidationError::MissingTitle);
    }
    if post.title.chars().count() > MAX_TITLE_LEN {
        return Err(ValidationError::TitleTooLong);
    }
    let body = post.body.trim();
    if body.is_empty() || body == EMPTY_BODY_SENTINEL {
        return Err(ValidationError::EmptyBody);
    }
    if let Some(slug) = &post.slug {
        if !slug.is_empty() && !SLUG_REGEX.is_match(slug) {
            return Err(ValidationError::InvalidSlug);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_post() -> Post {
        let mut post = Post::new();
        post.title = "Garage door schedule".into();
        post.body = "<p>New codes from Monday.</p>".to_string();
        post
    }

    #[test]
    fn test_valid_post_passes() {
        assert_eq!(validate_post(&valid_post()), Ok(()));
    }

    #[test]
    fn test_title_error_wins_over_body_error() {
        // Both title and body are empty; the title rule fires first.
        let post = Post::new();
        assert_eq!(validate_post(&post), Err(ValidationError::MissingTitle));
    }

    #[test]
    fn test_placeholder_title_rejected() {
        let mut post = valid_post();
        post.title = PLACEHOLDER_TITLE.into();
        assert_eq!(validate_post(&post), Err(ValidationError::MissingTitle));
    }

    #[test]
    fn test_overlong_title_rejected() {
        let mut post = valid_post();
        post.title = "x".repeat(121).into();
        assert_eq!(validate_post(&post), Err(ValidationError::TitleTooLong));
    }

    #[test]
    fn test_empty_paragraph_sentinel_rejected() {
        let mut post = valid_post();
        post.body = EMPTY_BODY_SENTINEL.to_string();
        assert_eq!(validate_post(&post), Err(ValidationError::EmptyBody));
    }

    #[test]
    fn test_slug_charset() {
        let mut post = valid_post();
        post.slug = Some("garage-door_2".into());
        assert_eq!(validate_post(&post), Ok(()));

        post.slug = Some("garage door".into());
        assert_eq!(validate_post(&post), Err(ValidationError::InvalidSlug));
    }

    #[test]
    fn test_empty_slug_is_allowed() {
        let mut post = valid_post();
        post.slug = Some("".into());
        assert_eq!(validate_post(&post), Ok(()));
    }

    #[test]
    fn test_messages_read_well() {
        insta::assert_snapshot!(ValidationError::MissingTitle, @"add a title before saving");
        insta::assert_snapshot!(ValidationError::TitleTooLong, @"the title can be at most 120 characters");
        insta::assert_snapshot!(ValidationError::EmptyBody, @"the post needs some content before saving");
        insta::assert_snapshot!(ValidationError::InvalidSlug, @"the slug may only contain letters, digits, dashes and underscores");
    }
}
