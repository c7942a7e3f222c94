//! Boundary contracts: the document store and the notice channel.
//!
//! Both are capabilities the host wires in at session start. The store
//! is the managed persistence backend; notices are the dashboard's
//! toast mechanism.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt;
use std::future::Future;

use gable_common::StoreError;

use crate::post::{Category, Post, PostStatus, slugify};

/// Opaque identifier assigned by the document store.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostId(pub SmolStr);

impl PostId {
    pub fn new(id: impl Into<SmolStr>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The full document payload handed to the store.
///
/// A save always carries the entire record rather than a diff; the
/// store overwrites whatever it held before.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PostRecord {
    pub title: SmolStr,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<SmolStr>,
    pub body: String,
    #[serde(default)]
    pub tags: Vec<SmolStr>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub highlight: bool,
    pub status: PostStatus,
}

impl PostRecord {
    /// Build the record persisted for `post` with the given status.
    ///
    /// If the operator never set a slug, one is derived from the title
    /// so the site always has a stable URL for the document.
    pub fn from_post(post: &Post, status: PostStatus) -> Self {
        let slug = match &post.slug {
            Some(slug) if !slug.is_empty() => Some(slug.clone()),
            _ => {
                let derived = slugify(&post.title);
                (!derived.is_empty()).then(|| SmolStr::new(derived))
            }
        };
        Self {
            title: post.title.clone(),
            slug,
            body: post.body.clone(),
            tags: post.tags().to_vec(),
            categories: post.categories().to_vec(),
            highlight: post.highlight,
            status,
        }
    }

    /// Re-hydrate an in-memory post from a stored record (edit flow).
    pub fn hydrate(&self) -> Post {
        Post {
            title: self.title.clone(),
            slug: self.slug.clone(),
            body: self.body.clone(),
            tags: self.tags.clone(),
            categories: self.categories.clone(),
            highlight: self.highlight,
            status: self.status,
        }
    }
}

/// The external document store.
///
/// All calls are asynchronous and may fail; timeout and retry behavior
/// belong to the service, not to this core. Failures carry the
/// service's message and are surfaced (or swallowed, for autosave) by
/// the session.
pub trait PostStore {
    /// Persist a new document, returning its id.
    fn create(
        &self,
        record: &PostRecord,
    ) -> impl Future<Output = Result<PostId, StoreError>> + Send;

    /// Overwrite an existing document.
    fn update(
        &self,
        id: &PostId,
        record: &PostRecord,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Fetch a document for editing.
    fn get(&self, id: &PostId) -> impl Future<Output = Result<PostRecord, StoreError>> + Send;
}

/// User-facing feedback channel (toasts in the dashboard).
///
/// Autosave success is never reported here; see the session's save
/// path.
pub trait Notices {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
    fn info(&self, message: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_roundtrip_through_post() {
        let mut post = Post::new();
        post.title = "Stairwell painting".into();
        post.slug = Some("stairwell-painting".into());
        post.body = "<p>Week 12</p>".to_string();
        post.add_tag("painting");
        post.add_category(Category::Maintenance);
        post.highlight = true;

        let record = PostRecord::from_post(&post, PostStatus::Draft);
        let back = record.hydrate();
        assert_eq!(back, post);
    }

    #[test]
    fn test_missing_slug_is_derived_from_title() {
        let mut post = Post::new();
        post.title = "Roof repairs - phase 2".into();
        post.body = "<p>Scaffolding notice</p>".to_string();

        let record = PostRecord::from_post(&post, PostStatus::Draft);
        assert_eq!(record.slug.as_deref(), Some("roof-repairs-phase-2"));
    }

    #[test]
    fn test_record_serializes_status_lowercase() {
        let record = PostRecord::from_post(&Post::new(), PostStatus::Published);
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains(r#""status":"published""#));
        // Unset slug is omitted entirely
        assert!(!json.contains("slug"));
    }
}
