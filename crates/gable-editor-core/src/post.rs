//! The document being edited: a dashboard post for the association
//! site.
//!
//! Fields mirror what the site renders: title, slug, serialized rich
//! body, tags, categories from a closed vocabulary, and a highlight
//! flag for promotional placement.

use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Matches markup tags when reducing a serialized body to plain text.
static MARKUP_TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Canonical serialization of an empty editing surface.
///
/// Never valid as a persisted body: a surface with no content still
/// serializes to one empty paragraph.
pub const EMPTY_BODY_SENTINEL: &str = "<p></p>";

/// Title used until the operator supplies one manually and the body
/// has no text to derive one from.
pub const PLACEHOLDER_TITLE: &str = "(untitled)";

/// Longest allowed title, in characters.
pub const MAX_TITLE_LEN: usize = 120;

/// Longest allowed tag, in characters.
pub const MAX_TAG_LEN: usize = 20;

/// Longest derived title before truncation, in characters.
const DERIVED_TITLE_LEN: usize = 60;

/// Publication state of a post.
///
/// Posts are created as drafts. Publishing is the only transition to
/// `Published`; nothing in this core demotes a published post.
#[derive(Clone, Debug, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
}

/// Closed vocabulary of dashboard categories.
#[derive(Clone, Debug, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    News,
    Events,
    Maintenance,
    Governance,
    Community,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 5] = [
        Category::News,
        Category::Events,
        Category::Maintenance,
        Category::Governance,
        Category::Community,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::News => "news",
            Category::Events => "events",
            Category::Maintenance => "maintenance",
            Category::Governance => "governance",
            Category::Community => "community",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A string that names no category in the vocabulary.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// A dashboard post under editing.
///
/// Owned exclusively by the editing session; handed to the document
/// store as a [`crate::store::PostRecord`] on save and re-hydrated
/// from one on load.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Post {
    /// Post title; placeholder-derived until edited manually.
    pub title: SmolStr,
    /// URL slug; optional, validated against the site router charset.
    pub slug: Option<SmolStr>,
    /// Serialized rich content from the editing surface.
    pub body: String,
    pub(crate) tags: Vec<SmolStr>,
    pub(crate) categories: Vec<Category>,
    /// Promotional placement flag.
    pub highlight: bool,
    pub status: PostStatus,
}

impl Post {
    /// Create a new empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tags in insertion order.
    pub fn tags(&self) -> &[SmolStr] {
        &self.tags
    }

    /// Add a tag. Rejects empty tags, duplicates, and tags over
    /// [`MAX_TAG_LEN`] characters; insertion order is preserved for
    /// display. Returns whether the tag was added.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || tag.chars().count() > MAX_TAG_LEN {
            tracing::debug!(tag, "rejected tag");
            return false;
        }
        if self.tags.iter().any(|t| t == tag) {
            tracing::debug!(tag, "rejected duplicate tag");
            return false;
        }
        self.tags.push(SmolStr::new(tag));
        true
    }

    /// Remove a tag. Returns whether it was present.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    /// Categories in selection order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Add a category. Rejects duplicates; selection order is
    /// preserved. Returns whether it was added.
    pub fn add_category(&mut self, category: Category) -> bool {
        if self.categories.contains(&category) {
            return false;
        }
        self.categories.push(category);
        true
    }

    /// Remove a category. Returns whether it was present.
    pub fn remove_category(&mut self, category: Category) -> bool {
        let before = self.categories.len();
        self.categories.retain(|c| *c != category);
        self.categories.len() != before
    }

    /// Whether the title is still the auto-generated placeholder.
    pub fn title_is_placeholder(&self) -> bool {
        self.title == PLACEHOLDER_TITLE
    }
}

/// Simple slug generation from a title.
pub fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c
            } else if c.is_whitespace() || c == '-' || c == '_' {
                '-'
            } else {
                // Skip other characters
                '\0'
            }
        })
        .filter(|&c| c != '\0')
        .collect::<String>()
        // Collapse multiple dashes
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Derive a placeholder title from serialized body content.
///
/// Takes the first run of plain text in the body, truncated to a
/// display-friendly length. Falls back to [`PLACEHOLDER_TITLE`] when
/// the body has no text at all.
pub fn derive_title(body: &str) -> SmolStr {
    let text = MARKUP_TAG_REGEX.replace_all(body, " ");
    let mut words = text.split_whitespace();
    let mut title = String::new();
    for word in &mut words {
        if !title.is_empty() {
            title.push(' ');
        }
        title.push_str(word);
        if title.chars().count() >= DERIVED_TITLE_LEN {
            break;
        }
    }
    if title.is_empty() {
        return SmolStr::new_static(PLACEHOLDER_TITLE);
    }
    if title.chars().count() > DERIVED_TITLE_LEN {
        title = title.chars().take(DERIVED_TITLE_LEN).collect();
    }
    SmolStr::new(title)
}
