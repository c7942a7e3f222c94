//! Preview-image derivation from serialized post content.
//!
//! The site's listing pages need one image per post. An explicit
//! override always wins; otherwise the body is scanned for the first
//! usable embed. Pure and idempotent - same input, same URL, no side
//! effects.

use regex_lite::Regex;
use std::sync::LazyLock;

/// First image embed in the body. Captures: 1=src URL.
static IMAGE_SRC_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<img[^>]*\ssrc="([^"]+)""#).unwrap());

/// First YouTube embed iframe. Captures: 1=video id.
static YOUTUBE_EMBED_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"youtube(?:-nocookie)?\.com/embed/([A-Za-z0-9_-]+)"#).unwrap()
});

/// First raw video element.
static VIDEO_TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<video[\s>]").unwrap());

/// Fallback when the body has no usable embed at all.
pub const DEFAULT_THUMBNAIL: &str = "/media/thumbnails/default.png";

/// Fallback for posts whose first embed is a raw video file.
pub const VIDEO_THUMBNAIL: &str = "/media/thumbnails/video.png";

/// Derive the preview image URL for a post.
///
/// Precedence: explicit override, first image, first YouTube embed
/// (mapped to its hosted still), raw video placeholder, default
/// placeholder.
pub fn extract_thumbnail(body: &str, override_url: Option<&str>) -> String {
    if let Some(url) = override_url {
        let url = url.trim();
        if !url.is_empty() {
            return url.to_string();
        }
    }
    if let Some(caps) = IMAGE_SRC_REGEX.captures(body) {
        return caps[1].to_string();
    }
    if let Some(caps) = YOUTUBE_EMBED_REGEX.captures(body) {
        return format!("https://img.youtube.com/vi/{}/hqdefault.jpg", &caps[1]);
    }
    if VIDEO_TAG_REGEX.is_match(body) {
        return VIDEO_THUMBNAIL.to_string();
    }
    DEFAULT_THUMBNAIL.to_string()
}
