//! gable-editor-core: Framework-free document editing core for the
//! association dashboard.
//!
//! This crate provides:
//! - `EditSurface` trait abstracting the rich-text editing surface
//! - `CommandDispatcher` - selection-preserving formatting commands
//! - `ContentSync` - debounced surface-to-state synchronization
//! - `EditorSession` - draft/publish lifecycle with idle autosave
//! - `extract_thumbnail` - preview-image derivation from post content
//!
//! The rich-text surface and the document store are opaque
//! capabilities; hosts wire concrete implementations in at session
//! start and forward surface events into the session.

pub mod dispatcher;
pub mod post;
pub mod session;
pub mod store;
pub mod surface;
pub mod sync;
pub mod thumbnail;
pub mod types;
pub mod validate;

pub use dispatcher::CommandDispatcher;
pub use post::{
    Category, EMPTY_BODY_SENTINEL, MAX_TAG_LEN, MAX_TITLE_LEN, PLACEHOLDER_TITLE, Post,
    PostStatus, derive_title, slugify,
};
pub use session::{EditorSession, IdleAutosave};
pub use smol_str::SmolStr;
pub use store::{Notices, PostId, PostRecord, PostStore};
pub use surface::{EditSurface, FormatCommand, SurfaceOp, TextAlign};
pub use sync::ContentSync;
pub use thumbnail::{DEFAULT_THUMBNAIL, VIDEO_THUMBNAIL, extract_thumbnail};
pub use types::{ActiveFormats, SaveSource, SelectionRange};
pub use validate::{ValidationError, validate_post};
