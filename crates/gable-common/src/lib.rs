//! gable-common: shared plumbing for the gable CMS crates.
//!
//! Carries the error taxonomy and the editor timing configuration that
//! the editing core and its hosts both depend on.

pub mod config;
pub mod error;

pub use config::EditorConfig;
pub use error::{CmsError, StoreError};
