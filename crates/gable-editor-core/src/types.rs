//! Core editor types: selection ranges, save sources, and the live
//! formatting snapshot.
//!
//! These types are framework-agnostic and carry no reference to any
//! specific rich-text engine.

use smol_str::SmolStr;

/// A selection in the rich content model, measured in character offsets.
///
/// `from` is where the selection started, `to` is where the cursor is
/// now. They may arrive in either order from the surface - use
/// `start()` and `end()` for ordered bounds.
#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub struct SelectionRange {
    /// Where the selection started
    pub from: usize,
    /// Where the cursor is now
    pub to: usize,
}

impl SelectionRange {
    /// Create a new selection range.
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }

    /// Create a collapsed range (caret position).
    pub fn caret(offset: usize) -> Self {
        Self {
            from: offset,
            to: offset,
        }
    }

    /// Get the start (lower bound) of the range.
    pub fn start(&self) -> usize {
        self.from.min(self.to)
    }

    /// Get the end (upper bound) of the range.
    pub fn end(&self) -> usize {
        self.from.max(self.to)
    }

    /// Check if the range is collapsed (caret only, nothing selected).
    pub fn is_collapsed(&self) -> bool {
        self.from == self.to
    }

    /// Get the range length.
    pub fn len(&self) -> usize {
        self.end() - self.start()
    }

    /// Check if empty (same as is_collapsed).
    pub fn is_empty(&self) -> bool {
        self.is_collapsed()
    }

    /// Normalize so from <= to.
    pub fn normalize(self) -> Self {
        Self {
            from: self.start(),
            to: self.end(),
        }
    }
}

/// Origin of a draft-save request.
///
/// Routes user feedback only: manual saves toast, autosaves stay
/// silent. The in-flight guard is shared regardless of source.
#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub enum SaveSource {
    /// The operator pressed the save button.
    Manual,
    /// The idle autosave timer fired.
    Auto,
}

/// Formatting attributes at the current cursor.
///
/// The surface reports these synchronously on every selection or
/// content change; they bypass the content debounce entirely since
/// they are cheap and only reflect cursor context.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActiveFormats {
    /// Font size at the cursor, if the surface reports one.
    pub font_size: Option<SmolStr>,
    /// Font family at the cursor, if the surface reports one.
    pub font_family: Option<SmolStr>,
}
