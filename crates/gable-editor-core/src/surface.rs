//! The editing-surface capability and its command types.
//!
//! The rich-text surface is opaque to this core: we never touch its
//! internal document tree, only serialized content, selection ranges,
//! and semantic commands. Any engine that can satisfy this trait can
//! back the dashboard editor.

use smol_str::SmolStr;

use crate::types::SelectionRange;

/// Horizontal alignment for block content.
#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
    Justify,
}

/// Formatting commands the dashboard toolbar and drawers can issue.
///
/// Range commands apply to the restored selection; insert commands
/// operate at the restored caret and do not require a non-collapsed
/// range. `SetLink` carries both the target URL and the text to insert
/// when nothing is selected; an empty URL removes the link mark.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormatCommand {
    Bold,
    Italic,
    Strikethrough,
    Color(SmolStr),
    FontSize(SmolStr),
    FontFamily(SmolStr),
    Heading(u8), // 1-6
    Align(TextAlign),
    BulletList,
    NumberedList,
    Quote,
    SetLink { url: SmolStr, label: SmolStr },
    InsertImage { url: SmolStr },
    InsertVideo { url: SmolStr },
    InsertTable { rows: u8, cols: u8 },
}

/// Primitive operations the dispatcher drives the surface with.
///
/// One `FormatCommand` may expand to several ops - link insertion on
/// an empty selection inserts text, selects the inserted span, then
/// applies the link mark to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SurfaceOp {
    ToggleBold,
    ToggleItalic,
    ToggleStrikethrough,
    SetColor(SmolStr),
    SetFontSize(SmolStr),
    SetFontFamily(SmolStr),
    SetHeading(u8),
    SetAlign(TextAlign),
    ToggleBulletList,
    ToggleNumberedList,
    ToggleQuote,
    InsertText(SmolStr),
    ApplyLink(SmolStr),
    RemoveLink,
    InsertImage(SmolStr),
    InsertVideo(SmolStr),
    InsertTable { rows: u8, cols: u8 },
}

/// The opaque rich-text editing surface.
///
/// Hosts forward the surface's `onContentChanged` and
/// `onSelectionChanged` events into the session; this trait covers the
/// calls flowing the other way.
pub trait EditSurface {
    /// Whether the surface has finished initializing. Commands against
    /// an uninitialized surface are dropped, never errors.
    fn is_ready(&self) -> bool;

    /// Serialize the surface's current content.
    fn serialized_content(&self) -> String;

    /// Replace the surface's content. `emit_change` controls whether
    /// the surface reports the replacement back as a content change.
    fn set_serialized_content(&mut self, content: &str, emit_change: bool);

    /// Make `range` the active selection.
    fn apply_selection(&mut self, range: SelectionRange);

    /// Whether the surface currently has focus.
    fn is_focused(&self) -> bool;

    /// Give the surface focus.
    fn focus(&mut self);

    /// Execute a primitive operation against the current selection or
    /// caret.
    fn execute(&mut self, op: SurfaceOp);
}
