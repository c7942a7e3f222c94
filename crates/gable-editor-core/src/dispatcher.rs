//! Selection-preserving command dispatch.
//!
//! Toolbar buttons, color pickers, and drawers steal focus from the
//! editing surface, and by the time their command fires the selection
//! the operator made is usually gone. The dispatcher keeps the last
//! selection the surface reported and re-establishes it - refocus,
//! re-apply the range - before every command, so formatting always
//! lands on the text the operator had selected.

use crate::surface::{EditSurface, FormatCommand, SurfaceOp};
use crate::types::SelectionRange;

/// Tracks the last known selection and mediates every formatting
/// command against it.
///
/// The selection snapshot is single-writer: only selection-change
/// events from the surface overwrite it. Command execution reads it.
#[derive(Debug, Default)]
pub struct CommandDispatcher {
    last_selection: Option<SelectionRange>,
}

impl CommandDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the selection reported by the surface. Overwrites any
    /// previous snapshot wholesale.
    pub fn selection_changed(&mut self, range: SelectionRange) {
        self.last_selection = Some(range);
    }

    /// The last selection the surface reported, if any.
    pub fn last_selection(&self) -> Option<SelectionRange> {
        self.last_selection
    }

    /// Drop the snapshot. Called at session teardown; a range into a
    /// torn-down surface is meaningless.
    pub fn clear(&mut self) {
        self.last_selection = None;
    }

    /// Re-establish focus and selection, then run `command`.
    ///
    /// Against an uninitialized surface every command is a logged
    /// no-op.
    pub fn dispatch<S: EditSurface>(&mut self, surface: &mut S, command: FormatCommand) {
        if !surface.is_ready() {
            tracing::debug!(?command, "surface not ready, dropping command");
            return;
        }
        if !surface.is_focused() {
            surface.focus();
        }
        let selection = self.restore_selection(surface);

        let op = match command {
            FormatCommand::SetLink { url, label } => {
                self.dispatch_link(surface, selection, url, label);
                return;
            }
            FormatCommand::Bold => SurfaceOp::ToggleBold,
            FormatCommand::Italic => SurfaceOp::ToggleItalic,
            FormatCommand::Strikethrough => SurfaceOp::ToggleStrikethrough,
            FormatCommand::Color(color) => SurfaceOp::SetColor(color),
            FormatCommand::FontSize(size) => SurfaceOp::SetFontSize(size),
            FormatCommand::FontFamily(family) => SurfaceOp::SetFontFamily(family),
            FormatCommand::Heading(level) => SurfaceOp::SetHeading(level),
            FormatCommand::Align(align) => SurfaceOp::SetAlign(align),
            FormatCommand::BulletList => SurfaceOp::ToggleBulletList,
            FormatCommand::NumberedList => SurfaceOp::ToggleNumberedList,
            FormatCommand::Quote => SurfaceOp::ToggleQuote,
            FormatCommand::InsertImage { url } => SurfaceOp::InsertImage(url),
            FormatCommand::InsertVideo { url } => SurfaceOp::InsertVideo(url),
            FormatCommand::InsertTable { rows, cols } => SurfaceOp::InsertTable { rows, cols },
        };
        surface.execute(op);
    }

    /// Re-apply the last known selection if it is a real range.
    ///
    /// A collapsed snapshot is not re-applied - the surface restores
    /// its own caret on focus - but it still anchors point insertions.
    fn restore_selection<S: EditSurface>(&self, surface: &mut S) -> SelectionRange {
        match self.last_selection {
            Some(sel) if !sel.is_collapsed() => {
                let sel = sel.normalize();
                surface.apply_selection(sel);
                sel
            }
            Some(sel) => sel.normalize(),
            None => SelectionRange::caret(0),
        }
    }

    /// Link insertion has two shapes: with a selection, the link mark
    /// is applied directly; without one, the link text is inserted
    /// first and the mark applied to exactly that span. An empty URL
    /// removes the mark instead.
    fn dispatch_link<S: EditSurface>(
        &mut self,
        surface: &mut S,
        selection: SelectionRange,
        url: smol_str::SmolStr,
        label: smol_str::SmolStr,
    ) {
        if url.is_empty() {
            surface.execute(SurfaceOp::RemoveLink);
            return;
        }
        if !selection.is_collapsed() {
            surface.execute(SurfaceOp::ApplyLink(url));
            return;
        }
        if label.is_empty() {
            tracing::debug!("no selection and no link text, dropping link command");
            return;
        }
        let start = selection.start();
        let span = SelectionRange::new(start, start + label.chars().count());
        surface.apply_selection(SelectionRange::caret(start));
        surface.execute(SurfaceOp::InsertText(label));
        surface.apply_selection(span);
        surface.execute(SurfaceOp::ApplyLink(url));
        self.last_selection = Some(span);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::TextAlign;

    /// Records every call the dispatcher makes, in order.
    #[derive(Debug, PartialEq, Eq)]
    enum Call {
        Focus,
        ApplySelection(SelectionRange),
        Execute(SurfaceOp),
    }

    struct FakeSurface {
        ready: bool,
        focused: bool,
        calls: Vec<Call>,
    }

    impl FakeSurface {
        fn new() -> Self {
            Self {
                ready: true,
                focused: true,
                calls: Vec::new(),
            }
        }

        fn unfocused() -> Self {
            Self {
                focused: false,
                ..Self::new()
            }
        }
    }

    impl EditSurface for FakeSurface {
        fn is_ready(&self) -> bool {
            self.ready
        }

        fn serialized_content(&self) -> String {
            String::new()
        }

        fn set_serialized_content(&mut self, _content: &str, _emit_change: bool) {}

        fn apply_selection(&mut self, range: SelectionRange) {
            self.calls.push(Call::ApplySelection(range));
        }

        fn is_focused(&self) -> bool {
            self.focused
        }

        fn focus(&mut self) {
            self.focused = true;
            self.calls.push(Call::Focus);
        }

        fn execute(&mut self, op: SurfaceOp) {
            self.calls.push(Call::Execute(op));
        }
    }

    #[test]
    fn test_selection_restored_after_focus_loss() {
        let mut dispatcher = CommandDispatcher::new();
        let mut surface = FakeSurface::unfocused();

        dispatcher.selection_changed(SelectionRange::new(5, 12));
        dispatcher.dispatch(&mut surface, FormatCommand::Bold);

        assert_eq!(
            surface.calls,
            [
                Call::Focus,
                Call::ApplySelection(SelectionRange::new(5, 12)),
                Call::Execute(SurfaceOp::ToggleBold),
            ]
        );
    }

    #[test]
    fn test_focused_surface_is_not_refocused() {
        let mut dispatcher = CommandDispatcher::new();
        let mut surface = FakeSurface::new();

        dispatcher.selection_changed(SelectionRange::new(3, 8));
        dispatcher.dispatch(&mut surface, FormatCommand::Italic);

        assert_eq!(
            surface.calls,
            [
                Call::ApplySelection(SelectionRange::new(3, 8)),
                Call::Execute(SurfaceOp::ToggleItalic),
            ]
        );
    }

    #[test]
    fn test_backwards_selection_is_normalized() {
        let mut dispatcher = CommandDispatcher::new();
        let mut surface = FakeSurface::new();

        dispatcher.selection_changed(SelectionRange::new(12, 5));
        dispatcher.dispatch(&mut surface, FormatCommand::Align(TextAlign::Center));

        assert_eq!(
            surface.calls[0],
            Call::ApplySelection(SelectionRange::new(5, 12))
        );
    }

    #[test]
    fn test_collapsed_selection_is_not_reapplied() {
        let mut dispatcher = CommandDispatcher::new();
        let mut surface = FakeSurface::new();

        dispatcher.selection_changed(SelectionRange::caret(4));
        dispatcher.dispatch(&mut surface, FormatCommand::InsertImage {
            url: "/media/roof.jpg".into(),
        });

        assert_eq!(
            surface.calls,
            [Call::Execute(SurfaceOp::InsertImage("/media/roof.jpg".into()))]
        );
    }

    #[test]
    fn test_newer_selection_overwrites_older() {
        let mut dispatcher = CommandDispatcher::new();
        dispatcher.selection_changed(SelectionRange::new(1, 2));
        dispatcher.selection_changed(SelectionRange::new(7, 9));
        assert_eq!(dispatcher.last_selection(), Some(SelectionRange::new(7, 9)));
    }

    #[test]
    fn test_unready_surface_drops_commands() {
        let mut dispatcher = CommandDispatcher::new();
        let mut surface = FakeSurface::new();
        surface.ready = false;

        dispatcher.selection_changed(SelectionRange::new(5, 12));
        dispatcher.dispatch(&mut surface, FormatCommand::Bold);
        dispatcher.dispatch(&mut surface, FormatCommand::Heading(2));

        assert!(surface.calls.is_empty());
    }

    #[test]
    fn test_link_on_empty_selection_marks_inserted_span() {
        let mut dispatcher = CommandDispatcher::new();
        let mut surface = FakeSurface::new();

        dispatcher.selection_changed(SelectionRange::caret(10));
        dispatcher.dispatch(&mut surface, FormatCommand::SetLink {
            url: "https://example.com".into(),
            label: "Example".into(),
        });

        // The mark covers exactly the 7 inserted characters.
        assert_eq!(
            surface.calls,
            [
                Call::ApplySelection(SelectionRange::caret(10)),
                Call::Execute(SurfaceOp::InsertText("Example".into())),
                Call::ApplySelection(SelectionRange::new(10, 17)),
                Call::Execute(SurfaceOp::ApplyLink("https://example.com".into())),
            ]
        );
    }

    #[test]
    fn test_link_on_existing_selection_applies_directly() {
        let mut dispatcher = CommandDispatcher::new();
        let mut surface = FakeSurface::new();

        dispatcher.selection_changed(SelectionRange::new(2, 6));
        dispatcher.dispatch(&mut surface, FormatCommand::SetLink {
            url: "https://example.com".into(),
            label: "ignored".into(),
        });

        assert_eq!(
            surface.calls,
            [
                Call::ApplySelection(SelectionRange::new(2, 6)),
                Call::Execute(SurfaceOp::ApplyLink("https://example.com".into())),
            ]
        );
    }

    #[test]
    fn test_empty_url_removes_link_mark() {
        let mut dispatcher = CommandDispatcher::new();
        let mut surface = FakeSurface::new();

        dispatcher.selection_changed(SelectionRange::new(2, 6));
        dispatcher.dispatch(&mut surface, FormatCommand::SetLink {
            url: "".into(),
            label: "".into(),
        });

        assert_eq!(
            surface.calls,
            [
                Call::ApplySelection(SelectionRange::new(2, 6)),
                Call::Execute(SurfaceOp::RemoveLink),
            ]
        );
    }

    #[test]
    fn test_clear_drops_snapshot() {
        let mut dispatcher = CommandDispatcher::new();
        dispatcher.selection_changed(SelectionRange::new(5, 12));
        dispatcher.clear();
        assert_eq!(dispatcher.last_selection(), None);
    }
}
