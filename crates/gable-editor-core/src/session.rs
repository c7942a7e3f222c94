//! The editing session: document ownership, the draft/publish state
//! machine, idle autosave, and teardown.
//!
//! One `EditorSession` is one editing lifetime of one post. It owns
//! the in-memory document, the selection-preserving dispatcher, the
//! debounced content pipeline, and every timer deadline - nothing
//! lives at module scope, so sessions cannot leak state into each
//! other.
//!
//! Interior mutability (`RefCell`/`Cell`) mirrors the single-threaded
//! UI event loop that drives the session: event callbacks and
//! in-flight save futures share it without locking, and the in-flight
//! flags - not the borrow checker - are what guard against duplicate
//! submission.

use std::cell::{Cell, RefCell};
use std::time::Duration;
use web_time::Instant;

use gable_common::{CmsError, EditorConfig};

use crate::dispatcher::CommandDispatcher;
use crate::post::{Category, Post, PostStatus, derive_title};
use crate::store::{Notices, PostId, PostRecord, PostStore};
use crate::surface::{EditSurface, FormatCommand};
use crate::sync::ContentSync;
use crate::types::{ActiveFormats, SaveSource, SelectionRange};
use crate::validate::validate_post;

/// Idle-triggered autosave deadline.
///
/// The dirty flag and the deadline are one thing: a deadline is armed
/// exactly while unsaved changes exist. Every tracked-field change
/// restarts the wait; firing clears it.
#[derive(Debug)]
pub struct IdleAutosave {
    idle: Duration,
    deadline: Option<Instant>,
}

impl IdleAutosave {
    pub fn new(idle: Duration) -> Self {
        Self {
            idle,
            deadline: None,
        }
    }

    /// A tracked field changed at `now`; (re)start the idle wait.
    pub fn mark_dirty(&mut self, now: Instant) {
        self.deadline = Some(now + self.idle);
    }

    /// Whether unsaved changes are waiting on the idle period.
    pub fn is_dirty(&self) -> bool {
        self.deadline.is_some()
    }

    /// Fire if the idle period has elapsed. Firing clears the dirty
    /// flag - even if the save that follows fails, so a broken backend
    /// cannot turn autosave into a tight retry loop.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Drop the deadline without firing.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

/// One editing lifetime of one post.
pub struct EditorSession<S, N> {
    store: S,
    notices: N,
    post: RefCell<Post>,
    post_id: RefCell<Option<PostId>>,
    dispatcher: RefCell<CommandDispatcher>,
    sync: RefCell<ContentSync>,
    autosave: RefCell<Option<IdleAutosave>>,
    formats: RefCell<ActiveFormats>,
    /// Set once the operator has typed a title themselves; until then
    /// the title tracks the body content.
    title_edited: Cell<bool>,
    /// Shared in-flight guard for manual saves AND autosaves.
    draft_saving: Cell<bool>,
    publishing: Cell<bool>,
    torn_down: Cell<bool>,
}

impl<S: PostStore, N: Notices> EditorSession<S, N> {
    /// Start a session on a new, empty draft.
    pub fn new(store: S, notices: N, config: &EditorConfig) -> Self {
        Self {
            store,
            notices,
            post: RefCell::new(Post::new()),
            post_id: RefCell::new(None),
            dispatcher: RefCell::new(CommandDispatcher::new()),
            sync: RefCell::new(ContentSync::new(config.sync_debounce())),
            autosave: RefCell::new(None),
            formats: RefCell::new(ActiveFormats::default()),
            title_edited: Cell::new(false),
            draft_saving: Cell::new(false),
            publishing: Cell::new(false),
            torn_down: Cell::new(false),
        }
    }

    /// Start a session on an existing document (edit flow).
    pub async fn load(
        store: S,
        notices: N,
        config: &EditorConfig,
        id: PostId,
    ) -> Result<Self, CmsError> {
        let record = store.get(&id).await?;
        let session = Self::new(store, notices, config);
        *session.post.borrow_mut() = record.hydrate();
        *session.post_id.borrow_mut() = Some(id);
        // An existing document already has a real title.
        session.title_edited.set(true);
        Ok(session)
    }

    /// Arm autosave with the given idle period.
    ///
    /// Hosts arm this only while the document is a draft; a published
    /// document never gets the capability, so autosave cannot quietly
    /// regress it to draft.
    pub fn with_autosave(self, idle: Duration) -> Self {
        *self.autosave.borrow_mut() = Some(IdleAutosave::new(idle));
        self
    }

    // --- surface events, forwarded by the host -------------------------

    /// The surface reported new serialized content.
    pub fn content_changed(&self, content: String, now: Instant) {
        if self.torn_down.get() {
            return;
        }
        self.sync.borrow_mut().content_changed(content, now);
    }

    /// The surface reported a selection change.
    pub fn selection_changed(&self, range: SelectionRange) {
        self.dispatcher.borrow_mut().selection_changed(range);
    }

    /// The surface reported the formatting at the cursor. Applied
    /// immediately - this never waits on the content debounce.
    pub fn formats_changed(&self, formats: ActiveFormats) {
        *self.formats.borrow_mut() = formats;
    }

    pub fn active_formats(&self) -> ActiveFormats {
        self.formats.borrow().clone()
    }

    // --- commands ------------------------------------------------------

    /// Run a formatting command through the selection-preserving
    /// dispatcher.
    pub fn dispatch<E: EditSurface>(&self, surface: &mut E, command: FormatCommand) {
        self.dispatcher.borrow_mut().dispatch(surface, command);
    }

    /// Push the session's body into a freshly initialized surface.
    pub fn install_body<E: EditSurface>(&self, surface: &mut E) {
        surface.set_serialized_content(&self.post.borrow().body, false);
    }

    // --- field mutators ------------------------------------------------

    /// Set the title from operator input. Marks the title as manually
    /// edited; the body no longer drives it.
    pub fn set_title(&self, title: &str, now: Instant) {
        self.post.borrow_mut().title = title.into();
        self.title_edited.set(!title.trim().is_empty());
        self.mark_dirty(now);
    }

    pub fn set_slug(&self, slug: Option<&str>, now: Instant) {
        self.post.borrow_mut().slug = slug.map(Into::into);
        self.mark_dirty(now);
    }

    pub fn set_highlight(&self, highlight: bool, now: Instant) {
        self.post.borrow_mut().highlight = highlight;
        self.mark_dirty(now);
    }

    pub fn add_tag(&self, tag: &str, now: Instant) -> bool {
        let added = self.post.borrow_mut().add_tag(tag);
        if added {
            self.mark_dirty(now);
        }
        added
    }

    pub fn remove_tag(&self, tag: &str, now: Instant) -> bool {
        let removed = self.post.borrow_mut().remove_tag(tag);
        if removed {
            self.mark_dirty(now);
        }
        removed
    }

    pub fn add_category(&self, category: Category, now: Instant) -> bool {
        let added = self.post.borrow_mut().add_category(category);
        if added {
            self.mark_dirty(now);
        }
        added
    }

    pub fn remove_category(&self, category: Category, now: Instant) -> bool {
        let removed = self.post.borrow_mut().remove_category(category);
        if removed {
            self.mark_dirty(now);
        }
        removed
    }

    // --- ticks ---------------------------------------------------------

    /// Advance the session's timers. The host calls this from its
    /// event loop; anything due - a debounced content commit, an idle
    /// autosave - runs here.
    pub async fn tick(&self, now: Instant) {
        if let Some(content) = self.sync.borrow_mut().poll(now) {
            self.apply_body(content);
            self.mark_dirty(now);
        }
        let autosave_due = self
            .autosave
            .borrow_mut()
            .as_mut()
            .is_some_and(|autosave| autosave.poll(now));
        if autosave_due {
            self.save_draft(SaveSource::Auto).await;
        }
    }

    // --- save / publish ------------------------------------------------

    /// Save the document as a draft.
    ///
    /// Manual saves toast on success and failure; autosaves stay
    /// silent either way. One in-flight guard covers both sources - a
    /// save requested while another is running is a no-op. Returns
    /// whether a save was persisted.
    pub async fn save_draft(&self, source: SaveSource) -> bool {
        if self.draft_saving.get() {
            tracing::debug!(?source, "draft save already in flight, ignoring");
            return false;
        }
        if self.post.borrow().status == PostStatus::Published {
            tracing::warn!("ignoring draft save for a published post");
            return false;
        }
        self.settle_content();
        if let Err(err) = validate_post(&self.post.borrow()) {
            match source {
                SaveSource::Manual => self.notices.error(&err.to_string()),
                SaveSource::Auto => tracing::warn!(%err, "autosave skipped by validation"),
            }
            return false;
        }

        self.draft_saving.set(true);
        let record = PostRecord::from_post(&self.post.borrow(), PostStatus::Draft);
        let existing = self.post_id.borrow().clone();
        let result = match &existing {
            Some(id) => self.store.update(id, &record).await.map(|()| id.clone()),
            None => self.store.create(&record).await,
        };
        self.draft_saving.set(false);

        match result {
            Ok(id) => {
                *self.post_id.borrow_mut() = Some(id);
                match source {
                    SaveSource::Manual => self.notices.success("Draft saved"),
                    SaveSource::Auto => tracing::debug!("draft autosaved"),
                }
                true
            }
            Err(err) => {
                match source {
                    SaveSource::Manual => {
                        self.notices.error(&format!("Saving draft failed: {err}"))
                    }
                    // Best effort: the dirty flag was already cleared
                    // when the timer fired, so this will not retry in
                    // a loop.
                    SaveSource::Auto => tracing::warn!(%err, "autosave failed"),
                }
                false
            }
        }
    }

    /// Publish the document.
    ///
    /// On success the local status flips to `Published`, autosave is
    /// disarmed, and the returned id signals the host to navigate away
    /// from the editor. On failure the editor stays as it was.
    pub async fn publish(&self) -> Option<PostId> {
        if self.publishing.get() {
            tracing::debug!("publish already in flight, ignoring");
            return None;
        }
        self.settle_content();
        if let Err(err) = validate_post(&self.post.borrow()) {
            self.notices.error(&err.to_string());
            return None;
        }

        self.publishing.set(true);
        let record = PostRecord::from_post(&self.post.borrow(), PostStatus::Published);
        let existing = self.post_id.borrow().clone();
        let result = match &existing {
            Some(id) => self.store.update(id, &record).await.map(|()| id.clone()),
            None => self.store.create(&record).await,
        };
        self.publishing.set(false);

        match result {
            Ok(id) => {
                *self.post_id.borrow_mut() = Some(id.clone());
                self.post.borrow_mut().status = PostStatus::Published;
                // A published post no longer autosaves as a draft.
                *self.autosave.borrow_mut() = None;
                self.notices.success("Post published");
                Some(id)
            }
            Err(err) => {
                self.notices.error(&format!("Publishing failed: {err}"));
                None
            }
        }
    }

    // --- lifecycle -----------------------------------------------------

    /// Tear the session down: flush the pending content write into the
    /// in-memory document, cancel every timer, and drop the selection
    /// snapshot. Nothing runs after this; late surface events are
    /// ignored.
    pub fn teardown(&self) {
        if self.torn_down.replace(true) {
            return;
        }
        if let Some(content) = self.sync.borrow_mut().flush() {
            tracing::debug!("flushing pending content at teardown");
            self.apply_body(content);
        }
        let mut autosave = self.autosave.borrow_mut();
        if let Some(autosave) = autosave.as_mut() {
            autosave.cancel();
        }
        self.dispatcher.borrow_mut().clear();
    }

    // --- accessors -----------------------------------------------------

    /// Snapshot of the document as currently edited.
    pub fn post(&self) -> Post {
        self.post.borrow().clone()
    }

    pub fn post_id(&self) -> Option<PostId> {
        self.post_id.borrow().clone()
    }

    pub fn is_saving(&self) -> bool {
        self.draft_saving.get()
    }

    pub fn is_publishing(&self) -> bool {
        self.publishing.get()
    }

    pub fn is_dirty(&self) -> bool {
        self.autosave
            .borrow()
            .as_ref()
            .is_some_and(IdleAutosave::is_dirty)
    }

    pub fn last_selection(&self) -> Option<SelectionRange> {
        self.dispatcher.borrow().last_selection()
    }

    // --- internals -----------------------------------------------------

    /// Write committed surface content into the document, deriving a
    /// working title from it while the operator has not typed one.
    fn apply_body(&self, content: String) {
        let mut post = self.post.borrow_mut();
        post.body = content;
        if !self.title_edited.get() {
            post.title = derive_title(&post.body);
        }
    }

    /// Commit any content still waiting on its quiet period before a
    /// save reads the document.
    fn settle_content(&self) {
        let flushed = self.sync.borrow_mut().flush();
        if let Some(content) = flushed {
            self.apply_body(content);
        }
    }

    fn mark_dirty(&self, now: Instant) {
        let mut autosave = self.autosave.borrow_mut();
        if let Some(autosave) = autosave.as_mut() {
            autosave.mark_dirty(now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_autosave_fires_once_after_idle() {
        let mut autosave = IdleAutosave::new(ms(5_000));
        let t0 = Instant::now();

        autosave.mark_dirty(t0);
        assert!(autosave.is_dirty());
        assert!(!autosave.poll(t0 + ms(4_999)));
        assert!(autosave.poll(t0 + ms(5_000)));
        // Firing cleared the dirty flag; nothing fires again.
        assert!(!autosave.is_dirty());
        assert!(!autosave.poll(t0 + ms(60_000)));
    }

    #[test]
    fn test_change_just_before_deadline_restarts_the_wait() {
        let mut autosave = IdleAutosave::new(ms(5_000));
        let t0 = Instant::now();

        autosave.mark_dirty(t0);
        // One more change, 1ms before the idle period elapses.
        autosave.mark_dirty(t0 + ms(4_999));

        // Nothing at the original deadline.
        assert!(!autosave.poll(t0 + ms(5_000)));
        // Fires a full idle period after the last change.
        assert!(autosave.poll(t0 + ms(9_999)));
    }

    #[test]
    fn test_cancel_disarms_without_firing() {
        let mut autosave = IdleAutosave::new(ms(5_000));
        let t0 = Instant::now();

        autosave.mark_dirty(t0);
        autosave.cancel();
        assert!(!autosave.poll(t0 + ms(10_000)));
    }
}
