use std::time::Instant;

use crate::{
    assets::image_ref::{AssetKind, AssetPicker, ImageRef, PickResult},
    config::opts::EditorOpts,
    document::model::{EditAction, LayoutDocument},
    foundation::core::{Point, PreviewRect},
    foundation::error::BrandpostResult,
    interaction::gesture::{DragTarget, GestureClassifier, GestureStep, PointerId, Tap},
    interaction::mappers::map_drag,
    persist::debounce::SaveScheduler,
    persist::store::PersistenceBridge,
};

/// Kind of a recorded pointer event.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEventKind {
    /// Press over the given regions (any order; the innermost one is tagged).
    Down {
        /// Regions under the pointer.
        regions: Vec<DragTarget>,
    },
    /// Pointer moved.
    Move,
    /// Pointer released.
    Up,
    /// The platform revoked pointer capture.
    CaptureLost,
}

/// One pointer event in preview coordinates, as recorded by a front-end or a replay file.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PointerEvent {
    /// What happened.
    #[serde(flatten)]
    pub kind: PointerEventKind,
    /// Pointer that produced the event.
    #[serde(default)]
    pub pointer: PointerId,
    /// Horizontal position.
    #[serde(default)]
    pub x: f64,
    /// Vertical position.
    #[serde(default)]
    pub y: f64,
}

/// The event-handling layer: owns the document and routes gestures, form edits, asset picks
/// and saves through pure reducers.
///
/// Nothing here is global; a front-end holds one session per open editor and forwards its
/// pointer events, form-control edits and timer ticks.
pub struct EditorSession<S> {
    doc: LayoutDocument,
    classifier: GestureClassifier,
    rect: PreviewRect,
    scheduler: SaveScheduler,
    store: S,
    key: String,
}

impl<S: PersistenceBridge> EditorSession<S> {
    /// Start a session with the default document, replaced by the stored one when present.
    pub fn open(store: S, opts: &EditorOpts) -> Self {
        let doc = match store.load(&opts.storage_key) {
            Ok(Some(doc)) => {
                tracing::info!(key = %opts.storage_key, "restored layout document");
                doc
            }
            Ok(None) => LayoutDocument::default(),
            Err(e) => {
                tracing::warn!(key = %opts.storage_key, error = %e, "could not load layout document, using defaults");
                LayoutDocument::default()
            }
        };
        Self {
            rect: PreviewRect::from_size(doc.format.preview_size()),
            doc,
            classifier: GestureClassifier::new(opts.drag_threshold_px),
            scheduler: SaveScheduler::new(opts.save_debounce(), opts.saving_indicator()),
            store,
            key: opts.storage_key.clone(),
        }
    }

    /// Current document.
    pub fn document(&self) -> &LayoutDocument {
        &self.doc
    }

    /// Consume the session, returning the document.
    pub fn into_document(self) -> LayoutDocument {
        self.doc
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current preview bounding box.
    pub fn preview_rect(&self) -> PreviewRect {
        self.rect
    }

    /// Update the preview bounding box (layout or viewport changed).
    pub fn set_preview_rect(&mut self, rect: PreviewRect) {
        self.rect = rect;
    }

    /// Region owning the pointer, if any.
    pub fn active_target(&self) -> Option<DragTarget> {
        self.classifier.active_target()
    }

    /// Press over `regions`; the innermost one is tagged. Returns whether a gesture started.
    pub fn pointer_down(&mut self, regions: &[DragTarget], pointer: PointerId, point: Point) -> bool {
        let Some(target) = DragTarget::innermost(regions.iter().copied()) else {
            return false;
        };
        let started = self.classifier.pointer_down(target, pointer, point);
        if started {
            tracing::trace!(?target, ?pointer, "pointer captured");
        }
        started
    }

    /// Feed a move; once it is a drag, the target's mapper updates the document.
    /// Returns whether the document changed.
    pub fn pointer_move(&mut self, pointer: PointerId, point: Point, now: Instant) -> bool {
        match self.classifier.pointer_move(pointer, point) {
            GestureStep::Drag { target, point } => {
                let next = map_drag(target, point, self.rect, self.doc.clone());
                self.replace(next, now)
            }
            GestureStep::Pending | GestureStep::Ignored => false,
        }
    }

    /// Release; returns the tap when the press never became a drag.
    pub fn pointer_up(&mut self, pointer: PointerId) -> Option<Tap> {
        let tap = self.classifier.pointer_up(pointer);
        if let Some(tap) = tap {
            tracing::debug!(target = ?tap.target, "tap");
        }
        tap
    }

    /// The platform revoked capture; reset so no target stays tagged.
    pub fn capture_lost(&mut self, pointer: PointerId) {
        if self.classifier.active_target().is_some() {
            tracing::debug!(?pointer, "pointer capture lost, gesture dropped");
        }
        self.classifier.capture_lost(pointer);
    }

    /// Dispatch one recorded event.
    pub fn handle_event(&mut self, ev: &PointerEvent, now: Instant) -> Option<Tap> {
        let point = Point::new(ev.x, ev.y);
        match &ev.kind {
            PointerEventKind::Down { regions } => {
                self.pointer_down(regions, ev.pointer, point);
                None
            }
            PointerEventKind::Move => {
                self.pointer_move(ev.pointer, point, now);
                None
            }
            PointerEventKind::Up => self.pointer_up(ev.pointer),
            PointerEventKind::CaptureLost => {
                self.capture_lost(ev.pointer);
                None
            }
        }
    }

    /// Act on a tap: ask `picker` for a replacement image for the tapped region.
    /// Returns whether the document changed. Headline taps do nothing.
    pub fn handle_tap(
        &mut self,
        tap: Tap,
        picker: &mut impl AssetPicker,
        now: Instant,
    ) -> BrandpostResult<bool> {
        let Some(kind) = tap.target.asset_kind() else {
            return Ok(false);
        };
        match picker.request(kind)? {
            PickResult::Picked(bytes) => {
                self.load_asset(kind, &bytes, now)?;
                Ok(true)
            }
            PickResult::Cancelled => Ok(false),
        }
    }

    /// Replace one image slot with picked bytes. On failure the document is left untouched.
    pub fn load_asset(&mut self, kind: AssetKind, bytes: &[u8], now: Instant) -> BrandpostResult<()> {
        let image = ImageRef::from_bytes(bytes)
            .and_then(|image| image.decode().map(|_| image))
            .inspect_err(|e| {
                tracing::warn!(?kind, error = %e, "picked image rejected");
            })?;
        let action = match kind {
            AssetKind::Background => EditAction::SetMainImage(Some(image)),
            AssetKind::Circle => EditAction::SetCircleImage(Some(image)),
        };
        self.apply(action, now);
        tracing::info!(?kind, bytes = bytes.len(), "image replaced");
        Ok(())
    }

    /// Apply a form-control edit. Returns whether the document changed.
    ///
    /// A format switch resizes the preview rect to the new format's preview size, keeping its
    /// origin; call [`EditorSession::set_preview_rect`] afterwards if the real box differs.
    pub fn apply(&mut self, action: EditAction, now: Instant) -> bool {
        let next = self.doc.clone().apply(action);
        if next.format != self.doc.format {
            let size = next.format.preview_size();
            self.rect = PreviewRect::new(self.rect.left(), self.rect.top(), size.width, size.height);
            tracing::debug!(format = next.format.name(), "preview rect follows format");
        }
        self.replace(next, now)
    }

    /// Fire a due save. Returns whether the store was written to (successfully or not).
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(doc) = self.scheduler.poll(now) else {
            return false;
        };
        self.write(&doc, now);
        true
    }

    /// Save any pending change immediately.
    pub fn flush(&mut self, now: Instant) -> bool {
        let Some(doc) = self.scheduler.flush() else {
            return false;
        };
        self.write(&doc, now);
        true
    }

    /// Whether the "saving" indicator is visible at `now`.
    pub fn is_saving(&self, now: Instant) -> bool {
        self.scheduler.is_saving(now)
    }

    /// True while a change waits for its debounce window.
    pub fn has_pending_save(&self) -> bool {
        self.scheduler.has_pending()
    }

    fn replace(&mut self, next: LayoutDocument, now: Instant) -> bool {
        if next == self.doc {
            return false;
        }
        self.doc = next;
        self.scheduler.schedule(self.doc.clone(), now);
        true
    }

    // Best-effort: failures are logged, never retried, and the indicator still clears.
    fn write(&mut self, doc: &LayoutDocument, now: Instant) {
        match self.store.save(&self.key, doc) {
            Ok(()) => tracing::debug!(key = %self.key, "layout document persisted"),
            Err(e) => tracing::warn!(key = %self.key, error = %e, "saving layout document failed"),
        }
        self.scheduler.mark_settled(now);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/session.rs"]
mod tests;
