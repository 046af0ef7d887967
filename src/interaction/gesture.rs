use crate::{assets::image_ref::AssetKind, foundation::core::Point};

/// Movement (per axis, device-independent pixels) a pointer may jitter before a press
/// becomes a drag. Compared with `>`, so a move of exactly this much is still a tap.
pub const DEFAULT_DRAG_THRESHOLD_PX: f64 = 5.0;

/// Region of the preview that owns pointer-move interpretation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragTarget {
    /// Full-bleed background photo (bottom layer).
    Background,
    /// Headline block.
    Headline,
    /// Circular inset, layered over everything else.
    Circle,
}

impl DragTarget {
    fn z_order(self) -> u8 {
        match self {
            Self::Background => 0,
            Self::Headline => 1,
            Self::Circle => 2,
        }
    }

    /// The top-most of the regions under the pointer.
    ///
    /// Equivalent to stopping event propagation at the innermost handler: a press on the inset
    /// never also tags the background underneath.
    pub fn innermost(regions: impl IntoIterator<Item = DragTarget>) -> Option<DragTarget> {
        regions.into_iter().max_by_key(|t| t.z_order())
    }

    /// Image slot replaced by a tap on this region; `None` for the headline.
    pub fn asset_kind(self) -> Option<AssetKind> {
        match self {
            Self::Background => Some(AssetKind::Background),
            Self::Circle => Some(AssetKind::Circle),
            Self::Headline => None,
        }
    }
}

/// Platform pointer identifier (mouse, pen or one touch contact).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct PointerId(pub i32);

/// A press/release pair that stayed within the drag threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tap {
    /// Region that was pressed.
    pub target: DragTarget,
}

/// What a pointer-move means for the active gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureStep {
    /// No gesture owns this pointer.
    Ignored,
    /// Still within the threshold; could become a tap or a drag.
    Pending,
    /// Drag in progress: route `point` to the mapper for `target`.
    Drag {
        /// Region being dragged.
        target: DragTarget,
        /// Current pointer position.
        point: Point,
    },
}

#[derive(Clone, Copy, Debug)]
struct ActiveGesture {
    target: DragTarget,
    pointer: PointerId,
    start: Point,
    dragged: bool,
}

/// Tap-vs-drag state machine over a single pointer stream.
///
/// At most one target is active. A press captures its pointer: moves and releases from other
/// pointers are ignored until the captured one is released or its capture is lost.
#[derive(Clone, Debug)]
pub struct GestureClassifier {
    threshold: f64,
    active: Option<ActiveGesture>,
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_DRAG_THRESHOLD_PX)
    }
}

impl GestureClassifier {
    /// Classifier with a custom drag threshold (negative values behave like 0).
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.max(0.0),
            active: None,
        }
    }

    /// Drag threshold in use.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Region currently owning the pointer, if any.
    pub fn active_target(&self) -> Option<DragTarget> {
        self.active.map(|g| g.target)
    }

    /// True once the active gesture has crossed the threshold.
    pub fn is_dragging(&self) -> bool {
        self.active.is_some_and(|g| g.dragged)
    }

    /// Start a gesture on `target`. Returns `false` (and changes nothing) while another
    /// gesture holds the capture.
    pub fn pointer_down(&mut self, target: DragTarget, pointer: PointerId, point: Point) -> bool {
        if self.active.is_some() {
            return false;
        }
        self.active = Some(ActiveGesture {
            target,
            pointer,
            start: point,
            dragged: false,
        });
        true
    }

    /// Feed a move. Once a drag starts it never reverts to pending, even if the pointer comes
    /// back near the start point.
    pub fn pointer_move(&mut self, pointer: PointerId, point: Point) -> GestureStep {
        let threshold = self.threshold;
        let Some(g) = self.active.as_mut().filter(|g| g.pointer == pointer) else {
            return GestureStep::Ignored;
        };
        if !g.dragged {
            let dx = (point.x - g.start.x).abs();
            let dy = (point.y - g.start.y).abs();
            if dx > threshold || dy > threshold {
                g.dragged = true;
            }
        }
        if g.dragged {
            GestureStep::Drag {
                target: g.target,
                point,
            }
        } else {
            GestureStep::Pending
        }
    }

    /// Finish the gesture. Emits a [`Tap`] only if no move ever crossed the threshold.
    pub fn pointer_up(&mut self, pointer: PointerId) -> Option<Tap> {
        let g = self.active.filter(|g| g.pointer == pointer)?;
        self.active = None;
        (!g.dragged).then_some(Tap { target: g.target })
    }

    /// The platform revoked capture without a release: drop the gesture, no tap.
    pub fn capture_lost(&mut self, pointer: PointerId) {
        if self.active.is_some_and(|g| g.pointer == pointer) {
            self.active = None;
        }
    }

    /// Drop any gesture regardless of pointer (e.g. the preview was torn down).
    pub fn reset(&mut self) {
        self.active = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/gesture.rs"]
mod tests;
