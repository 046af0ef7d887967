//! Brandpost is the layout engine behind a branded social-media post editor.
//!
//! A post is a [`LayoutDocument`]: a background photo, an optional circular inset photo, a brand
//! name, and a headline with `{highlighted}` segments. The crate turns pointer gestures over a
//! live preview into normalized, persisted layout parameters and exports the result as a PNG.
//!
//! # Pipeline overview
//!
//! 1. **Classify**: pointer down/move/up over a region -> [`Tap`] or drag ([`GestureClassifier`])
//! 2. **Map**: drag coordinates + preview rect + document -> new document ([`map_drag`])
//! 3. **Derive**: document -> font size, headline segments, placement ([`PostLayout`])
//! 4. **Persist**: debounced single-slot saves through a [`PersistenceBridge`]
//! 5. **Export**: document -> [`RasterImage`] -> PNG, gated so only one export runs at a time
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Immutable-by-replacement**: every edit produces a new document value.
//! - **Total geometry**: drag mapping and setters clamp, they never fail.
//! - **Resolution independence**: persisted geometry is in percentages of the preview, except
//!   the headline offset which composes with a per-format pixel baseline.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod assets;
mod config;
mod document;
mod export;
mod foundation;
mod interaction;
mod persist;
mod render;

pub use assets::image_ref::{AssetKind, AssetPicker, ImageRef, PickResult};
pub use config::opts::{EditorOpts, ExportOpts, MAX_EXPORT_SCALE};
pub use document::color::Color;
pub use document::derive::{
    HeadlineSegment, LINE_HEIGHT, PostLayout, ROOT_EM_PX, font_size_rem, segment_headline,
};
pub use document::format::PostFormat;
pub use document::model::{EditAction, LayoutDocument};
pub use export::exporter::{ExportOutcome, Exporter};
pub use foundation::core::{Point, PreviewRect, Rect, Size};
pub use foundation::error::{BrandpostError, BrandpostResult};
pub use interaction::gesture::{
    DEFAULT_DRAG_THRESHOLD_PX, DragTarget, GestureClassifier, GestureStep, PointerId, Tap,
};
pub use interaction::mappers::{map_background, map_circle, map_drag, map_headline};
pub use interaction::session::{EditorSession, PointerEvent, PointerEventKind};
pub use persist::debounce::SaveScheduler;
pub use persist::store::{JsonFileStore, MemoryStore, PersistenceBridge};
pub use render::cpu::CpuRasterizer;
pub use render::raster::{CaptureOpts, RasterImage, Rasterizer};
