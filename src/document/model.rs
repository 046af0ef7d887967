use std::path::Path;

use crate::{
    assets::image_ref::ImageRef,
    document::{color::Color, format::PostFormat},
    foundation::core::clamp_total,
    foundation::error::{BrandpostError, BrandpostResult},
};

pub(crate) const MAIN_IMAGE_Y_RANGE: (f64, f64) = (0.0, 100.0);
pub(crate) const CIRCLE_SIZE_RANGE: (f64, f64) = (10.0, 70.0);
pub(crate) const CIRCLE_IMAGE_SCALE_RANGE: (f64, f64) = (1.0, 3.0);
pub(crate) const CIRCLE_IMAGE_Y_RANGE: (f64, f64) = (0.0, 100.0);
pub(crate) const HEADLINE_SIZE_RANGE: (u32, u32) = (40, 160);

const DEFAULT_BRAND_NAME: &str = "EZEN NEWS";
const DEFAULT_HEADLINE: &str =
    "EZEN NEWS revelado: Novo gerador de posts {revoluciona} design digital";

/// The single source of truth for one post, persisted as a unit.
///
/// Geometry is stored in percentages of the preview so it survives responsive resizing.
/// `headline_y` is the exception: a pixel offset on top of the format's headline baseline.
///
/// Documents are replaced, never patched: every edit goes through [`LayoutDocument::apply`] or a
/// drag mapper and yields a new value whose clamps already hold.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutDocument {
    /// Output format.
    pub format: PostFormat,
    /// Brand name shown at the top.
    pub brand_name: String,
    /// Headline; `{...}` marks highlighted segments.
    pub headline_text: String,
    /// Color of highlighted headline segments.
    pub highlight_color: Color,
    /// Color of the brand name and the inset ring.
    pub brand_color: Color,
    /// Background photo.
    pub main_image_ref: Option<ImageRef>,
    /// Circular inset photo.
    pub circle_image_ref: Option<ImageRef>,
    /// Vertical pan of the background, 0 = top-aligned, 100 = bottom-aligned.
    pub main_image_y: f64,
    /// Inset distance from the right edge, percent of preview width.
    pub circle_x: f64,
    /// Inset distance from the top edge, percent of preview height.
    pub circle_y: f64,
    /// Inset diameter, percent of preview width, in [10, 70].
    pub circle_size: f64,
    /// Zoom of the inset content, in [1, 3].
    pub circle_image_scale: f64,
    /// Vertical pan of the inset content, in [0, 100].
    pub circle_image_y: f64,
    /// Headline size, percent of the format's base size, in [40, 160].
    pub headline_size: u32,
    /// Pixel offset above the format's headline baseline (positive moves up).
    pub headline_y: f64,
}

impl Default for LayoutDocument {
    fn default() -> Self {
        Self {
            format: PostFormat::Square,
            brand_name: DEFAULT_BRAND_NAME.to_owned(),
            headline_text: DEFAULT_HEADLINE.to_owned(),
            highlight_color: Color::rgb(0xfa, 0xcc, 0x15),
            brand_color: Color::WHITE,
            main_image_ref: None,
            circle_image_ref: None,
            main_image_y: 50.0,
            circle_x: 5.0,
            circle_y: 5.0,
            circle_size: 30.0,
            circle_image_scale: 1.0,
            circle_image_y: 50.0,
            headline_size: 100,
            headline_y: 0.0,
        }
    }
}

/// A form-control edit. Applied with [`LayoutDocument::apply`].
#[derive(Clone, Debug, PartialEq)]
pub enum EditAction {
    /// Switch the output format.
    SetFormat(PostFormat),
    /// Replace the brand name.
    SetBrandName(String),
    /// Replace the headline text.
    SetHeadlineText(String),
    /// Replace the highlight color.
    SetHighlightColor(Color),
    /// Replace the brand color.
    SetBrandColor(Color),
    /// Replace (or clear) the background photo.
    SetMainImage(Option<ImageRef>),
    /// Replace (or clear) the inset photo.
    SetCircleImage(Option<ImageRef>),
    /// Set the background pan.
    SetMainImageY(f64),
    /// Move the inset; values are clamped so the circle stays inside the preview.
    SetCirclePosition {
        /// Distance from the right edge, percent.
        x: f64,
        /// Distance from the top edge, percent.
        y: f64,
    },
    /// Resize the inset, re-clamping its position.
    SetCircleSize(f64),
    /// Set the inset zoom.
    SetCircleImageScale(f64),
    /// Set the inset content pan.
    SetCircleImageY(f64),
    /// Set the headline size percentage.
    SetHeadlineSize(u32),
    /// Set the headline offset in pixels.
    SetHeadlineY(f64),
    /// Put all geometry back to defaults, keeping text, colors, images and format.
    ResetLayout,
}

impl LayoutDocument {
    /// Apply one edit and return the resulting document.
    pub fn apply(self, action: EditAction) -> Self {
        match action {
            EditAction::SetFormat(format) => Self { format, ..self },
            EditAction::SetBrandName(brand_name) => Self { brand_name, ..self },
            EditAction::SetHeadlineText(headline_text) => Self {
                headline_text,
                ..self
            },
            EditAction::SetHighlightColor(highlight_color) => Self {
                highlight_color,
                ..self
            },
            EditAction::SetBrandColor(brand_color) => Self {
                brand_color,
                ..self
            },
            EditAction::SetMainImage(main_image_ref) => Self {
                main_image_ref,
                ..self
            },
            EditAction::SetCircleImage(circle_image_ref) => Self {
                circle_image_ref,
                ..self
            },
            EditAction::SetMainImageY(v) => self.with_main_image_y(v),
            EditAction::SetCirclePosition { x, y } => self.with_circle_position(x, y),
            EditAction::SetCircleSize(v) => {
                let circle_size = clamp_range(v, CIRCLE_SIZE_RANGE);
                let (x, y) = (self.circle_x, self.circle_y);
                Self {
                    circle_size,
                    ..self
                }
                .with_circle_position(x, y)
            }
            EditAction::SetCircleImageScale(v) => Self {
                circle_image_scale: clamp_range(v, CIRCLE_IMAGE_SCALE_RANGE),
                ..self
            },
            EditAction::SetCircleImageY(v) => Self {
                circle_image_y: clamp_range(v, CIRCLE_IMAGE_Y_RANGE),
                ..self
            },
            EditAction::SetHeadlineSize(v) => Self {
                headline_size: v.clamp(HEADLINE_SIZE_RANGE.0, HEADLINE_SIZE_RANGE.1),
                ..self
            },
            EditAction::SetHeadlineY(v) => self.with_headline_y(v),
            EditAction::ResetLayout => {
                let d = Self::default();
                Self {
                    main_image_y: d.main_image_y,
                    circle_x: d.circle_x,
                    circle_y: d.circle_y,
                    circle_size: d.circle_size,
                    circle_image_scale: d.circle_image_scale,
                    circle_image_y: d.circle_image_y,
                    headline_size: d.headline_size,
                    headline_y: d.headline_y,
                    ..self
                }
            }
        }
    }

    /// Background pan, clamped to [0, 100].
    pub fn with_main_image_y(self, v: f64) -> Self {
        Self {
            main_image_y: clamp_range(v, MAIN_IMAGE_Y_RANGE),
            ..self
        }
    }

    /// Inset position, clamped so `x + size <= 100` and `y + size <= 100`.
    pub fn with_circle_position(self, x: f64, y: f64) -> Self {
        let max = 100.0 - self.circle_size;
        Self {
            circle_x: clamp_total(x, 0.0, max),
            circle_y: clamp_total(y, 0.0, max),
            ..self
        }
    }

    /// Headline offset; non-finite input collapses to 0.
    pub fn with_headline_y(self, v: f64) -> Self {
        Self {
            headline_y: if v.is_finite() { v } else { 0.0 },
            ..self
        }
    }

    /// Re-apply every clamp. Used on documents that did not come from the reducers
    /// (persisted stores, hand-edited JSON).
    pub fn normalized(self) -> Self {
        let size = clamp_range(self.circle_size, CIRCLE_SIZE_RANGE);
        let (x, y, headline_y, main_y) =
            (self.circle_x, self.circle_y, self.headline_y, self.main_image_y);
        Self {
            circle_size: size,
            circle_image_scale: clamp_range(self.circle_image_scale, CIRCLE_IMAGE_SCALE_RANGE),
            circle_image_y: clamp_range(self.circle_image_y, CIRCLE_IMAGE_Y_RANGE),
            headline_size: self
                .headline_size
                .clamp(HEADLINE_SIZE_RANGE.0, HEADLINE_SIZE_RANGE.1),
            ..self
        }
        .with_main_image_y(main_y)
        .with_circle_position(x, y)
        .with_headline_y(headline_y)
    }

    /// Parse a document from JSON and normalize it.
    pub fn from_json_str(s: &str) -> BrandpostResult<Self> {
        let doc: Self = serde_json::from_str(s)
            .map_err(|e| BrandpostError::serde(format!("parse layout document JSON: {e}")))?;
        Ok(doc.normalized())
    }

    /// Read and normalize a document from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> BrandpostResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path).map_err(|e| {
            BrandpostError::validation(format!("open layout document '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&s)
    }

    /// Pretty JSON form, as written by the file store and the CLI.
    pub fn to_json_pretty(&self) -> BrandpostResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| BrandpostError::serde(format!("serialize layout document: {e}")))
    }
}

fn clamp_range(v: f64, (lo, hi): (f64, f64)) -> f64 {
    clamp_total(v, lo, hi)
}

#[cfg(test)]
#[path = "../../tests/unit/document/model.rs"]
mod tests;
