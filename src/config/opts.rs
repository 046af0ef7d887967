use std::path::Path;
use std::time::Duration;

use crate::{
    document::color::Color,
    foundation::error::{BrandpostError, BrandpostResult},
    interaction::gesture::DEFAULT_DRAG_THRESHOLD_PX,
};

/// Largest accepted export scale.
pub const MAX_EXPORT_SCALE: u32 = 8;

/// Editor session configuration.
///
/// Every field has a default, so a config file only needs the values it overrides.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorOpts {
    /// Per-axis movement (px) a press may jitter before it becomes a drag.
    pub drag_threshold_px: f64,
    /// Quiet period after the last change before the document is saved.
    pub save_debounce_ms: u64,
    /// How long the "saving" indicator stays up after a save settles.
    pub saving_indicator_ms: u64,
    /// Key the document is persisted under.
    pub storage_key: String,
    /// PNG export settings.
    pub export: ExportOpts,
}

impl Default for EditorOpts {
    fn default() -> Self {
        Self {
            drag_threshold_px: DEFAULT_DRAG_THRESHOLD_PX,
            save_debounce_ms: 1000,
            saving_indicator_ms: 800,
            storage_key: "brandpost.layout".to_owned(),
            export: ExportOpts::default(),
        }
    }
}

/// PNG export configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportOpts {
    /// Output pixels per preview pixel.
    pub scale: u32,
    /// Color behind every layer.
    pub background: Color,
    /// Extra wait after fonts report ready, before capture.
    pub settle_ms: u64,
}

impl Default for ExportOpts {
    fn default() -> Self {
        Self {
            scale: 3,
            background: Color::BLACK,
            settle_ms: 200,
        }
    }
}

impl EditorOpts {
    /// Parse options from JSON.
    pub fn from_json_str(s: &str) -> BrandpostResult<Self> {
        let opts: Self = serde_json::from_str(s)
            .map_err(|e| BrandpostError::validation(format!("parse editor options JSON: {e}")))?;
        opts.validate()?;
        Ok(opts)
    }

    /// Read options from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> BrandpostResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path).map_err(|e| {
            BrandpostError::validation(format!("open editor options '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&s)
    }

    /// Reject values no session can run with.
    pub fn validate(&self) -> BrandpostResult<()> {
        if !self.drag_threshold_px.is_finite() || self.drag_threshold_px < 0.0 {
            return Err(BrandpostError::validation(
                "drag_threshold_px must be a finite value >= 0",
            ));
        }
        if self.storage_key.trim().is_empty() {
            return Err(BrandpostError::validation("storage_key must be non-empty"));
        }
        self.export.validate()
    }

    /// Debounce window as a duration.
    pub fn save_debounce(&self) -> Duration {
        Duration::from_millis(self.save_debounce_ms)
    }

    /// Indicator window as a duration.
    pub fn saving_indicator(&self) -> Duration {
        Duration::from_millis(self.saving_indicator_ms)
    }
}

impl ExportOpts {
    /// Reject settings no capture can run with.
    pub fn validate(&self) -> BrandpostResult<()> {
        if !(1..=MAX_EXPORT_SCALE).contains(&self.scale) {
            return Err(BrandpostError::validation(format!(
                "export.scale must be in 1..={MAX_EXPORT_SCALE}"
            )));
        }
        Ok(())
    }

    /// Settle delay as a duration.
    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/opts.rs"]
mod tests;
