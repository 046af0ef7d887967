use std::sync::atomic::{AtomicBool, Ordering};

use crate::{
    config::opts::ExportOpts,
    document::model::LayoutDocument,
    foundation::error::{BrandpostError, BrandpostResult},
    render::raster::{CaptureOpts, RasterImage, Rasterizer},
};

/// Result of an export request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The capture finished.
    Done(RasterImage),
    /// Another export was already running; nothing was captured.
    Busy,
}

/// Single-flight PNG export.
///
/// At most one capture runs at a time. The in-flight flag is cleared on every exit path,
/// including errors and panics inside the rasterizer.
#[derive(Debug)]
pub struct Exporter<R> {
    rasterizer: R,
    opts: ExportOpts,
    busy: AtomicBool,
}

struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<R: Rasterizer> Exporter<R> {
    /// Wrap `rasterizer` with the given settings. Settings are checked on every export.
    pub fn new(rasterizer: R, opts: ExportOpts) -> Self {
        Self {
            rasterizer,
            opts,
            busy: AtomicBool::new(false),
        }
    }

    /// The wrapped rasterizer.
    pub fn rasterizer(&self) -> &R {
        &self.rasterizer
    }

    /// Export settings.
    pub fn opts(&self) -> &ExportOpts {
        &self.opts
    }

    /// Whether a capture is in flight.
    pub fn is_exporting(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Capture `doc`: wait for fonts, let layout settle, then rasterize.
    ///
    /// Returns [`ExportOutcome::Busy`] without touching the rasterizer when an export is already
    /// running. Failures come back as [`BrandpostError::Export`].
    #[tracing::instrument(skip(self, doc), fields(format = doc.format.name(), scale = self.opts.scale))]
    pub fn export(&self, doc: &LayoutDocument) -> BrandpostResult<ExportOutcome> {
        self.opts.validate().map_err(into_export)?;
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("export already in flight, request ignored");
            return Ok(ExportOutcome::Busy);
        }
        let _in_flight = InFlight(&self.busy);

        self.rasterizer.fonts_ready().map_err(into_export)?;
        let settle = self.opts.settle();
        if !settle.is_zero() {
            std::thread::sleep(settle);
        }

        let capture = CaptureOpts {
            scale: self.opts.scale,
            background: self.opts.background,
        };
        let image = self
            .rasterizer
            .capture(doc, &capture)
            .map_err(into_export)
            .inspect_err(|e| tracing::warn!(error = %e, "export failed"))?;
        tracing::info!(width = image.width, height = image.height, "export finished");
        Ok(ExportOutcome::Done(image))
    }
}

fn into_export(e: BrandpostError) -> BrandpostError {
    match e {
        BrandpostError::Export(_) => e,
        other => BrandpostError::export(other.to_string()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/exporter.rs"]
mod tests;
