use std::sync::atomic::AtomicUsize;
use std::sync::{Mutex, mpsc};
use std::time::{Duration, Instant};

use super::*;
use crate::document::color::Color;

fn tiny() -> RasterImage {
    RasterImage::from_rgba(image::RgbaImage::from_pixel(2, 2, image::Rgba([1, 2, 3, 255])))
}

fn no_settle() -> ExportOpts {
    ExportOpts {
        settle_ms: 0,
        ..ExportOpts::default()
    }
}

struct Gated {
    calls: AtomicUsize,
    entered: Mutex<mpsc::Sender<()>>,
    release: Mutex<mpsc::Receiver<()>>,
}

impl Rasterizer for Gated {
    fn capture(&self, _doc: &LayoutDocument, _opts: &CaptureOpts) -> BrandpostResult<RasterImage> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.entered.lock().unwrap().send(()).unwrap();
        self.release.lock().unwrap().recv().unwrap();
        Ok(tiny())
    }
}

#[test]
fn second_export_while_in_flight_is_busy() {
    let (entered_tx, entered_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel();
    let exporter = Exporter::new(
        Gated {
            calls: AtomicUsize::new(0),
            entered: Mutex::new(entered_tx),
            release: Mutex::new(release_rx),
        },
        no_settle(),
    );
    let doc = LayoutDocument::default();

    std::thread::scope(|s| {
        let first = s.spawn(|| exporter.export(&doc));
        entered_rx.recv().unwrap();
        assert!(exporter.is_exporting());
        assert_eq!(exporter.export(&doc).unwrap(), ExportOutcome::Busy);
        release_tx.send(()).unwrap();
        assert_eq!(first.join().unwrap().unwrap(), ExportOutcome::Done(tiny()));
    });

    assert_eq!(exporter.rasterizer().calls.load(Ordering::SeqCst), 1);
    assert!(!exporter.is_exporting());
}

struct Failing {
    calls: AtomicUsize,
    fonts_ok: bool,
}

impl Rasterizer for Failing {
    fn fonts_ready(&self) -> BrandpostResult<()> {
        if self.fonts_ok {
            Ok(())
        } else {
            Err(BrandpostError::asset("font missing"))
        }
    }

    fn capture(&self, _doc: &LayoutDocument, _opts: &CaptureOpts) -> BrandpostResult<RasterImage> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(BrandpostError::asset("tainted canvas"))
    }
}

#[test]
fn failure_clears_the_gate_and_reports_export_error() {
    let exporter = Exporter::new(
        Failing {
            calls: AtomicUsize::new(0),
            fonts_ok: true,
        },
        no_settle(),
    );
    let doc = LayoutDocument::default();
    for attempt in 1..=2 {
        let err = exporter.export(&doc).unwrap_err();
        assert!(matches!(err, BrandpostError::Export(_)));
        assert!(err.to_string().contains("try again"));
        assert!(!exporter.is_exporting());
        assert_eq!(exporter.rasterizer().calls.load(Ordering::SeqCst), attempt);
    }
}

#[test]
fn fonts_not_ready_skips_capture() {
    let exporter = Exporter::new(
        Failing {
            calls: AtomicUsize::new(0),
            fonts_ok: false,
        },
        no_settle(),
    );
    let err = exporter.export(&LayoutDocument::default()).unwrap_err();
    assert!(matches!(err, BrandpostError::Export(_)));
    assert_eq!(exporter.rasterizer().calls.load(Ordering::SeqCst), 0);
    assert!(!exporter.is_exporting());
}

struct Recording(Mutex<Option<CaptureOpts>>);

impl Rasterizer for Recording {
    fn capture(&self, _doc: &LayoutDocument, opts: &CaptureOpts) -> BrandpostResult<RasterImage> {
        *self.0.lock().unwrap() = Some(*opts);
        Ok(tiny())
    }
}

#[test]
fn settles_before_capture_with_configured_options() {
    let opts = ExportOpts {
        scale: 2,
        background: Color::WHITE,
        settle_ms: 30,
    };
    let exporter = Exporter::new(Recording(Mutex::new(None)), opts);
    let started = Instant::now();
    let out = exporter.export(&LayoutDocument::default()).unwrap();
    assert!(started.elapsed() >= Duration::from_millis(30));
    assert!(matches!(out, ExportOutcome::Done(_)));
    assert_eq!(
        *exporter.rasterizer().0.lock().unwrap(),
        Some(CaptureOpts {
            scale: 2,
            background: Color::WHITE
        })
    );
}

#[test]
fn out_of_range_scale_fails_without_capturing() {
    for scale in [0, 9, u32::MAX] {
        let exporter = Exporter::new(
            Failing {
                calls: AtomicUsize::new(0),
                fonts_ok: true,
            },
            ExportOpts {
                scale,
                ..no_settle()
            },
        );
        let err = exporter.export(&LayoutDocument::default()).unwrap_err();
        assert!(matches!(err, BrandpostError::Export(_)), "scale {scale}");
        assert_eq!(exporter.rasterizer().calls.load(Ordering::SeqCst), 0);
        assert!(!exporter.is_exporting());
    }
}
