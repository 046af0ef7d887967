use super::*;
use crate::EditAction;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn scheduler() -> SaveScheduler {
    SaveScheduler::new(ms(1000), ms(800))
}

#[test]
fn burst_of_changes_yields_one_save_after_last_change() {
    let t0 = Instant::now();
    let mut s = scheduler();
    let mut doc = LayoutDocument::default();
    for i in 0..10u64 {
        doc = doc.apply(EditAction::SetMainImageY(i as f64));
        s.schedule(doc.clone(), t0 + ms(i * 100));
        // Nothing fires while changes keep arriving within the window.
        assert!(s.poll(t0 + ms(i * 100)).is_none());
    }
    let last = t0 + ms(900);
    assert_eq!(s.deadline(), Some(last + ms(1000)));
    assert!(s.poll(last + ms(999)).is_none());

    let saved = s.poll(last + ms(1000)).unwrap();
    assert_eq!(saved.main_image_y, 9.0);
    assert!(s.poll(last + ms(5000)).is_none());
}

#[test]
fn indicator_lasts_fixed_window_after_settle() {
    let t0 = Instant::now();
    let mut s = scheduler();
    assert!(!s.is_saving(t0));
    s.mark_settled(t0);
    assert!(s.is_saving(t0 + ms(799)));
    assert!(!s.is_saving(t0 + ms(800)));
}

#[test]
fn flush_takes_pending_early() {
    let t0 = Instant::now();
    let mut s = scheduler();
    s.schedule(LayoutDocument::default(), t0);
    assert!(s.has_pending());
    assert!(s.flush().is_some());
    assert!(!s.has_pending());
    assert!(s.flush().is_none());
}
