use pathview::content::RequestSlot;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

fn poll_until<T: Send + 'static>(slot: &mut RequestSlot<T>) -> Option<T> {
    for _ in 0..500 {
        if let Some(value) = slot.poll() {
            return Some(value);
        }
        if !slot.is_pending() {
            return None;
        }
        thread::sleep(Duration::from_millis(2));
    }
    None
}

#[test]
fn test_result_surfaces_once() {
    let mut slot = RequestSlot::new();
    slot.spawn(|| vec![1, 2, 3]);
    assert!(slot.is_pending());
    assert_eq!(poll_until(&mut slot), Some(vec![1, 2, 3]));
    assert_eq!(slot.poll(), None);
}

#[test]
fn test_stale_response_is_discarded() {
    let mut slot = RequestSlot::new();
    let (release, gate) = mpsc::channel::<()>();

    // The first request stalls until we release it.
    slot.spawn(move || {
        gate.recv().ok();
        "stale"
    });
    // A second request supersedes it immediately.
    slot.spawn(|| "fresh");
    assert_eq!(poll_until(&mut slot), Some("fresh"));

    // The stale response resolves afterwards and must never be seen.
    release.send(()).ok();
    thread::sleep(Duration::from_millis(25));
    assert_eq!(slot.poll(), None);
    assert!(!slot.is_pending());
}

#[test]
fn test_cancel_invalidates_interest() {
    let mut slot = RequestSlot::new();
    slot.spawn(|| 7);
    slot.cancel();
    thread::sleep(Duration::from_millis(25));
    assert_eq!(slot.poll(), None);
}
