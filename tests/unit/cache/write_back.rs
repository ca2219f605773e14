use super::*;

const DELAY: Duration = Duration::from_millis(300);

#[test]
fn schedules_coalesce_and_rearm() {
    let t0 = Instant::now();
    let mut q = WriteBackQueue::new(DELAY);
    assert!(!q.has_pending());
    assert!(!q.is_due(t0 + DELAY));

    q.schedule("", t0);
    q.schedule("", t0 + Duration::from_millis(200));
    q.schedule("hover-", t0 + Duration::from_millis(250));

    // Deadline moved with the last schedule.
    assert!(!q.is_due(t0 + DELAY));
    assert!(q.take_due(t0 + DELAY).is_empty());
    assert!(q.has_pending());

    let due = q.take_due(t0 + Duration::from_millis(550));
    assert_eq!(due, vec!["".to_string(), "hover-".to_string()]);
    assert!(!q.has_pending());
    assert_eq!(q.deadline(), None);
}

#[test]
fn take_all_ignores_deadline() {
    let t0 = Instant::now();
    let mut q = WriteBackQueue::new(DELAY);
    q.schedule("a-", t0);
    assert_eq!(q.take_all(), vec!["a-".to_string()]);
    assert!(q.take_all().is_empty());
}

#[test]
fn discard_last_prefix_disarms() {
    let t0 = Instant::now();
    let mut q = WriteBackQueue::new(DELAY);
    q.schedule("a-", t0);
    q.schedule("b-", t0);
    q.discard("a-");
    assert!(q.deadline().is_some());
    q.discard("b-");
    assert_eq!(q.deadline(), None);
    assert!(!q.has_pending());
}
