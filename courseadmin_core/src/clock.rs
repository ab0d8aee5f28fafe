use std::sync::atomic::{AtomicI64, Ordering};

static LAST_STAMP: AtomicI64 = AtomicI64::new(i64::MIN);

/// Creation stamp in Unix milliseconds.
///
/// Never returns a value lower than a previously returned one, even if the
/// wall clock steps backwards.
pub fn now_millis() -> i64 {
    let wall = chrono::Utc::now().timestamp_millis();
    let prev = LAST_STAMP.fetch_max(wall, Ordering::AcqRel);
    prev.max(wall)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stamps_never_decrease() {
        let mut last = now_millis();
        for _ in 0..1_000 {
            let next = now_millis();
            assert!(next >= last);
            last = next;
        }
    }

    #[test]
    fn stamps_track_wall_clock() {
        let wall = chrono::Utc::now().timestamp_millis();
        assert!(now_millis() >= wall);
    }
}
