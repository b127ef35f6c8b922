use std::time::{Duration, Instant};

pub const RELAYOUT_DEBOUNCE: Duration = Duration::from_millis(250);

#[derive(Clone, Debug)]
pub struct RelayoutScheduler {
    delay: Duration,
    pending: Option<Instant>,
}

impl Default for RelayoutScheduler {
    fn default() -> Self {
        Self::new(RELAYOUT_DEBOUNCE)
    }
}

impl RelayoutScheduler {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Returns true when a not-yet-fired relayout was replaced.
    pub fn schedule(&mut self, now: Instant) -> bool {
        self.pending.replace(now + self.delay).is_some()
    }

    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending
    }

    pub fn due_in(&self, now: Instant) -> Option<Duration> {
        self.pending
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    pub fn fire(&mut self, now: Instant) -> bool {
        match self.pending {
            Some(deadline) if now >= deadline => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_collapses_into_one_relayout_after_last_trigger() {
        let start = Instant::now();
        let mut scheduler = RelayoutScheduler::default();

        assert!(!scheduler.schedule(start));
        assert!(scheduler.schedule(start + Duration::from_millis(100)));
        let last = start + Duration::from_millis(200);
        assert!(scheduler.schedule(last));

        assert_eq!(scheduler.deadline(), Some(last + RELAYOUT_DEBOUNCE));

        let mut fired = 0;
        for millis in (0..=1000).step_by(10) {
            if scheduler.fire(start + Duration::from_millis(millis)) {
                fired += 1;
                assert_eq!(millis, 450);
            }
        }
        assert_eq!(fired, 1);
        assert!(!scheduler.is_pending());
    }

    #[test]
    fn nothing_fires_before_the_deadline() {
        let start = Instant::now();
        let mut scheduler = RelayoutScheduler::new(Duration::from_millis(50));
        scheduler.schedule(start);

        assert!(!scheduler.fire(start + Duration::from_millis(49)));
        assert_eq!(
            scheduler.due_in(start + Duration::from_millis(20)),
            Some(Duration::from_millis(30))
        );
        assert!(scheduler.fire(start + Duration::from_millis(50)));
        assert_eq!(scheduler.due_in(start), None);
    }

    #[test]
    fn cancel_drops_the_pending_relayout() {
        let start = Instant::now();
        let mut scheduler = RelayoutScheduler::default();
        assert!(!scheduler.cancel());

        scheduler.schedule(start);
        assert!(scheduler.cancel());
        assert!(!scheduler.fire(start + Duration::from_secs(1)));
    }
}
