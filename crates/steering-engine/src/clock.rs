/// Fixed-cadence sampling gate driven by the caller's timestamps.
///
/// Missed intervals are skipped rather than replayed in a burst, so a stalled
/// caller gets one sample on resume, not a backlog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleClock {
    interval_ms: f64,
    next_due_ms: Option<f64>,
}

impl SampleClock {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms: interval_ms.max(1) as f64,
            next_due_ms: None,
        }
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Whether a sample is due at `now_ms`. The first poll is always due.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        match self.next_due_ms {
            Some(due) if now_ms < due => false,
            Some(due) => {
                let missed = ((now_ms - due) / self.interval_ms).floor();
                self.next_due_ms = Some(due + (missed + 1.0) * self.interval_ms);
                true
            },
            None => {
                self.next_due_ms = Some(now_ms + self.interval_ms);
                true
            },
        }
    }

    pub fn reset(&mut self) {
        self.next_due_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_per_interval() {
        let mut clock = SampleClock::new(50);
        let fired: Vec<f64> = (0..=200)
            .map(|t| t as f64)
            .filter(|&t| clock.poll(t))
            .collect();
        assert_eq!(fired, vec![0.0, 50.0, 100.0, 150.0, 200.0]);
    }

    #[test]
    fn missed_intervals_are_skipped() {
        let mut clock = SampleClock::new(50);
        assert!(clock.poll(0.0));
        assert!(clock.poll(260.0));
        assert!(!clock.poll(280.0));
        assert!(clock.poll(300.0));
    }

    #[test]
    fn reset_makes_next_poll_due() {
        let mut clock = SampleClock::new(50);
        assert!(clock.poll(10.0));
        assert!(!clock.poll(20.0));
        clock.reset();
        assert!(clock.poll(20.0));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn never_fires_more_than_once_per_interval(
                gaps in prop::collection::vec(0.0f64..120.0, 1..200),
            ) {
                let mut clock = SampleClock::new(50);
                let mut now = 0.0;
                let mut fired = 0usize;
                for gap in gaps {
                    now += gap;
                    if clock.poll(now) {
                        fired += 1;
                    }
                }
                // The first poll fires at `gaps[0]`, then at most once per 50 ms
                prop_assert!(fired as f64 <= now / 50.0 + 1.0 + 1e-9);
            }
        }
    }
}
