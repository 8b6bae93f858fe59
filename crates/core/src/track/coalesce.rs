/// Default coalescing interval for scroll-driven recomputation.
pub const SCROLL_COALESCE_INTERVAL_MS: f64 = 50.0;

/// Debounces high-frequency scroll events to at most one recomputation
/// per interval.
///
/// This is backpressure, not correctness: the resolvers are idempotent
/// for a given offset, so dropping intermediate ticks only bounds
/// handler frequency. The host supplies monotonic timestamps — the core
/// never reads a clock.
#[derive(Debug)]
pub struct ScrollCoalescer {
    interval_ms: f64,
    last_run_ms: Option<f64>,
}

impl ScrollCoalescer {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            last_run_ms: None,
        }
    }

    /// Whether a recomputation should run at `now_ms`.
    ///
    /// The first poll always runs. A timestamp earlier than the last
    /// accepted one (host clock reset) also runs and re-anchors the
    /// window rather than stalling until the old anchor is reached.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        let run = match self.last_run_ms {
            None => true,
            Some(last) => now_ms < last || now_ms - last >= self.interval_ms,
        };
        if run {
            self.last_run_ms = Some(now_ms);
        }
        run
    }

    /// Forget the window anchor; the next poll runs unconditionally.
    pub fn reset(&mut self) {
        self.last_run_ms = None;
    }
}

impl Default for ScrollCoalescer {
    fn default() -> Self {
        Self::new(SCROLL_COALESCE_INTERVAL_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coalesces_within_interval() {
        let mut c = ScrollCoalescer::new(50.0);
        assert!(c.poll(1000.0));
        assert!(!c.poll(1010.0));
        assert!(!c.poll(1049.9));
        assert!(c.poll(1050.0));
    }

    #[test]
    fn first_poll_always_runs() {
        let mut c = ScrollCoalescer::default();
        assert!(c.poll(0.0));
    }

    #[test]
    fn clock_reset_reanchors() {
        let mut c = ScrollCoalescer::new(50.0);
        assert!(c.poll(1_000_000.0));
        assert!(c.poll(5.0));
        assert!(!c.poll(30.0));
        assert!(c.poll(60.0));
    }

    #[test]
    fn reset_reopens_window() {
        let mut c = ScrollCoalescer::new(50.0);
        assert!(c.poll(100.0));
        assert!(!c.poll(110.0));
        c.reset();
        assert!(c.poll(111.0));
    }
}
