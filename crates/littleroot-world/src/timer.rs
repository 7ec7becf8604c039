//! Periodic tick sources driven by the host's elapsed time.

/// Text reveal period
pub const TEXT_PERIOD_MS: u32 = 20;
/// Walk-cycle period
pub const WALK_PERIOD_MS: u32 = 150;

/// A restartable interval timer. Elapsed time is only accumulated while
/// running, so a stopped ticker never fires.
#[derive(Debug, Clone)]
pub struct Ticker {
    period_ms: u32,
    accumulated: u32,
    running: bool,
}

impl Ticker {
    pub fn new(period_ms: u32) -> Self {
        Self {
            period_ms: period_ms.max(1),
            accumulated: 0,
            running: false,
        }
    }

    /// Start from a fresh period. Starting a running ticker restarts it.
    pub fn start(&mut self) {
        self.accumulated = 0;
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.accumulated = 0;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Feed elapsed time; returns how many periods completed.
    pub fn advance(&mut self, dt_ms: u32) -> u32 {
        if !self.running {
            return 0;
        }
        self.accumulated = self.accumulated.saturating_add(dt_ms);
        let fired = self.accumulated / self.period_ms;
        self.accumulated %= self.period_ms;
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stopped_ticker_never_fires() {
        let mut t = Ticker::new(TEXT_PERIOD_MS);
        assert_eq!(t.advance(1000), 0);
        t.start();
        t.stop();
        assert_eq!(t.advance(1000), 0);
    }

    #[test]
    fn fires_once_per_period() {
        let mut t = Ticker::new(TEXT_PERIOD_MS);
        t.start();
        assert_eq!(t.advance(15), 0);
        assert_eq!(t.advance(10), 1);
        // 5 ms carried over from the first period
        assert_eq!(t.advance(40), 2);
        assert_eq!(t.advance(15), 1);
        assert_eq!(t.advance(55), 2);
        assert_eq!(t.advance(5), 1);
    }

    #[test]
    fn restart_discards_partial_period() {
        let mut t = Ticker::new(WALK_PERIOD_MS);
        t.start();
        t.advance(149);
        t.start();
        assert_eq!(t.advance(1), 0);
    }
}
