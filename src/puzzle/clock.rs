/// Elapsed-time tracker for one puzzle.
///
/// Times are milliseconds from whatever monotonic source the caller uses
/// (`performance.now()` in the browser). The display only refreshes once per
/// second so sub-second drift does not matter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionClock {
    started_at_ms: f64,
    stopped_at_ms: Option<f64>,
}

impl SessionClock {
    pub fn start(now_ms: f64) -> Self {
        Self { started_at_ms: now_ms, stopped_at_ms: None }
    }

    /// Freeze the clock. Only the first call has an effect.
    pub fn stop(&mut self, now_ms: f64) {
        if self.stopped_at_ms.is_none() {
            self.stopped_at_ms = Some(now_ms.max(self.started_at_ms));
        }
    }

    pub fn is_running(&self) -> bool {
        self.stopped_at_ms.is_none()
    }

    /// Whole seconds since start, or up to the stop time once stopped.
    pub fn elapsed_seconds(&self, now_ms: f64) -> u64 {
        let end = self.stopped_at_ms.unwrap_or(now_ms);
        ((end - self.started_at_ms).max(0.0) / 1000.0).floor() as u64
    }
}

/// `MM:SS`, zero padded. Minutes are not wrapped at 60.
pub fn format_elapsed(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_whole_seconds() {
        let clock = SessionClock::start(1_000.0);
        assert_eq!(clock.elapsed_seconds(1_000.0), 0);
        assert_eq!(clock.elapsed_seconds(1_999.0), 0);
        assert_eq!(clock.elapsed_seconds(66_000.0), 65);
        // a clock source that goes backwards never yields negative time
        assert_eq!(clock.elapsed_seconds(0.0), 0);
    }

    #[test]
    fn stop_freezes_once() {
        let mut clock = SessionClock::start(0.0);
        clock.stop(12_500.0);
        assert!(!clock.is_running());
        assert_eq!(clock.elapsed_seconds(99_000.0), 12);
        clock.stop(50_000.0);
        assert_eq!(clock.elapsed_seconds(99_000.0), 12);
    }

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_elapsed(0), "00:00");
        assert_eq!(format_elapsed(65), "01:05");
        assert_eq!(format_elapsed(600), "10:00");
        assert_eq!(format_elapsed(6_000), "100:00");
    }
}
