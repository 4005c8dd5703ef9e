//! Single-slot delayed-action timer.
//!
//! Coalesces a burst of edits into one recompute trigger: every arming
//! supersedes the previous one, so only the action registered by the most
//! recent arm can fire, once, after the quiet period.

use std::time::Duration;

use tokio::task::JoinHandle;

/// Quiet period between the last edit and the recompute trigger.
pub const QUIET_PERIOD: Duration = Duration::from_millis(750);

/// Single pending-timer slot. Must be used from within a tokio runtime.
#[derive(Debug)]
pub struct DebounceScheduler {
    quiet_period: Duration,
    pending: Option<JoinHandle<()>>,
}

impl DebounceScheduler {
    pub fn new() -> Self {
        Self::with_quiet_period(QUIET_PERIOD)
    }

    pub fn with_quiet_period(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            pending: None,
        }
    }

    /// Cancel any pending timer and start a new one. After the quiet
    /// period `action` runs exactly once and the slot is spent.
    pub fn arm<F>(&mut self, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        let delay = self.quiet_period;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action();
        }));
    }

    /// Clear the pending timer without firing it.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Whether a timer is pending and has not fired yet.
    pub fn is_armed(&self) -> bool {
        self.pending.as_ref().is_some_and(|handle| !handle.is_finished())
    }
}

impl Default for DebounceScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for DebounceScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // Paused-clock sleeps auto-advance once every task is idle, so the
    // pending timer task runs to completion before the sleep returns.
    async fn run_clock(duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_of_arms_fires_once_for_the_last() {
        let mut scheduler = DebounceScheduler::new();
        let fired = Arc::new(AtomicUsize::new(0));
        let last = Arc::new(AtomicUsize::new(usize::MAX));

        for i in 0..5 {
            let fired = fired.clone();
            let last = last.clone();
            scheduler.arm(move || {
                fired.fetch_add(1, Ordering::SeqCst);
                last.store(i, Ordering::SeqCst);
            });
            run_clock(Duration::from_millis(100)).await;
        }
        run_clock(QUIET_PERIOD).await;

        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert_eq!(last.load(Ordering::SeqCst), 4);
        assert!(!scheduler.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_before_fire_means_zero_fires() {
        let mut scheduler = DebounceScheduler::new();
        let fired = Arc::new(AtomicUsize::new(0));

        let counter = fired.clone();
        scheduler.arm(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        scheduler.cancel();
        run_clock(QUIET_PERIOD * 2).await;

        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert!(!scheduler.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearm_after_fire() {
        let mut scheduler = DebounceScheduler::new();
        let fired = Arc::new(AtomicUsize::new(0));

        for _ in 0..2 {
            let counter = fired.clone();
            scheduler.arm(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            });
            run_clock(QUIET_PERIOD + Duration::from_millis(10)).await;
        }

        assert_eq!(fired.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_not_armed_until_armed() {
        let mut scheduler = DebounceScheduler::with_quiet_period(Duration::from_millis(50));
        assert!(!scheduler.is_armed());

        scheduler.arm(|| {});
        assert!(scheduler.is_armed());

        run_clock(Duration::from_millis(60)).await;
        assert!(!scheduler.is_armed());
    }
}
