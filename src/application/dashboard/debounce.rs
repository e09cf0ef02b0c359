//! Trailing-edge debounce for committed search text.

use std::future;
use std::pin::Pin;
use std::time::Duration;

use tokio::time::{Sleep, sleep};

/// Holds at most one pending commit; scheduling replaces it.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<(String, Pin<Box<Sleep>>)>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Arm a fresh timer for `text`, dropping any timer still pending.
    pub fn schedule(&mut self, text: String) {
        self.cancel();
        self.pending = Some((text, Box::pin(sleep(self.delay))));
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Resolves with the pending text once its quiet period has elapsed.
    ///
    /// Never resolves while nothing is pending. Safe to drop and poll again:
    /// the timer lives in `self`.
    pub async fn fired(&mut self) -> String {
        match self.pending.as_mut() {
            Some((_, timer)) => timer.as_mut().await,
            None => future::pending::<()>().await,
        }
        self.pending
            .take()
            .map(|(text, _)| text)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use tokio::time::{Instant, timeout};

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn fires_after_quiet_period() {
        let mut debouncer = Debouncer::new(Duration::from_millis(500));
        let started = Instant::now();
        debouncer.schedule("phone".to_string());

        let text = debouncer.fired().await;

        assert_eq!(text, "phone");
        assert!(started.elapsed() >= Duration::from_millis(500));
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn rescheduling_restarts_the_timer() {
        let mut debouncer = Debouncer::new(Duration::from_millis(500));
        let started = Instant::now();
        debouncer.schedule("p".to_string());
        tokio::time::advance(Duration::from_millis(300)).await;
        debouncer.schedule("ph".to_string());

        let text = debouncer.fired().await;

        assert_eq!(text, "ph");
        assert!(started.elapsed() >= Duration::from_millis(800));
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_timer_never_fires() {
        let mut debouncer = Debouncer::new(Duration::from_millis(500));
        debouncer.schedule("phone".to_string());
        debouncer.cancel();

        let outcome = timeout(Duration::from_secs(5), debouncer.fired()).await;
        assert!(outcome.is_err());
    }
}
