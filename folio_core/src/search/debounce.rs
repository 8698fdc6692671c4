use std::time::Duration;

use tokio::time::{Instant, sleep_until};

pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);
pub const MIN_QUERY_LEN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keystroke {
    /// The query will be released once the input stays quiet for the delay.
    Scheduled,
    /// The input is below the minimum length; results should be cleared.
    Cleared,
}

/// Search-as-you-type gate: every keystroke restarts the timer and only the
/// latest query survives it.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    min_len: usize,
    pending: Option<(String, Instant)>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE, MIN_QUERY_LEN)
    }
}

impl Debouncer {
    pub fn new(delay: Duration, min_len: usize) -> Self {
        Self {
            delay,
            min_len,
            pending: None,
        }
    }

    pub fn push(&mut self, input: &str) -> Keystroke {
        let query = input.trim();

        if query.chars().count() < self.min_len {
            self.pending = None;
            return Keystroke::Cleared;
        }

        self.pending = Some((query.to_string(), Instant::now() + self.delay));
        Keystroke::Scheduled
    }

    #[cfg(test)]
    fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Resolves with the pending query once its deadline passes. Never
    /// resolves while nothing is pending. Cancel-safe: dropping the future
    /// keeps the pending query in place.
    pub async fn ready(&mut self) -> String {
        loop {
            let deadline = match &self.pending {
                Some((_, deadline)) => *deadline,
                None => return std::future::pending().await,
            };

            sleep_until(deadline).await;

            if let Some((query, _)) = self.pending.take() {
                return query;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{advance, timeout};

    #[tokio::test(start_paused = true)]
    async fn test_keystroke_resets_timer() {
        let mut debouncer = Debouncer::default();
        let start = Instant::now();

        assert_eq!(debouncer.push("bit"), Keystroke::Scheduled);
        advance(Duration::from_millis(300)).await;
        assert_eq!(debouncer.push("bitc"), Keystroke::Scheduled);

        let query = debouncer.ready().await;

        assert_eq!(query, "bitc");
        assert!(start.elapsed() >= Duration::from_millis(800));
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_query_clears_pending() {
        let mut debouncer = Debouncer::default();

        debouncer.push("bitcoin");
        assert_eq!(debouncer.push(" bi "), Keystroke::Cleared);
        assert!(!debouncer.is_pending());

        let result = timeout(Duration::from_secs(5), debouncer.ready()).await;
        assert!(result.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_query_is_trimmed_and_released_once() {
        let mut debouncer = Debouncer::new(Duration::from_millis(100), 3);

        debouncer.push("  eth  ");
        assert_eq!(debouncer.ready().await, "eth");

        let result = timeout(Duration::from_secs(1), debouncer.ready()).await;
        assert!(result.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_wait_keeps_query() {
        let mut debouncer = Debouncer::default();
        debouncer.push("solana");

        let early = timeout(Duration::from_millis(100), debouncer.ready()).await;
        assert!(early.is_err());
        assert!(debouncer.is_pending());

        assert_eq!(debouncer.ready().await, "solana");
    }
}
