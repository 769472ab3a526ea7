use std::time::Duration;

use crate::config::settings::AssistantConfig;

/// Exponential backoff: up to `max_attempts` calls, sleeping
/// `base_delay * multiplier^i` after failed attempt `i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub multiplier: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            base_delay: Duration::from_millis(2000),
            multiplier: 2,
        }
    }
}

impl RetryPolicy {
    pub fn from_config(config: &AssistantConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            base_delay: Duration::from_millis(config.base_delay_ms),
            multiplier: config.backoff_multiplier,
        }
    }

    /// Delay after the `attempt`-th failure (0-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(self.multiplier.saturating_pow(attempt))
    }

    pub fn run<T, E>(
        &self,
        op: impl FnMut() -> Result<T, E>,
        is_retryable: impl Fn(&E) -> bool,
    ) -> Result<T, E> {
        self.run_with_sleep(op, is_retryable, std::thread::sleep)
    }

    pub fn run_with_sleep<T, E>(
        &self,
        mut op: impl FnMut() -> Result<T, E>,
        is_retryable: impl Fn(&E) -> bool,
        mut sleep: impl FnMut(Duration),
    ) -> Result<T, E> {
        let mut attempt = 0;
        loop {
            match op() {
                Ok(value) => return Ok(value),
                Err(e) if is_retryable(&e) && attempt + 1 < self.max_attempts => {
                    let delay = self.delay_for(attempt);
                    log::debug!("Attempt {} failed, retrying in {:?}", attempt + 1, delay);
                    sleep(delay);
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
