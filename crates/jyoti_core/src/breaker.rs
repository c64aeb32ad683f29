//! Consecutive-failure circuit breaker for the precise provider.
//!
//! After `failure_threshold` consecutive failures the breaker opens and the
//! precise source is skipped until `cooldown` elapses. The first call after
//! the cooldown is a half-open trial: success closes the breaker, failure
//! re-opens it for another cooldown.

use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::info;

/// Observable breaker state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakerState {
    Closed { failures: u32 },
    Open { opened_at: Instant },
    HalfOpen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakerConfig {
    /// Consecutive failures before opening (0 disables the breaker).
    pub failure_threshold: u32,
    /// Time the breaker stays open before allowing a trial.
    pub cooldown: Duration,
}

impl Default for BreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 3,
            cooldown: Duration::from_secs(30),
        }
    }
}

#[derive(Debug)]
pub struct CircuitBreaker {
    state: Mutex<BreakerState>,
    config: BreakerConfig,
}

impl CircuitBreaker {
    pub fn new(config: BreakerConfig) -> Self {
        Self {
            state: Mutex::new(BreakerState::Closed { failures: 0 }),
            config,
        }
    }

    pub fn config(&self) -> BreakerConfig {
        self.config
    }

    pub fn state(&self) -> BreakerState {
        *self.state.lock()
    }

    /// Whether a call may go through now. Moves Open to HalfOpen once the
    /// cooldown has passed.
    pub fn allow(&self) -> bool {
        if self.config.failure_threshold == 0 {
            return true;
        }
        let mut state = self.state.lock();
        match *state {
            BreakerState::Closed { .. } => true,
            BreakerState::HalfOpen => false,
            BreakerState::Open { opened_at } => {
                if opened_at.elapsed() >= self.config.cooldown {
                    info!("precise provider breaker half-open, sending trial request");
                    *state = BreakerState::HalfOpen;
                    true
                } else {
                    false
                }
            }
        }
    }

    pub fn record_success(&self) {
        let mut state = self.state.lock();
        if !matches!(*state, BreakerState::Closed { .. }) {
            info!("precise provider breaker closed");
        }
        *state = BreakerState::Closed { failures: 0 };
    }

    pub fn record_failure(&self) {
        if self.config.failure_threshold == 0 {
            return;
        }
        let mut state = self.state.lock();
        let next = match *state {
            BreakerState::Closed { failures } if failures + 1 < self.config.failure_threshold => {
                BreakerState::Closed {
                    failures: failures + 1,
                }
            }
            BreakerState::Closed { failures } => {
                info!(
                    failures = failures + 1,
                    cooldown_ms = self.config.cooldown.as_millis() as u64,
                    "precise provider breaker opened"
                );
                BreakerState::Open {
                    opened_at: Instant::now(),
                }
            }
            BreakerState::HalfOpen => {
                info!("precise provider trial failed, breaker re-opened");
                BreakerState::Open {
                    opened_at: Instant::now(),
                }
            }
            open @ BreakerState::Open { .. } => open,
        };
        *state = next;
    }

    /// End a half-open trial without judging the provider, so the next call
    /// may try again. Closed and Open states are left alone.
    pub fn release_trial(&self) {
        let mut state = self.state.lock();
        if *state == BreakerState::HalfOpen {
            let now = Instant::now();
            *state = BreakerState::Open {
                opened_at: now.checked_sub(self.config.cooldown).unwrap_or(now),
            };
        }
    }
}
