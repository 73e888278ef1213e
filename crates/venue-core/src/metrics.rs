//! Global atomic counters for the recommendation service.
//!
//! Counters are incremented silently at the call site. Call
//! [`Metrics::flush`] to emit current values as a single
//! `tracing::info!` event.

use std::sync::atomic::{AtomicU64, Ordering};

/// Global metrics singleton.
pub static METRICS: Metrics = Metrics::new();

pub struct Metrics {
    recommendations: AtomicU64,
    role_failures: AtomicU64,
    retry_attempts: AtomicU64,
    synthesis_failures: AtomicU64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub const fn new() -> Self {
        Self {
            recommendations: AtomicU64::new(0),
            role_failures: AtomicU64::new(0),
            retry_attempts: AtomicU64::new(0),
            synthesis_failures: AtomicU64::new(0),
        }
    }

    pub fn inc_recommendations(&self) {
        self.recommendations.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "recommendations", "counter incremented");
    }

    pub fn inc_role_failures(&self) {
        self.role_failures.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "role_failures", "counter incremented");
    }

    pub fn inc_retry_attempts(&self) {
        self.retry_attempts.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "retry_attempts", "counter incremented");
    }

    pub fn inc_synthesis_failures(&self) {
        self.synthesis_failures.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "synthesis_failures", "counter incremented");
    }

    /// Emit all current counter values as a single `info!` event.
    pub fn flush(&self) {
        tracing::info!(
            metric = "flush",
            recommendations = self.recommendations(),
            role_failures = self.role_failures(),
            retry_attempts = self.retry_attempts(),
            synthesis_failures = self.synthesis_failures(),
        );
    }

    pub fn recommendations(&self) -> u64 {
        self.recommendations.load(Ordering::Relaxed)
    }

    pub fn role_failures(&self) -> u64 {
        self.role_failures.load(Ordering::Relaxed)
    }

    pub fn retry_attempts(&self) -> u64 {
        self.retry_attempts.load(Ordering::Relaxed)
    }

    pub fn synthesis_failures(&self) -> u64 {
        self.synthesis_failures.load(Ordering::Relaxed)
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.recommendations.store(0, Ordering::Relaxed);
        self.role_failures.store(0, Ordering::Relaxed);
        self.retry_attempts.store(0, Ordering::Relaxed);
        self.synthesis_failures.store(0, Ordering::Relaxed);
    }
}
