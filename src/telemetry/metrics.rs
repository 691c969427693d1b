//! Metrics collection for remote storage calls and CLI commands.
//!
//! In-memory only; `bnav --verbose` prints a report on exit.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

/// Global metrics instance.
pub static GLOBAL_METRICS: Lazy<Metrics> = Lazy::new(Metrics::new);

/// Centralized metrics collection.
pub struct Metrics {
    remote_metrics: Mutex<HashMap<String, RemoteMetrics>>,
    operation_metrics: Mutex<HashMap<String, OperationMetrics>>,
}

/// A poisoned lock only means another thread panicked mid-record; the
/// counters are still usable.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            remote_metrics: Mutex::new(HashMap::new()),
            operation_metrics: Mutex::new(HashMap::new()),
        }
    }

    /// Record a remote storage call, keyed `backend:operation`.
    pub fn record_remote(&self, backend: &str, operation: &str, duration: Duration, success: bool) {
        let key = format!("{backend}:{operation}");
        lock(&self.remote_metrics)
            .entry(key)
            .or_default()
            .record(duration, success);
    }

    /// Record a generic timed operation.
    pub fn record_operation(&self, name: &str, duration: Duration) {
        lock(&self.operation_metrics)
            .entry(name.to_string())
            .or_default()
            .record(duration);
    }

    /// Copy of all metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            remote: lock(&self.remote_metrics).clone(),
            operations: lock(&self.operation_metrics).clone(),
        }
    }

    /// Reset all metrics.
    pub fn reset(&self) {
        lock(&self.remote_metrics).clear();
        lock(&self.operation_metrics).clear();
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Counters for one remote operation.
#[derive(Debug, Clone, Serialize)]
pub struct RemoteMetrics {
    pub invocations: u64,
    pub successes: u64,
    pub failures: u64,
    pub total_duration: Duration,
    pub min_duration: Duration,
    pub max_duration: Duration,
}

impl RemoteMetrics {
    pub fn new() -> Self {
        Self {
            invocations: 0,
            successes: 0,
            failures: 0,
            total_duration: Duration::ZERO,
            min_duration: Duration::MAX,
            max_duration: Duration::ZERO,
        }
    }

    pub fn record(&mut self, duration: Duration, success: bool) {
        self.invocations += 1;
        if success {
            self.successes += 1;
        } else {
            self.failures += 1;
        }
        self.total_duration += duration;
        self.min_duration = self.min_duration.min(duration);
        self.max_duration = self.max_duration.max(duration);
    }

    pub fn avg_duration(&self) -> Duration {
        if self.invocations == 0 {
            Duration::ZERO
        } else {
            self.total_duration / self.invocations as u32
        }
    }

    /// Success rate as a percentage.
    pub fn success_rate(&self) -> f64 {
        if self.invocations == 0 {
            100.0
        } else {
            (self.successes as f64 / self.invocations as f64) * 100.0
        }
    }
}

impl Default for RemoteMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Counters for a generic operation.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OperationMetrics {
    pub count: u64,
    pub total_duration: Duration,
}

impl OperationMetrics {
    pub fn record(&mut self, duration: Duration) {
        self.count += 1;
        self.total_duration += duration;
    }
}

/// Snapshot of all metrics at a point in time.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub remote: HashMap<String, RemoteMetrics>,
    pub operations: HashMap<String, OperationMetrics>,
}

impl MetricsSnapshot {
    pub fn is_empty(&self) -> bool {
        self.remote.is_empty() && self.operations.is_empty()
    }

    /// Format as a human-readable report, sorted by key.
    pub fn format_report(&self) -> String {
        let mut report = String::new();
        report.push_str("=== Metrics Report ===\n\n");

        if !self.remote.is_empty() {
            report.push_str("Remote Storage Calls:\n");
            let mut keys: Vec<_> = self.remote.keys().collect();
            keys.sort();
            for name in keys {
                let metrics = &self.remote[name];
                report.push_str(&format!(
                    "  {}: {} calls, {:.1}% success, avg {:.2}ms\n",
                    name,
                    metrics.invocations,
                    metrics.success_rate(),
                    metrics.avg_duration().as_secs_f64() * 1000.0
                ));
            }
            report.push('\n');
        }

        if !self.operations.is_empty() {
            report.push_str("Commands:\n");
            let mut keys: Vec<_> = self.operations.keys().collect();
            keys.sort();
            for name in keys {
                let metrics = &self.operations[name];
                report.push_str(&format!(
                    "  {}: {} calls, {:.2}ms total\n",
                    name,
                    metrics.count,
                    metrics.total_duration.as_secs_f64() * 1000.0
                ));
            }
        }

        report
    }
}
