use std::collections::HashMap;
use std::time::Instant;

/// Cross-cutting logger for pipeline orchestration events.
///
/// Lets the use case report stage timings and counts without knowing where
/// they end up.
pub trait PipelineLogger {
    /// Record how long a named pipeline stage took.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Record a named count (samples, faces, dropped images).
    fn count(&mut self, name: &str, value: usize);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Emit an end-of-pipeline summary. Default: no-op.
    fn summary(&self) {}
}

/// Silent logger that discards all events.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn count(&mut self, _name: &str, _value: usize) {}
    fn info(&mut self, _message: &str) {}
}

/// Logger that forwards messages to the `log` facade and prints a
/// per-stage timing summary when the run completes.
pub struct LogPipelineLogger {
    timings: HashMap<String, f64>,
    stage_order: Vec<String>,
    counts: HashMap<String, usize>,
    start_time: Instant,
    messages: Vec<String>,
}

impl LogPipelineLogger {
    pub fn new() -> Self {
        Self {
            timings: HashMap::new(),
            stage_order: Vec::new(),
            counts: HashMap::new(),
            start_time: Instant::now(),
            messages: Vec::new(),
        }
    }

    /// Returns the formatted summary string, or `None` if no data recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.timings.is_empty() && self.counts.is_empty() {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let mut lines = vec![format!(
            "Pipeline summary ({:.1}s total):",
            elapsed_ms / 1000.0
        )];

        // Stages in the order they ran
        for stage in &self.stage_order {
            let total_ms = self.timings[stage];
            let pct = if elapsed_ms > 0.0 {
                total_ms / elapsed_ms * 100.0
            } else {
                0.0
            };
            lines.push(format!("  {stage:12}: {total_ms:8.1}ms  ({pct:4.1}%)"));
        }

        let mut names: Vec<_> = self.counts.keys().collect();
        names.sort();
        for name in names {
            lines.push(format!("  {name}: {}", self.counts[name]));
        }

        Some(lines.join("\n"))
    }

    /// Total recorded time for a stage, summed over repeated calls.
    pub fn timing_for(&self, stage: &str) -> Option<f64> {
        self.timings.get(stage).copied()
    }

    pub fn count_for(&self, name: &str) -> Option<usize> {
        self.counts.get(name).copied()
    }
}

impl Default for LogPipelineLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineLogger for LogPipelineLogger {
    fn timing(&mut self, stage: &str, duration_ms: f64) {
        if !self.timings.contains_key(stage) {
            self.stage_order.push(stage.to_string());
        }
        *self.timings.entry(stage.to_string()).or_default() += duration_ms;
    }

    fn count(&mut self, name: &str, value: usize) {
        self.counts.insert(name.to_string(), value);
    }

    fn info(&mut self, message: &str) {
        self.messages.push(message.to_string());
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}
