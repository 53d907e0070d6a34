//! Append benchmark for [`OutputBuffer`]
//!
//! Times `n` appends of an `l`-byte text to a fresh buffer over a grid of
//! `(n, l)` values and writes one CSV row per sample.

use std::io::Write;
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::buffer::OutputBuffer;
use crate::error::TaggerError;

/// Errors that can occur while running a benchmark
#[derive(Debug, Error)]
pub enum BenchError {
    #[error("failed to write benchmark output: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Tagger(#[from] TaggerError),

    #[error("invalid benchmark parameters: {reason}")]
    InvalidParams { reason: String },
}

/// One timed run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub appends: usize,
    pub len: usize,
    pub elapsed: Duration,
}

/// Grid of benchmark runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchParams {
    /// Largest number of appends per run
    pub max_appends: usize,
    /// Longest appended text, in bytes
    pub max_len: usize,
    /// Increment between append counts
    pub step: usize,
}

impl Default for BenchParams {
    fn default() -> Self {
        Self {
            max_appends: 100_000,
            max_len: 100,
            step: 100,
        }
    }
}

impl BenchParams {
    /// Set the largest append count
    pub fn with_max_appends(mut self, max_appends: usize) -> Self {
        self.max_appends = max_appends;
        self
    }

    /// Set the longest text length
    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }

    /// Set the append count increment
    pub fn with_step(mut self, step: usize) -> Self {
        self.step = step;
        self
    }

    /// Append counts visited for each length: 1, 1 + step, ...
    pub fn append_counts(&self) -> impl Iterator<Item = usize> {
        (1..=self.max_appends).step_by(self.step.max(1))
    }

    /// Total number of samples in the grid
    pub fn sample_count(&self) -> usize {
        self.max_len * self.append_counts().count()
    }

    fn validate(&self) -> Result<(), BenchError> {
        if self.step == 0 {
            return Err(BenchError::InvalidParams {
                reason: "step must be at least 1".to_string(),
            });
        }
        if self.max_appends == 0 || self.max_len == 0 {
            return Err(BenchError::InvalidParams {
                reason: "max appends and max length must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Time `appends` appends of a `len`-byte text to a fresh buffer
pub fn time_appends(appends: usize, len: usize) -> Result<Sample, TaggerError> {
    let text = "x".repeat(len);

    let start = Instant::now();
    let mut buffer = OutputBuffer::new();
    for _ in 0..appends {
        buffer.push_str(&text)?;
    }
    let elapsed = start.elapsed();

    debug_assert_eq!(buffer.len(), appends * len);
    Ok(Sample {
        appends,
        len,
        elapsed,
    })
}

/// Run the whole grid, writing `N,L,Time` CSV to `out`.
///
/// `progress` receives the completed fraction, from just above 0 to 1.
pub fn run_append_benchmark<W, F>(
    params: &BenchParams,
    out: &mut W,
    mut progress: F,
) -> Result<Vec<Sample>, BenchError>
where
    W: Write,
    F: FnMut(f64),
{
    params.validate()?;

    let total = params.sample_count();
    let mut samples = Vec::with_capacity(total);

    writeln!(out, "N,L,Time")?;
    for len in 1..=params.max_len {
        for appends in params.append_counts() {
            let sample = time_appends(appends, len)?;
            writeln!(
                out,
                "{},{},{:.6}",
                sample.appends,
                sample.len,
                sample.elapsed.as_secs_f64()
            )?;
            samples.push(sample);
            progress(samples.len() as f64 / total as f64);
        }
    }
    out.flush()?;

    Ok(samples)
}
