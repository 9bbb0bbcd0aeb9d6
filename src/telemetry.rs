//! Run telemetry.
//!
//! A [`RunLogger`] receives the string parameters of one training run when
//! it is created, then periodic batches of named metrics tagged with the
//! iteration they were taken at, then a single finish signal. The solver
//! never calls it; the training driver does, usually from the
//! `train_with_callback` hook.
//!
//! [`JsonLinesLogger`] writes one JSON object per event and mirrors each
//! event to the `log` facade.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

use crate::cfr::CFRStats;

/// Errors raised by a run logger.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Writing the sink failed.
    #[error("telemetry I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// An event could not be encoded.
    #[error("telemetry encoding failed: {0}")]
    Encode(#[from] serde_json::Error),

    /// An event arrived after `finish`.
    #[error("run {0} already finished")]
    Finished(String),
}

/// Sink for the metrics of one training run.
pub trait RunLogger {
    /// Record a batch of metrics taken at `iteration`.
    fn log_metrics(
        &mut self,
        metrics: &BTreeMap<String, f64>,
        iteration: u64,
    ) -> Result<(), TelemetryError>;

    /// Mark the run finished. Later calls fail.
    fn finish(&mut self) -> Result<(), TelemetryError>;
}

/// One line of a JSON-lines run log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RunEvent {
    /// Run parameters, written once at creation.
    Params {
        /// Run name.
        run: String,
        /// Parameters as strings.
        params: BTreeMap<String, String>,
    },
    /// A batch of metrics.
    Metrics {
        /// Run name.
        run: String,
        /// Iteration the metrics were taken at.
        iteration: u64,
        /// Metric values by name.
        metrics: BTreeMap<String, f64>,
    },
    /// End of the run.
    Finished {
        /// Run name.
        run: String,
    },
}

/// Writes run events as JSON lines.
pub struct JsonLinesLogger<W: Write> {
    run: String,
    writer: W,
    finished: bool,
}

impl JsonLinesLogger<BufWriter<File>> {
    /// Create (or truncate) `path` and start a run.
    pub fn create<P: AsRef<Path>>(
        path: P,
        run: impl Into<String>,
        params: BTreeMap<String, String>,
    ) -> Result<Self, TelemetryError> {
        let file = File::create(path)?;
        Self::new(BufWriter::new(file), run, params)
    }
}

impl<W: Write> JsonLinesLogger<W> {
    /// Start a run on any writer, recording its parameters.
    pub fn new(
        writer: W,
        run: impl Into<String>,
        params: BTreeMap<String, String>,
    ) -> Result<Self, TelemetryError> {
        let mut logger = Self {
            run: run.into(),
            writer,
            finished: false,
        };
        log::info!("run {} params: {:?}", logger.run, params);
        let event = RunEvent::Params {
            run: logger.run.clone(),
            params,
        };
        logger.write(&event)?;
        Ok(logger)
    }

    /// Run name.
    pub fn run(&self) -> &str {
        &self.run
    }

    /// Give back the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write(&mut self, event: &RunEvent) -> Result<(), TelemetryError> {
        if self.finished {
            return Err(TelemetryError::Finished(self.run.clone()));
        }
        serde_json::to_writer(&mut self.writer, event)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}

impl<W: Write> RunLogger for JsonLinesLogger<W> {
    fn log_metrics(
        &mut self,
        metrics: &BTreeMap<String, f64>,
        iteration: u64,
    ) -> Result<(), TelemetryError> {
        log::info!("run {} @ {}: {:?}", self.run, iteration, metrics);
        let event = RunEvent::Metrics {
            run: self.run.clone(),
            iteration,
            metrics: metrics.clone(),
        };
        self.write(&event)
    }

    fn finish(&mut self) -> Result<(), TelemetryError> {
        let event = RunEvent::Finished {
            run: self.run.clone(),
        };
        self.write(&event)?;
        self.writer.flush()?;
        self.finished = true;
        log::info!("run {} finished", self.run);
        Ok(())
    }
}

/// Standard training metrics from solver statistics, plus strategy drift
/// since the previous report when one is available.
pub fn training_metrics(stats: &CFRStats, drift: Option<f64>) -> BTreeMap<String, f64> {
    let mut metrics = BTreeMap::new();
    metrics.insert("info_sets".to_string(), stats.info_sets as f64);
    metrics.insert("iterations_per_second".to_string(), stats.iterations_per_second);
    metrics.insert("elapsed_seconds".to_string(), stats.elapsed_seconds);
    metrics.insert("last_value".to_string(), stats.last_value);
    if let Some(drift) = drift.filter(|d| d.is_finite()) {
        metrics.insert("strategy_drift".to_string(), drift);
    }
    metrics
}
