//! End-to-end run: fetch → aggregate → forecast per item → rank → emit.

use std::io;

use crate::{
    aggregate::aggregate_daily,
    config::ForecastSettings,
    error::Result,
    forecast::TrendForecaster,
    report::{Report, ReportBuilder},
    sink::ResultSink,
    source::RecordSource,
};

/// Whether a run produced a report or an error payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// A report was emitted.
    Success,
    /// An error payload was emitted; the process should exit non-zero.
    Failed,
}

/// Fetch all records and build the ranked report.
///
/// Fails only when the source fails; no partial report is produced.
pub fn run<S>(source: &mut S, settings: ForecastSettings) -> Result<Report>
where
    S: RecordSource + ?Sized,
{
    settings.validate()?;
    let records = source.fetch()?;
    tracing::info!(records = records.len(), "fetched purchase records");

    let daily = aggregate_daily(&records);
    tracing::debug!(rows = daily.len(), "aggregated daily rows");

    Ok(ReportBuilder::new(TrendForecaster::new(settings)).build(&daily))
}

/// Emit an already computed outcome to `sink`.
pub fn emit<K>(outcome: &Result<Report>, sink: &mut K) -> io::Result<RunStatus>
where
    K: ResultSink + ?Sized,
{
    match outcome {
        Ok(report) => {
            sink.emit_report(report)?;
            Ok(RunStatus::Success)
        }
        Err(e) => {
            tracing::debug!(error = %e, "demand forecast failed");
            sink.emit_error(e)?;
            Ok(RunStatus::Failed)
        }
    }
}

/// [`run`] then [`emit`].
pub fn run_to_sink<S, K>(
    source: &mut S,
    settings: ForecastSettings,
    sink: &mut K,
) -> io::Result<RunStatus>
where
    S: RecordSource + ?Sized,
    K: ResultSink + ?Sized,
{
    let outcome = run(source, settings);
    emit(&outcome, sink)
}
