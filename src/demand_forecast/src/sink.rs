//! Result sinks: where a finished run is written.
//!
//! [`JsonSink`] writes the report as one compact JSON array line on its output
//! channel, and failures as `{"error": "<message>"}` on its error channel. A
//! successful run never produces an `error` key.

use std::io::{self, Stderr, Stdout, Write};

use serde::Serialize;

use crate::{error::ForecastError, report::Report};

/// Accepts the outcome of a run.
pub trait ResultSink {
    /// Emit a successful report (possibly empty).
    fn emit_report(&mut self, report: &Report) -> io::Result<()>;

    /// Emit a fatal error payload.
    fn emit_error(&mut self, error: &ForecastError) -> io::Result<()>;
}

#[derive(Serialize)]
struct ErrorPayload<'a> {
    error: &'a str,
}

/// JSON lines on two writers: `out` for reports, `err` for error payloads.
#[derive(Debug)]
pub struct JsonSink<O, E> {
    out: O,
    err: E,
}

impl JsonSink<Stdout, Stderr> {
    /// Sink on the process's stdout/stderr.
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl<O: Write, E: Write> JsonSink<O, E> {
    /// Sink over arbitrary writers.
    pub fn new(out: O, err: E) -> Self {
        Self { out, err }
    }

    /// Recover the writers.
    pub fn into_parts(self) -> (O, E) {
        (self.out, self.err)
    }
}

impl<O: Write, E: Write> ResultSink for JsonSink<O, E> {
    fn emit_report(&mut self, report: &Report) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, report)?;
        writeln!(self.out)?;
        self.out.flush()
    }

    fn emit_error(&mut self, error: &ForecastError) -> io::Result<()> {
        let msg = error.to_string();
        serde_json::to_writer(&mut self.err, &ErrorPayload { error: &msg })?;
        writeln!(self.err)?;
        self.err.flush()
    }
}
