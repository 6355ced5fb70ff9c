//! Output writer
//!
//! Writes projected values one per line so stdout stays machine-readable.

use crate::error::Result;
use crate::types::JsonValue;
use std::io::Write;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON, one value per line
    #[default]
    Json,
    /// Indented JSON
    Pretty,
}

/// Writes JSON values to any `Write` sink
#[derive(Debug)]
pub struct OutputWriter<W: Write> {
    out: W,
    format: OutputFormat,
    written: u64,
}

impl<W: Write> OutputWriter<W> {
    /// Create a new writer
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self {
            out,
            format,
            written: 0,
        }
    }

    /// Write a single value
    pub fn write_value(&mut self, value: &JsonValue) -> Result<()> {
        match self.format {
            OutputFormat::Json => serde_json::to_writer(&mut self.out, value)?,
            OutputFormat::Pretty => serde_json::to_writer_pretty(&mut self.out, value)?,
        }
        self.out.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    /// Write several values in order
    pub fn write_all(&mut self, values: &[JsonValue]) -> Result<()> {
        for value in values {
            self.write_value(value)?;
        }
        Ok(())
    }

    /// Number of values written so far
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Flush the underlying sink
    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    /// Take the underlying sink
    pub fn into_inner(self) -> W {
        self.out
    }
}
