//! Sink that forwards build output to any `Write`r, typically stdout.

use super::OutputSink;
use std::io::{self, Stdout, Write};

/// Passes text straight through; the real terminal interprets escapes and does its
/// own sizing, so `resize` and `fit` only record the requested geometry.
pub struct WriterSink<W: Write + Send> {
    writer: W,
    geometry: Option<(u16, u16)>,
}

impl WriterSink<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            geometry: None,
        }
    }

    pub fn geometry(&self) -> Option<(u16, u16)> {
        self.geometry
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> OutputSink for WriterSink<W> {
    fn write_text(&mut self, text: &str) {
        if let Err(e) = self
            .writer
            .write_all(text.as_bytes())
            .and_then(|_| self.writer.flush())
        {
            tracing::warn!(error = %e, "failed to write build output");
        }
    }

    fn resize(&mut self, cols: u16, rows: u16) {
        self.geometry = Some((cols, rows));
    }

    fn fit(&mut self) {}
}
