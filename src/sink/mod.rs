//! Output sinks for build logs.
//!
//! The build driver treats its log as an opaque terminal: it writes text, sets a
//! geometry, and asks the sink to fit itself after content changes.

pub mod scrollback;
pub mod writer;

pub use scrollback::ScrollbackLog;
pub use writer::WriterSink;

/// Erase the current line and return the cursor to its start.
pub const CLEAR_LINE: &str = "\x1b[2K\r";

/// Terminal-like destination for build output.
pub trait OutputSink: Send {
    /// Append text verbatim; may contain newlines and ANSI escapes.
    fn write_text(&mut self, text: &str);

    /// Set the terminal geometry.
    fn resize(&mut self, cols: u16, rows: u16);

    /// Recompute the visible size after content or container changes.
    fn fit(&mut self);
}
