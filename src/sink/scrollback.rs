//! In-memory build log modelled on a small terminal.

use super::OutputSink;
use crate::config::TerminalConfig;
use std::collections::VecDeque;

/// Scrollback buffer with just enough terminal semantics for build logs.
///
/// - `\n` starts a new line (line feeds are converted to CR+LF)
/// - `\r` moves the cursor back to the start of the line; later text overwrites
/// - `ESC[2K` erases the current line
/// - other escape sequences (colours) are dropped from the text view
///
/// `fit` sizes the visible area to the content, never above the row limit set by
/// the last `resize`.
#[derive(Debug, Clone)]
pub struct ScrollbackLog {
    lines: VecDeque<String>,
    current: Vec<char>,
    cursor: usize,
    escape: Option<String>,
    cols: u16,
    rows: u16,
    visible_rows: u16,
    scrollback: usize,
}

impl ScrollbackLog {
    /// A one-row log showing the configured placeholder.
    pub fn new(config: &TerminalConfig) -> Self {
        let mut log = Self {
            lines: VecDeque::new(),
            current: Vec::new(),
            cursor: 0,
            escape: None,
            cols: config.cols,
            rows: 1,
            visible_rows: 1,
            scrollback: config.scrollback.max(1),
        };
        log.write_text(&config.placeholder);
        log
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    /// Row limit from the last `resize`.
    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Rows currently shown, as of the last `fit`.
    pub fn visible_rows(&self) -> u16 {
        self.visible_rows
    }

    /// All retained lines, the line under the cursor last.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .iter()
            .cloned()
            .chain(std::iter::once(self.current.iter().collect()))
            .collect()
    }

    /// Retained text with lines joined by `\n`.
    pub fn text(&self) -> String {
        self.lines().join("\n")
    }

    /// Lines in the visible window at the bottom of the scrollback.
    pub fn visible_lines(&self) -> Vec<String> {
        let lines = self.lines();
        let skip = lines.len().saturating_sub(self.visible_rows as usize);
        lines.into_iter().skip(skip).collect()
    }

    /// Screen rows taken by the newest content once wrapped at `cols`, counting back
    /// from the cursor line and stopping as soon as `limit` rows are reached.
    fn content_rows(&self, limit: usize) -> usize {
        let cols = self.cols.max(1) as usize;
        let wrapped = |chars: usize| chars.max(1).div_ceil(cols);

        let mut rows = wrapped(self.current.len());
        for line in self.lines.iter().rev() {
            if rows >= limit {
                break;
            }
            rows += wrapped(line.chars().count());
        }
        rows
    }

    fn put_char(&mut self, c: char) {
        while self.current.len() < self.cursor {
            self.current.push(' ');
        }
        if self.cursor < self.current.len() {
            self.current[self.cursor] = c;
        } else {
            self.current.push(c);
        }
        self.cursor += 1;
    }

    fn new_line(&mut self) {
        let line: String = self.current.drain(..).collect();
        self.lines.push_back(line);
        self.cursor = 0;
        // The line under the cursor counts against the scrollback as well
        while self.lines.len() + 1 > self.scrollback {
            self.lines.pop_front();
        }
    }

    fn apply_escape(&mut self, sequence: &str) {
        // sequence is everything after ESC, e.g. "[2K" or "[38;2;1;2;3m"
        if sequence == "[2K" {
            self.current.clear();
        }
    }
}

impl OutputSink for ScrollbackLog {
    fn write_text(&mut self, text: &str) {
        for c in text.chars() {
            // Escape sequences are ASCII; anything else ends one and is printed
            if let Some(mut sequence) = self.escape.take().filter(|_| c.is_ascii()) {
                let first = sequence.is_empty();
                sequence.push(c);
                let complete = if first {
                    // Two-byte escapes (ESC 7, ESC c, ...) end immediately
                    c != '['
                } else {
                    ('\u{40}'..='\u{7e}').contains(&c)
                };
                if complete {
                    self.apply_escape(&sequence);
                } else {
                    self.escape = Some(sequence);
                }
                continue;
            }

            match c {
                '\x1b' => self.escape = Some(String::new()),
                '\n' => self.new_line(),
                '\r' => self.cursor = 0,
                c if c.is_control() && c != '\t' => {}
                c => self.put_char(c),
            }
        }
    }

    fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols.max(1);
        self.rows = rows.max(1);
    }

    fn fit(&mut self) {
        let limit = self.rows as usize;
        let rows = self.content_rows(limit).clamp(1, limit);
        self.visible_rows = rows as u16;
    }
}
