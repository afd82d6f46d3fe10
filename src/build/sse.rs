//! Incremental decoder for `text/event-stream` bodies.
//!
//! Only the `data` field matters to the build protocol. Comment lines (the service
//! sends `:keepalive`) and the `event`, `id` and `retry` fields are dropped.

/// Splits a byte stream into event payloads.
///
/// Bytes are buffered until a full line is available, so chunk boundaries may fall
/// anywhere, including inside a multi-byte UTF-8 sequence.
#[derive(Debug, Default)]
pub struct EventStreamDecoder {
    pending: Vec<u8>,
    data_lines: Vec<String>,
}

impl EventStreamDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next chunk and return every payload it completed, in order.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(chunk);

        let mut payloads = Vec::new();
        while let Some(pos) = self.pending.iter().position(|b| *b == b'\n') {
            let mut line: Vec<u8> = self.pending.drain(..=pos).collect();
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            let line = String::from_utf8_lossy(&line);
            if let Some(payload) = self.process_line(&line) {
                payloads.push(payload);
            }
        }
        payloads
    }

    /// Bytes of an unterminated event still buffered.
    ///
    /// At end of stream this is discarded; an event only counts once the blank line
    /// that ends it has arrived.
    pub fn has_partial_event(&self) -> bool {
        !self.pending.is_empty() || !self.data_lines.is_empty()
    }

    fn process_line(&mut self, line: &str) -> Option<String> {
        if line.is_empty() {
            if self.data_lines.is_empty() {
                return None;
            }
            let payload = self.data_lines.join("\n");
            self.data_lines.clear();
            return Some(payload);
        }

        if line.starts_with(':') {
            return None;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };

        if field == "data" {
            self.data_lines.push(value.to_string());
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_event() {
        let mut decoder = EventStreamDecoder::new();
        let payloads = decoder.feed(b"data: {\"phase\":\"waiting\"}\n\n");
        assert_eq!(payloads, vec![r#"{"phase":"waiting"}"#]);
        assert!(!decoder.has_partial_event());
    }

    #[test]
    fn test_event_split_across_chunks() {
        let mut decoder = EventStreamDecoder::new();
        assert!(decoder.feed(b"da").is_empty());
        assert!(decoder.feed(b"ta: {\"message\":").is_empty());
        assert!(decoder.feed(b"\"hi\"}\n").is_empty());
        assert!(decoder.has_partial_event());
        assert_eq!(decoder.feed(b"\n"), vec![r#"{"message":"hi"}"#]);
    }

    #[test]
    fn test_multibyte_char_split_across_chunks() {
        let mut decoder = EventStreamDecoder::new();
        let bytes = "data: {\"message\":\"✓ done\"}\n\n".as_bytes();
        let split = bytes.iter().position(|b| *b == 0xE2).unwrap() + 1;
        assert!(decoder.feed(&bytes[..split]).is_empty());
        assert_eq!(decoder.feed(&bytes[split..]), vec![r#"{"message":"✓ done"}"#]);
    }

    #[test]
    fn test_multiple_events_in_one_chunk() {
        let mut decoder = EventStreamDecoder::new();
        let payloads = decoder.feed(b"data: 1\n\ndata: 2\n\ndata: 3\n");
        assert_eq!(payloads, vec!["1", "2"]);
        assert_eq!(decoder.feed(b"\n"), vec!["3"]);
    }

    #[test]
    fn test_multiline_data_joined() {
        let mut decoder = EventStreamDecoder::new();
        let payloads = decoder.feed(b"data: first\ndata: second\n\n");
        assert_eq!(payloads, vec!["first\nsecond"]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let mut decoder = EventStreamDecoder::new();
        let payloads = decoder.feed(b"data: {\"phase\":\"ready\"}\r\n\r\n");
        assert_eq!(payloads, vec![r#"{"phase":"ready"}"#]);
    }

    #[test]
    fn test_comments_and_other_fields_ignored() {
        let mut decoder = EventStreamDecoder::new();
        let payloads =
            decoder.feed(b":keepalive\n\nevent: progress\nid: 7\nretry: 1000\ndata: x\n\n");
        assert_eq!(payloads, vec!["x"]);
    }

    #[test]
    fn test_data_without_space_or_value() {
        let mut decoder = EventStreamDecoder::new();
        assert_eq!(decoder.feed(b"data:x\n\n"), vec!["x"]);
        // A bare "data" line contributes an empty line to the payload
        assert_eq!(decoder.feed(b"data\ndata: y\n\n"), vec!["\ny"]);
    }

    #[test]
    fn test_blank_lines_without_data_dispatch_nothing() {
        let mut decoder = EventStreamDecoder::new();
        assert!(decoder.feed(b"\n\n\n").is_empty());
    }
}
