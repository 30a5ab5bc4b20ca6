//! Incremental decoder for `text/event-stream` bytes.

/// Buffers raw bytes and yields the payload of each completed `data:` line.
///
/// The chat-completion stream only ever carries one `data:` line per event,
/// so other field names, comment lines, and blank event separators are
/// dropped. Partial lines stay buffered until the terminating newline
/// arrives, which also keeps multi-byte UTF-8 sequences intact across
/// chunk boundaries.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk of bytes, returning the `data:` payloads it completed.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);

        let mut payloads = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&line);
            let line = line.trim_end_matches(['\n', '\r']);
            if let Some(payload) = line.strip_prefix("data:") {
                payloads.push(payload.strip_prefix(' ').unwrap_or(payload).to_string());
            }
        }
        payloads
    }
}

#[cfg(test)]
mod tests {
    use super::SseDecoder;

    #[test]
    fn yields_payload_per_data_line() {
        let mut decoder = SseDecoder::new();
        assert_eq!(
            decoder.feed(b"data: {\"a\":1}\n\ndata: {\"b\":2}\n\n"),
            vec!["{\"a\":1}", "{\"b\":2}"]
        );
    }

    #[test]
    fn buffers_lines_split_across_chunks() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.feed(b"data: {\"tok").is_empty());
        assert_eq!(decoder.feed(b"en\":\"A\"}\n\n"), vec!["{\"token\":\"A\"}"]);
    }

    #[test]
    fn handles_crlf_line_endings() {
        let mut decoder = SseDecoder::new();
        assert_eq!(decoder.feed(b"data: x\r\n\r\n"), vec!["x"]);
    }

    #[test]
    fn ignores_comments_and_other_fields() {
        let mut decoder = SseDecoder::new();
        assert_eq!(
            decoder.feed(b": keep-alive\nevent: message\nid: 7\ndata: y\n\n"),
            vec!["y"]
        );
    }

    #[test]
    fn keeps_utf8_intact_across_chunk_boundaries() {
        let mut decoder = SseDecoder::new();
        let line = "data: caf\u{e9}\n".as_bytes();
        // Split in the middle of the two-byte é sequence.
        let split = line.len() - 2;
        assert!(decoder.feed(&line[..split]).is_empty());
        assert_eq!(decoder.feed(&line[split..]), vec!["caf\u{e9}"]);
    }
}
