//! Line framing for streamed response bodies.
//!
//! Network reads split the body at arbitrary byte offsets, possibly inside a
//! multi-byte character. [`LineSplitter`] buffers raw bytes and only decodes
//! complete lines.

/// Incremental newline splitter over a byte stream.
#[derive(Debug, Default)]
pub struct LineSplitter {
    buffer: Vec<u8>,
}

impl LineSplitter {
    pub fn new() -> Self {
        Self {
            buffer: Vec::with_capacity(1024),
        }
    }

    /// Feed a chunk and return every line it completes, without the line
    /// terminator (`\n` or `\r\n`).
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);
        let mut lines = Vec::new();

        while let Some(newline_pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=newline_pos).collect();
            lines.push(decode_line(&line[..newline_pos]));
        }
        lines
    }

    /// Return the trailing unterminated line, if any.
    pub fn finish(&mut self) -> Option<String> {
        if self.buffer.is_empty() {
            return None;
        }
        let rest = std::mem::take(&mut self.buffer);
        Some(decode_line(&rest))
    }
}

fn decode_line(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}
