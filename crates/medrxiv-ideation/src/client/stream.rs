//! Incremental parser for a stream of concatenated JSON objects.
//!
//! The hypothesis service streams `{...}{...}{...}` with no separators, and
//! chunk boundaries fall anywhere, including inside a UTF-8 sequence. Bytes
//! are buffered until a complete object can be decoded; anything between
//! objects that is not an object start is skipped.

use serde_json::Value;

/// Buffering object splitter.
#[derive(Debug, Default)]
pub struct JsonObjectStream {
    buffer: Vec<u8>,
}

impl JsonObjectStream {
    /// Create an empty parser.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk and return every object it completes.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<Value> {
        self.buffer.extend_from_slice(chunk);
        let mut objects = Vec::new();
        let mut pos = 0;

        while let Some(offset) = self.buffer[pos..].iter().position(|&b| b == b'{') {
            let start = pos + offset;
            let mut values =
                serde_json::Deserializer::from_slice(&self.buffer[start..]).into_iter::<Value>();
            match values.next() {
                Some(Ok(value)) => {
                    pos = start + values.byte_offset();
                    objects.push(value);
                }
                Some(Err(e)) if e.is_eof() => {
                    pos = start;
                    break;
                }
                // Not a valid object here; resume after this brace.
                _ => pos = start + 1,
            }
        }

        if self.buffer.get(pos) == Some(&b'{') {
            self.buffer.drain(..pos);
        } else {
            self.buffer.clear();
        }
        objects
    }

    /// Bytes held back waiting for the rest of an object.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }
}
