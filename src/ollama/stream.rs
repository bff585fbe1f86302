//! Decoding of the newline-delimited JSON response stream.

use serde::Deserialize;
use tracing::{trace, warn};

/// One record of the streamed response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StreamFragment {
    pub response: String,
    pub done: bool,
    pub error: Option<String>,
}

/// Accumulates streamed fragments into the complete response text.
///
/// Bytes may arrive split anywhere, including inside a UTF-8 sequence, so
/// partial lines are buffered until their newline arrives.
#[derive(Debug, Default)]
pub struct StreamAccumulator {
    pending: Vec<u8>,
    text: String,
    done: bool,
}

impl StreamAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed raw body bytes. Ignored once a terminal record was seen.
    pub fn push(&mut self, bytes: &[u8]) {
        if self.done {
            return;
        }

        self.pending.extend_from_slice(bytes);

        while let Some(pos) = self.pending.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            self.consume_line(&line[..line.len() - 1]);
            if self.done {
                self.pending.clear();
                break;
            }
        }
    }

    /// Whether a record with `done=true` has been consumed.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Flush any unterminated final line and return the concatenated text.
    pub fn finish(mut self) -> String {
        if !self.done && !self.pending.is_empty() {
            let line = std::mem::take(&mut self.pending);
            self.consume_line(&line);
        }
        self.text
    }

    fn consume_line(&mut self, line: &[u8]) {
        if line.iter().all(u8::is_ascii_whitespace) {
            return;
        }

        match serde_json::from_slice::<StreamFragment>(line) {
            Ok(fragment) => {
                if let Some(error) = &fragment.error {
                    warn!("Model endpoint reported an error mid-stream: {error}");
                }
                self.text.push_str(&fragment.response);
                self.done = fragment.done;
            }
            Err(e) => {
                trace!(
                    "Skipping undecodable stream line ({e}): {}",
                    String::from_utf8_lossy(line)
                );
            }
        }
    }
}

/// Concatenate a complete NDJSON body in one call.
pub fn accumulate(body: &[u8]) -> String {
    let mut acc = StreamAccumulator::new();
    acc.push(body);
    acc.finish()
}
