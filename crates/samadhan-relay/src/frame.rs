//! Incremental decoding of `data:`-prefixed event-stream lines.
//!
//! Upstream chunks arrive with arbitrary boundaries. [`FrameDecoder`] keeps
//! the trailing partial line between chunks and only parses a line once its
//! newline has arrived (or the stream has ended). Buffering is done on bytes
//! so a multi-byte UTF-8 sequence split across chunks survives intact.
//!
//! [`DeltaAccumulator`] drives the decoder and concatenates the
//! `choices[0].delta.content` fragments in arrival order.

use serde_json::Value;

const DATA_PREFIX: &str = "data:";
const DONE_SENTINEL: &str = "[DONE]";

/// Outcome of parsing one complete line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// A `data:` frame carrying a text delta.
    Delta(String),
    /// The `[DONE]` end marker.
    Done,
    /// A `data:` frame whose payload is not valid JSON.
    Malformed { line: String, error: String },
    /// Anything else: comments, `event:` lines, blank data, frames without content.
    Ignored,
}

/// Parses one complete line (without its trailing newline).
pub fn parse_line(line: &str) -> Frame {
    let Some(payload) = line.strip_prefix(DATA_PREFIX) else {
        return Frame::Ignored;
    };
    let payload = payload.trim();
    if payload.is_empty() {
        return Frame::Ignored;
    }
    if payload == DONE_SENTINEL {
        return Frame::Done;
    }

    match serde_json::from_str::<Value>(payload) {
        Ok(json) => match json
            .pointer("/choices/0/delta/content")
            .and_then(Value::as_str)
        {
            Some(content) if !content.is_empty() => Frame::Delta(content.to_string()),
            _ => Frame::Ignored,
        },
        Err(e) => Frame::Malformed {
            line: line.to_string(),
            error: e.to_string(),
        },
    }
}

/// Splits a byte stream into lines and parses each complete one.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    pending: Vec<u8>,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a chunk and returns the frames for every line it completed.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<Frame> {
        self.pending.extend_from_slice(chunk);

        let mut frames = Vec::new();
        let mut start = 0;
        while let Some(offset) = self.pending[start..].iter().position(|&b| b == b'\n') {
            let end = start + offset;
            frames.push(parse_line(&String::from_utf8_lossy(&self.pending[start..end])));
            start = end + 1;
        }
        self.pending.drain(..start);
        frames
    }

    /// Bytes held back waiting for a newline.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Parses whatever partial line remains once the stream has ended.
    pub fn finish(self) -> Option<Frame> {
        if self.pending.is_empty() {
            None
        } else {
            Some(parse_line(&String::from_utf8_lossy(&self.pending)))
        }
    }
}

/// Concatenates text deltas from an event stream, skipping malformed frames.
#[derive(Debug, Default)]
pub struct DeltaAccumulator {
    decoder: FrameDecoder,
    text: String,
    deltas: usize,
    malformed: usize,
}

impl DeltaAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one upstream chunk.
    pub fn feed(&mut self, chunk: &[u8]) {
        for frame in self.decoder.push(chunk) {
            self.apply(frame);
        }
    }

    /// Text accumulated so far.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of frames skipped because their payload was not JSON.
    pub fn malformed_frames(&self) -> usize {
        self.malformed
    }

    /// Flushes the trailing partial line and returns the full response.
    pub fn finish(mut self) -> String {
        let decoder = std::mem::take(&mut self.decoder);
        if let Some(frame) = decoder.finish() {
            self.apply(frame);
        }
        tracing::debug!(
            deltas = self.deltas,
            malformed = self.malformed,
            chars = self.text.chars().count(),
            "event stream complete"
        );
        self.text
    }

    fn apply(&mut self, frame: Frame) {
        match frame {
            Frame::Delta(content) => {
                self.text.push_str(&content);
                self.deltas += 1;
            }
            Frame::Malformed { line, error } => {
                tracing::warn!(%line, %error, "skipping unparseable stream frame");
                self.malformed += 1;
            }
            Frame::Done | Frame::Ignored => {}
        }
    }
}
