//! # Incremental Patch Decoder
//!
//! Turns arbitrarily chunked text into [`PatchOp`]s, one per
//! newline-terminated JSON record.
//!
//! Chunks are accepted as bytes, so a boundary may fall anywhere: inside a
//! line, inside a JSON string, or inside a multi-byte UTF-8 sequence.
//! Records that do not decode to a supported operation are dropped; garbled
//! output from the producer is expected, not exceptional.

use crate::patch::PatchOp;
use crate::path::PatchPath;
use serde::Serialize;
use tracing::debug;

/// Counters describing what the decoder has seen so far
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DecoderStats {
    /// Non-blank records examined
    pub records: usize,

    /// Records that produced an operation
    pub decoded: usize,

    /// Records that were dropped
    pub dropped: usize,
}

/// Line-buffered decoder for newline-delimited patch records
#[derive(Debug, Default)]
pub struct PatchDecoder {
    buffer: Vec<u8>,
    /// Prefix of `buffer` already known to hold no newline
    scanned: usize,
    stats: DecoderStats,
}

impl PatchDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk, returning the operations completed by it
    pub fn push(&mut self, chunk: impl AsRef<[u8]>) -> Vec<PatchOp> {
        self.buffer.extend_from_slice(chunk.as_ref());

        let mut ops = Vec::new();
        let mut line_start = 0;
        let mut cursor = self.scanned;

        while let Some(offset) = self.buffer[cursor..].iter().position(|b| *b == b'\n') {
            let line_end = cursor + offset;
            if let Some(op) = self.decode_line(line_start, line_end) {
                ops.push(op);
            }
            line_start = line_end + 1;
            cursor = line_start;
        }

        self.buffer.drain(..line_start);
        self.scanned = self.buffer.len();

        ops
    }

    /// Decode whatever is left as a final record (handles a missing trailing newline)
    pub fn flush(&mut self) -> Vec<PatchOp> {
        let end = self.buffer.len();
        let op = self.decode_line(0, end);

        self.buffer.clear();
        self.scanned = 0;

        op.into_iter().collect()
    }

    /// Bytes waiting for a newline
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    pub fn stats(&self) -> DecoderStats {
        self.stats
    }

    fn decode_line(&mut self, start: usize, end: usize) -> Option<PatchOp> {
        let raw = &self.buffer[start..end];

        let line = match std::str::from_utf8(raw) {
            Ok(line) => line.trim(),
            Err(err) => {
                self.stats.records += 1;
                self.stats.dropped += 1;
                debug!(error = %err, "Dropping patch record with invalid UTF-8");
                return None;
            }
        };

        if line.is_empty() {
            return None;
        }

        self.stats.records += 1;
        match decode_record(line) {
            Some(op) => {
                self.stats.decoded += 1;
                Some(op)
            }
            None => {
                self.stats.dropped += 1;
                debug!(record = line, "Dropping malformed patch record");
                None
            }
        }
    }
}

/// Decode a single record, rejecting unknown op kinds and unsupported paths
pub fn decode_record(line: &str) -> Option<PatchOp> {
    let op: PatchOp = serde_json::from_str(line.trim()).ok()?;
    PatchPath::parse(op.path())?;
    Some(op)
}
