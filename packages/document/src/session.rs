//! # Generation Session
//!
//! Owns the decoder and the current document for one generation run.
//!
//! Sessions never share state: start a new one (or call [`GenerationSession::reset`])
//! for every run. Stopping calls to `push` cancels decoding; `finish` should
//! still be called once to pick up a trailing record.

use crate::decoder::{DecoderStats, PatchDecoder};
use crate::element::Document;
use crate::patch::{apply_patch, PatchOp};
use serde::Serialize;
use std::borrow::Cow;
use tracing::info;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    /// Operations that changed the document
    pub applied: usize,

    /// Operations that left it unchanged
    pub noops: usize,

    pub decoder: DecoderStats,
}

#[derive(Debug, Default)]
pub struct GenerationSession {
    decoder: PatchDecoder,
    document: Document,
    applied: usize,
    noops: usize,
    finalized: bool,
}

impl GenerationSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a chunk and apply every operation it completes
    pub fn push(&mut self, chunk: impl AsRef<[u8]>) -> &Document {
        let ops = self.decoder.push(chunk);
        self.apply_ops(&ops);
        &self.document
    }

    /// Apply already-decoded operations in order
    pub fn apply_ops(&mut self, ops: &[PatchOp]) {
        for op in ops {
            let next = match apply_patch(&self.document, op) {
                Cow::Owned(next) => Some(next),
                Cow::Borrowed(_) => None,
            };
            match next {
                Some(next) => {
                    self.document = next;
                    self.applied += 1;
                }
                None => self.noops += 1,
            }
        }
    }

    /// Flush the decoder and mark the document finalized
    pub fn finish(&mut self) -> &Document {
        let ops = self.decoder.flush();
        self.apply_ops(&ops);
        self.finalized = true;

        let stats = self.stats();
        info!(
            elements = self.document.elements.len(),
            applied = stats.applied,
            noops = stats.noops,
            dropped = stats.decoder.dropped,
            "Generation session finalized"
        );

        &self.document
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Take the document out, ending the session
    pub fn into_document(self) -> Document {
        self.document
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    pub fn stats(&self) -> SessionStats {
        SessionStats {
            applied: self.applied,
            noops: self.noops,
            decoder: self.decoder.stats(),
        }
    }

    /// Discard everything and start over at the empty document
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
