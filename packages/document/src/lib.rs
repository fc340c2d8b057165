//! # genui Document
//!
//! Data model and streaming front end of the engine.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ decoder: text chunks → PatchOp              │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ patch: (Document, PatchOp) → Document       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ schema / linter / normalizer (other crates) │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use genui_document::GenerationSession;
//!
//! let mut session = GenerationSession::new();
//! session.push(r#"{"op":"add","path":"/root","value":"card"}"#);
//! session.push("\n");
//! let doc = session.finish();
//! assert_eq!(doc.root, "card");
//! ```

mod decoder;
mod element;
mod patch;
mod path;
mod session;

pub use decoder::{decode_record, DecoderStats, PatchDecoder};
pub use element::{is_dynamic_reference, Action, Document, Element};
pub use patch::{apply_all, apply_patch, PatchOp};
pub use path::PatchPath;
pub use session::{GenerationSession, SessionStats};

// Re-export for callers building props
pub use serde_json::{Map, Value};
