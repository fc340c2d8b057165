use anyhow::{Context, Result};
use clap::Args;
use genui_document::{Document, GenerationSession};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Bytes handed to the decoder per push when replaying a file
pub const DEFAULT_CHUNK_SIZE: usize = 64;

#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Patch stream (JSON lines) to read, or `-` for stdin
    pub input: PathBuf,

    /// Read a serialized tree instead of a patch stream
    #[arg(long)]
    pub tree: bool,

    /// Replay the stream in chunks of this many bytes
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,
}

/// Read a file, or stdin for `-`
pub fn read_input(path: &Path) -> Result<Vec<u8>> {
    if path == Path::new("-") {
        let mut bytes = Vec::new();
        std::io::stdin()
            .read_to_end(&mut bytes)
            .context("Failed to read stdin")?;
        return Ok(bytes);
    }

    std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Feed a stream through a session chunk by chunk, as a live generation would
pub fn replay(bytes: &[u8], chunk_size: usize) -> GenerationSession {
    let mut session = GenerationSession::new();
    for chunk in bytes.chunks(chunk_size.max(1)) {
        session.push(chunk);
    }
    session.finish();
    session
}

/// The tree described by the input, replayed or parsed
pub fn load_tree(args: &InputArgs) -> Result<Document> {
    let bytes = read_input(&args.input)?;

    if args.tree {
        return serde_json::from_slice(&bytes)
            .with_context(|| format!("{} is not a serialized tree", args.input.display()));
    }

    let session = replay(&bytes, args.chunk_size);
    debug!(stats = ?session.stats(), "Replayed patch stream");
    Ok(session.into_document())
}

#[cfg(test)]
mod tests {
    use super::*;

    const STREAM: &str = concat!(
        r#"{"op":"add","path":"/root","value":"card"}"#,
        "\n",
        r#"{"op":"add","path":"/elements/card","value":{"type":"Card","props":{"title":"Café"}}}"#,
        "\n",
        "not json\n",
        r#"{"op":"replace","path":"/elements/card/props/title","value":"Menu"}"#,
    );

    #[test]
    fn test_replay_is_chunk_size_independent() {
        let whole = replay(STREAM.as_bytes(), STREAM.len()).into_document();
        for size in [0, 1, 3, 7, 64] {
            assert_eq!(replay(STREAM.as_bytes(), size).into_document(), whole);
        }
        assert_eq!(whole.get("card").unwrap().prop_str("title"), Some("Menu"));
    }

    #[test]
    fn test_replay_counts_dropped_records() {
        let session = replay(STREAM.as_bytes(), 5);
        assert!(session.is_finalized());
        assert_eq!(session.stats().decoder.dropped, 1);
        assert_eq!(session.stats().applied, 3);
    }
}
