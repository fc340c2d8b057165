use crate::input::{read_input, DEFAULT_CHUNK_SIZE};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use genui_document::{PatchDecoder, PatchOp};
use std::io::Write;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Patch stream (JSON lines) to read, or `-` for stdin
    pub input: PathBuf,

    /// Feed the decoder this many bytes at a time
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,
}

/// Print every decoded operation as one JSON line
pub fn decode(args: DecodeArgs) -> Result<()> {
    let bytes = read_input(&args.input)?;
    let mut decoder = PatchDecoder::new();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    for chunk in bytes.chunks(args.chunk_size.max(1)) {
        write_ops(&mut out, &decoder.push(chunk))?;
    }
    write_ops(&mut out, &decoder.flush())?;
    out.flush()?;

    let stats = decoder.stats();
    let dropped = format!("{} dropped", stats.dropped);
    eprintln!(
        "{} {} records, {} operations, {}",
        "Decoded".green().bold(),
        stats.records,
        stats.decoded,
        if stats.dropped > 0 {
            dropped.yellow()
        } else {
            dropped.normal()
        }
    );

    Ok(())
}

fn write_ops(out: &mut impl Write, ops: &[PatchOp]) -> Result<()> {
    for op in ops {
        writeln!(out, "{}", serde_json::to_string(op)?)?;
    }
    Ok(())
}
