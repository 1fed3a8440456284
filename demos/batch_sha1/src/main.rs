use pico_args::Arguments;
use sha1::Digest as _;
use sha1_batch::{Hasher, HasherConfig, HasherError, Sha1};
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Frame length used when `--frame-len` is not given.
const DEFAULT_FRAME_LEN: usize = 4096;

const USAGE: &str = "\
usage: batch_sha1 [--frame-len N] [--width N] [--threads N] [--verify] <FILE>

Splits FILE into N-byte frames (the last one zero-padded) and prints the SHA-1 of every frame.
Set GPU_SHA1_LOG (e.g. GPU_SHA1_LOG=debug) to see dispatch details.";

fn hex_string(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn main() -> Result<(), Box<dyn Error>> {
    let filter = tracing_subscriber::EnvFilter::from_env("GPU_SHA1_LOG");
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut args = Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        println!("{USAGE}");
        return Ok(());
    }

    let frame_len: usize = args
        .opt_value_from_str("--frame-len")?
        .unwrap_or(DEFAULT_FRAME_LEN);
    let width: Option<usize> = args.opt_value_from_str("--width")?;
    let threads: Option<usize> = args.opt_value_from_str("--threads")?;
    let verify = args.contains("--verify");
    let path: PathBuf = args.free_from_str()?;

    let rest = args.finish();
    if !rest.is_empty() {
        return Err(format!("unexpected arguments: {rest:?}\n\n{USAGE}").into());
    }

    if frame_len == 0 {
        return Err(HasherError::ZeroFrameLength.into());
    }

    let data = fs::read(&path)?;
    if data.is_empty() {
        info!(path = %path.display(), "input is empty, nothing to hash");
        return Ok(());
    }

    let mut config = HasherConfig::new();
    if let Some(width) = width {
        config = config.thread_execution_width(width);
    }
    if let Some(threads) = threads {
        config = config.num_threads(threads);
    }
    let hasher = Hasher::with_config(config)?;

    let count = data.len().div_ceil(frame_len);
    let mut digest = hasher.digest(Sha1, frame_len, count)?;

    let mut input = digest.input_buffer();
    for chunk in data.chunks(frame_len) {
        let frame = input.next_frame().ok_or("input batch is full")?;
        frame[..chunk.len()].copy_from_slice(chunk);
        frame[chunk.len()..].fill(0);
    }

    info!(
        path = %path.display(),
        bytes = data.len(),
        frames = count,
        "hashing"
    );
    digest.run()?;

    let mut mismatches = 0;
    for (idx, (frame, output)) in digest
        .input_frames()
        .zip(digest.output_buffer())
        .enumerate()
    {
        println!("{idx:>8}  {}", hex_string(output));

        if verify {
            let cpu_hash = sha1::Sha1::digest(frame);
            if output != &cpu_hash[..] {
                eprintln!("ERROR: frame {idx} differs, expected {}", hex_string(&cpu_hash));
                mismatches += 1;
            }
        }
    }

    if mismatches > 0 {
        Err(format!("{mismatches} frame(s) did not match the reference").into())
    } else {
        if verify {
            info!("all {count} frames match the reference");
        }
        Ok(())
    }
}
