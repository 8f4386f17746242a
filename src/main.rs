//! `stride-replay`: runs a rig over scripted input and prints one JSON line
//! per frame.
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use clap::Parser;
use stride::replay::{Replay, Script};
use stride::{init_logging, RigConfig};

/// Replays scripted first-person input deterministically
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON rig configuration; defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// JSON input script; a built-in demo is used when omitted
    #[arg(short, long)]
    script: Option<PathBuf>,
    /// Fixed frame delta in seconds
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,
    /// Stop after this many frames
    #[arg(short, long)]
    frames: Option<u64>,
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    Ok(BufReader::new(file))
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    ensure!(
        args.dt.is_finite() && args.dt > 0.0,
        "--dt must be a positive number of seconds, got {}",
        args.dt
    );

    let rig = match &args.config {
        Some(path) => RigConfig::from_json_reader(open(path)?)
            .with_context(|| format!("loading rig {}", path.display()))?,
        None => RigConfig::default(),
    };
    let script = match &args.script {
        Some(path) => Script::from_json_reader(open(path)?)
            .with_context(|| format!("loading script {}", path.display()))?,
        None => Script::demo(60),
    };

    let mut replay = Replay::new(&rig, &script, args.dt).context("building rig")?;
    let mut out = BufWriter::new(io::stdout().lock());
    for record in replay.run(&script, args.frames) {
        serde_json::to_writer(&mut out, &record).context("encoding frame")?;
        out.write_all(b"\n").context("writing frame")?;
    }
    out.flush().context("flushing output")?;
    Ok(())
}
