#![deny(warnings)]

use anyhow::Context;
use clap::Parser;
use ringkit_core::config::{resolve_buffer_config, BufferConfig, Env, StdEnv};
use ringkit_core::{CircularBuffer, EnqueueOutcome, OverwritePolicy, Stack};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ringkit")]
#[command(about = "Keep a fixed number of input lines in a ring buffer and print them")]
struct Args {
    /// File to read; stdin when omitted.
    path: Option<PathBuf>,

    /// Lines to keep [env: RINGKIT_CAPACITY] [default: 10]
    #[arg(short = 'n', long)]
    capacity: Option<usize>,

    /// `overwrite` keeps the newest lines, `ignore` keeps the oldest
    /// [env: RINGKIT_POLICY] [default: overwrite]
    #[arg(long)]
    policy: Option<OverwritePolicy>,

    /// Print the retained lines as a JSON array.
    #[arg(long)]
    json: bool,

    /// Print newest first.
    #[arg(long)]
    reverse: bool,

    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[derive(Debug)]
struct Retained {
    buffer: CircularBuffer<String>,
    lines_read: usize,
    evicted: usize,
    dropped: usize,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level)?;

    let cfg = build_config(&args, &StdEnv)?;
    tracing::info!(
        capacity = cfg.capacity.get(),
        policy = %cfg.policy,
        "config loaded"
    );

    let retained = match &args.path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            retain_lines(BufReader::new(file), &cfg)?
        }
        None => retain_lines(io::stdin().lock(), &cfg)?,
    };

    tracing::info!(
        lines_read = retained.lines_read,
        retained = retained.buffer.len(),
        evicted = retained.evicted,
        dropped = retained.dropped,
        "input consumed"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    render(&mut out, retained.buffer, args.reverse, args.json)?;
    out.flush().context("failed to flush stdout")?;

    Ok(())
}

fn init_tracing(level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(
            level
                .parse()
                .with_context(|| format!("invalid --log-level: {level}"))?,
        )
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

fn build_config(args: &Args, env: &impl Env) -> anyhow::Result<BufferConfig> {
    resolve_buffer_config(args.capacity, args.policy, env)
        .context("invalid buffer configuration")
}

fn retain_lines<R: BufRead>(reader: R, cfg: &BufferConfig) -> anyhow::Result<Retained> {
    let mut retained = Retained {
        buffer: cfg.build(),
        lines_read: 0,
        evicted: 0,
        dropped: 0,
    };

    for line in reader.lines() {
        let line = line.context("failed to read input")?;
        retained.lines_read += 1;
        match retained.buffer.enqueue(line) {
            EnqueueOutcome::Stored => {}
            EnqueueOutcome::Overwrote(_) => retained.evicted += 1,
            EnqueueOutcome::Dropped(_) => retained.dropped += 1,
        }
    }

    Ok(retained)
}

fn render<W: Write>(
    out: &mut W,
    buffer: CircularBuffer<String>,
    reverse: bool,
    json: bool,
) -> anyhow::Result<()> {
    let lines: Vec<String> = if reverse {
        let stack: Stack<String> = buffer.into_iter().collect();
        stack.into_iter().collect()
    } else {
        buffer.into_iter().collect()
    };

    if json {
        serde_json::to_writer(&mut *out, &lines).context("failed to encode json")?;
        writeln!(out)?;
    } else {
        for line in &lines {
            writeln!(out, "{line}")?;
        }
    }
    Ok(())
}
