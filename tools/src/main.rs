use std::fs;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use calldata::{BatchPolicy, CallBatch};
use clap::{Parser, Subcommand};
use glob::Pattern;
use mudpack_tools::{bind_tables, encode_into, BatchFile, TableSummary};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use wire::{PackedCounter, ResourceId, RESOURCE_OFFCHAIN_TABLE, RESOURCE_TABLE};

#[derive(Parser)]
#[command(
    name = "mudpack-tools",
    version,
    about = "mudpack calldata generation and inspection tools"
)]
struct Cli {
    /// Log filter (e.g. `info`, `calldata=debug`).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the resource id of a table.
    TableId {
        /// Table name.
        name: String,
        /// Table namespace.
        #[arg(long, default_value = "")]
        namespace: String,
        /// Use the offchain table tag.
        #[arg(long)]
        offchain: bool,
        /// Fail instead of truncating long names.
        #[arg(long)]
        strict: bool,
    },
    /// Print the packed counter word for dynamic field lengths.
    Lengths {
        /// Byte length of each dynamic field, in order.
        lengths: Vec<u64>,
    },
    /// Print resource ids and field layouts of the tables in a batch file.
    Tables {
        /// Path to the batch JSON.
        batch: PathBuf,
    },
    /// Encode batch files into hex calldata, one call per line.
    Encode {
        /// Batch JSON file, or a directory of them.
        path: PathBuf,
        /// Optional glob filter when encoding a directory.
        #[arg(long)]
        glob: Option<String>,
        /// Output file (stdout if omitted).
        #[arg(long)]
        out: Option<PathBuf>,
        /// Log and skip records that fail to encode.
        #[arg(long)]
        skip_invalid: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    match cli.command {
        Command::TableId {
            name,
            namespace,
            offchain,
            strict,
        } => {
            let tag = if offchain {
                RESOURCE_OFFCHAIN_TABLE
            } else {
                RESOURCE_TABLE
            };
            let id = if strict {
                ResourceId::try_new(tag, &namespace, &name).context("build table id")?
            } else {
                if ResourceId::truncates(&namespace, &name) {
                    tracing::warn!(%namespace, %name, "table id truncates namespace or name");
                }
                ResourceId::new(tag, &namespace, &name)
            };
            println!("{id}");
        }
        Command::Lengths { lengths } => {
            let counter = PackedCounter::encode(&lengths).context("encode lengths")?;
            println!("{}", alloy_primitives::hex::encode_prefixed(counter.as_bytes()));
        }
        Command::Tables { batch } => {
            let file = load_batch(&batch)?;
            let tables = bind_tables(&file.tables)?;
            let summaries: Vec<TableSummary> = tables.values().map(TableSummary::new).collect();
            let json = serde_json::to_string_pretty(&summaries).context("serialize json")?;
            println!("{json}");
        }
        Command::Encode {
            path,
            glob,
            out,
            skip_invalid,
        } => {
            let policy = if skip_invalid {
                BatchPolicy::SkipInvalid
            } else {
                BatchPolicy::AbortOnError
            };
            let files = if path.is_dir() {
                collect_batch_files(&path, glob.as_deref())?
            } else {
                vec![path]
            };

            let mut batch = CallBatch::new(policy);
            for file in &files {
                let parsed = load_batch(file)?;
                encode_into(&mut batch, &parsed)
                    .with_context(|| format!("encode {}", file.display()))?;
            }
            tracing::info!(
                files = files.len(),
                calls = batch.len(),
                skipped = batch.skipped(),
                "encoded batch"
            );

            match out {
                Some(out) => {
                    let f = fs::File::create(&out)
                        .with_context(|| format!("create {}", out.display()))?;
                    batch
                        .write_hex_lines(BufWriter::new(f))
                        .with_context(|| format!("write {}", out.display()))?;
                }
                None => batch
                    .write_hex_lines(io::stdout().lock())
                    .context("write stdout")?,
            }
        }
    }
    Ok(())
}

fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level)
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| anyhow::anyhow!("invalid log level: {}", e))?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_writer(io::stderr),
        )
        .with(filter)
        .init();

    Ok(())
}

fn load_batch(path: &Path) -> Result<BatchFile> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read batch {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("parse batch json {}", path.display()))
}

fn collect_batch_files(dir: &Path, glob: Option<&str>) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let pattern = match glob {
        Some(value) => Some(Pattern::new(value).context("invalid glob pattern")?),
        None => None,
    };

    for entry in fs::read_dir(dir).with_context(|| format!("read dir {}", dir.display()))? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(pattern) = &pattern {
            let matches_path = pattern.matches_path(&path);
            let matches_name = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| pattern.matches(name));
            if !matches_path && !matches_name {
                continue;
            }
        }
        files.push(path);
    }
    // Directory order is platform dependent.
    files.sort();
    Ok(files)
}
