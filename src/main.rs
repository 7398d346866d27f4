use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use sha2::{Digest, Sha256};

use lz2::io_utils::{io_cli_error, lz2_cli_error, simple_cli_error};
use lz2::{CompressionStats, Config, Decompressor, Format, Payload, Piece, Strategy};

/// Compress, decompress and inspect LC_LZ2 asset streams.
#[derive(Parser)]
#[command(name = "lz2", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compress a raw asset file
    Compress {
        input: PathBuf,
        output: PathBuf,
        #[arg(long, value_enum, default_value_t = FormatArg::Graphics)]
        format: FormatArg,
        #[arg(long, value_enum, default_value_t = StrategyArg::Optimal)]
        strategy: StrategyArg,
        /// Print statistics as JSON on stdout
        #[arg(long)]
        json: bool,
        /// Compress but do not write the output file
        #[arg(long)]
        dry_run: bool,
    },
    /// Decompress a stream; bytes after the terminator are ignored
    Decompress {
        input: PathBuf,
        output: PathBuf,
        #[arg(long, value_enum, default_value_t = FormatArg::Graphics)]
        format: FormatArg,
        /// Fail if the output would grow past this many bytes
        #[arg(long)]
        limit: Option<usize>,
    },
    /// List the pieces of a stream
    Inspect {
        input: PathBuf,
        #[arg(long, value_enum, default_value_t = FormatArg::Graphics)]
        format: FormatArg,
        /// Write one CSV row per piece to this path
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Graphics,
    Overworld,
    HyruleMagic,
}

impl From<FormatArg> for Format {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Graphics => Format::Graphics,
            FormatArg::Overworld => Format::Overworld,
            FormatArg::HyruleMagic => Format::HyruleMagic,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    Greedy,
    Optimal,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Greedy => Strategy::Greedy,
            StrategyArg::Optimal => Strategy::OptimalWithAlternatives,
        }
    }
}

#[derive(Serialize)]
struct PieceRecord {
    index: usize,
    start: usize,
    kind: &'static str,
    length: usize,
    encoded_len: usize,
    argument: String,
}

impl PieceRecord {
    fn new(index: usize, start: usize, piece: &Piece) -> Self {
        let argument = match &piece.payload {
            Payload::Literal(bytes) => hex::encode(bytes),
            Payload::Byte(b) => format!("{b:02x}"),
            Payload::Word(w) => hex::encode(w),
            Payload::Offset(o) => format!("{o:#06x}"),
        };
        Self {
            index,
            start,
            kind: piece.kind.name(),
            length: piece.length,
            encoded_len: piece.encoded_len(),
            argument,
        }
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn read_input(path: &Path) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    Ok(fs::read(path).map_err(|e| io_cli_error("reading input file", path, e))?)
}

fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    match Cli::parse().command {
        Command::Compress {
            input,
            output,
            format,
            strategy,
            json,
            dry_run,
        } => {
            let data = read_input(&input)?;
            let config = Config::new(format.into(), strategy.into());
            let start_time = Instant::now();
            let packed =
                lz2::compress_with(&data, &config).map_err(|e| lz2_cli_error("compression failed", e))?;
            let elapsed = start_time.elapsed();

            if dry_run {
                eprintln!("(dry run) skipping file write");
            } else {
                fs::write(&output, &packed)
                    .map_err(|e| io_cli_error("writing output file", &output, e))?;
            }

            let pieces = Decompressor::new(config.format)
                .parse(&packed)
                .map_err(|e| lz2_cli_error("re-reading output", e))?;
            let stats = CompressionStats::from_pieces(&pieces, data.len(), packed.len());
            if json {
                let report = serde_json::json!({
                    "stats": stats,
                    "ratio_percent": stats.ratio(),
                    "sha256": sha256_hex(&data),
                    "elapsed_ms": elapsed.as_millis(),
                });
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                eprintln!("{}", stats.summary());
                eprintln!("Compressed in {:.2?}", elapsed);
            }
        }

        Command::Decompress {
            input,
            output,
            format,
            limit,
        } => {
            let data = read_input(&input)?;
            let decoder = Decompressor::new(format.into()).with_limit(limit.unwrap_or(usize::MAX));
            let (raw, consumed) = decoder
                .decompress_prefix(&data)
                .map_err(|e| lz2_cli_error("decompression failed", e))?;
            fs::write(&output, &raw).map_err(|e| io_cli_error("writing output file", &output, e))?;
            eprintln!(
                "Read {} of {} bytes, wrote {} bytes (sha256 {})",
                consumed,
                data.len(),
                raw.len(),
                sha256_hex(&raw)
            );
        }

        Command::Inspect { input, format, csv } => {
            let data = read_input(&input)?;
            let decoder = Decompressor::new(format.into());
            let pieces = decoder
                .parse(&data)
                .map_err(|e| lz2_cli_error("parsing stream", e))?;

            let mut start = 0;
            let records: Vec<PieceRecord> = pieces
                .iter()
                .enumerate()
                .map(|(index, piece)| {
                    let record = PieceRecord::new(index, start, piece);
                    start += piece.length;
                    record
                })
                .collect();

            match csv {
                Some(path) => {
                    let mut wtr = csv::Writer::from_path(&path)
                        .map_err(|e| simple_cli_error(&format!("creating csv '{}': {e}", path.display())))?;
                    for record in &records {
                        wtr.serialize(record)?;
                    }
                    wtr.flush()?;
                }
                None => {
                    for r in &records {
                        println!(
                            "{:>5} {:>6} {:<16} {:>5} {}",
                            r.index, r.start, r.kind, r.length, r.argument
                        );
                    }
                }
            }

            let (raw, consumed) = decoder
                .decompress_prefix(&data)
                .map_err(|e| lz2_cli_error("decompression failed", e))?;
            let stats = CompressionStats::from_pieces(&pieces, raw.len(), consumed);
            eprintln!("{}", stats.summary());
            eprintln!("sha256 {}", sha256_hex(&raw));
        }
    }

    Ok(())
}
