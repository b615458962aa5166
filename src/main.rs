use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::Context;
use clap::{Parser, Subcommand};

use ascii_huffman::HuffmanCodec;

#[derive(Parser)]
#[command(name = "huffc", about = "Huffman codec for 7-bit ASCII text", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Show codec diagnostics on stderr
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all log output
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Log filter directive used with --verbose (e.g. "ascii_huffman=debug")
    #[arg(long, global = true, env = "HUFFC_LOG")]
    log: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a text file
    Encode {
        /// Text file the code is built from and that gets encoded
        source: PathBuf,
        /// Encoded output file (overwritten)
        encoded: PathBuf,
    },

    /// Decode a file produced by `encode`
    Decode {
        /// The original text file; the tree is rebuilt from it
        source: PathBuf,
        /// Encoded input file
        encoded: PathBuf,
        /// Decoded output file (overwritten)
        output: PathBuf,
    },

    /// Print the code assigned to every symbol of a text file
    Codes {
        source: PathBuf,
    },

    /// Print the Huffman tree of a text file
    Tree {
        source: PathBuf,
    },

    /// Print the raw bits of an encoded file, padding marker included
    Bits {
        encoded: PathBuf,
    },
}

/// Log filter directive for the CLI flags.
///
/// `--quiet` turns logging off. The default shows warnings, so recoverable
/// problems such as a missing padding marker still reach stderr. `--verbose`
/// uses `--log`, then RUST_LOG, then falls back to info.
fn log_directive(cli: &Cli) -> String {
    if cli.quiet {
        "off".to_string()
    } else if cli.verbose {
        cli.log
            .clone()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| "info".to_string())
    } else {
        "warn".to_string()
    }
}

fn init_tracing(cli: &Cli) {
    let filter = tracing_subscriber::EnvFilter::try_new(log_directive(cli))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);

    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Encode { source, encoded } => {
            let codec = codec_for(&source)?;
            codec
                .encode_file(&source, &encoded)
                .with_context(|| format!("failed to encode {}", source.display()))?;

            let before = fs::metadata(&source)?.len();
            let after = fs::metadata(&encoded)?.len();
            let ratio = if before == 0 {
                0.0
            } else {
                after as f64 / before as f64 * 100.0
            };
            println!(
                "{} -> {}: {} bytes to {} bytes ({:.1}% of original)",
                source.display(),
                encoded.display(),
                before,
                after,
                ratio
            );
        }

        Commands::Decode {
            source,
            encoded,
            output,
        } => {
            let codec = codec_for(&source)?;
            codec
                .decode_file(&encoded, &output)
                .with_context(|| format!("failed to decode {}", encoded.display()))?;
            println!("{} -> {}", encoded.display(), output.display());
        }

        Commands::Codes { source } => {
            let codec = codec_for(&source)?;
            for (symbol, code) in codec.table().iter() {
                println!("{:>3} {:<6} {}", symbol, format!("{:?}", symbol as char), code);
            }
        }

        Commands::Tree { source } => match codec_for(&source)?.tree() {
            Some(tree) => print!("{tree}"),
            None => println!("{} is empty, no tree", source.display()),
        },

        Commands::Bits { encoded } => {
            let bytes = fs::read(&encoded)
                .with_context(|| format!("failed to read {}", encoded.display()))?;
            println!("{}", HuffmanCodec::dump_bits(&bytes));
        }
    }

    Ok(())
}

fn codec_for(source: &Path) -> anyhow::Result<HuffmanCodec> {
    HuffmanCodec::from_file(source)
        .with_context(|| format!("failed to build a code from {}", source.display()))
}
