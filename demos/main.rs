use clap::Parser;
use lzw_trie::{compress_with_stats, decompress, CodecConfig, Mode, DEFAULT_MAX_BITS};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

/// Compresses a file to `<stem>.lzw`, or decompresses a `.lzw` file to
/// `<stem>_decompressed.lzw`, in the current directory.
///
/// Usage: cargo run --example main -- <file> [--max-bits N] [--adaptive] [--stats]
#[derive(Parser, Debug)]
#[command(about = "LZW file compressor backed by a compact trie")]
struct Args {
    /// File to compress, or a `.lzw` file to decompress
    input: PathBuf,

    /// Code width (fixed mode) or width ceiling (adaptive mode)
    #[arg(long, default_value_t = DEFAULT_MAX_BITS)]
    max_bits: u8,

    /// Grow the code width with the dictionary
    #[arg(long)]
    adaptive: bool,

    /// Print compression statistics
    #[arg(long)]
    stats: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let mode = if args.adaptive {
        Mode::Adaptive
    } else {
        Mode::Fixed
    };

    let data = fs::read(&args.input).unwrap_or_else(|_| {
        eprintln!("File \"{}\" not found.", args.input.display());
        process::exit(1);
    });

    let is_compressed = args.input.extension().is_some_and(|ext| ext == "lzw");
    let result = if is_compressed {
        run_decompress(&args.input, &data, mode)
    } else {
        run_compress(&args, &data, mode)
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run_compress(args: &Args, data: &[u8], mode: Mode) -> Result<(), Box<dyn std::error::Error>> {
    let config = CodecConfig::new(args.max_bits, mode)?;
    let (stream, stats) = compress_with_stats(data, &config)?;

    let output = PathBuf::from(format!("{}.lzw", file_stem(&args.input)));
    fs::write(&output, &stream)?;
    println!("Compressed file written: {}", output.display());

    if args.stats {
        println!("\n=== Statistics ===");
        println!("Original size: {} bytes", stats.input_len);
        println!("Compressed size: {} bytes", stats.output_len);
        println!("Compression ratio: {:.2}", stats.compression_ratio());
        println!("Space savings: {:.2}%", stats.space_savings());
        println!("Elapsed: {:.4} s", stats.elapsed.as_secs_f64());
    }
    Ok(())
}

fn run_decompress(input: &Path, data: &[u8], mode: Mode) -> Result<(), Box<dyn std::error::Error>> {
    let restored = decompress(data, mode)?;

    // The compressed file's extension is kept on the output
    let output = input.with_file_name(format!("{}_decompressed.lzw", file_stem(input)));
    fs::write(&output, restored)?;
    println!("Decompressed file written: {}", output.display());
    Ok(())
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string())
}
