//! binedit - Binary file editor
//!
//! Command-line front end for flash images and other raw binary files.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use binedit::{Bounds, Editor};

/// Create or edit binary files
#[derive(Parser, Debug)]
#[command(name = "binedit")]
#[command(author, version, about, long_about = None)]
#[command(disable_version_flag = true)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Print version
    #[arg(short = 'v', long, action = ArgAction::Version)]
    version: Option<bool>,

    /// Base address the --address/--output-address values are relative to
    #[arg(short, long, global = true, default_value = "0", value_parser = parse_int)]
    base_address: usize,

    /// Use the boundary convention of older releases for get/split
    #[arg(long, global = true)]
    legacy_bounds: bool,

    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    debug: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a binary file full of 0xFF
    Create {
        /// Binary file to create
        #[arg(short, long)]
        input: PathBuf,

        /// Size in bytes
        #[arg(short, long, value_parser = parse_int)]
        size: usize,
    },

    /// Show hexadecimal and ascii content of a binary file
    Show {
        /// Binary file to show
        #[arg(short, long)]
        input: PathBuf,

        /// First address to show
        #[arg(short, long, default_value = "0", value_parser = parse_int)]
        address: usize,

        /// Number of bytes to show (0: up to end of file)
        #[arg(short, long, default_value = "0", value_parser = parse_int)]
        size: usize,

        /// Address displayed for the first byte (default: the base address)
        #[arg(long, value_parser = parse_int)]
        offset: Option<usize>,
    },

    /// Clear data bytes of a binary file (set them to 0xFF)
    Clear {
        /// Binary file to modify
        #[arg(short, long)]
        input: PathBuf,

        /// First address to clear
        #[arg(short, long, value_parser = parse_int)]
        address: usize,

        /// Number of bytes to clear
        #[arg(short, long, value_parser = parse_int)]
        size: usize,
    },

    /// Extract data from a binary file address into a new binary file
    #[command(alias = "extract")]
    Get {
        /// Binary file to read
        #[arg(short, long)]
        input: PathBuf,

        /// Binary file to create
        #[arg(short, long)]
        output: PathBuf,

        /// First address to extract
        #[arg(short, long, default_value = "0", value_parser = parse_int)]
        address: usize,

        /// Number of bytes to extract (0: up to end of file)
        #[arg(short, long, default_value = "0", value_parser = parse_int)]
        size: usize,
    },

    /// Write data from a binary file over another binary file
    #[command(alias = "join")]
    Add {
        /// Binary file to take data from
        #[arg(short, long)]
        input: PathBuf,

        /// Binary file to modify
        #[arg(short, long)]
        output: PathBuf,

        /// First address to take from the input file
        #[arg(short, long, default_value = "0", value_parser = parse_int)]
        address: usize,

        /// Number of bytes to take (0: whole input file)
        #[arg(short, long, default_value = "0", value_parser = parse_int)]
        size: usize,

        /// Address in the output file to write to
        #[arg(long, value_parser = parse_int)]
        output_address: usize,
    },

    /// Split a binary file into two binary files
    Split {
        /// Binary file to split
        #[arg(short, long)]
        input: PathBuf,

        /// File receiving the data before the address
        #[arg(short, long)]
        output: PathBuf,

        /// File receiving the data from the address on
        #[arg(long)]
        output2: PathBuf,

        /// Split address
        #[arg(short, long, value_parser = parse_int)]
        address: usize,
    },

    /// Show version information
    Version,
}

fn main() {
    let args = Args::parse();
    init_logging(args.debug);

    if let Err(e) = run(args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; -d flags override RUST_LOG, which defaults to warnings only
fn init_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .init();
}

fn run(args: Args) -> Result<()> {
    let bounds = if args.legacy_bounds { Bounds::Legacy } else { Bounds::Lossless };
    let editor = Editor::with_bounds(bounds);
    let base = args.base_address;

    match args.command {
        Command::Create { input, size } => cmd_create(&editor, &input, size),
        Command::Show { input, address, size, offset } => {
            let (address, offset) = show_origin(address, offset, base)?;
            cmd_show(&editor, &input, address, size, offset)
        }
        Command::Clear { input, address, size } => {
            cmd_clear(&editor, &input, rebase(address, base)?, size)
        }
        Command::Get { input, output, address, size } => {
            cmd_get(&editor, &input, rebase(address, base)?, size, &output)
        }
        Command::Add { input, output, address, size, output_address } => cmd_add(
            &editor,
            &input,
            rebase(address, base)?,
            size,
            &output,
            rebase(output_address, base)?,
        ),
        Command::Split { input, output, output2, address } => {
            cmd_split(&editor, &input, rebase(address, base)?, &output, &output2)
        }
        Command::Version => {
            println!("{}", binedit::version_info());
            Ok(())
        }
    }
}

/// Parse integer (decimal, or 0x/0o/0b prefixed; '_' separators allowed)
fn parse_int(s: &str) -> Result<usize> {
    let cleaned: String = s.trim().chars().filter(|&c| c != '_').collect();
    let lower = cleaned.to_ascii_lowercase();

    let (digits, radix) = if let Some(rest) = lower.strip_prefix("0x") {
        (rest, 16)
    } else if let Some(rest) = lower.strip_prefix("0o") {
        (rest, 8)
    } else if let Some(rest) = lower.strip_prefix("0b") {
        (rest, 2)
    } else {
        (lower.as_str(), 10)
    };

    if digits.is_empty() {
        bail!("Invalid number: '{}'", s);
    }
    usize::from_str_radix(digits, radix).map_err(|e| anyhow::anyhow!("Invalid number '{}': {}", s, e))
}

/// Make `address` relative to `base` (only when both are given)
fn rebase(address: usize, base: usize) -> Result<usize> {
    if address == 0 || base == 0 {
        return Ok(address);
    }
    address
        .checked_sub(base)
        .with_context(|| format!("Address 0x{:X} is below base address 0x{:X}", address, base))
}

/// File address and displayed address of the first byte to show
fn show_origin(address: usize, offset: Option<usize>, base: usize) -> Result<(usize, usize)> {
    Ok((rebase(address, base)?, offset.unwrap_or(base)))
}

// === Commands ===

fn cmd_create(editor: &Editor, input: &Path, size: usize) -> Result<()> {
    editor
        .create_file(input, size)
        .with_context(|| format!("Cannot create {}", input.display()))
}

fn cmd_show(editor: &Editor, input: &Path, address: usize, size: usize, offset: usize) -> Result<()> {
    let mut stdout = io::stdout().lock();
    editor
        .show_file(&mut stdout, input, address, size, offset)
        .with_context(|| format!("Cannot show {}", input.display()))?;
    Ok(())
}

fn cmd_clear(editor: &Editor, input: &Path, address: usize, size: usize) -> Result<()> {
    editor
        .clear_data(input, address, size)
        .with_context(|| format!("Cannot clear data of {}", input.display()))?;
    Ok(())
}

fn cmd_get(editor: &Editor, input: &Path, address: usize, size: usize, output: &Path) -> Result<()> {
    editor
        .extract_data(input, address, size, output)
        .with_context(|| format!("Cannot extract data from {}", input.display()))?;
    Ok(())
}

fn cmd_add(
    editor: &Editor,
    input: &Path,
    address: usize,
    size: usize,
    output: &Path,
    output_address: usize,
) -> Result<()> {
    editor
        .join_files(input, address, size, output, output_address)
        .with_context(|| format!("Cannot add {} into {}", input.display(), output.display()))?;
    Ok(())
}

fn cmd_split(editor: &Editor, input: &Path, address: usize, output: &Path, output2: &Path) -> Result<()> {
    editor
        .split_files(input, address, output, output2)
        .with_context(|| format!("Cannot split {}", input.display()))
}
