//! `jsonmerge` CLI — layer JSON documents and compare them from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Merge files left to right (later files win), pretty JSON on stdout
//! jsonmerge merge defaults.json production.json local.json
//!
//! # Append arrays instead of replacing them, drop properties set to null
//! jsonmerge merge --array-strategy append --null-strategy unset a.json b.json
//!
//! # Read strategies from an options document, write compact output to a file
//! jsonmerge merge --options merge-options.json -o merged.json --compact a.json b.json
//!
//! # "-" reads a document from stdin
//! cat override.json | jsonmerge merge base.json -
//!
//! # Settings files with comments and trailing commas
//! jsonmerge merge --allow-comments --allow-trailing-commas defaults.jsonc local.jsonc
//!
//! # Check that every property of expected.json is present and equal in actual.json
//! jsonmerge equals expected.json actual.json
//! ```

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use jsonmerge_core::{ArrayMergeStrategy, MergeOptions, NullValueStrategy, ReadOptions, Value};
use std::io::{self, Read};
use std::process;
use tracing::{debug, Level};

#[derive(Parser)]
#[command(
    name = "jsonmerge",
    version,
    about = "Merge and compare JSON documents"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log merge decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge JSON documents left to right; later documents take precedence
    Merge {
        /// Input files, in merge order ("-" reads stdin)
        #[arg(required = true)]
        files: Vec<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// How arrays combine: append, replace or merge
        #[arg(long)]
        array_strategy: Option<ArrayMergeStrategy>,
        /// How explicit nulls apply: ignore, set or unset
        #[arg(long)]
        null_strategy: Option<NullValueStrategy>,
        /// String value that removes a property
        #[arg(long)]
        unset_keyword: Option<String>,
        /// Maximum nesting depth to merge
        #[arg(long)]
        max_depth: Option<usize>,
        /// JSON file with merge options; explicit flags override it
        #[arg(long)]
        options: Option<String>,
        /// Emit compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
        #[command(flatten)]
        read: ReadFlags,
    },
    /// Check that SECOND contains everything FIRST has; exits 1 on the first difference
    Equals {
        /// Reference document
        first: String,
        /// Document to check
        second: String,
        #[command(flatten)]
        read: ReadFlags,
    },
}

/// Relaxations for reading input documents.
#[derive(Args)]
struct ReadFlags {
    /// Accept // and /* */ comments in input documents
    #[arg(long)]
    allow_comments: bool,
    /// Accept a trailing comma after the last array element or property
    #[arg(long)]
    allow_trailing_commas: bool,
}

impl ReadFlags {
    fn to_options(&self) -> ReadOptions {
        ReadOptions::default()
            .with_comments(self.allow_comments)
            .with_trailing_commas(self.allow_trailing_commas)
    }
}

/// Merge flags as given on the command line, before being layered over an
/// options file.
struct OptionFlags {
    array_strategy: Option<ArrayMergeStrategy>,
    null_strategy: Option<NullValueStrategy>,
    unset_keyword: Option<String>,
    max_depth: Option<usize>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    match cli.command {
        Commands::Merge {
            files,
            output,
            array_strategy,
            null_strategy,
            unset_keyword,
            max_depth,
            options,
            compact,
            read,
        } => {
            let flags = OptionFlags {
                array_strategy,
                null_strategy,
                unset_keyword,
                max_depth,
            };
            let options = build_options(options.as_deref(), flags)?;
            let read_options = read.to_options();

            let documents = files
                .iter()
                .map(|path| read_document(path, &read_options))
                .collect::<Result<Vec<_>>>()?;
            debug!(sources = documents.len(), "loaded documents");

            let merged = jsonmerge_core::fold_merge(documents, &options)
                .context("Failed to merge documents")?;

            let rendered = if compact {
                merged.to_string()
            } else {
                format!("{merged:#}")
            };
            write_output(output.as_deref(), &format!("{rendered}\n"))?;
        }
        Commands::Equals {
            first,
            second,
            read,
        } => {
            let read_options = read.to_options();
            let first_value = read_document(&first, &read_options)?;
            let second_value = read_document(&second, &read_options)?;
            match jsonmerge_core::deep_equals(&first_value, &second_value) {
                Ok(()) => println!("equal"),
                Err(diff) => {
                    println!("{diff}");
                    process::exit(1);
                }
            }
        }
    }

    Ok(())
}

/// Start from the options file (or defaults) and apply any explicit flags.
fn build_options(path: Option<&str>, flags: OptionFlags) -> Result<MergeOptions> {
    let mut options = match path {
        Some(path) => {
            let text = read_input(Some(path))?;
            MergeOptions::from_json_str(&text)
                .with_context(|| format!("Invalid merge options in {}", path))?
        }
        None => MergeOptions::default(),
    };

    if let Some(strategy) = flags.array_strategy {
        options = options.with_array_strategy(strategy);
    }
    if let Some(strategy) = flags.null_strategy {
        options = options.with_null_strategy(strategy);
    }
    if let Some(keyword) = flags.unset_keyword {
        options = options.with_unset_keyword(keyword);
    }
    if let Some(depth) = flags.max_depth {
        options = options.with_max_depth(depth);
    }
    options.validate().context("Invalid merge options")?;
    Ok(options)
}

fn read_document(path: &str, options: &ReadOptions) -> Result<Value> {
    let source = if path == "-" { None } else { Some(path) };
    let text = read_input(source)?;
    jsonmerge_core::parse_document(&text, options)
        .with_context(|| format!("Failed to parse JSON from {}", path))
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
