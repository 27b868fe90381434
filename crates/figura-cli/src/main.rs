//! `figura` CLI — convert documents between JSON and XML from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # JSON to XML (stdin → stdout)
//! echo '{"pos":"$p$5,-5","tags":["a","b"]}' | figura to-xml
//!
//! # XML back to JSON, file to file
//! figura to-json -i scene.xml -o scene.json
//!
//! # Re-encode JSON in canonical spacing, rehydrating points/colors/thickness
//! figura normalize -i scene.json
//!
//! # Show the typed value tree (integer widths, extended types)
//! figura inspect -i scene.xml
//!
//! # Compare JSON and XML sizes
//! figura stats -i scene.json
//! ```

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use figura_core::{Diagnostic, Value};
use std::io::{self, Read};

#[derive(Parser)]
#[command(
    name = "figura",
    version,
    about = "Convert figura documents between JSON and XML"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert JSON to XML
    ToXml {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Convert XML to JSON
    ToJson {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Decode JSON into typed values and encode it again
    Normalize {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print the typed value tree of a JSON or XML document
    Inspect {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Show the JSON and XML sizes of a JSON document
    Stats {
        /// Input JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::ToXml { input, output } => {
            let json = read_input(input.as_deref())?;
            let xml = to_xml(&json)?;
            write_output(output.as_deref(), &xml)?;
        }
        Commands::ToJson { input, output } => {
            let xml = read_input(input.as_deref())?;
            let json = figura_core::xml_to_json_with(&xml, &mut warn)
                .context("Input is not a well-formed Dict/List XML document")?;
            write_output(output.as_deref(), &json)?;
        }
        Commands::Normalize { input, output } => {
            let json = read_input(input.as_deref())?;
            let value = figura_core::json_to_value(&json).context("Failed to decode JSON")?;
            if value.is_null() {
                bail!("Input must be a JSON object or array");
            }
            let normalized = figura_core::value_to_json_with(&value, &mut warn);
            write_output(output.as_deref(), &normalized)?;
        }
        Commands::Inspect { input } => {
            let text = read_input(input.as_deref())?;
            let value = decode_any(&text)?;
            let tree = serde_json::to_string_pretty(&value)?;
            println!("{}", tree);
        }
        Commands::Stats { input } => {
            let json = read_input(input.as_deref())?;
            let xml = to_xml(&json)?;
            let json_bytes = json.trim().len();
            let xml_bytes = xml.len();
            let ratio = if json_bytes > 0 {
                xml_bytes as f64 / json_bytes as f64
            } else {
                0.0
            };
            println!("JSON size:  {} bytes", json_bytes);
            println!("XML size:   {} bytes", xml_bytes);
            println!("XML/JSON:   {:.2}x", ratio);
        }
    }

    Ok(())
}

/// Observer for every command: diagnostics go to stderr.
fn warn(diagnostic: Diagnostic) {
    eprintln!("warning: {}", diagnostic);
}

fn to_xml(json: &str) -> Result<String> {
    figura_core::json_to_xml_with(json, &mut warn)
        .context("Failed to parse JSON")?
        .context("Input must be a JSON object or array")
}

/// Decode XML when the document starts with `<`, JSON otherwise.
fn decode_any(text: &str) -> Result<Value> {
    let value = if text.trim_start().starts_with('<') {
        figura_core::xml_to_value_with(text, &mut warn).context("Failed to decode XML")?
    } else {
        figura_core::json_to_value(text).context("Failed to decode JSON")?
    };
    if value.is_null() {
        bail!("Input must be a JSON object/array or a Dict/List XML document");
    }
    Ok(value)
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
