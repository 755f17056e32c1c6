use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::Path;

use docpath::config::Config;
use docpath::document::parser::from_json;
use docpath::document::value::DocValue;
use docpath::file::loader::{load_document, load_from_stdin};
use docpath::file::saver::{render, save_document};
use docpath::file::FileFormat;
use docpath::path::DocPath;
use docpath::query;

/// docpath - structural access to JSON and YAML documents
#[derive(Parser)]
#[command(name = "docpath")]
#[command(version)]
#[command(about = "Read, write, and delete values at paths inside JSON/YAML documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Output format: json or yaml (default: from config, then json)
    #[arg(short, long, global = true)]
    format: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Print every value the path matches
    Get {
        /// Path expression, e.g. 'store[*].price'
        path: String,
        /// Document file (omit to read from stdin)
        file: Option<String>,
        /// Value substituted for absent matches and empty wildcards
        #[arg(short, long)]
        default: Option<String>,
    },
    /// Assign a value at every path match, creating missing containers
    Set {
        /// Path expression
        path: String,
        /// Value to assign, parsed as JSON with plain-string fallback
        value: String,
        /// Document file (omit to read from stdin and print the result)
        file: Option<String>,
        /// Write the result here instead of back in place
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Delete every path match whose full chain exists
    Del {
        /// Path expression
        path: String,
        /// Document file (omit to read from stdin and print the result)
        file: Option<String>,
        /// Write the result here instead of back in place
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    let format = resolve_format(cli.format.as_deref(), &config)?;

    match cli.command {
        Command::Get {
            path,
            file,
            default,
        } => {
            let path = parse_path(&path)?;
            let doc = load_input(file.as_deref(), format)?;
            run_get(&path, &doc, default.as_deref(), format, &config)
        }
        Command::Set {
            path,
            value,
            file,
            output,
        } => {
            let path = parse_path(&path)?;
            let mut doc = load_input(file.as_deref(), format)?;
            let value = parse_value(&value);
            let report = query::write(&path, &mut doc, value);
            eprintln!("Set {} value(s)", report.nodes.len());
            store_result(&doc, file.as_deref(), output.as_deref(), format, &config)
        }
        Command::Del { path, file, output } => {
            let path = parse_path(&path)?;
            let mut doc = load_input(file.as_deref(), format)?;
            let report = query::delete(&path, &mut doc);
            eprintln!("Deleted {} value(s)", report.removed.len());
            store_result(&doc, file.as_deref(), output.as_deref(), format, &config)
        }
    }
}

fn parse_path(expression: &str) -> Result<DocPath> {
    expression
        .parse()
        .with_context(|| format!("Invalid path expression: {}", expression))
}

/// Parses a CLI value argument as JSON, falling back to a plain string so
/// `docpath set user.name Alice` works without quoting.
fn parse_value(text: &str) -> DocValue {
    match serde_json::from_str(text) {
        Ok(json) => from_json(json),
        Err(_) => DocValue::String(text.to_string()),
    }
}

fn resolve_format(flag: Option<&str>, config: &Config) -> Result<FileFormat> {
    let name = flag.unwrap_or(&config.output_format);
    match name.to_ascii_lowercase().as_str() {
        "json" => Ok(FileFormat::Json),
        "yaml" | "yml" => Ok(FileFormat::Yaml),
        other => anyhow::bail!("Unknown format: {} (expected json or yaml)", other),
    }
}

/// Loads the document from the file argument, or from stdin when omitted.
fn load_input(file: Option<&str>, format: FileFormat) -> Result<DocValue> {
    match file {
        Some(path) => load_document(path),
        None => {
            if std::io::stdin().is_terminal() {
                anyhow::bail!("No input: pass a document file or pipe one to stdin");
            }
            load_from_stdin(format)
        }
    }
}

fn run_get(
    path: &DocPath,
    doc: &DocValue,
    default: Option<&str>,
    format: FileFormat,
    config: &Config,
) -> Result<()> {
    match default {
        Some(default) => {
            let default = parse_value(default);
            for value in query::read_values_or(path, doc, default) {
                print!("{}", render(&value, format, config.indent_size)?);
            }
        }
        None => {
            for value in query::read_values(path, doc).flatten() {
                print!("{}", render(&value, format, config.indent_size)?);
            }
        }
    }
    Ok(())
}

/// Writes a mutated document back: to --output when given, in place over
/// the input file, or to stdout for stdin input.
fn store_result(
    doc: &DocValue,
    file: Option<&str>,
    output: Option<&str>,
    format: FileFormat,
    config: &Config,
) -> Result<()> {
    match output.or(file) {
        Some(target) => save_document(Path::new(target), doc, config),
        None => {
            print!("{}", render(doc, format, config.indent_size)?);
            Ok(())
        }
    }
}
