//! Command-line front end for the agent specification compiler
//!
//! `agent-ddl compile` turns one specification into a statement and
//! `agent-ddl batch` compiles every entry of a JSON manifest. The argument
//! handling lives here so it can be driven from tests without a process.

#![allow(missing_docs)]

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgMatches, Command};
use ddl_compiler::{AgentDetails, CompileRequest, CompilerConfig, ObjectName, SpecCompiler};
use serde::Deserialize;
use serde_json::Value;

/// Default log filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "warn,ddl_cli=info";

/// Text for stdout plus the diagnostics that make the run fail
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Output {
    pub stdout: String,
    pub failures: Vec<String>,
}

impl Output {
    /// Check if every statement compiled
    #[inline]
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.failures.is_empty()
    }
}

/// One manifest entry for `batch`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ManifestEntry {
    pub database: String,
    pub schema: String,
    pub agent: String,
    #[serde(default)]
    pub comment: String,
    /// JSON text or an inline document
    pub specification: Value,
}

impl ManifestEntry {
    /// Convert to a compile request
    #[must_use]
    pub fn into_request(self) -> CompileRequest {
        let object = ObjectName::new(self.database, self.schema, self.agent);
        let request = match self.specification {
            Value::String(text) => CompileRequest::from_text(object, text),
            document => CompileRequest::from_document(object, document),
        };
        request.with_comment(self.comment)
    }
}

fn config_arg() -> Arg {
    Arg::new("config")
        .long("config")
        .value_parser(value_parser!(PathBuf))
        .help("TOML file with compiler settings")
}

/// Build the argument parser
#[must_use]
pub fn cli() -> Command {
    Command::new("agent-ddl")
        .version(ddl_compiler::VERSION)
        .about("Generate CREATE AGENT statements from agent specifications")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("compile")
                .about("Compile one specification (read from stdin unless a file is given)")
                .arg(
                    Arg::new("database")
                        .long("database")
                        .short('d')
                        .required(true)
                        .help("Database name"),
                )
                .arg(
                    Arg::new("schema")
                        .long("schema")
                        .short('s')
                        .required(true)
                        .help("Schema name"),
                )
                .arg(
                    Arg::new("agent")
                        .long("agent")
                        .short('a')
                        .required(true)
                        .help("Agent name"),
                )
                .arg(
                    Arg::new("comment")
                        .long("comment")
                        .short('c')
                        .help("Agent comment"),
                )
                .arg(
                    Arg::new("spec")
                        .long("spec")
                        .value_parser(value_parser!(PathBuf))
                        .conflicts_with("describe-row")
                        .help("File containing the specification JSON"),
                )
                .arg(
                    Arg::new("describe-row")
                        .long("describe-row")
                        .value_parser(value_parser!(PathBuf))
                        .help("File containing a DESCRIBE AGENT result row as a JSON object"),
                )
                .arg(config_arg()),
        )
        .subcommand(
            Command::new("batch")
                .about("Compile every agent listed in a manifest")
                .arg(
                    Arg::new("manifest")
                        .long("manifest")
                        .short('m')
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("JSON array of {database, schema, agent, comment?, specification}"),
                )
                .arg(config_arg()),
        )
}

/// Run the selected subcommand
///
/// # Errors
/// Returns error if an input or config file cannot be read or parsed;
/// specification failures are reported in [`Output::failures`] instead
pub fn run(matches: &ArgMatches, stdin: impl Read) -> Result<Output> {
    match matches.subcommand() {
        Some(("compile", args)) => run_compile(args, stdin),
        Some(("batch", args)) => run_batch(args),
        _ => anyhow::bail!("no subcommand given"),
    }
}

fn load_config(args: &ArgMatches) -> Result<CompilerConfig> {
    match args.get_one::<PathBuf>("config") {
        Some(path) => CompilerConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(CompilerConfig::default()),
    }
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn required<'a>(args: &'a ArgMatches, name: &str) -> Result<&'a str> {
    args.get_one::<String>(name)
        .map(String::as_str)
        .with_context(|| format!("missing --{name}"))
}

fn run_compile(args: &ArgMatches, mut stdin: impl Read) -> Result<Output> {
    let compiler = SpecCompiler::new(load_config(args)?);
    let database = required(args, "database")?;
    let schema = required(args, "schema")?;
    let agent = required(args, "agent")?;
    let object = ObjectName::new(database, schema, agent);

    let mut request = if let Some(path) = args.get_one::<PathBuf>("describe-row") {
        let row: Value = serde_json::from_str(&read_file(path)?)
            .with_context(|| format!("parsing describe row {}", path.display()))?;
        AgentDetails::from_describe_value(agent, &row)?.into_request(database, schema)
    } else {
        let text = match args.get_one::<PathBuf>("spec") {
            Some(path) => read_file(path)?,
            None => {
                let mut text = String::new();
                stdin
                    .read_to_string(&mut text)
                    .context("reading specification from stdin")?;
                text
            }
        };
        CompileRequest::from_text(object.clone(), text)
    };
    if let Some(comment) = args.get_one::<String>("comment") {
        request = request.with_comment(comment.as_str());
    }

    tracing::info!(%object, "compiling agent specification");
    Ok(match compiler.compile(&request) {
        Ok(statement) => Output {
            stdout: statement.into_text(),
            failures: Vec::new(),
        },
        Err(err) => Output {
            stdout: String::new(),
            failures: vec![err.diagnostic()],
        },
    })
}

fn run_batch(args: &ArgMatches) -> Result<Output> {
    let compiler = SpecCompiler::new(load_config(args)?);
    let path = args
        .get_one::<PathBuf>("manifest")
        .context("missing --manifest")?;
    let entries: Vec<ManifestEntry> = serde_json::from_str(&read_file(path)?)
        .with_context(|| format!("parsing manifest {}", path.display()))?;
    let requests: Vec<CompileRequest> = entries.into_iter().map(ManifestEntry::into_request).collect();

    tracing::info!(agents = requests.len(), "compiling manifest");
    let mut output = Output::default();
    let mut statements = Vec::with_capacity(requests.len());
    for (request, result) in requests.iter().zip(compiler.compile_batch(&requests)) {
        match result {
            Ok(statement) => statements.push(statement.into_text()),
            Err(err) => {
                tracing::warn!(object = %request.object, error = %err, "agent failed to compile");
                output.failures.push(err.diagnostic());
            }
        }
    }
    output.stdout = statements.join("\n\n");
    Ok(output)
}

