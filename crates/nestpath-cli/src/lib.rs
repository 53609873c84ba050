use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use nestpath_core::{Value, exists_on, get_from, get_from_or, set_on};
use std::fs;
use std::io::{Read, Write};
use std::path::Path;
use std::process::ExitCode;
use tracing::debug;

pub mod logging;

#[derive(Debug, Parser)]
#[command(name = "nestpath", version, about = "Read and write nested values in JSON documents")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct Target {
    /// Dot-delimited path (`a.b.0`), or a JSON array of steps with --steps
    pub path: String,
    /// Treat PATH as a JSON array of step tokens
    #[arg(long)]
    pub steps: bool,
    /// Document as inline JSON or a file path; stdin when omitted or `-`
    #[arg(long)]
    pub data: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the value at PATH as JSON
    Get {
        #[command(flatten)]
        target: Target,
        /// JSON fallback; a resolved value is coerced to its kind
        #[arg(long)]
        default: Option<String>,
    },
    /// Store VALUE at PATH and print the updated document
    Set {
        #[command(flatten)]
        target: Target,
        /// JSON value to store
        value: String,
    },
    /// Print whether PATH resolves to a value
    Exists {
        #[command(flatten)]
        target: Target,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Found,
    Missing,
}

impl Outcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            Outcome::Found => ExitCode::SUCCESS,
            Outcome::Missing => ExitCode::from(1),
        }
    }
}

/// Executes one command, reading the document from `stdin` unless `--data`
/// names it, and writing results to `out`.
pub fn run(cli: Cli, stdin: impl Read, out: &mut impl Write) -> Result<Outcome> {
    match cli.command {
        Command::Get { target, default } => {
            let doc = load_document(target.data.as_deref(), stdin)?;
            let path = target_path(&target)?;
            let found = match default {
                Some(raw) => {
                    let default = parse_json(&raw, "--default")?;
                    get_from_or(&doc, &path, &default)
                        .with_context(|| format!("failed to convert value at `{}`", target.path))?
                }
                None => get_from(&doc, &path),
            };
            if found.is_undefined() {
                debug!(path = %target.path, "nothing to print");
                return Ok(Outcome::Missing);
            }
            write_json(out, &found)?;
            Ok(Outcome::Found)
        }
        Command::Set { target, value } => {
            let mut doc = load_document(target.data.as_deref(), stdin)?;
            let path = target_path(&target)?;
            let value = parse_json(&value, "VALUE")?;
            if set_on(&mut doc, &path, value).is_none() {
                bail!("cannot store a value at `{}`", target.path);
            }
            write_json(out, &doc)?;
            Ok(Outcome::Found)
        }
        Command::Exists { target } => {
            let doc = load_document(target.data.as_deref(), stdin)?;
            let path = target_path(&target)?;
            let present = exists_on(&doc, &path);
            writeln!(out, "{present}")?;
            Ok(if present {
                Outcome::Found
            } else {
                Outcome::Missing
            })
        }
    }
}

fn target_path(target: &Target) -> Result<Value> {
    if !target.steps {
        return Ok(Value::from(target.path.as_str()));
    }
    let Value::Array(steps) = parse_json(&target.path, "PATH")? else {
        bail!("--steps expects PATH to be a JSON array of step tokens");
    };
    // JSON has no `undefined`; `null` marks a hole.
    Ok(steps
        .into_iter()
        .map(|step| if step.is_nullish() { Value::Undefined } else { step })
        .collect())
}

fn load_document(data: Option<&str>, mut stdin: impl Read) -> Result<Value> {
    match data {
        None | Some("-") => {
            let mut buf = String::new();
            stdin
                .read_to_string(&mut buf)
                .context("failed to read document from stdin")?;
            parse_json(&buf, "stdin document")
        }
        Some(input) => {
            let as_path = Path::new(input);
            if as_path.exists() {
                let content = fs::read_to_string(as_path)
                    .with_context(|| format!("failed to read {}", as_path.display()))?;
                return parse_json(&content, &as_path.display().to_string());
            }
            parse_json(input, "--data")
        }
    }
}

fn parse_json(raw: &str, what: &str) -> Result<Value> {
    let parsed: serde_json::Value =
        serde_json::from_str(raw).with_context(|| format!("invalid JSON in {what}"))?;
    Ok(Value::from(parsed))
}

fn write_json(out: &mut impl Write, value: &Value) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, &serde_json::Value::from(value))?;
    writeln!(out)?;
    Ok(())
}
