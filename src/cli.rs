//! CLI argument parsing for the question-bank maintenance commands.
//!
//! The CLI is intentionally thin: every subcommand names its input files
//! explicitly, so the same passes can be rerun with different patch content
//! without touching code.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default glob for the tag remap pass when no pattern is given.
pub const DEFAULT_TAGS_PATTERN: &str = "json/new/*.json";

/// Root CLI entrypoint for the bank maintenance workflows.
#[derive(Parser, Debug)]
#[command(
    name = "qbank",
    version,
    about = "Question-bank maintenance for quiz JSON datasets",
    after_help = "Examples:\n  qbank combine --source-dir json/new --pattern '*-E-*.json' --set extra --out json/combined/combined-set-extra.json\n  qbank combine-all --manifest json/combine-manifest.json\n  qbank answers --spec answers/arf-02.json json/new/ARF-02-B.json\n  qbank tags --mapping tags/new-syllabus.json 'json/new/ARF-02-*.json'\n  qbank setup --name \"My Quiz Site\"",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level maintenance commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    Combine(CombineArgs),
    CombineAll(CombineAllArgs),
    Answers(AnswersArgs),
    Tags(TagsArgs),
    Setup(SetupArgs),
}

#[derive(Parser, Debug)]
#[command(about = "Combine per-chapter files matching a glob into one set")]
pub struct CombineArgs {
    /// Directory holding the per-chapter source files
    #[arg(long, value_name = "DIR")]
    pub source_dir: PathBuf,

    /// Filename glob, relative to the source directory
    #[arg(long, value_name = "GLOB")]
    pub pattern: String,

    /// Value stamped into every combined entry's `set` field
    #[arg(long, value_name = "ID")]
    pub set: String,

    /// Output path for the combined document
    #[arg(long, value_name = "PATH")]
    pub out: PathBuf,
}

#[derive(Parser, Debug)]
#[command(about = "Combine every set configured in a manifest")]
pub struct CombineAllArgs {
    /// Path to the combination manifest JSON
    #[arg(long, value_name = "PATH")]
    pub manifest: PathBuf,
}

#[derive(Parser, Debug)]
#[command(about = "Apply an answer/explanation patch spec to one bank file")]
pub struct AnswersArgs {
    /// Path to the patch specification JSON
    #[arg(long, value_name = "PATH")]
    pub spec: PathBuf,

    /// Bank document to patch in place
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

#[derive(Parser, Debug)]
#[command(about = "Append canonical tags implied by a raw-tag mapping")]
pub struct TagsArgs {
    /// Path to the raw-to-canonical tag mapping JSON
    #[arg(long, value_name = "PATH")]
    pub mapping: PathBuf,

    /// Glob selecting the bank files to update
    #[arg(value_name = "GLOB", default_value = DEFAULT_TAGS_PATTERN)]
    pub pattern: String,
}

#[derive(Parser, Debug)]
#[command(about = "Rewrite the front-end config with your platform settings")]
pub struct SetupArgs {
    /// Front-end config file to rewrite in place
    #[arg(long, value_name = "PATH", default_value = crate::setup::DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Platform name (prompted for when omitted)
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// GenAI API endpoint (prompted for when omitted)
    #[arg(long, value_name = "URL")]
    pub genai: Option<String>,

    /// Data/tracking API endpoint (prompted for when omitted)
    #[arg(long, value_name = "URL")]
    pub data: Option<String>,
}
