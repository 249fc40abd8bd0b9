use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::Path;

mod cli;
mod combine;
mod document;
mod patch;
mod schema;
mod setup;
mod tags;
mod util;

use cli::{AnswersArgs, CombineAllArgs, CombineArgs, Command, RootArgs, SetupArgs, TagsArgs};
use document::BankDocument;
use schema::{CombineManifest, PatchSpec};
use setup::SetupValues;
use tags::TagMapping;

fn main() -> Result<()> {
    init_tracing();
    let args = RootArgs::parse();

    match args.command {
        Command::Combine(args) => cmd_combine(args),
        Command::CombineAll(args) => cmd_combine_all(args),
        Command::Answers(args) => cmd_answers(args),
        Command::Tags(args) => cmd_tags(args),
        Command::Setup(args) => cmd_setup(args),
    }
}

/// Progress goes to stdout so a run can be piped into a plain log file.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .without_time()
        .with_ansi(false)
        .with_writer(std::io::stdout)
        .init();
}

fn cmd_combine(args: CombineArgs) -> Result<()> {
    match combine::combine_set(&args.source_dir, &args.pattern, &args.set, &args.out)? {
        Some(summary) => println!(
            "Wrote {} entries from {} files to {}",
            summary.entries,
            summary.files,
            args.out.display()
        ),
        None => println!("Nothing to combine."),
    }
    Ok(())
}

fn cmd_combine_all(args: CombineAllArgs) -> Result<()> {
    let manifest = read_manifest(&args.manifest)?;
    combine::combine_manifest(&manifest)
}

fn cmd_answers(args: AnswersArgs) -> Result<()> {
    let spec = read_patch_spec(&args.spec)?;
    let mut doc = BankDocument::load(&args.file)?;
    let modified = patch::apply_patch_spec(&mut doc, &spec);
    doc.save(&args.file)?;
    println!("Updated {modified} questions in {}", args.file.display());
    Ok(())
}

fn cmd_tags(args: TagsArgs) -> Result<()> {
    let mapping = TagMapping::load(&args.mapping)?;
    let summary = tags::retag_files(&args.pattern, &mapping)?;
    println!(
        "Updated {} entries across {} of {} files",
        summary.entries_updated, summary.files_rewritten, summary.files_scanned
    );
    Ok(())
}

fn cmd_setup(args: SetupArgs) -> Result<()> {
    println!("Quiz platform setup");
    println!("-------------------");
    setup::run_setup(
        &args.config,
        SetupValues {
            name: args.name,
            genai: args.genai,
            data: args.data,
        },
    )
}

fn read_manifest(path: &Path) -> Result<CombineManifest> {
    let content = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parse {}", path.display()))
}

fn read_patch_spec(path: &Path) -> Result<PatchSpec> {
    let content = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parse {}", path.display()))
}
