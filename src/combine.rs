//! Combination passes: fold many per-chapter bank files into one combined
//! set document, stamping provenance onto every entry on the way through.

use crate::document::BankDocument;
use crate::schema::{CombineManifest, SetMapping};
use crate::util::sorted_matches;
use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Label used when a file name does not follow the
/// `SUBJECT-SET-CHAPTER.json` convention.
const FALLBACK_CHAPTER: &str = "unknown";

#[derive(Debug, Default)]
pub struct CombineSummary {
    pub files: usize,
    pub entries: usize,
}

/// Combine every file under `source_dir` matching `pattern` into a single
/// wrapped document at `out_path`, stamping `set` and `chapter` onto each
/// entry. Returns `None` when nothing matched (and writes nothing).
///
/// Files that fail to load are logged and skipped; the pass never aborts on
/// a single bad source file.
pub fn combine_set(
    source_dir: &Path,
    pattern: &str,
    set_id: &str,
    out_path: &Path,
) -> Result<Option<CombineSummary>> {
    let full_pattern = source_dir.join(pattern).to_string_lossy().into_owned();
    let files = sorted_matches(&full_pattern)?;
    if files.is_empty() {
        info!("no files found matching {full_pattern}");
        return Ok(None);
    }

    info!("combining {} files into {}", files.len(), out_path.display());
    let mut combined = Vec::new();
    let mut summary = CombineSummary::default();
    for file in &files {
        let doc = match BankDocument::load(file) {
            Ok(doc) => doc,
            Err(err) => {
                warn!("  skipping {}: {err}", file.display());
                continue;
            }
        };
        let chapter = chapter_label(file);
        let mut entries = doc.into_entries();
        for entry in &mut entries {
            if let Value::Object(fields) = entry {
                fields.insert("set".to_string(), json!(set_id));
                fields.insert("chapter".to_string(), json!(&chapter));
            }
        }
        info!("  loaded {} from {}", entries.len(), file.display());
        summary.files += 1;
        summary.entries += entries.len();
        combined.append(&mut entries);
    }

    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    BankDocument::wrapped(combined).save(out_path)?;
    Ok(Some(summary))
}

/// Run every set mapping of a combination manifest. Each mapping probes the
/// manifest's chapter range against its suffixes and writes
/// `combined-set-{targetSet}.json` when it collected anything.
pub fn combine_manifest(manifest: &CombineManifest) -> Result<()> {
    fs::create_dir_all(&manifest.output_dir)
        .with_context(|| format!("create {}", manifest.output_dir.display()))?;
    for mapping in &manifest.mappings {
        combine_mapping(manifest, mapping)?;
    }
    Ok(())
}

fn combine_mapping(manifest: &CombineManifest, mapping: &SetMapping) -> Result<()> {
    match &mapping.description {
        Some(description) => info!("processing set {} ({description})", mapping.target_set),
        None => info!("processing set {}", mapping.target_set),
    }

    let source = mapping
        .source_label
        .clone()
        .unwrap_or_else(|| mapping.target_set.clone());
    let mut combined = Vec::new();
    for chapter in manifest.chapters.labels() {
        for suffix in &mapping.suffixes {
            let filename = format!("{}-{}-{}.json", manifest.subject, suffix, chapter);
            let Some(path) = manifest
                .source_dirs
                .iter()
                .map(|dir| dir.join(&filename))
                .find(|candidate| candidate.exists())
            else {
                continue;
            };
            let doc = match BankDocument::load(&path) {
                Ok(doc) => doc,
                Err(err) => {
                    warn!("  skipping {}: {err}", path.display());
                    continue;
                }
            };
            let mut entries = doc.into_entries();
            for entry in &mut entries {
                if let Value::Object(fields) = entry {
                    fields.insert("chapter".to_string(), json!(&chapter));
                    fields.insert("suffix".to_string(), json!(suffix));
                    fields.insert("source".to_string(), json!(&source));
                    // Unlike the single-set pass, an existing `set` wins here.
                    if fields.get("set").is_none_or(Value::is_null) {
                        fields.insert("set".to_string(), json!(suffix));
                    }
                }
            }
            info!("  added {} entries from {filename}", entries.len());
            combined.append(&mut entries);
        }
    }

    if combined.is_empty() {
        info!("no entries found for set {}", mapping.target_set);
        return Ok(());
    }
    let target = manifest
        .output_dir
        .join(format!("combined-set-{}.json", mapping.target_set));
    let count = combined.len();
    BankDocument::wrapped(combined).save(&target)?;
    info!("created {} with {count} entries", target.display());
    Ok(())
}

/// Chapter label for a source file: the final `-`-delimited token of the
/// file stem. Non-conforming names keep whatever single token they have;
/// only a nameless file falls back to the placeholder.
fn chapter_label(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .and_then(|stem| stem.rsplit('-').next())
        .filter(|token| !token.is_empty())
        .unwrap_or(FALLBACK_CHAPTER)
        .to_string()
}
