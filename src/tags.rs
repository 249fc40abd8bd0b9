//! Tag remapping: translate legacy tag vocabularies into canonical tags.
//!
//! The mapping is strictly additive. Raw tags are never removed or renamed
//! in place; the pass only appends the canonical tags they imply.

use crate::document::BankDocument;
use crate::util::sorted_matches;
use anyhow::{bail, Context, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Raw-tag to canonical-tag rules, in the order they appear in the mapping
/// file.
#[derive(Debug, Clone)]
pub struct TagMapping {
    pub rules: Vec<(String, String)>,
}

impl TagMapping {
    /// Load a flat `{"RawTag": "Canonical_Tag", ...}` JSON object.
    pub fn load(path: &Path) -> Result<Self> {
        let text =
            fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        let raw: Map<String, Value> =
            serde_json::from_str(&text).with_context(|| format!("parse {}", path.display()))?;
        let mut rules = Vec::with_capacity(raw.len());
        for (from, to) in raw {
            let Value::String(to) = to else {
                bail!("{}: tag rule `{from}` must map to a string", path.display());
            };
            rules.push((from, to));
        }
        Ok(Self { rules })
    }

    /// Canonical tags to append for an entry currently tagged `tags`: every
    /// canonical tag implied by a raw tag present, minus tags already there,
    /// each at most once. Appended tags follow first-seen rule order, which
    /// is the order the rules are written in the mapping file.
    pub fn additions_for(&self, tags: &[String]) -> Vec<String> {
        let mut additions: Vec<String> = Vec::new();
        for (from, to) in &self.rules {
            if tags.iter().any(|tag| tag == from)
                && !tags.iter().any(|tag| tag == to)
                && !additions.contains(to)
            {
                additions.push(to.clone());
            }
        }
        additions
    }
}

#[derive(Debug, Default)]
pub struct RetagSummary {
    pub files_scanned: usize,
    pub files_rewritten: usize,
    pub entries_updated: usize,
}

/// Apply `mapping` to every file matching `pattern`. Files where no entry
/// gained a tag are not rewritten; files that fail to load or save are
/// logged and skipped without aborting the batch.
pub fn retag_files(pattern: &str, mapping: &TagMapping) -> Result<RetagSummary> {
    let files = sorted_matches(pattern)?;
    let mut summary = RetagSummary::default();
    if files.is_empty() {
        info!("no files found matching {pattern}");
        return Ok(summary);
    }

    for file in &files {
        summary.files_scanned += 1;
        info!("processing {}", file.display());
        match retag_file(file, mapping) {
            Ok(0) => info!("  no tags updated"),
            Ok(updated) => {
                info!("  updated {updated} entries in {}", file.display());
                summary.files_rewritten += 1;
                summary.entries_updated += updated;
            }
            Err(err) => warn!("  skipping {}: {err}", file.display()),
        }
    }
    Ok(summary)
}

fn retag_file(path: &Path, mapping: &TagMapping) -> Result<usize> {
    let mut doc = BankDocument::load(path)?;
    let updated = apply_tag_mapping(&mut doc, mapping);
    if updated > 0 {
        doc.save(path)?;
    }
    Ok(updated)
}

/// Append implied canonical tags across a document; returns how many
/// entries actually gained at least one tag.
pub fn apply_tag_mapping(doc: &mut BankDocument, mapping: &TagMapping) -> usize {
    let mut updated = 0;
    for entry in doc.entries_mut() {
        let Some(fields) = entry.as_object_mut() else {
            continue;
        };
        let current: Vec<String> = match fields.get("tags") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|tag| tag.as_str().map(str::to_owned))
                .collect(),
            _ => continue,
        };
        if current.is_empty() {
            continue;
        }
        let additions = mapping.additions_for(&current);
        if additions.is_empty() {
            continue;
        }
        if let Some(Value::Array(items)) = fields.get_mut("tags") {
            items.extend(additions.into_iter().map(Value::String));
        }
        updated += 1;
    }
    updated
}
