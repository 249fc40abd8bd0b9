//! Serde types for the tool-owned file formats: answer-patch specifications
//! and combination manifests. Bank documents themselves stay untyped (see
//! `document`) so that unknown fields round-trip.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// External answer-patch specification, keyed by entry id.
///
/// Field names follow the camelCase convention of the bank files the
/// patches target.
#[derive(Debug, Clone, Deserialize)]
pub struct PatchSpec {
    /// Per-id field patches.
    #[serde(default)]
    pub answers: BTreeMap<String, AnswerPatch>,
    /// Per-id explanation texts, parallel to `answers`.
    #[serde(default)]
    pub explanations: BTreeMap<String, String>,
}

/// Partial per-entry override. Absent fields leave the entry's field alone.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerPatch {
    /// Replaces the entry's `correctOptions` wholesale.
    pub correct_options: Option<Vec<i64>>,
    /// Overwrites `subQuestions[i].correctOption` positionally; applies to
    /// the shared prefix when lengths differ.
    pub sub_questions: Option<Vec<i64>>,
    /// Explanation text for this entry; wins over the parallel
    /// `explanations` map.
    pub explanation: Option<String>,
}

/// Manifest driving the multi-set combination workflow.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombineManifest {
    /// Subject code used to build `{subject}-{suffix}-{chapter}.json` names.
    pub subject: String,
    /// Source directories probed in order; the first existing file wins.
    pub source_dirs: Vec<PathBuf>,
    /// Directory receiving the `combined-set-{targetSet}.json` outputs.
    pub output_dir: PathBuf,
    pub chapters: ChapterRange,
    pub mappings: Vec<SetMapping>,
}

/// Chapter identifiers to probe: a zero-padded numeric range plus any
/// non-numeric labels appended after it.
#[derive(Debug, Clone, Deserialize)]
pub struct ChapterRange {
    #[serde(default)]
    pub numeric: u32,
    #[serde(default)]
    pub alpha: Vec<String>,
}

impl ChapterRange {
    pub fn labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = (1..=self.numeric).map(|n| format!("{n:02}")).collect();
        labels.extend(self.alpha.iter().cloned());
        labels
    }
}

/// One combined output file: which file-name suffixes feed it and how its
/// entries are labeled.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetMapping {
    pub suffixes: Vec<String>,
    pub target_set: String,
    /// Recorded in each entry's `source` field; falls back to the target set.
    pub source_label: Option<String>,
    pub description: Option<String>,
}
