//! Keyed answer patches: per-id overrides of answers and explanations.

use crate::document::{entry_id, BankDocument};
use crate::schema::PatchSpec;
use serde_json::{json, Value};

/// Literal every patched explanation starts with.
pub const EXPLANATION_PREFIX: &str = "Answered & Explained by GenAI";

/// Apply `spec` to every entry whose id appears in the spec's answer map.
/// Returns the number of entries modified; entries without a patch are left
/// untouched, and patch keys matching no entry are silently unused.
pub fn apply_patch_spec(doc: &mut BankDocument, spec: &PatchSpec) -> usize {
    let mut modified = 0;
    for entry in doc.entries_mut() {
        let Some(id) = entry_id(entry).map(str::to_owned) else {
            continue;
        };
        let Some(patch) = spec.answers.get(&id) else {
            continue;
        };
        let Some(fields) = entry.as_object_mut() else {
            continue;
        };

        let text = patch
            .explanation
            .as_deref()
            .or_else(|| spec.explanations.get(&id).map(String::as_str));
        fields.insert("explanation".to_string(), json!(compose_explanation(text)));

        if let Some(options) = &patch.correct_options {
            fields.insert("correctOptions".to_string(), json!(options));
        }

        if let Some(patched) = &patch.sub_questions {
            if let Some(Value::Array(existing)) = fields.get_mut("subQuestions") {
                // Positional overwrite over the shared prefix: extra patch
                // values are dropped, extra sub-questions keep their answer.
                for (sub, option) in existing.iter_mut().zip(patched) {
                    if let Some(sub_fields) = sub.as_object_mut() {
                        sub_fields.insert("correctOption".to_string(), json!(option));
                    }
                }
            }
        }

        modified += 1;
    }
    modified
}

fn compose_explanation(text: Option<&str>) -> String {
    match text {
        Some(text) => format!("{EXPLANATION_PREFIX}\n\n{text}"),
        None => EXPLANATION_PREFIX.to_string(),
    }
}
