/*!
 * Cheap check of whether a block of text looks like a script.
 *
 * Used by acquisition code to decide whether extracted text deserves
 * further cleanup before structuring.
 */

use serde::{Deserialize, Serialize};

use crate::script::speakers::match_colon_cue;

/// Minimum "NAME:" lines (exclusive) for a likely script.
const MIN_CUE_LINES: usize = 3;

/// Minimum distinct names for a likely script.
const MIN_DISTINCT_NAMES: usize = 2;

/// Result of [`estimate_structure`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureEstimate {
    pub is_likely_script: bool,
    pub character_count: usize,
    /// Distinct names in first-seen order
    pub character_names: Vec<String>,
    pub dialogue_line_count: usize,
}

/// Count "NAME:" lines and distinct names in any text.
pub fn estimate_structure(text: &str) -> StructureEstimate {
    let mut names: Vec<String> = Vec::new();
    let mut dialogue_line_count = 0;

    for line in text.lines().map(str::trim) {
        let Some(cue) = match_colon_cue(line) else {
            continue;
        };
        dialogue_line_count += 1;
        if !names.iter().any(|name| name == cue.name) {
            names.push(cue.name.to_string());
        }
    }

    StructureEstimate {
        is_likely_script: dialogue_line_count > MIN_CUE_LINES && names.len() >= MIN_DISTINCT_NAMES,
        character_count: names.len(),
        character_names: names,
        dialogue_line_count,
    }
}
