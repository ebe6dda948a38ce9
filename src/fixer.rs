use tracing::{debug, warn};

use crate::diagnostic::Fix;

/// Outcome of applying a batch of fixes to one source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixOutcome {
    pub source: String,
    /// Indices into the input fixes that were written, in document order
    pub applied: Vec<usize>,
    pub skipped: usize,
}

/// Apply `fixes` to `source`, last range first so earlier offsets stay valid.
/// A fix that overlaps an already accepted one, or does not fall on char
/// boundaries inside the source, is skipped and counted.
pub fn apply_fixes(source: &str, fixes: &[Fix]) -> FixOutcome {
    let mut ordered: Vec<usize> = (0..fixes.len()).collect();
    ordered.sort_by_key(|&i| (fixes[i].range.start, fixes[i].range.end));

    // WHY: accept in document order so the first of two overlapping fixes wins
    let mut accepted: Vec<usize> = Vec::with_capacity(ordered.len());
    let mut skipped = 0;
    let mut last_end = 0;
    for index in ordered {
        let range = &fixes[index].range;
        let in_bounds = range.start <= range.end
            && source.is_char_boundary(range.start)
            && source.is_char_boundary(range.end);
        if !in_bounds || range.start < last_end {
            warn!("Skipping fix at {}..{}: overlaps or out of bounds", range.start, range.end);
            skipped += 1;
            continue;
        }
        last_end = range.end;
        accepted.push(index);
    }

    let mut output = source.to_string();
    for fix in accepted.iter().rev().map(|&i| &fixes[i]) {
        output.replace_range(fix.range.clone(), &fix.replacement);
    }
    debug!("Applied {} fixes, skipped {}", accepted.len(), skipped);

    FixOutcome {
        source: output,
        applied: accepted,
        skipped,
    }
}
