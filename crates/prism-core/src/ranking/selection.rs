//! Diversity-capped top-k selection.
//!
//! One parameterized operation serves both display surfaces: the primary
//! list calls it with `limit = top_k`, the wider secondary view with
//! `limit = max_per_label`.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::types::ScoredCandidate;

/// Filter, rank, and diversity-cap scored candidates.
///
/// 1. Drop candidates scoring below `threshold`.
/// 2. Stable-sort descending by score (ties keep original order).
/// 3. Admit at most `max_per_label` per label, highest-scoring first.
/// 4. Flatten groups in the order labels first appear in the sorted
///    sequence, then truncate to `limit`.
pub fn select(
    candidates: Vec<ScoredCandidate>,
    threshold: f32,
    limit: usize,
    max_per_label: usize,
) -> Vec<ScoredCandidate> {
    let mut filtered: Vec<ScoredCandidate> = candidates
        .into_iter()
        .filter(|c| c.score >= threshold)
        .collect();

    // Vec::sort_by is stable; scores are finite (zero-norm cosine yields 0).
    filtered.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    let mut label_order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<ScoredCandidate>> = HashMap::new();
    for candidate in filtered {
        let group = groups.entry(candidate.label.clone()).or_insert_with(|| {
            label_order.push(candidate.label.clone());
            Vec::new()
        });
        if group.len() < max_per_label {
            group.push(candidate);
        }
    }

    let mut selected = Vec::new();
    for label in &label_order {
        if let Some(group) = groups.remove(label) {
            selected.extend(group);
        }
    }
    selected.truncate(limit);
    selected
}
