//! Content-digest deduplication with sidecar preference.

use crate::migrate::types::CandidateAsset;
use std::collections::HashSet;

/// Reduce candidates to one representative per content digest.
///
/// Admission runs in two passes: candidates carrying a sidecar first, then
/// the rest, each admitted only if no earlier admission shares its digest.
/// Whenever any copy of a given content has a sidecar, the kept copy is one
/// that has it, even if a sidecar-less duplicate was discovered first.
/// Within each pass the first candidate in input order wins.
///
/// `on_admit` fires once per kept candidate, in admission order.
pub fn dedupe_candidates(
    candidates: Vec<CandidateAsset>,
    mut on_admit: impl FnMut(&CandidateAsset),
) -> Vec<CandidateAsset> {
    let (with_sidecar, without_sidecar): (Vec<_>, Vec<_>) =
        candidates.into_iter().partition(|c| c.has_sidecar);

    let mut seen_digests = HashSet::new();
    let mut unique = Vec::new();

    for candidate in with_sidecar.into_iter().chain(without_sidecar) {
        if seen_digests.insert(candidate.content_digest.clone()) {
            on_admit(&candidate);
            unique.push(candidate);
        }
    }

    unique
}
