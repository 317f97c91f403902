//! Alternate spellings of a title, tried when the exact term is missing.

use nami_core::text::{capitalize, title_case};

/// Variants of `term` in retry order: title case, first letter capitalized,
/// spaces as underscores, lowercase then title case.
///
/// Variants equal to `term` and repeats are left out.
pub fn title_variants(term: &str) -> Vec<String> {
    let candidates = [
        title_case(term),
        capitalize(term),
        term.replace(' ', "_"),
        title_case(&term.to_lowercase()),
    ];

    let mut variants: Vec<String> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if candidate != term && !variants.contains(&candidate) {
            variants.push(candidate);
        }
    }
    variants
}
