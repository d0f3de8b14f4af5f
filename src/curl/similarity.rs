//! Typo suggestions for unknown flags
//!
//! Similarity is the Dice coefficient over character bigrams:
//! `2 * |shared bigrams| / (|bigrams(a)| + |bigrams(b)|)`, counting repeated
//! bigrams as a multiset. Comparison is case-insensitive.

use super::flags;

/// Default minimum score a suggestion must exceed
pub const DEFAULT_SUGGESTION_THRESHOLD: f64 = 0.5;

fn bigrams(s: &str) -> Vec<(char, char)> {
    let chars: Vec<char> = s.to_lowercase().chars().collect();
    chars.windows(2).map(|w| (w[0], w[1])).collect()
}

/// Bigram Dice coefficient in `[0, 1]`
pub fn dice_coefficient(a: &str, b: &str) -> f64 {
    if a.eq_ignore_ascii_case(b) {
        return 1.0;
    }

    let left = bigrams(a);
    let mut right = bigrams(b);
    if left.is_empty() || right.is_empty() {
        return 0.0;
    }

    let total = left.len() + right.len();
    let mut shared = 0usize;
    for pair in &left {
        if let Some(pos) = right.iter().position(|p| p == pair) {
            right.swap_remove(pos);
            shared += 1;
        }
    }

    (2 * shared) as f64 / total as f64
}

/// Closest known flag spelling, if its score exceeds `threshold`.
///
/// Ties go to the spelling listed first in the flag table.
pub fn suggest_flag(input: &str, threshold: f64) -> Option<&'static str> {
    let mut best: Option<(&'static str, f64)> = None;
    for (spelling, _) in flags::spellings() {
        let score = dice_coefficient(input, spelling);
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((spelling, score));
        }
    }

    best.filter(|&(_, score)| score > threshold).map(|(spelling, _)| spelling)
}
