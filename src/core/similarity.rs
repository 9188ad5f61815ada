//! Sequence similarity for label matching.
//!
//! Scores two strings as `2*M / (len(a) + len(b))` where `M` is the total
//! length of the longest matching blocks found recursively (Ratcliff and
//! Obershelp). A score of 1.0 is an exact match, 0.0 shares nothing.

use std::collections::HashMap;

/// Similarity ratio between two strings on a 0.0..=1.0 scale.
///
/// Two empty strings are identical (1.0); empty against non-empty is 0.0,
/// so blank label cells score harmlessly low against any search term.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matched = match_size(&a, &b, 0, a.len(), 0, b.len());
    2.0 * matched as f64 / total as f64
}

/// Total matched characters: longest common block, then recurse on the
/// unmatched stretches to its left and right.
fn match_size(a: &[char], b: &[char], alo: usize, ahi: usize, blo: usize, bhi: usize) -> usize {
    let (i, j, k) = longest_match(a, b, alo, ahi, blo, bhi);
    if k == 0 {
        return 0;
    }
    k + match_size(a, b, alo, i, blo, j) + match_size(a, b, i + k, ahi, j + k, bhi)
}

/// Longest block of equal characters within the given windows. Ties resolve
/// to the earliest position in `a`, then in `b`.
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_k) = (alo, blo, 0usize);
    // j2len[j] = length of the match ending at (i-1, j)
    let mut j2len: HashMap<usize, usize> = HashMap::new();
    for i in alo..ahi {
        let mut row: HashMap<usize, usize> = HashMap::new();
        for j in blo..bhi {
            if a[i] == b[j] {
                let prev = if j == 0 {
                    0
                } else {
                    j2len.get(&(j - 1)).copied().unwrap_or(0)
                };
                let k = prev + 1;
                row.insert(j, k);
                if k > best_k {
                    best_i = i + 1 - k;
                    best_j = j + 1 - k;
                    best_k = k;
                }
            }
        }
        j2len = row;
    }
    (best_i, best_j, best_k)
}
