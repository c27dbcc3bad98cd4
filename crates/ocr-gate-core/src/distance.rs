//! Levenshtein edit distance.
//!
//! Insertion, deletion, and substitution each cost 1. Distances are counted
//! in characters, not bytes.

/// Edit distance between `a` and `b`.
///
/// Uses a single rolling row sized to the shorter string.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (longer, shorter) = if a.len() >= b.len() { (a, b) } else { (b, a) };

    if shorter.is_empty() {
        return longer.len();
    }

    let mut row: Vec<usize> = (0..=shorter.len()).collect();

    for (i, &lc) in longer.iter().enumerate() {
        // row[j] still holds the previous row's value until overwritten.
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, &sc) in shorter.iter().enumerate() {
            let above = row[j + 1];
            let substitution = diagonal + usize::from(lc != sc);
            let deletion = above + 1;
            let insertion = row[j] + 1;
            row[j + 1] = substitution.min(deletion).min(insertion);
            diagonal = above;
        }
    }

    row[shorter.len()]
}

/// Edit distance if it is at most `max`, otherwise `None`.
///
/// Pairs whose lengths differ by more than `max` are rejected without
/// running the full computation.
pub fn levenshtein_within(a: &str, b: &str, max: usize) -> Option<usize> {
    if a.chars().count().abs_diff(b.chars().count()) > max {
        return None;
    }
    let distance = levenshtein(a, b);
    (distance <= max).then_some(distance)
}
