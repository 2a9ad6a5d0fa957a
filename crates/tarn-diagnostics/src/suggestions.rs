// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Suggestion helpers for actionable error messages.

/// Levenshtein distance, counted in characters.
fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, a_ch) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, b_ch) in b.iter().enumerate() {
            let cost = if a_ch == b_ch { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Find the best match for `name` among `candidates`.
///
/// Returns `Some("did you mean `closest`?")` if a close match is found.
/// The name itself is never suggested; on equal distance the first
/// candidate wins.
pub fn did_you_mean<'a>(name: &str, candidates: impl IntoIterator<Item = &'a str>) -> Option<String> {
    let name_len = name.chars().count();
    let max_distance = match name_len {
        0..=2 => 1,
        3..=5 => 2,
        _ => 3,
    };

    let mut best: Option<(&str, usize)> = None;

    for candidate in candidates {
        if candidate == name {
            continue;
        }
        // Quick length check to avoid computing distance for very different strings
        if name_len.abs_diff(candidate.chars().count()) > max_distance {
            continue;
        }

        let dist = edit_distance(name, candidate);
        let closer = match best {
            Some((_, best_dist)) => dist < best_dist,
            None => true,
        };
        if dist <= max_distance && closer {
            best = Some((candidate, dist));
        }
    }

    best.map(|(closest, _)| format!("did you mean `{}`?", closest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_did_you_mean() {
        let candidates = ["counter", "count", "name", "value"];

        assert_eq!(
            did_you_mean("conter", candidates.iter().copied()),
            Some("did you mean `counter`?".to_string())
        );
        assert_eq!(
            did_you_mean("cout", candidates.iter().copied()),
            Some("did you mean `count`?".to_string())
        );
        assert_eq!(did_you_mean("xyz", candidates.iter().copied()), None);
    }

    #[test]
    fn never_suggests_the_same_name() {
        assert_eq!(did_you_mean("count", ["count"]), None);
        assert_eq!(
            did_you_mean("count", ["count", "counts"]),
            Some("did you mean `counts`?".to_string())
        );
    }

    #[test]
    fn test_edit_distance() {
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("", "hello"), 5);
        assert_eq!(edit_distance("abc", "abc"), 0);
        assert_eq!(edit_distance("abc", "abd"), 1);
        assert_eq!(edit_distance("é", "e"), 1);
    }
}
