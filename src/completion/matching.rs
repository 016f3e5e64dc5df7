/// Closest candidate for `token`: the shortest prefix match, else the nearest
/// one within edit distance 2.
pub(crate) fn best_suggestion(token: &str, candidates: &[String]) -> Option<String> {
    if token.is_empty() {
        return None;
    }
    let prefix = candidates
        .iter()
        .filter(|candidate| candidate.starts_with(token))
        .min_by_key(|candidate| candidate.len());
    prefix
        .or_else(|| {
            candidates
                .iter()
                .filter(|candidate| !candidate.is_empty())
                .map(|candidate| (edit_distance(token, candidate, 2), candidate))
                .filter(|&(dist, _)| dist <= 2)
                .min_by_key(|&(dist, _)| dist)
                .map(|(_, candidate)| candidate)
        })
        .cloned()
}

/// Levenshtein distance over chars; bails out early once every cell in a row
/// exceeds `max`.
fn edit_distance(a: &str, b: &str, max: usize) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut cur = vec![0; b.len() + 1];
    for i in 1..=a.len() {
        cur[0] = i;
        let mut row_min = cur[0];
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            let value = (cur[j - 1] + 1).min(prev[j] + 1).min(prev[j - 1] + cost);
            cur[j] = value;
            row_min = row_min.min(value);
        }
        if row_min > max {
            return row_min;
        }
        prev.clone_from(&cur);
    }
    prev[b.len()]
}
