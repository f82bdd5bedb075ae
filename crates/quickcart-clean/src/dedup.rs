use std::collections::HashSet;
use std::hash::Hash;

/// Drop rows whose key was already seen, keeping the first occurrence.
///
/// Returns the surviving rows in their original order and the number of
/// rows removed.
pub fn dedup_by_key<T, K, F>(rows: Vec<T>, key: F) -> (Vec<T>, u64)
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut seen = HashSet::with_capacity(rows.len());
    let mut kept = Vec::with_capacity(rows.len());
    let mut duplicates = 0_u64;
    for row in rows {
        if seen.insert(key(&row)) {
            kept.push(row);
        } else {
            duplicates += 1;
        }
    }
    (kept, duplicates)
}
