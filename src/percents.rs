// Count-to-percent conversion shared by tables and charts
use fxhash::FxHashMap;
use std::hash::Hash;

/// Rank map entries count-descending. `sort_by` is stable, so entries with
/// equal counts keep the order the map yielded them in; with the
/// deterministic hasher used throughout, repeated runs on the same input
/// rank identically.
pub fn rank_by_count<K: Clone>(counts: &FxHashMap<K, u64>) -> Vec<(K, u64)> {
    let mut ranked: Vec<(K, u64)> = counts.iter().map(|(k, v)| (k.clone(), *v)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

/// Convert ordered counts to percentages of `override_total` (or of the sum
/// of the counts when not supplied).
///
/// Slices under 2% keep two decimals, everything else one: small slices
/// would otherwise all round to the same figure. Entries below
/// `smush_below_percent` are removed and their share accumulates into a
/// trailing "Other" entry, emitted only when nonzero.
pub fn counts_to_percents<K: AsRef<str>>(
    ordered: &[(K, u64)],
    override_total: Option<u64>,
    smush_below_percent: f64,
) -> Vec<(String, f64)> {
    let total = override_total.unwrap_or_else(|| ordered.iter().map(|(_, c)| c).sum());
    if total == 0 {
        return Vec::new();
    }

    let mut out = Vec::with_capacity(ordered.len());
    let mut other = 0.0;
    for (key, count) in ordered {
        let percent = *count as f64 / total as f64 * 100.0;
        if percent >= smush_below_percent {
            let places = if percent < 2.0 { 2 } else { 1 };
            out.push((key.as_ref().to_string(), round_to(percent, places)));
        } else {
            other += percent;
        }
    }
    if other > 0.0 {
        out.push(("Other".to_string(), round_to(other, 2)));
    }
    out
}

/// Like `counts_to_percents`, for maps with no meaningful order: ranks
/// count-descending first.
pub fn map_to_percents<K: Clone + Eq + Hash + AsRef<str>>(
    counts: &FxHashMap<K, u64>,
    override_total: Option<u64>,
    smush_below_percent: f64,
) -> Vec<(String, f64)> {
    counts_to_percents(&rank_by_count(counts), override_total, smush_below_percent)
}

pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn percent_sum(entries: &[(String, f64)]) -> f64 {
        entries.iter().map(|(_, p)| p).sum()
    }

    #[test]
    fn percents_sum_to_one_hundred() {
        let counts = vec![("A".to_string(), 90u64), ("B".to_string(), 8), ("C".to_string(), 2)];
        let percents = counts_to_percents(&counts, None, 0.0);
        assert!((percent_sum(&percents) - 100.0).abs() < 0.1);
    }

    #[test]
    fn threshold_folds_small_slices_into_other() {
        let counts = vec![("A".to_string(), 90u64), ("B".to_string(), 8), ("C".to_string(), 2)];
        let percents = counts_to_percents(&counts, None, 5.0);
        assert_eq!(
            percents,
            vec![
                ("A".to_string(), 90.0),
                ("B".to_string(), 8.0),
                ("Other".to_string(), 2.0),
            ]
        );
        assert!((percent_sum(&percents) - 100.0).abs() < 0.1);
    }

    #[test]
    fn small_slices_keep_two_decimals() {
        let counts = vec![("big".to_string(), 985u64), ("small".to_string(), 15)];
        let percents = counts_to_percents(&counts, None, 0.0);
        // 1.5% rounds to two decimals, 98.5% to one.
        assert_eq!(percents[0], ("big".to_string(), 98.5));
        assert_eq!(percents[1], ("small".to_string(), 1.5));

        let counts = vec![("big".to_string(), 9987u64), ("tiny".to_string(), 13)];
        let percents = counts_to_percents(&counts, None, 0.0);
        assert_eq!(percents[1], ("tiny".to_string(), 0.13));
    }

    #[test]
    fn override_total_scales_percents() {
        let counts = vec![("vr".to_string(), 25u64)];
        let percents = counts_to_percents(&counts, Some(1000), 0.0);
        assert_eq!(percents, vec![("vr".to_string(), 2.5)]);
    }

    #[test]
    fn no_other_entry_when_nothing_was_smushed() {
        let counts = vec![("A".to_string(), 60u64), ("B".to_string(), 40)];
        let percents = counts_to_percents(&counts, None, 5.0);
        assert_eq!(percents.len(), 2);
        assert!(percents.iter().all(|(label, _)| label != "Other"));
    }

    #[test]
    fn empty_and_zero_total_inputs_yield_nothing() {
        let empty: Vec<(String, u64)> = Vec::new();
        assert!(counts_to_percents(&empty, None, 0.0).is_empty());

        let zeros = vec![("A".to_string(), 0u64)];
        assert!(counts_to_percents(&zeros, None, 0.0).is_empty());
    }

    #[test]
    fn ranking_is_count_descending_and_stable() {
        let mut counts: FxHashMap<String, u64> = FxHashMap::default();
        counts.insert("mid".to_string(), 50);
        counts.insert("top".to_string(), 100);
        counts.insert("low".to_string(), 1);
        let ranked = rank_by_count(&counts);
        assert_eq!(ranked[0].0, "top");
        assert_eq!(ranked[1].0, "mid");
        assert_eq!(ranked[2].0, "low");
    }
}
