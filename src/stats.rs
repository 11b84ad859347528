// Aircraft usage aggregation over raw analytics rows
use crate::aircraft::Aircraft;
use crate::category::Category;
use crate::normalizer;
use crate::percents::rank_by_count;
use anyhow::{Context, Result};
use fxhash::FxHashMap;
use tracing::warn;

/// Rows missing this marker were truncated somewhere upstream; they carry no
/// classification and get dropped rather than polluting the counters.
const CLASS_MARKER: &str = "Class:";

/// Immutable snapshot of flight counts keyed by normalized identity.
///
/// Built once from a row stream, never mutated afterwards. Every identity
/// appears in `combined`; additionally in exactly one of `first_party` or
/// `third_party`.
#[derive(Debug, Default)]
pub struct AircraftStats {
    pub first_party: FxHashMap<Aircraft, u64>,
    pub third_party: FxHashMap<Aircraft, u64>,
    pub combined: FxHashMap<Aircraft, u64>,
}

impl AircraftStats {
    /// Aggregate raw `(label, count_string)` rows as the analytics API
    /// returns them; count strings are thousands-separated.
    ///
    /// Fatal normalization errors abort the whole run: partial counts would
    /// be silently wrong, which is worse than no counts.
    pub fn from_rows<I>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut stats = AircraftStats::default();
        for (label, count_str) in rows {
            if !label.contains(CLASS_MARKER) {
                warn!("dropping truncated row: {label:?}");
                continue;
            }
            let count = parse_count(&count_str)
                .with_context(|| format!("bad count {count_str:?} for label {label:?}"))?;
            let aircraft = normalizer::parse(&label)?;
            if aircraft.is_first_party() {
                *stats.first_party.entry(aircraft.clone()).or_insert(0) += count;
            } else {
                *stats.third_party.entry(aircraft.clone()).or_insert(0) += count;
            }
            *stats.combined.entry(aircraft).or_insert(0) += count;
        }
        Ok(stats)
    }

    /// Flights per category. An identity with several categories contributes
    /// its full count to each of them.
    pub fn categories(&self) -> FxHashMap<Category, u64> {
        let mut rollup: FxHashMap<Category, u64> = FxHashMap::default();
        for (aircraft, count) in &self.combined {
            for category in &aircraft.categories {
                *rollup.entry(*category).or_insert(0) += count;
            }
        }
        rollup
    }

    pub fn total_flights(&self) -> u64 {
        self.combined.values().sum()
    }

    pub fn first_party_flights(&self) -> u64 {
        self.first_party.values().sum()
    }

    pub fn third_party_flights(&self) -> u64 {
        self.third_party.values().sum()
    }

    /// Top third-party aircraft labeled for display: studio-prefixed names
    /// with the house label rewrites the dashboard uses.
    pub fn top_third_party_labeled(&self, keep: usize) -> Vec<(String, u64)> {
        let ranked = rank_by_count(&self.third_party)
            .into_iter()
            .map(|(aircraft, count)| {
                let mut key = if aircraft.studio.contains("Zibo and Twkster") {
                    format!("Zibo and Twkster {}", aircraft.name)
                } else {
                    format!("{} {}", aircraft.studio, aircraft.name)
                };
                if key.contains(" and ") {
                    key = key.replace(" and ", " & ");
                }
                (key, count)
            })
            .collect();
        top_n_with_other(ranked, keep)
    }

    /// Top first-party aircraft by plain name.
    pub fn top_first_party_labeled(&self, keep: usize) -> Vec<(String, u64)> {
        let ranked = rank_by_count(&self.first_party)
            .into_iter()
            .map(|(aircraft, count)| (aircraft.name, count))
            .collect();
        top_n_with_other(ranked, keep)
    }
}

/// Parse a thousands-separated integer count string (e.g. `"1,234"`).
pub fn parse_count(raw: &str) -> Result<u64> {
    Ok(raw.replace(',', "").trim().parse::<u64>()?)
}

/// Keep the top `n` ranked entries verbatim; the remainder collapses into a
/// single trailing "Other" bucket (appended only when the tail is nonzero).
pub fn top_n_with_other(ranked: Vec<(String, u64)>, n: usize) -> Vec<(String, u64)> {
    let mut out: Vec<(String, u64)> = Vec::with_capacity(n + 1);
    let mut other = 0u64;
    for (i, (label, count)) in ranked.into_iter().enumerate() {
        if i < n {
            out.push((label, count));
        } else {
            other += count;
        }
    }
    if other > 0 {
        out.push(("Other".to_string(), other));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aircraft::LR_STUDIO;

    fn rows(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter().map(|(l, c)| (l.to_string(), c.to_string())).collect()
    }

    #[test]
    fn first_party_row_lands_in_both_buckets() {
        let stats = AircraftStats::from_rows(rows(&[(
            "Cessna 172SP - Class: General Aviation - Studio: Laminar Research - Engines: 1",
            "1,500",
        )]))
        .unwrap();

        assert_eq!(stats.total_flights(), 1500);
        assert_eq!(stats.first_party_flights(), 1500);
        assert_eq!(stats.third_party_flights(), 0);

        let (aircraft, count) = stats.first_party.iter().next().unwrap();
        assert_eq!(aircraft.name, "Cessna Skyhawk");
        assert_eq!(aircraft.studio, LR_STUDIO);
        assert_eq!(aircraft.engines, Some(1));
        assert_eq!(*count, 1500);
    }

    #[test]
    fn rows_without_class_marker_are_dropped() {
        let stats = AircraftStats::from_rows(rows(&[
            ("Cessna 172SP - Studio: Laminar Research", "400"),
            ("Cirrus SR22 - Class: General Aviation - Studio: vFlyteAir", "100"),
        ]))
        .unwrap();
        assert_eq!(stats.total_flights(), 100);
        assert_eq!(stats.first_party_flights(), 0);
    }

    #[test]
    fn rows_normalizing_to_equal_identities_merge() {
        let stats = AircraftStats::from_rows(rows(&[
            ("320 neo - Class: Airliner - Studio: Other", "1,000"),
            ("A320neo - Class: Airliner - Studio: Other", "234"),
        ]))
        .unwrap();
        assert_eq!(stats.combined.len(), 1);
        let (aircraft, count) = stats.combined.iter().next().unwrap();
        assert_eq!(aircraft.name, "A320");
        assert_eq!(aircraft.studio, "JARDesign");
        assert_eq!(*count, 1234);
    }

    #[test]
    fn aggregation_is_order_independent() {
        let forward = rows(&[
            ("Bell 206 - Class: Helicopter - Studio: Other - Engines: 1", "50"),
            ("MD-80 - Class: Airliner - Studio: Rotate - Engines: 2", "75"),
            ("320 neo - Class: Airliner - Studio: Other", "25"),
            ("Bell 206 - Class: Helicopter - Studio: Other - Engines: 1", "10"),
        ]);
        let mut backward = forward.clone();
        backward.reverse();

        let a = AircraftStats::from_rows(forward).unwrap();
        let b = AircraftStats::from_rows(backward).unwrap();
        assert_eq!(a.combined, b.combined);
        assert_eq!(a.first_party, b.first_party);
        assert_eq!(a.third_party, b.third_party);
    }

    #[test]
    fn category_rollup_counts_multi_category_identities_in_each() {
        let stats = AircraftStats::from_rows(rows(&[
            ("Tecnam P2002 Sierra - Class: Ultralight - Studio: IndiaFoxtEcho", "40"),
            ("MD-80 - Class: Airliner - Studio: Rotate - Engines: 2", "60"),
        ]))
        .unwrap();

        let rollup = stats.categories();
        // Tecnam resolves to GA + Ultralight, contributing 40 to each.
        assert_eq!(rollup[&Category::GeneralAviation], 40);
        assert_eq!(rollup[&Category::Ultralight], 40);
        assert_eq!(rollup[&Category::Airliner], 60);
        assert_eq!(stats.total_flights(), 100);
    }

    #[test]
    fn bad_count_string_aborts_the_run() {
        let result = AircraftStats::from_rows(rows(&[(
            "Bell 206 - Class: Helicopter - Studio: Other",
            "lots",
        )]));
        assert!(result.is_err());
    }

    #[test]
    fn unknown_category_aborts_the_run() {
        let result = AircraftStats::from_rows(rows(&[(
            "Mystery Ship - Class: Dirigible - Studio: Other",
            "5",
        )]));
        assert!(result.is_err());
    }

    #[test]
    fn parse_count_strips_thousands_separators() {
        assert_eq!(parse_count("1,234").unwrap(), 1234);
        assert_eq!(parse_count("12").unwrap(), 12);
        assert_eq!(parse_count("1,234,567").unwrap(), 1234567);
        assert!(parse_count("n/a").is_err());
    }

    #[test]
    fn top_n_collapses_tail_into_other() {
        let ranked = vec![
            ("first".to_string(), 100u64),
            ("second".to_string(), 50),
            ("third".to_string(), 10),
            ("fourth".to_string(), 5),
        ];
        let collapsed = top_n_with_other(ranked, 2);
        assert_eq!(
            collapsed,
            vec![
                ("first".to_string(), 100),
                ("second".to_string(), 50),
                ("Other".to_string(), 15),
            ]
        );
    }

    #[test]
    fn top_n_omits_other_when_nothing_remains() {
        let ranked = vec![("only".to_string(), 10u64)];
        assert_eq!(top_n_with_other(ranked, 5), vec![("only".to_string(), 10)]);
    }

    #[test]
    fn third_party_labels_join_studio_and_rewrite_and() {
        let stats = AircraftStats::from_rows(rows(&[(
            "Boeing757v10 - Class: Airliner",
            "90",
        )]))
        .unwrap();
        let labeled = stats.top_third_party_labeled(10);
        assert_eq!(labeled, vec![("FlightFactor & StepToSky Boeing 757".to_string(), 90)]);
    }
}
