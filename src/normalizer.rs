// Turns raw analytics aircraft labels into canonical Aircraft records.
//
// The cascade below is an ordered list of rewrite rules, each one added to
// correct a specific naming anomaly observed in the field (vendor renames,
// typos, rebranding, stripped metadata). Later rules match against values
// earlier rules wrote, so registration order is part of the contract:
// reordering is a correctness regression, not a refactor.
use crate::aircraft::{Aircraft, LR_STUDIO, OTHER_STUDIO};
use crate::category::Category;
use crate::error::NormalizeError;
use fxhash::FxHashSet;

const CLASS_SEP: &str = " - Class: ";
const STUDIO_SEP: &str = " - Studio: ";
const ENGINES_SEP: &str = " - Engines: ";

/// Working record threaded through the cascade.
#[derive(Debug, Clone)]
struct Draft {
    name: String,
    categories: FxHashSet<Category>,
    studio: Option<String>,
    engines: Option<u32>,
}

impl Draft {
    fn studio_is(&self, studio: &str) -> bool {
        self.studio.as_deref() == Some(studio)
    }

    fn studio_contains(&self, fragment: &str) -> bool {
        self.studio.as_deref().is_some_and(|s| s.contains(fragment))
    }

    fn set_studio(&mut self, studio: &str) {
        self.studio = Some(studio.to_string());
    }

    /// No studio recorded at all.
    fn no_studio(&self) -> bool {
        self.studio.as_deref().is_none_or(str::is_empty)
    }

    /// No usable studio: absent, empty, or the upstream "Other" sentinel.
    fn missing_studio(&self) -> bool {
        match self.studio.as_deref() {
            None => true,
            Some(s) => s.is_empty() || s == OTHER_STUDIO,
        }
    }

    fn only_category(&mut self, category: Category) {
        self.categories = std::iter::once(category).collect();
    }

    fn set_categories(&mut self, categories: impl IntoIterator<Item = Category>) {
        self.categories = categories.into_iter().collect();
    }
}

type Rule = fn(&mut Draft);

/// Cascade stages in required application order.
const CASCADE: &[(&str, Rule)] = &[
    ("infer_missing_engines", infer_missing_engines),
    ("canonicalize_studio_spelling", canonicalize_studio_spelling),
    ("assign_studio_for_known_names", assign_studio_for_known_names),
    ("canonicalize_names", canonicalize_names),
    ("refine_by_studio", refine_by_studio),
    ("apply_global_overrides", apply_global_overrides),
    ("strip_decorations", strip_decorations),
    ("assign_default_studio", assign_default_studio),
    ("normalize_studio_families", normalize_studio_families),
    ("infer_remaining_engines", infer_remaining_engines),
    ("force_airliner_families", force_airliner_families),
];

/// Parse one raw composite label into a normalized identity.
///
/// Structural layout: free-text name, optionally followed by Class, Studio
/// and Engines suffixes (always in that relative order). Suffixes split off
/// in reverse, last separator first. A malformed Engines value or an
/// unknown category label is fatal; every other unrecognized input passes
/// through as an unclassified identity.
pub fn parse(raw: &str) -> Result<Aircraft, NormalizeError> {
    let mut draft = split_label(raw)?;
    for (_, rule) in CASCADE {
        rule(&mut draft);
    }
    Ok(Aircraft::new(
        &draft.name,
        draft.categories,
        draft.engines,
        draft.studio.as_deref(),
    ))
}

fn split_label(raw: &str) -> Result<Draft, NormalizeError> {
    let mut remaining = raw;
    let mut engines = None;
    let mut studio = None;
    let mut categories = FxHashSet::default();

    if let Some((head, engines_str)) = remaining.split_once(ENGINES_SEP) {
        let count = engines_str.trim().parse::<u32>().map_err(|_| {
            NormalizeError::BadEngineCount {
                label: raw.to_string(),
                value: engines_str.to_string(),
            }
        })?;
        engines = Some(count);
        remaining = head;
    }
    if let Some((head, studio_str)) = remaining.split_once(STUDIO_SEP) {
        studio = Some(studio_str.to_string());
        remaining = head;
    }
    if let Some((head, classes)) = remaining.split_once(CLASS_SEP) {
        for class in classes.split('/') {
            categories.insert(Category::resolve(class)?);
        }
        remaining = head;
    }

    Ok(Draft {
        name: remaining.to_string(),
        categories,
        studio,
        engines,
    })
}

// Stage 1: labels from builds that predate the Engines suffix; known models
// fill the gap.
fn infer_missing_engines(d: &mut Draft) {
    if d.engines.is_none() {
        if d.name.contains("Twin Beech") {
            d.engines = Some(2);
        } else if d.name.contains("Turbo 310R") {
            d.engines = Some(1);
        }
    }
}

// Stage 2: studio spelling and casing variants, plus the one case where the
// studio marker rides inside the name field instead of the Studio suffix.
fn canonicalize_studio_spelling(d: &mut Draft) {
    if d.studio.as_deref().map(str::trim) == Some("JARDESIGN (C)") {
        d.set_studio("JARDesign");
    } else if d.studio.as_deref().is_some_and(|s| s.ends_with("dmax3d.com")) {
        d.set_studio("dmax3d.com");
    } else if d.studio_contains("Just Flight") {
        d.studio = d.studio.as_deref().map(|s| s.replace("Just Flight", "JustFlight"));
    } else if d.name.contains("_JARDesign") {
        d.name = d.name.replace("_JARDesign", "");
        d.set_studio("JARDesign");
    }
}

/// Names the vendor ships under its own label but that arrive studio-less.
const KNOWN_FIRST_PARTY_NAMES: &[&str] = &[
    "Bell 206",
    "Baron B58",
    "B747-400 United",
    "FA-22 Raptor",
    "B777-200 British Airways",
    "KingAir C90B",
    "Cirrus TheJet",
    "F-4 Phantom",
    "C-130",
    "Robinson R22 Beta",
    "P180 Avanti Ferrari Team",
    "ASK21",
    "X-15",
    "SR-71 Blackbird-D21a",
    "Lancair Evolution",
    "B747-100 NASA",
    "StinsonL5",
    "KC-10",
    "Viggen JA37",
    "Marines Sea Harrier",
    "B-52G NASA",
    "Japanese Anime",
    "Northrop B-2 Spirit",
    "X-30 NASP",
];

// Stage 3: studio recovery when it is absent or "Other". First-party names
// get the vendor studio; after that, one branch per known third-party
// product naming convention.
fn assign_studio_for_known_names(d: &mut Draft) {
    if !d.missing_studio() {
        return;
    }
    let lower = d.name.to_lowercase();
    if KNOWN_FIRST_PARTY_NAMES.contains(&d.name.trim()) {
        d.set_studio(LR_STUDIO);
    } else if lower.contains("320 neo") || lower.contains("320neo") || lower.contains("321neo") {
        d.name = "A320".to_string();
        d.set_studio("JARDesign");
    } else if lower.contains("330 neo") {
        d.name = "A330".to_string();
        d.set_studio("JARDesign");
    } else if d.name.contains("Boeing737-800_x737") {
        d.name = "Boeing 737-800".to_string();
        d.set_studio("x737 project, EADT");
    } else if d.name.contains("FlightFactor ") {
        d.name = d.name.replace("FlightFactor ", "");
        d.set_studio("Flight Factor");
    } else if d.name.contains("Flight Factor ") {
        d.name = d.name.replace("Flight Factor ", "");
        d.set_studio("Flight Factor");
    } else if d.name.contains("Boeing 757") {
        d.set_studio("Flight Factor and StepToSky");
    } else if d.name.starts_with("IXEG ") {
        d.name = d.name.replace("IXEG ", "");
        d.set_studio("IXEG");
    } else if d.name.contains("Arrow") {
        d.name = "PA28 Arrow".to_string();
        d.set_studio("JustFlight/Thranda Design");
    } else if d.name.contains("CRJ-200") {
        d.name = "Bombardier CRJ-200".to_string();
        d.set_studio("JRollon");
    } else if d.name.contains("Bell 429") {
        d.name = "Bell 429".to_string();
        d.set_studio("timber61");
    } else if d.name.contains("Let L-410") {
        d.set_studio("X-Plane.hu");
    } else if d.name.contains("H145") {
        d.set_studio("Liebernickel");
        d.name = "H145".to_string();
    } else if d.name.contains("MBB Kawasaki BK-117B2") {
        d.name = "MBB Kawasaki BK-117B2".to_string();
        d.set_studio("ND Art & Technology");
    } else if d.name.contains("Boeing 787-9") {
        d.set_studio("Magknight");
        d.only_category(Category::Airliner);
    } else if d.name.contains("Lancair Legacy") {
        d.set_studio("nicolas");
    } else if d.name.contains("Ikarus C42") {
        d.set_studio("vFlyteAir");
    } else if d.name.contains("Dash 7-150") {
        d.set_studio("Stingray14");
    }
}

// Stage 4: name collapses that hold no matter which studio is recorded.
fn canonicalize_names(d: &mut Draft) {
    if d.name.starts_with("Boeing 757-200") {
        d.name = "Boeing 757-200".to_string();
    } else if d.studio_is("IXEG") && d.name.contains("737") {
        d.name = "Boeing 737-300".to_string();
    } else if d.name.contains("A380-plus") {
        d.name = "A380-plus".to_string();
        d.set_studio("riviere");
        d.only_category(Category::Airliner);
    }
}

// Stage 5: per-studio product-line cleanup, for studios already resolved by
// the earlier stages.
fn refine_by_studio(d: &mut Draft) {
    let Some(studio) = d.studio.clone() else {
        return;
    };
    if studio.is_empty() {
        return;
    }

    if studio == "x737 project, EADT" && d.name == "B738" {
        d.name = "Boeing 737-800".to_string();
    } else if studio == "EADT" && d.name.contains("737-700") {
        d.name = "Boeing 737-700".to_string();
        d.set_studio("x737 project, EADT");
    } else if studio.starts_with("Airfoillab") {
        d.set_studio("Airfoillabs");
    } else if studio.to_lowercase() == "jardesign" {
        d.set_studio("JARDesign");
        if d.name.contains("320") {
            d.name = "A320".to_string();
            d.only_category(Category::Airliner);
        }
        if d.name.contains("321") {
            d.name = "A321".to_string();
            d.only_category(Category::Airliner);
        } else if d.name.contains("330") {
            d.name = "A330".to_string();
            d.only_category(Category::Airliner);
        }
    } else if studio.contains("FlightFactor") {
        d.studio = Some(studio.replace("FlightFactor", "Flight Factor"));
    } else if studio == "Rotate" && d.name.contains("MD-80") {
        d.name = "MD-80".to_string();
    } else if studio == "ToLiss" && d.name.contains("A319") {
        d.name = "Airbus A319".to_string();
    } else if studio == "ghansen" && d.name.contains("Gulfstream") {
        d.only_category(Category::Airliner);
    } else if studio == "FlyJSim" {
        if d.name.contains("727") {
            d.name = "Boeing 727".to_string();
        } else if d.name.contains("732 Twinjet") {
            d.name = "Boeing 737-200".to_string();
        }
    } else if studio == "XPFR" && d.name.contains("RAFALE C") {
        d.name = "Rafale C".to_string();
    } else if studio == "Aerobask" {
        if d.name.contains("Epic E1000") {
            d.name = "Epic E1000".to_string();
        }
    } else if studio == LR_STUDIO {
        if d.name.contains("Avanti") {
            d.name = "Piaggio P.180 Avanti".to_string();
        } else if d.name.contains("Baron") {
            d.name = "Baron B58".to_string();
        } else if d.name.contains("Cirrus") {
            d.name = "Cirrus Vision SF50".to_string();
        } else if d.name.contains("747-100") {
            d.name = "Boeing 747-100".to_string();
        } else if d.name.contains("Stinson") {
            d.name = "Stinson L-5 Sentinel".to_string();
        } else if d.name.contains("F-22") || d.name.contains("FA-22") {
            d.name = "FA-22 Raptor".to_string();
        } else if d.name.contains("747-400") {
            d.name = "Boeing 747-400".to_string();
        } else if d.name.contains("Harrier") {
            d.name = "AV-8B Harrier II".to_string();
            d.set_categories([Category::Vtol, Category::Military]);
        } else if d.name.contains("Bell 206") {
            d.name = "Bell 206".to_string();
        } else if d.name.contains("King") && d.name.contains("Air") {
            d.name = "King Air C90".to_string();
        } else if d.name.contains("172") {
            d.name = "Cessna Skyhawk".to_string();
        } else if d.name.contains("F-4") {
            d.name = "F-4 Phantom II".to_string();
        } else if d.name.contains("MD-82") {
            d.name = "MD-82".to_string();
            d.only_category(Category::Airliner);
        } else if d.name.contains("Viggen") {
            d.name = "JA 37 Viggen".to_string();
        } else if d.name.contains("ASK") && d.name.contains("21") {
            d.name = "Schleicher ASK 21".to_string();
        } else if d.name.contains("B-52") {
            d.name = "B-52G Stratofortress".to_string();
        }

        if d.name.contains("Boeing") {
            d.only_category(Category::Airliner);
        }
    }
}

/// Carenado products that picked up a co-studio credit after rebranding.
const CARENADO_THRANDA_NAMES: &[&str] = &[
    "B200 King Air",
    "Cessna T210M Centurion II",
    "C90 King Air",
    "Piper PA-31 Navajo",
    "F33A Bonanza",
];

// Stage 6: global overrides that win regardless of what earlier stages
// decided. Some triggers here overlap stage 3 and stage 5 on purpose; the
// duplicates act as safety nets for labels those stages never saw.
fn apply_global_overrides(d: &mut Draft) {
    let lower = d.name.to_lowercase();
    if d.name.contains("Boeing757v") {
        d.name = "Boeing 757".to_string();
        if d.no_studio() {
            d.set_studio("FlightFactor and StepToSky");
        }
    } else if d.name.contains("CRJ-200") {
        d.name = "Bombardier CRJ-200".to_string();
        d.only_category(Category::Airliner);
    } else if d.name.contains("Tecnam") && d.name.contains("P2002") {
        d.name = "Tecnam P2002".to_string();
        d.set_categories([Category::GeneralAviation, Category::Ultralight]);
    } else if d.name.contains("Antares 20E") {
        d.only_category(Category::Glider);
    } else if d.name.contains("Epic_E1000_Skyview") {
        d.name = "Epic E1000 Skyview".to_string();
    } else if d.name.contains("Akoya") {
        d.name = "Lisa Akoya".to_string();
    } else if CARENADO_THRANDA_NAMES.contains(&d.name.as_str()) && d.studio_is("Carenado") {
        d.set_studio("Carenado/Thranda Design");
    } else if d.name.contains("V35") && d.name.contains("Bonanza") && d.studio_contains("Carenado") {
        d.name = "Bonanza V35B".to_string();
    } else if d.name.contains("B58 Baron") && d.studio_contains("Carenado") {
        d.name = "Beechcraft B58 Baron".to_string();
        d.set_studio("Carenado/Thranda Design");
    } else if d.name.contains("Cessna T210M Centurion II") && d.studio_contains("Carenado") {
        d.name = "Cessna T210M Centurion II".to_string();
        d.set_studio("Carenado/Thranda Design");
    } else if d.name.contains("x737-800") {
        d.name = "Boeing 737-800".to_string();
        d.set_studio("x737 project, EADT");
    } else if lower.contains("320 ultimate")
        || lower.contains("320ultimate")
        || d.name == "FF_A320"
        || d.name.contains("FlightFactorA320")
        || d.name == "A320FF"
        || d.name == "FF A320"
        || d.name == "FFA320"
    {
        d.name = "A320 Ultimate".to_string();
        d.set_studio("Flight Factor");
    } else if d.name.contains("Boeing 737-800X") && d.studio_contains("Zibo") {
        d.set_studio("Laminar Research modify by Zibo and Twkster");
    }
}

/// Cosmetic tags vendors append to names; stripped everywhere.
const DECORATIONS: &[&str] = &[
    " for X-Plane 11",
    "Aerobask ",
    "X-Crafts ",
    " XP11",
    "Carenado ",
    " for XP11",
    " For XP11",
    "FJS ",
    "Airfoillabs ",
];

// Stage 7.
fn strip_decorations(d: &mut Draft) {
    for decoration in DECORATIONS {
        d.name = d.name.replace(decoration, "");
    }
    d.name = d.name.trim().to_string();
}

// Stage 8: a second, smaller studio-recovery pass over names that only
// become recognizable after decoration stripping.
fn assign_default_studio(d: &mut Draft) {
    if !d.missing_studio() {
        return;
    }
    let lower = d.name.to_lowercase();
    if (lower.contains("boeing777") && lower.contains("extended"))
        || d.name == "777 Worldliner Professional"
    {
        d.set_studio("Flight Factor");
        d.name = "Boeing 777".to_string();
    }
    if d.name == "Boeing 757" || d.name.starts_with("Boeing757-200v") {
        d.set_studio("Flight Factor and StepToSky");
    }
}

// Stage 9: model-family collapses within the Flight Factor product line.
fn normalize_studio_families(d: &mut Draft) {
    if !d.studio_contains("Flight Factor") {
        return;
    }
    let lower = d.name.to_lowercase();
    if d.name.contains("777") {
        d.name = "Boeing 777".to_string();
    } else if lower.contains("a350") {
        d.name = "Airbus A350".to_string();
    } else if lower.contains("a320") {
        d.name = "A320 Ultimate".to_string();
        d.set_studio("Flight Factor");
    } else if lower.contains("boeing777") {
        d.name = "Boeing 777".to_string();
    } else if d.name.starts_with("Boeing 767") {
        d.name = "Boeing 767".to_string();
    } else if d.name.starts_with("Boeing 757")
        || d.name.starts_with("Boeing757")
        || d.name.starts_with("FlightFactor Boeing 757")
    {
        d.name = "Boeing 757".to_string();
    }
}

// Stage 10: engine counts for single- and twin-engine models whose labels
// never carry the Engines suffix.
fn infer_remaining_engines(d: &mut Draft) {
    if d.engines.is_some() {
        return;
    }
    if ["F-35A", "T-6B", "T-6A", "MB339A"]
        .iter()
        .any(|prefix| d.name.starts_with(prefix))
    {
        d.engines = Some(1);
    } else if d.name.starts_with("Beech D18S") {
        d.engines = Some(2);
    }
}

/// Canonical-name prefixes that are airliners no matter what the label's
/// Class suffix claimed.
const AIRLINER_FAMILIES: &[&str] = &[
    "Boeing 737",
    "Boeing 747",
    "Boeing 757",
    "Boeing 767",
    "Airbus A32",
    "Airbus A31",
    "Airbus A33",
    "Airbus A34",
    "Airbus A35",
    "A320 ",
];

// Stage 11.
fn force_airliner_families(d: &mut Draft) {
    if AIRLINER_FAMILIES.iter().any(|prefix| d.name.starts_with(prefix)) {
        d.only_category(Category::Airliner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn must_parse(raw: &str) -> Aircraft {
        parse(raw).unwrap_or_else(|e| panic!("parse failed for {raw:?}: {e}"))
    }

    #[test]
    fn splits_all_three_suffixes() {
        let acf = must_parse("Beech D18S - Class: General Aviation - Studio: Alabeo - Engines: 2");
        assert_eq!(acf.name, "Beech D18S");
        assert_eq!(acf.categories, [Category::GeneralAviation].into_iter().collect());
        assert_eq!(acf.engines, Some(2));
        assert_eq!(acf.studio, "Alabeo");
    }

    #[test]
    fn class_suffix_supports_multiple_categories() {
        let acf = must_parse("Icon A5 - Class: Seaplane/Ultra - Studio: Other");
        let expected: FxHashSet<Category> =
            [Category::Seaplane, Category::Ultralight].into_iter().collect();
        assert_eq!(acf.categories, expected);
    }

    #[test]
    fn bad_engine_count_is_fatal() {
        let err = parse("Foo - Class: Airliner - Engines: two").unwrap_err();
        assert!(matches!(err, NormalizeError::BadEngineCount { .. }));
    }

    #[test]
    fn unknown_category_is_fatal() {
        let err = parse("Foo - Class: Dirigible").unwrap_err();
        assert!(matches!(err, NormalizeError::UnknownCategory(_)));
    }

    #[test]
    fn unrecognized_label_degrades_gracefully() {
        let acf = must_parse("Totally Unheard Of Plane");
        assert_eq!(acf.name, "Totally Unheard Of Plane");
        assert!(acf.categories.is_empty());
        assert_eq!(acf.engines, None);
        assert_eq!(acf.studio, OTHER_STUDIO);
        assert!(!acf.is_first_party());
    }

    #[test]
    fn vendor_studio_triggers_model_fixups() {
        let acf = must_parse(
            "Cessna 172SP - Class: General Aviation - Studio: Laminar Research - Engines: 1",
        );
        assert_eq!(acf.name, "Cessna Skyhawk");
        assert_eq!(acf.categories, [Category::GeneralAviation].into_iter().collect());
        assert_eq!(acf.engines, Some(1));
        assert_eq!(acf.studio, LR_STUDIO);
        assert!(acf.is_first_party());
    }

    #[test]
    fn neo_variants_collapse_to_jardesign_a320() {
        let acf = must_parse("320 neo - Studio: JARDesign");
        assert_eq!(acf.name, "A320");
        assert_eq!(acf.studio, "JARDesign");
        // Forced airliner even though the label carried no Class suffix.
        assert_eq!(acf.categories, [Category::Airliner].into_iter().collect());
    }

    #[test]
    fn studio_less_neo_label_recovers_studio() {
        let acf = must_parse("A321neo v2 - Class: Airliner - Studio: Other");
        assert_eq!(acf.name, "A320");
        assert_eq!(acf.studio, "JARDesign");
    }

    #[test]
    fn jardesign_block_prefers_321_over_330() {
        let acf = must_parse("A321 - Class: Airliner - Studio: jardesign");
        assert_eq!(acf.name, "A321");
        assert_eq!(acf.studio, "JARDesign");
        assert_eq!(acf.categories, [Category::Airliner].into_iter().collect());
    }

    #[test]
    fn studio_spelling_variants_are_canonicalized() {
        let acf = must_parse("A320 - Class: Airliner - Studio: JARDESIGN (C)");
        assert_eq!(acf.studio, "JARDesign");

        let acf = must_parse("DA-62 - Class: General Aviation - Studio: shop.dmax3d.com");
        assert_eq!(acf.studio, "dmax3d.com");

        let acf = must_parse("PA28R Arrow III - Class: General Aviation - Studio: Just Flight");
        assert_eq!(acf.studio, "JustFlight");
    }

    #[test]
    fn studio_marker_embedded_in_name_moves_to_studio() {
        let acf = must_parse("A330_JARDesign - Class: Airliner");
        assert_eq!(acf.name, "A330");
        assert_eq!(acf.studio, "JARDesign");
    }

    #[test]
    fn known_first_party_name_without_studio_gets_vendor_studio() {
        let acf = must_parse("FA-22 Raptor - Class: Military - Studio: Other - Engines: 2");
        assert_eq!(acf.studio, LR_STUDIO);
        assert!(acf.is_first_party());
    }

    #[test]
    fn ixeg_prefix_is_stripped_and_737_collapses() {
        let acf = must_parse("IXEG 737 Classic - Class: Airliner - Studio: Other");
        assert_eq!(acf.name, "Boeing 737-300");
        assert_eq!(acf.studio, "IXEG");
        assert_eq!(acf.categories, [Category::Airliner].into_iter().collect());
    }

    #[test]
    fn decorations_are_stripped_from_names() {
        let acf = must_parse("Pipistrel Panthera for X-Plane 11 - Class: General Aviation");
        assert_eq!(acf.name, "Pipistrel Panthera");

        let acf = must_parse("Carenado PC-12 XP11 - Class: General Aviation - Studio: Carenado");
        assert_eq!(acf.name, "PC-12");
    }

    #[test]
    fn worldliner_recovers_flight_factor_777() {
        let acf = must_parse("777 Worldliner Professional - Class: Airliner - Studio: Other");
        assert_eq!(acf.name, "Boeing 777");
        assert_eq!(acf.studio, "Flight Factor");
    }

    #[test]
    fn flight_factor_family_names_collapse() {
        let acf = must_parse("Boeing 757-200v2 - Class: Airliner - Studio: FlightFactor");
        assert_eq!(acf.studio, "Flight Factor");
        assert_eq!(acf.name, "Boeing 757");

        let acf = must_parse("a350 xwb - Class: Airliner - Studio: Flight Factor");
        assert_eq!(acf.name, "Airbus A350");
    }

    #[test]
    fn boeing757v_sets_unspaced_studio_spelling() {
        // The safety-net override writes its own studio spelling, distinct
        // from the one stage 3 writes. Both are preserved verbatim.
        let acf = must_parse("Boeing757v10 - Class: Airliner");
        assert_eq!(acf.name, "Boeing 757");
        assert_eq!(acf.studio, "FlightFactor and StepToSky");
    }

    #[test]
    fn harrier_under_vendor_studio_is_vtol_military() {
        let acf = must_parse("Marines Sea Harrier - Class: VTOL - Studio: Laminar Research - Engines: 1");
        assert_eq!(acf.name, "AV-8B Harrier II");
        let expected: FxHashSet<Category> =
            [Category::Vtol, Category::Military].into_iter().collect();
        assert_eq!(acf.categories, expected);
    }

    #[test]
    fn carenado_rebrands_pick_up_thranda_credit() {
        let acf = must_parse("F33A Bonanza - Class: General Aviation - Studio: Carenado - Engines: 1");
        assert_eq!(acf.studio, "Carenado/Thranda Design");
        assert_eq!(acf.name, "F33A Bonanza");
    }

    #[test]
    fn zibo_mod_gets_the_long_studio_credit() {
        let acf = must_parse("Boeing 737-800X - Class: Airliner - Studio: Zibo - Engines: 2");
        assert_eq!(acf.studio, "Laminar Research modify by Zibo and Twkster");
        assert_eq!(acf.name, "Boeing 737-800X");
        assert_eq!(acf.categories, [Category::Airliner].into_iter().collect());
        // The studio string contains the vendor name, so the mod counts as
        // first-party only if it matches the vendor studio exactly; it does
        // not.
        assert!(!acf.is_first_party());
    }

    #[test]
    fn airliner_families_force_category() {
        let acf = must_parse("Boeing 747-8 VC - Class: Military - Studio: SSG");
        assert_eq!(acf.categories, [Category::Airliner].into_iter().collect());
    }

    #[test]
    fn engine_inference_for_known_models() {
        let acf = must_parse("Twin Beech D18S - Class: General Aviation");
        assert_eq!(acf.engines, Some(2));

        let acf = must_parse("F-35A Lightning II - Class: Military");
        assert_eq!(acf.engines, Some(1));

        let acf = must_parse("MB339A - Class: Military - Studio: FSX2XPL");
        assert_eq!(acf.engines, Some(1));
    }

    #[test]
    fn parse_is_a_stable_fixed_point() {
        let labels = [
            "320 neo - Studio: JARDesign",
            "Cessna 172SP - Class: General Aviation - Studio: Laminar Research - Engines: 1",
            "IXEG 737 Classic - Class: Airliner - Studio: Other",
            "Just Flight PA28R Arrow III - Class: General Aviation - Studio: Other",
            "777 Worldliner Professional - Class: Airliner - Studio: Other - Engines: 2",
            "Totally Unheard Of Plane - Class: Glider",
        ];
        for label in labels {
            let first = must_parse(label);
            let mut rebuilt = first.name.clone();
            if !first.categories.is_empty() {
                let mut classes: Vec<&str> =
                    first.categories.iter().map(|c| c.label()).collect();
                classes.sort_unstable();
                rebuilt.push_str(&format!(" - Class: {}", classes.join("/")));
            }
            rebuilt.push_str(&format!(" - Studio: {}", first.studio));
            if let Some(engines) = first.engines {
                rebuilt.push_str(&format!(" - Engines: {engines}"));
            }
            let second = must_parse(&rebuilt);
            assert_eq!(first, second, "not a fixed point for {label:?}");
        }
    }
}
