// The normalized aircraft identity record and the first-party reference fleet
use crate::category::Category;
use fxhash::FxHashSet;
use lazy_static::lazy_static;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Studio credited for aircraft that ship with the simulator.
pub const LR_STUDIO: &str = "Laminar Research";

/// Studio sentinel for add-ons with no usable studio metadata.
pub const OTHER_STUDIO: &str = "Other";

/// One aircraft product as advertised to users, after normalization.
///
/// Immutable once built; used as a counter key and a rendering source.
/// Engine count participates in equality, so the same name recorded with
/// different engine counts is deliberately treated as distinct entities.
#[derive(Debug, Clone, Eq)]
pub struct Aircraft {
    pub name: String,
    pub categories: FxHashSet<Category>,
    pub engines: Option<u32>,
    pub studio: String,
}

impl Aircraft {
    pub fn new(
        name: &str,
        categories: impl IntoIterator<Item = Category>,
        engines: Option<u32>,
        studio: Option<&str>,
    ) -> Self {
        let studio = match studio {
            Some(s) if !s.is_empty() => s.trim().to_string(),
            _ => OTHER_STUDIO.to_string(),
        };
        Aircraft {
            name: name.trim().to_string(),
            categories: categories.into_iter().collect(),
            engines,
            studio,
        }
    }

    /// First-party means shipped by the platform vendor: either the studio
    /// says so, or the record matches a reference-fleet entry exactly.
    pub fn is_first_party(&self) -> bool {
        self.studio == LR_STUDIO || FIRST_PARTY_FLEET.iter().any(|entry| entry == self)
    }

    /// Category names joined for display, in a stable order.
    pub fn category_label(&self) -> String {
        let mut labels: Vec<&str> = self.categories.iter().map(|c| c.label()).collect();
        labels.sort_unstable();
        labels.join(", ")
    }

    pub fn engines_label(&self) -> String {
        self.engines.map(|e| e.to_string()).unwrap_or_default()
    }
}

impl PartialEq for Aircraft {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.categories == other.categories
            && self.studio == other.studio
            && self.engines == other.engines
    }
}

// Hashes the category-set *size*, not its contents, so identities whose
// category sets differ but have equal size land in the same bucket. Equality
// stays exact; map lookups tolerate the collisions.
impl Hash for Aircraft {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.categories.len().hash(state);
        self.engines.hash(state);
        self.studio.hash(state);
    }
}

impl fmt::Display for Aircraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.studio)
    }
}

fn fleet_entry(name: &str, category: Category, engines: u32) -> Aircraft {
    Aircraft::new(name, [category], Some(engines), Some(LR_STUDIO))
}

lazy_static! {
    /// Every aircraft the platform vendor has shipped, keyed the same way
    /// normalized identities are. Changes only with a product release.
    /// "Experimental" appears three times on purpose: engine count is part
    /// of identity, so the 8-, 1- and 2-engine records are distinct.
    pub static ref FIRST_PARTY_FLEET: Vec<Aircraft> = vec![
        fleet_entry("Cessna 172SP", Category::GeneralAviation, 1),
        fleet_entry("Baron B58", Category::GeneralAviation, 2),
        fleet_entry("B747-400 United", Category::Airliner, 4),
        fleet_entry("Cirrus TheJet", Category::GeneralAviation, 1),
        fleet_entry("KingAir C90B", Category::GeneralAviation, 2),
        fleet_entry("B777-200 British Airways", Category::Airliner, 2),
        fleet_entry("Bell 206", Category::Helicopter, 1),
        fleet_entry("FA-22 Raptor", Category::Military, 2),
        fleet_entry("RV-10", Category::Experimental, 1),
        fleet_entry("P180 Avanti Ferrari Team", Category::GeneralAviation, 2),
        fleet_entry("X-15", Category::Experimental, 1),
        fleet_entry("StinsonL5", Category::GeneralAviation, 1),
        fleet_entry("Columbia-400", Category::GeneralAviation, 1),
        fleet_entry("Robinson R22 Beta", Category::Helicopter, 1),
        fleet_entry("KC-10", Category::Airliner, 3),
        fleet_entry("B747-100 NASA", Category::Airliner, 4),
        fleet_entry("F-4 Phantom", Category::Military, 2),
        fleet_entry("ASK21", Category::Glider, 0),
        fleet_entry("C-130", Category::Airliner, 4),
        fleet_entry("Space Shuttle", Category::Experimental, 3),
        fleet_entry("Marines Sea Harrier", Category::Vtol, 1),
        fleet_entry("Viggen JA37", Category::Military, 1),
        fleet_entry("Lancair Evolution", Category::Experimental, 1),
        fleet_entry("SR-71 Blackbird-D21a", Category::Military, 2),
        fleet_entry("Northrop B-2 Spirit", Category::Military, 4),
        fleet_entry("Japanese Anime", Category::SciFi, 2),
        fleet_entry("X-30 NASP", Category::Experimental, 6),
        fleet_entry("B-52G NASA", Category::Military, 8),
        fleet_entry("Rockwell B-1B Lancer", Category::Military, 4),
        fleet_entry("GP_PT_60", Category::Experimental, 1),
        fleet_entry("X-1 Cavallo", Category::Experimental, 1),
        fleet_entry("Experimental", Category::Experimental, 8),
        fleet_entry("Experimental", Category::Experimental, 1),
        fleet_entry("Experimental", Category::Experimental, 2),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(aircraft: &Aircraft) -> u64 {
        let mut hasher = DefaultHasher::new();
        aircraft.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn equality_covers_all_four_fields() {
        let a = Aircraft::new("MD-80", [Category::Airliner], Some(2), Some("Rotate"));
        let same = Aircraft::new("MD-80", [Category::Airliner], Some(2), Some("Rotate"));
        assert_eq!(a, same);

        let other_name = Aircraft::new("MD-82", [Category::Airliner], Some(2), Some("Rotate"));
        let other_cats = Aircraft::new("MD-80", [Category::Military], Some(2), Some("Rotate"));
        let other_engines = Aircraft::new("MD-80", [Category::Airliner], Some(3), Some("Rotate"));
        let other_studio = Aircraft::new("MD-80", [Category::Airliner], Some(2), Some("Rockwell"));
        assert_ne!(a, other_name);
        assert_ne!(a, other_cats);
        assert_ne!(a, other_engines);
        assert_ne!(a, other_studio);
    }

    #[test]
    fn engine_count_distinguishes_identities() {
        let one = Aircraft::new("Experimental", [Category::Experimental], Some(1), Some(LR_STUDIO));
        let two = Aircraft::new("Experimental", [Category::Experimental], Some(2), Some(LR_STUDIO));
        assert_ne!(one, two);
        assert!(one.is_first_party());
        assert!(two.is_first_party());
    }

    #[test]
    fn equal_identities_hash_equal() {
        let a = Aircraft::new(" Bell 206 ", [Category::Helicopter], Some(1), Some(LR_STUDIO));
        let b = Aircraft::new("Bell 206", [Category::Helicopter], Some(1), Some(LR_STUDIO));
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn hash_uses_category_set_size_not_contents() {
        let vtol = Aircraft::new("Prototype", [Category::Vtol], Some(1), None);
        let glider = Aircraft::new("Prototype", [Category::Glider], Some(1), None);
        // Same size, different contents: hashes collide, equality separates.
        assert_eq!(hash_of(&vtol), hash_of(&glider));
        assert_ne!(vtol, glider);
    }

    #[test]
    fn missing_studio_defaults_to_other() {
        let aircraft = Aircraft::new("Sopwith Camel", [], None, None);
        assert_eq!(aircraft.studio, OTHER_STUDIO);
        assert!(!aircraft.is_first_party());
    }

    #[test]
    fn vendor_studio_is_always_first_party() {
        let unlisted = Aircraft::new("Some Hangar Queen", [], None, Some(LR_STUDIO));
        assert!(unlisted.is_first_party());
    }

    #[test]
    fn fleet_match_requires_exact_identity() {
        let exact = Aircraft::new("ASK21", [Category::Glider], Some(0), Some(LR_STUDIO));
        assert!(exact.is_first_party());

        let wrong_engines = Aircraft::new("ASK21", [Category::Glider], Some(1), Some(OTHER_STUDIO));
        assert!(!wrong_engines.is_first_party());
    }

    #[test]
    fn collision_tolerant_in_count_maps() {
        use fxhash::FxHashMap;
        let vtol = Aircraft::new("Prototype", [Category::Vtol], Some(1), None);
        let glider = Aircraft::new("Prototype", [Category::Glider], Some(1), None);
        let mut counts: FxHashMap<Aircraft, u64> = FxHashMap::default();
        *counts.entry(vtol.clone()).or_insert(0) += 3;
        *counts.entry(glider.clone()).or_insert(0) += 5;
        assert_eq!(counts[&vtol], 3);
        assert_eq!(counts[&glider], 5);
    }
}
