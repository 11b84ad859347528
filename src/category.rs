// Aircraft category taxonomy and multilingual label resolution
use crate::error::NormalizeError;
use fxhash::FxHashMap;
use lazy_static::lazy_static;
use std::fmt;

/// The closed set of aircraft categories the simulator reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    GeneralAviation,
    Airliner,
    Cargo,
    Seaplane,
    Helicopter,
    Glider,
    Military,
    Experimental,
    Ultralight,
    Vtol,
    SciFi,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::GeneralAviation,
        Category::Airliner,
        Category::Cargo,
        Category::Seaplane,
        Category::Helicopter,
        Category::Glider,
        Category::Military,
        Category::Experimental,
        Category::Ultralight,
        Category::Vtol,
        Category::SciFi,
    ];

    /// Canonical English display label, as the simulator emits it.
    pub fn label(self) -> &'static str {
        match self {
            Category::GeneralAviation => "General Aviation",
            Category::Airliner => "Airliner",
            Category::Cargo => "Cargo",
            Category::Seaplane => "Seaplane",
            Category::Helicopter => "Helicopter",
            Category::Glider => "Glider",
            Category::Military => "Military",
            Category::Experimental => "Experimental",
            Category::Ultralight => "Ultralight",
            Category::Vtol => "VTOL",
            Category::SciFi => "Science Fiction",
        }
    }

    /// Localized labels observed in the field for this category. These are
    /// literal, case-sensitive strings, not patterns; the table grows by
    /// precedent whenever a new translation shows up upstream.
    fn aliases(self) -> &'static [&'static str] {
        match self {
            Category::GeneralAviation => &[
                "Aviação Geral",
                "小型機",
                "Avion général",
                "Малая авиация",
                "Aviation Générale",
                "Aviación General",
                "Avión de Pasajeros",
                "Aviazione Generale",
                "Allgemeine Luftfahrt",
                "Avion de tourisme",
            ],
            Category::Airliner => &[
                "Aereo di linea",
                "Verkehrsflugzeug",
                "Avion de ligne",
                "Avion de Ligne",
                "Aviação Comercial",
                "Авиалайнеры",
                "航空会社",
                "民航客机",
                "客机",
                "通用航空器",
            ],
            Category::Seaplane => &[
                "Hydravion",
                "Flugboot",
                "Hidroavión",
                "水上飛行機",
                "Idrovolante",
                "水上飞机",
            ],
            Category::Helicopter => &[
                "Hubschrauber",
                "Elicottero",
                "Helicóptero",
                "Hélicopter",
                "Hélicoptère",
                "Вертолеты",
                "ヘリコプター",
                "直升机",
            ],
            Category::Glider => &[
                "Segler",
                "Planador",
                "Планёры",
                "Planeador",
                "Planeur",
                "Segelflieger",
                "Aliante",
                "グライダー",
                "滑翔机",
            ],
            Category::Military => &[
                "Militär",
                "Militaire",
                "Militar",
                "Militare",
                "軍用機",
                "军用飞机",
                "Военные ЛА",
            ],
            Category::Experimental => &["Expérimental", "Sperimentale", "実験機", "试验机"],
            Category::Ultralight => &[
                "Ultra",
                "Ultraleicht",
                "Ultraligero",
                "超軽量飛行機",
                "Ultra-Léger",
                "Ultraleggero",
                "超轻型飞机",
                "Сверхлегкие",
            ],
            Category::SciFi => &["サイエンスフィクション"],
            Category::Vtol => &["Cамолёты вертикального взлёта и посадки"],
            Category::Cargo => &["Fracht", "Cargamento"],
        }
    }

    /// Resolve a raw category label (any supported language) to a category.
    ///
    /// An unknown label is a hard error: it means the alias table lags the
    /// data, and callers must abort the run rather than miscount.
    pub fn resolve(raw: &str) -> Result<Category, NormalizeError> {
        let trimmed = raw.trim();
        if let Some(category) = ALIAS_TABLE.get(trimmed) {
            return Ok(*category);
        }
        Category::ALL
            .into_iter()
            .find(|c| c.label() == trimmed)
            .ok_or_else(|| NormalizeError::UnknownCategory(trimmed.to_string()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

lazy_static! {
    static ref ALIAS_TABLE: FxHashMap<&'static str, Category> = {
        let mut table = FxHashMap::default();
        for category in Category::ALL {
            for alias in category.aliases() {
                table.insert(*alias, category);
            }
        }
        table
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_canonical_labels() {
        for category in Category::ALL {
            assert_eq!(Category::resolve(category.label()).unwrap(), category);
        }
    }

    #[test]
    fn resolves_aliases_in_every_language() {
        for category in Category::ALL {
            for alias in category.aliases() {
                assert_eq!(Category::resolve(alias).unwrap(), category, "alias {alias:?}");
            }
        }
    }

    #[test]
    fn resolve_trims_whitespace() {
        assert_eq!(Category::resolve("  Hubschrauber ").unwrap(), Category::Helicopter);
        assert_eq!(Category::resolve(" Airliner").unwrap(), Category::Airliner);
    }

    #[test]
    fn unknown_label_is_fatal() {
        let err = Category::resolve("Zeppelin").unwrap_err();
        assert!(err.to_string().contains("Zeppelin"));
    }
}
