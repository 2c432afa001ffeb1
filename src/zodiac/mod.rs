//! Domain model: offerings, signs, readings and the closed constellation set.

pub mod offerings;

use serde::{Deserialize, Serialize};

// ─── Offerings ───────────────────────────────────────────────────────────────

/// Kind of cultural preference the user offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfferingKind {
    #[default]
    Movie,
    Artist,
    Book,
    Tv,
    Game,
}

impl OfferingKind {
    pub const ALL: [OfferingKind; 5] = [
        OfferingKind::Movie,
        OfferingKind::Artist,
        OfferingKind::Book,
        OfferingKind::Tv,
        OfferingKind::Game,
    ];

    /// Label shown in the kind selector.
    pub fn label(self) -> &'static str {
        match self {
            OfferingKind::Movie => "Movie",
            OfferingKind::Artist => "Artist",
            OfferingKind::Book => "Book",
            OfferingKind::Tv => "TV Show",
            OfferingKind::Game => "Game",
        }
    }
}

/// One input row: a kind plus the name the user typed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Offering {
    #[serde(rename = "type")]
    pub kind: OfferingKind,
    pub name: String,
}

impl Offering {
    pub fn new(kind: OfferingKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    /// Whether the row carries any text once surrounding whitespace is ignored.
    pub fn is_filled(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

// ─── Signs ───────────────────────────────────────────────────────────────────

/// One possible quiz outcome.
///
/// Catalog entries carry no `prophecy`/`symbolism`; those default to empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Sign {
    pub name: String,
    pub emoji: String,
    pub constellation: String,
    #[serde(default)]
    pub prophecy: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub symbolism: String,
    #[serde(default)]
    pub absurdity: u8,
    #[serde(default)]
    pub rare: bool,
    #[serde(default)]
    pub compatibility: String,
}

impl Sign {
    /// Absurdity clamped into the 1..=5 range the magnitude bar expects.
    pub fn absurdity_level(&self) -> u8 {
        self.absurdity.clamp(1, 5)
    }

    /// Width of the absurdity bar as a fraction of the full track.
    pub fn absurdity_fraction(&self) -> f32 {
        self.absurdity_level() as f32 * 0.2
    }

    pub fn kind(&self) -> Constellation {
        Constellation::from_name(&self.constellation)
    }

    /// `"🌑 The Hermit"`
    pub fn title(&self) -> String {
        format!("{} {}", self.emoji, self.name)
    }
}

/// The paired "taste twin" profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TasteTwin {
    pub emoji: String,
    pub name: String,
    pub bio: String,
}

pub type TasteTags = Vec<String>;

/// Format a taste tag as a hashtag with every whitespace character removed.
pub fn hashtag(tag: &str) -> String {
    let body: String = tag.chars().filter(|c| !c.is_whitespace()).collect();
    format!("#{}", body)
}

/// One accepted Oracle response.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub sign: Sign,
    pub tags: Option<TasteTags>,
    pub twin: Option<TasteTwin>,
    pub catalog: Vec<Sign>,
}

// ─── Constellations ──────────────────────────────────────────────────────────

/// The closed set of clusters the Oracle groups signs into.
///
/// Any grouping string outside the known four maps to `Uncharted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constellation {
    HauntedTechnology,
    AbsurdNostalgia,
    CosmicIsolation,
    DomesticSurrealism,
    Uncharted,
}

/// sRGB triple.
pub type Rgb = [u8; 3];

impl Constellation {
    pub fn from_name(name: &str) -> Self {
        match name.trim() {
            "Haunted Technology" => Constellation::HauntedTechnology,
            "Absurd Nostalgia" => Constellation::AbsurdNostalgia,
            "Cosmic Isolation" => Constellation::CosmicIsolation,
            "Domestic Surrealism" => Constellation::DomesticSurrealism,
            _ => Constellation::Uncharted,
        }
    }

    /// Solid backdrop used behind an exported card.
    pub fn backdrop(self) -> Rgb {
        match self {
            Constellation::HauntedTechnology => [0x04, 0x2f, 0x2e],
            Constellation::AbsurdNostalgia => [0x4c, 0x1d, 0x95],
            Constellation::CosmicIsolation => [0x1e, 0x1b, 0x4b],
            Constellation::DomesticSurrealism => [0x45, 0x1a, 0x03],
            Constellation::Uncharted => DEFAULT_BACKDROP,
        }
    }

    /// Window background gradient (top-left, middle, bottom-right).
    pub fn gradient(self) -> [Rgb; 3] {
        match self {
            // teal-900 / gray-900 / green-900
            Constellation::HauntedTechnology => {
                [[0x13, 0x4e, 0x4a], [0x11, 0x18, 0x27], [0x14, 0x53, 0x2d]]
            }
            // pink-800 / indigo-900 / purple-900
            Constellation::AbsurdNostalgia => {
                [[0x9d, 0x17, 0x4d], [0x31, 0x2e, 0x81], [0x58, 0x1c, 0x87]]
            }
            // blue-900 / black / purple-900
            Constellation::CosmicIsolation => {
                [[0x1e, 0x3a, 0x8a], [0x00, 0x00, 0x00], [0x58, 0x1c, 0x87]]
            }
            // amber-800 / stone-900 / lime-900
            Constellation::DomesticSurrealism => {
                [[0x92, 0x40, 0x0e], [0x1c, 0x19, 0x17], [0x36, 0x53, 0x14]]
            }
            Constellation::Uncharted => DEFAULT_GRADIENT,
        }
    }
}

/// Export backdrop for anything without a known constellation.
pub const DEFAULT_BACKDROP: Rgb = [0x11, 0x18, 0x27];

/// purple-800 / gray-900 / indigo-900: the form screen's gradient.
pub const DEFAULT_GRADIENT: [Rgb; 3] = [[0x6b, 0x21, 0xa8], [0x11, 0x18, 0x27], [0x31, 0x2e, 0x81]];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offering_kind_uses_lowercase_wire_names() {
        let json = serde_json::to_string(&Offering::new(OfferingKind::Tv, "Arcane")).unwrap();
        assert_eq!(json, r#"{"type":"tv","name":"Arcane"}"#);
    }

    #[test]
    fn whitespace_only_offering_is_not_filled() {
        assert!(!Offering::new(OfferingKind::Book, "   \t").is_filled());
        assert!(Offering::new(OfferingKind::Book, " Dune ").is_filled());
    }

    #[test]
    fn absurdity_is_clamped_for_the_bar() {
        let mut sign = Sign::default();
        assert_eq!(sign.absurdity_level(), 1);
        sign.absurdity = 4;
        assert!((sign.absurdity_fraction() - 0.8).abs() < f32::EPSILON);
        sign.absurdity = 9;
        assert_eq!(sign.absurdity_level(), 5);
    }

    #[test]
    fn unknown_constellation_falls_back() {
        assert_eq!(
            Constellation::from_name("Cosmic Isolation"),
            Constellation::CosmicIsolation
        );
        assert_eq!(Constellation::from_name("Velvet Void"), Constellation::Uncharted);
        assert_eq!(Constellation::Uncharted.backdrop(), DEFAULT_BACKDROP);
        assert_eq!(Constellation::HauntedTechnology.backdrop(), [0x04, 0x2f, 0x2e]);
    }

    #[test]
    fn hashtag_strips_all_whitespace() {
        assert_eq!(hashtag("80s Sci-Fi"), "#80sSci-Fi");
        assert_eq!(hashtag("Arcade  Culture "), "#ArcadeCulture");
    }

    #[test]
    fn catalog_entry_without_prophecy_decodes() {
        let json = r#"{"name":"Extinct Mall Mascot","emoji":"🧸","keywords":["80s"],
            "mood":"Bittersweet","era":"1980s","absurdity":2,"rare":false,
            "description":"A forgotten fuzzball.","constellation":"Absurd Nostalgia",
            "compatibility":"Feels a deep kinship."}"#;
        let sign: Sign = serde_json::from_str(json).unwrap();
        assert_eq!(sign.kind(), Constellation::AbsurdNostalgia);
        assert!(sign.prophecy.is_empty());
        assert_eq!(sign.title(), "🧸 Extinct Mall Mascot");
    }
}
