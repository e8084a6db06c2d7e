//! Keyword-based store classification.
//!
//! Independent of the authored CMS categories: the kind is inferred at render
//! time from the store's name and card description, and drives the legend,
//! marker styling, and the "Store Type" autocomplete entries.

use serde::{Deserialize, Serialize};

/// The fixed classification vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    Vintage,
    Consignment,
    Thrift,
    Antique,
    Furniture,
    Books,
    Designer,
    General,
}

/// Fixed presentation triple for one [`StoreKind`], shared by the legend,
/// markers, and autocomplete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindStyle {
    /// Hex pin color.
    pub color: &'static str,
    /// Emoji glyph rendered inside the pin.
    pub glyph: &'static str,
    /// Display name.
    pub label: &'static str,
}

/// Keyword groups checked in order; the first group with a substring hit
/// wins. The order is a tie-break policy, not arbitrary: "Vintage
/// Consignment Boutique" must classify as vintage.
const KEYWORD_GROUPS: &[(StoreKind, &[&str])] = &[
    (StoreKind::Vintage, &["vintage", "retro"]),
    (StoreKind::Consignment, &["consignment", "consign"]),
    (StoreKind::Antique, &["antique", "antiquary"]),
    (StoreKind::Furniture, &["furniture", "chair", "table"]),
    (StoreKind::Books, &["book", "library"]),
    (StoreKind::Designer, &["designer", "luxury", "couture"]),
    (StoreKind::Thrift, &["thrift", "goodwill", "salvation army"]),
];

impl StoreKind {
    /// Every kind, in legend order.
    pub const ALL: &'static [StoreKind] = &[
        StoreKind::Vintage,
        StoreKind::Consignment,
        StoreKind::Thrift,
        StoreKind::Antique,
        StoreKind::Furniture,
        StoreKind::Books,
        StoreKind::Designer,
        StoreKind::General,
    ];

    #[must_use]
    pub fn style(self) -> KindStyle {
        match self {
            StoreKind::Vintage => KindStyle {
                color: "#8B4A7B",
                glyph: "👗",
                label: "Vintage",
            },
            StoreKind::Consignment => KindStyle {
                color: "#6B73FF",
                glyph: "💎",
                label: "Consignment",
            },
            StoreKind::Thrift => KindStyle {
                color: "#E67E22",
                glyph: "🛍️",
                label: "Thrift",
            },
            StoreKind::Antique => KindStyle {
                color: "#8B4513",
                glyph: "🏺",
                label: "Antique",
            },
            StoreKind::Furniture => KindStyle {
                color: "#2E8B57",
                glyph: "🪑",
                label: "Furniture",
            },
            StoreKind::Books => KindStyle {
                color: "#4169E1",
                glyph: "📚",
                label: "Books",
            },
            StoreKind::Designer => KindStyle {
                color: "#FF1493",
                glyph: "✨",
                label: "Designer",
            },
            StoreKind::General => KindStyle {
                color: "#6d8c76",
                glyph: "🏪",
                label: "General",
            },
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        self.style().label
    }
}

/// Classify a store from its name and card description.
///
/// Lowercases the concatenated text and returns the first keyword group with
/// a substring match, or [`StoreKind::General`] when nothing hits.
#[must_use]
pub fn classify_store(name: &str, card_description: Option<&str>) -> StoreKind {
    let text = format!("{} {}", name, card_description.unwrap_or("")).to_lowercase();
    for &(kind, keywords) in KEYWORD_GROUPS {
        if keywords.iter().any(|kw| text.contains(kw)) {
            return kind;
        }
    }
    StoreKind::General
}
