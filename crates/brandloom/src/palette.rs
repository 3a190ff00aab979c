//! Fixed brand palette.
//!
//! Static reference data shared by generators, presets and the CLI. Names are
//! the palette's own kebab-case identifiers.

use crate::color::Color;
use crate::context::BrandPair;

// Primary
pub const CBRE_GREEN: Color = Color::rgb(0x00, 0x3F, 0x2D);
pub const DARK_GREY: Color = Color::rgb(0x43, 0x52, 0x54);
pub const LIGHT_GREY: Color = Color::rgb(0xCA, 0xD1, 0xD3);

// Accent green family
pub const ACCENT_GREEN: Color = Color::rgb(0x17, 0xE8, 0x8F);
pub const ACCENT_GREEN_SHADE_1: Color = Color::rgb(0x45, 0xED, 0xA5);
pub const ACCENT_GREEN_SHADE_2: Color = Color::rgb(0x74, 0xF1, 0xBC);
pub const ACCENT_GREEN_SHADE_3: Color = Color::rgb(0xA2, 0xF6, 0xD2);

// Dark green family
pub const DARK_GREEN: Color = Color::rgb(0x01, 0x2A, 0x2D);
pub const DARK_GREEN_SHADE_1: Color = Color::rgb(0x35, 0x54, 0x56);
pub const DARK_GREEN_SHADE_2: Color = Color::rgb(0x67, 0x7F, 0x80);
pub const DARK_GREEN_SHADE_3: Color = Color::rgb(0x9A, 0xA9, 0xAB);

// Midnight family
pub const MIDNIGHT: Color = Color::rgb(0x03, 0x28, 0x42);
pub const MIDNIGHT_SHADE_1: Color = Color::rgb(0x35, 0x52, 0x68);
pub const MIDNIGHT_SHADE_2: Color = Color::rgb(0x67, 0x7D, 0x8E);
pub const MIDNIGHT_SHADE_3: Color = Color::rgb(0x9A, 0xA9, 0xB3);
pub const MIDNIGHT_TINT: Color = Color::rgb(0x77, 0x8F, 0x9C);

// Sage family
pub const SAGE: Color = Color::rgb(0x53, 0x81, 0x84);
pub const SAGE_SHADE_1: Color = Color::rgb(0x75, 0x9A, 0x9D);
pub const SAGE_SHADE_2: Color = Color::rgb(0x97, 0xB3, 0xB5);
pub const SAGE_SHADE_3: Color = Color::rgb(0xBA, 0xCD, 0xCE);
pub const SAGE_TINT: Color = Color::rgb(0x96, 0xB3, 0xB6);

// Celadon family
pub const CELADON: Color = Color::rgb(0x80, 0xBB, 0xAD);
pub const CELADON_SHADE_1: Color = Color::rgb(0x99, 0xC9, 0xBD);
pub const CELADON_SHADE_2: Color = Color::rgb(0xB3, 0xD6, 0xCE);
pub const CELADON_SHADE_3: Color = Color::rgb(0xCC, 0xE4, 0xDE);
pub const CELADON_TINT: Color = Color::rgb(0xC0, 0xD4, 0xCB);

// Wheat family
pub const WHEAT: Color = Color::rgb(0xDB, 0xD9, 0x9A);
pub const WHEAT_TINT: Color = Color::rgb(0xEF, 0xEC, 0xD2);

// Cement family
pub const CEMENT: Color = Color::rgb(0x7F, 0x84, 0x80);
pub const CEMENT_TINT: Color = Color::rgb(0xCB, 0xCD, 0xCB);

pub const WHITE: Color = Color::WHITE;

/// Every named palette entry, in display order.
pub const BRAND_PALETTE: &[(&str, Color)] = &[
    ("cbre-green", CBRE_GREEN),
    ("dark-grey", DARK_GREY),
    ("light-grey", LIGHT_GREY),
    ("accent-green", ACCENT_GREEN),
    ("accent-green-shade-1", ACCENT_GREEN_SHADE_1),
    ("accent-green-shade-2", ACCENT_GREEN_SHADE_2),
    ("accent-green-shade-3", ACCENT_GREEN_SHADE_3),
    ("dark-green", DARK_GREEN),
    ("dark-green-shade-1", DARK_GREEN_SHADE_1),
    ("dark-green-shade-2", DARK_GREEN_SHADE_2),
    ("dark-green-shade-3", DARK_GREEN_SHADE_3),
    ("midnight", MIDNIGHT),
    ("midnight-shade-1", MIDNIGHT_SHADE_1),
    ("midnight-shade-2", MIDNIGHT_SHADE_2),
    ("midnight-shade-3", MIDNIGHT_SHADE_3),
    ("midnight-tint", MIDNIGHT_TINT),
    ("sage", SAGE),
    ("sage-shade-1", SAGE_SHADE_1),
    ("sage-shade-2", SAGE_SHADE_2),
    ("sage-shade-3", SAGE_SHADE_3),
    ("sage-tint", SAGE_TINT),
    ("celadon", CELADON),
    ("celadon-shade-1", CELADON_SHADE_1),
    ("celadon-shade-2", CELADON_SHADE_2),
    ("celadon-shade-3", CELADON_SHADE_3),
    ("celadon-tint", CELADON_TINT),
    ("wheat", WHEAT),
    ("wheat-tint", WHEAT_TINT),
    ("cement", CEMENT),
    ("cement-tint", CEMENT_TINT),
    ("white", WHITE),
];

/// Look up a palette color by name (case-insensitive).
pub fn lookup(name: &str) -> Option<Color> {
    let name = name.to_lowercase();
    BRAND_PALETTE
        .iter()
        .find(|(entry, _)| *entry == name)
        .map(|(_, color)| *color)
}

/// Named background/foreground pairs offered by the settings panel.
pub const BRAND_PAIRS: &[(&str, BrandPair)] = &[
    ("Dark Green / Accent Mint", BrandPair::new(DARK_GREEN, ACCENT_GREEN)),
    ("Midnight / Celadon", BrandPair::new(MIDNIGHT, CELADON)),
    ("Cement / CBRE Green", BrandPair::new(CEMENT_TINT, CBRE_GREEN)),
    ("Light Grey / Dark Grey", BrandPair::new(LIGHT_GREY, DARK_GREY)),
    ("White / CBRE Green", BrandPair::new(WHITE, CBRE_GREEN)),
    ("CBRE Green / Accent", BrandPair::new(CBRE_GREEN, ACCENT_GREEN)),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_unique() {
        for (i, (a, _)) in BRAND_PALETTE.iter().enumerate() {
            for (b, _) in &BRAND_PALETTE[i + 1..] {
                assert_ne!(a, b, "duplicate palette name {a}");
            }
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(lookup("Midnight"), Some(MIDNIGHT));
        assert_eq!(lookup("sage-tint"), Some(Color::from_hex("#96B3B6").unwrap()));
        assert_eq!(lookup("lighter-grey"), None);
    }

    #[test]
    fn brand_pairs_use_palette_colors() {
        for (name, pair) in BRAND_PAIRS {
            let known = |c: Color| BRAND_PALETTE.iter().any(|(_, p)| *p == c);
            assert!(known(pair.background), "{name}: background not in palette");
            assert!(known(pair.foreground), "{name}: foreground not in palette");
        }
    }
}
