//! Print the brand palette and the named brand pairs.

use brandloom::palette::{BRAND_PAIRS, BRAND_PALETTE};

pub fn cmd_palette() {
    println!("Brand palette:");
    for (name, color) in BRAND_PALETTE {
        println!("  {:<22} {}", name, color.to_hex());
    }

    println!();
    println!("Brand pairs (background / foreground):");
    for (label, pair) in BRAND_PAIRS {
        println!(
            "  {:<26} {} / {}",
            label,
            pair.background.to_hex(),
            pair.foreground.to_hex()
        );
    }
}
