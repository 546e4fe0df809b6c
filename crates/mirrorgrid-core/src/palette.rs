//! Crayon palette used for random patterns.

use rand::Rng;

use crate::style::Color;

/// Named crayon colours.
pub const CRAYONS: &[(&str, Color)] = &[
    ("Red", Color::from_rgb(0xEE, 0x20, 0x4D)),
    ("Orange", Color::from_rgb(0xFF, 0x75, 0x38)),
    ("Yellow Orange", Color::from_rgb(0xFF, 0xB6, 0x53)),
    ("Green", Color::from_rgb(0x1C, 0xAC, 0x78)),
    ("Forest Green", Color::from_rgb(0x6D, 0xAE, 0x81)),
    ("Blue Green", Color::from_rgb(0x19, 0x9E, 0xBD)),
    ("Cerulean", Color::from_rgb(0x1D, 0xAC, 0xD6)),
    ("Blue", Color::from_rgb(0x1F, 0x75, 0xFE)),
    ("Blue Violet", Color::from_rgb(0x73, 0x66, 0xBD)),
    ("Violet (Purple)", Color::from_rgb(0x92, 0x6E, 0xAE)),
    ("Red Violet", Color::from_rgb(0xC0, 0x44, 0x8F)),
    ("Wild Strawberry", Color::from_rgb(0xFF, 0x43, 0xA4)),
    ("Scarlet", Color::from_rgb(0xFC, 0x28, 0x47)),
    ("Mahogany", Color::from_rgb(0xCD, 0x4A, 0x4A)),
    ("Brown", Color::from_rgb(0xB4, 0x67, 0x4D)),
    ("Tan", Color::from_rgb(0xFA, 0xA7, 0x6C)),
    ("Sky Blue", Color::from_rgb(0x80, 0xDA, 0xEB)),
    ("Black", Color::from_rgb(0x23, 0x23, 0x23)),
];

/// Pick a crayon at random. Returns its name and colour.
pub fn random_crayon(rng: &mut impl Rng) -> (&'static str, Color) {
    CRAYONS[rng.random_range(0..CRAYONS.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn crayons_are_opaque_and_distinct() {
        for (i, (_, a)) in CRAYONS.iter().enumerate() {
            assert!(a.is_opaque());
            for (_, b) in &CRAYONS[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn random_crayon_comes_from_palette() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let pick = random_crayon(&mut rng);
            assert!(CRAYONS.contains(&pick));
        }
    }
}
