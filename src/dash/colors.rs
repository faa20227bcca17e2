use serde::Serialize;
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

const PALETTE: &[Rgb] = &[
    Rgb::new(0x1f, 0x77, 0xb4),
    Rgb::new(0xff, 0x7f, 0x0e),
    Rgb::new(0x2c, 0xa0, 0x2c),
    Rgb::new(0xd6, 0x27, 0x28),
    Rgb::new(0x94, 0x67, 0xbd),
    Rgb::new(0x8c, 0x56, 0x4b),
    Rgb::new(0xe3, 0x77, 0xc2),
    Rgb::new(0x7f, 0x7f, 0x7f),
    Rgb::new(0xbc, 0xbd, 0x22),
    Rgb::new(0x17, 0xbe, 0xcf),
    Rgb::new(0xaa, 0x40, 0x69),
    Rgb::new(0x66, 0x30, 0x99),
];

/// Stable tag color: same label (case/whitespace-insensitive), same color,
/// across runs and processes. Pure function over a content hash; there is
/// no shared palette registry to mutate.
pub fn color_for(label: &str) -> Rgb {
    let digest = Sha256::digest(label.trim().to_lowercase().as_bytes());
    let idx = ((digest[0] as usize) << 8 | digest[1] as usize) % PALETTE.len();
    PALETTE[idx]
}

#[cfg(test)]
mod tests {
    use super::color_for;

    #[test]
    fn color_is_stable_for_a_label() {
        assert_eq!(color_for("AutoCAD"), color_for("AutoCAD"));
        assert_eq!(color_for("AutoCAD"), color_for("  autocad "));
    }

    #[test]
    fn different_labels_usually_differ() {
        let distinct: std::collections::BTreeSet<String> =
            ["Revit", "AutoCAD", "QGIS", "Hydrology", "Structural"]
                .iter()
                .map(|label| color_for(label).hex())
                .collect();
        assert!(distinct.len() >= 3);
    }

    #[test]
    fn hex_renders_lowercase_rrggbb() {
        let hex = color_for("Revit").hex();
        assert_eq!(hex.len(), 7);
        assert!(hex.starts_with('#'));
    }
}
