use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::aggregate::PointCategory;
use crate::data::model::SmokerStatus;

pub const SMOKER_COLOR: Color32 = Color32::from_rgb(231, 76, 60); // Red
pub const NONSMOKER_COLOR: Color32 = Color32::from_rgb(52, 152, 219); // Blue
pub const NEUTRAL_COLOR: Color32 = Color32::GRAY;

/// Dashboard header accent.
pub const HEADER_COLOR: Color32 = Color32::from_rgb(0xa9, 0x32, 0x26);

// ---------------------------------------------------------------------------
// Smoker status → colour
// ---------------------------------------------------------------------------

pub fn smoker_color(status: SmokerStatus) -> Color32 {
    match status {
        SmokerStatus::Smoker => SMOKER_COLOR,
        SmokerStatus::NonSmoker => NONSMOKER_COLOR,
    }
}

pub fn point_color(category: &PointCategory) -> Color32 {
    match category {
        PointCategory::Known(status) => smoker_color(*status),
        PointCategory::Unmapped(_) => NEUTRAL_COLOR,
    }
}

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.55, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Region → colour (bar and pie charts)
// ---------------------------------------------------------------------------

/// Stable colour per region, built once per dataset so a region keeps its
/// colour while the filters change.
#[derive(Debug, Clone, Default)]
pub struct RegionColors {
    mapping: BTreeMap<String, Color32>,
}

impl RegionColors {
    pub fn new(regions: &BTreeSet<String>) -> Self {
        let palette = generate_palette(regions.len());
        let mapping = regions
            .iter()
            .zip(palette)
            .map(|(region, c)| (region.clone(), c))
            .collect();
        RegionColors { mapping }
    }

    /// Look up the colour for a region; unknown regions are grey.
    pub fn color_for(&self, region: &str) -> Color32 {
        self.mapping.get(region).copied().unwrap_or(NEUTRAL_COLOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_size_and_distinct() {
        assert!(generate_palette(0).is_empty());
        let colours = generate_palette(4);
        assert_eq!(colours.len(), 4);
        let unique: BTreeSet<[u8; 4]> = colours.iter().map(|c| c.to_array()).collect();
        assert_eq!(unique.len(), 4);
    }

    #[test]
    fn test_smoker_colours() {
        assert_eq!(smoker_color(SmokerStatus::Smoker), SMOKER_COLOR);
        assert_eq!(smoker_color(SmokerStatus::NonSmoker), NONSMOKER_COLOR);
        assert_eq!(
            point_color(&PointCategory::Unmapped("maybe".into())),
            NEUTRAL_COLOR
        );
    }

    #[test]
    fn test_region_colors_are_stable() {
        let regions: BTreeSet<String> = ["northeast", "southeast", "southwest"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let colors = RegionColors::new(&regions);
        assert_eq!(colors.color_for("southeast"), colors.color_for("southeast"));
        assert_ne!(colors.color_for("northeast"), colors.color_for("southwest"));
        assert_eq!(colors.color_for("atlantis"), NEUTRAL_COLOR);
    }
}
