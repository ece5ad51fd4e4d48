use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

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
            let hsl = Hsl::new(hue, 0.65, 0.5);
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
// Color mapping: city → Color32
// ---------------------------------------------------------------------------

/// Assigns each city a stable distinct colour, shared between the chart lines
/// and the filter labels.
#[derive(Debug, Clone)]
pub struct CityColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl CityColorMap {
    /// Build the map from the dataset's sorted city list.
    pub fn new(cities: &[String]) -> Self {
        let palette = generate_palette(cities.len());
        let mapping: BTreeMap<String, Color32> = cities
            .iter()
            .cloned()
            .zip(palette.into_iter())
            .collect();

        CityColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a city.
    pub fn color_for(&self, city: &str) -> Color32 {
        self.mapping
            .get(city)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_size_matches_request() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(5).len(), 5);
    }

    #[test]
    fn cities_get_distinct_stable_colors() {
        let cities = vec!["Doha".to_string(), "Dubai".to_string(), "Riyadh".to_string()];
        let map = CityColorMap::new(&cities);
        let a = map.color_for("Doha");
        let b = map.color_for("Dubai");
        let c = map.color_for("Riyadh");
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_eq!(map.color_for("Doha"), a);
        assert_eq!(map.color_for("Unknown"), Color32::GRAY);
    }
}
