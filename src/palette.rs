//! The fixed catalog of reference colors and the nearest-color classifier.

/// A named reference color annotations are classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorEntry {
    pub name: &'static str,
    pub rgb: [u8; 3],
}

pub const SUPPORTED_COLORS: [ColorEntry; 5] = [
    ColorEntry { name: "Red", rgb: [255, 0, 0] },
    ColorEntry { name: "Green", rgb: [0, 255, 0] },
    ColorEntry { name: "Blue", rgb: [0, 0, 255] },
    ColorEntry { name: "Yellow", rgb: [255, 255, 0] },
    ColorEntry { name: "Cyan", rgb: [0, 255, 255] },
];

/// Larger than any reachable distance (sqrt(255^2 * 3) ~ 441.7).
const NO_MATCH_DISTANCE: f64 = 999.0;

/// Map an RGB triple to the nearest catalog entry by Euclidean distance.
///
/// The comparison is `<=`, so an exact tie is won by the entry that comes
/// later in catalog order. Existing note collections were sorted with this
/// rule; keep it.
pub fn nearest_color(rgb: [u8; 3]) -> &'static ColorEntry {
    let mut best = &SUPPORTED_COLORS[0];
    let mut least = NO_MATCH_DISTANCE;

    for entry in &SUPPORTED_COLORS {
        let distance = entry.distance_to(rgb);
        if distance <= least {
            best = entry;
            least = distance;
        }
    }

    best
}

impl ColorEntry {
    fn distance_to(&self, rgb: [u8; 3]) -> f64 {
        self.rgb
            .iter()
            .zip(rgb.iter())
            .map(|(a, b)| {
                let d = f64::from(*a) - f64::from(*b);
                d * d
            })
            .sum::<f64>()
            .sqrt()
    }
}
