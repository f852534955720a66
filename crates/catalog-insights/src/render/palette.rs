//! Color schemes for bar fills and heatmap shading.

use plotters::style::RGBColor;

/// Qualitative scheme for a handful of unrelated categories.
const SET2: [(u8, u8, u8); 8] = [
    (102, 194, 165),
    (252, 141, 98),
    (141, 160, 203),
    (231, 138, 195),
    (166, 216, 84),
    (255, 217, 47),
    (229, 196, 148),
    (179, 179, 179),
];

/// Perceptually uniform purple-to-yellow ramp.
const VIRIDIS: [(u8, u8, u8); 6] = [
    (68, 1, 84),
    (65, 68, 135),
    (42, 120, 142),
    (34, 168, 132),
    (122, 209, 81),
    (253, 231, 37),
];

/// Dark-to-light blue-green ramp.
const MAKO: [(u8, u8, u8); 6] = [
    (11, 4, 5),
    (53, 38, 79),
    (53, 87, 157),
    (54, 141, 171),
    (73, 193, 173),
    (222, 245, 229),
];

/// Light yellow through green to dark blue; low counts stay pale.
const YL_GN_BU: [(u8, u8, u8); 9] = [
    (255, 255, 217),
    (237, 248, 177),
    (199, 233, 180),
    (127, 205, 187),
    (65, 182, 196),
    (29, 145, 192),
    (34, 94, 168),
    (37, 52, 148),
    (8, 29, 88),
];

/// Fill scheme for a bar chart.
#[derive(Debug, Clone, Copy)]
pub enum Palette {
    /// One distinct color per bar, cycling.
    Qualitative,
    /// Bars spread evenly along the viridis ramp.
    Viridis,
    /// Bars spread evenly along the mako ramp.
    Mako,
    /// Every bar the same color.
    Solid(RGBColor),
}

impl Palette {
    /// Color of bar `index` out of `count` bars.
    pub fn color(&self, index: usize, count: usize) -> RGBColor {
        match self {
            Self::Qualitative => {
                let (r, g, b) = SET2[index % SET2.len()];
                RGBColor(r, g, b)
            }
            Self::Viridis => ramp_color(&VIRIDIS, spread(index, count)),
            Self::Mako => ramp_color(&MAKO, spread(index, count)),
            Self::Solid(color) => *color,
        }
    }
}

/// Sky blue used for the year chart.
pub const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);

/// Heatmap shade for `value` on a `0..=max` scale.
pub fn heat_color(value: usize, max: usize) -> RGBColor {
    let t = if max == 0 {
        0.0
    } else {
        value as f64 / max as f64
    };
    ramp_color(&YL_GN_BU, t)
}

/// True when black text would be hard to read on `color`.
pub fn is_dark(color: RGBColor) -> bool {
    let RGBColor(r, g, b) = color;
    let luminance = 0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64;
    luminance < 128.0
}

fn spread(index: usize, count: usize) -> f64 {
    if count <= 1 {
        0.0
    } else {
        index as f64 / (count - 1) as f64
    }
}

/// Linear interpolation along evenly spaced anchor colors, `t` in `0..=1`.
fn ramp_color(anchors: &[(u8, u8, u8)], t: f64) -> RGBColor {
    let t = t.clamp(0.0, 1.0);
    let scaled = t * (anchors.len() - 1) as f64;
    let lower = scaled.floor() as usize;
    let upper = (lower + 1).min(anchors.len() - 1);
    let frac = scaled - lower as f64;

    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
    let (r0, g0, b0) = anchors[lower];
    let (r1, g1, b1) = anchors[upper];
    RGBColor(lerp(r0, r1), lerp(g0, g1), lerp(b0, b1))
}
