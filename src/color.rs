use eframe::egui::Color32;
use palette::{LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Named sequential colour maps
// ---------------------------------------------------------------------------

/// Perceptually uniform colour maps offered in the side panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMapKind {
    #[default]
    Viridis,
    Plasma,
    Inferno,
    Magma,
    Cividis,
}

impl ColorMapKind {
    pub const ALL: [ColorMapKind; 5] = [
        ColorMapKind::Viridis,
        ColorMapKind::Plasma,
        ColorMapKind::Inferno,
        ColorMapKind::Magma,
        ColorMapKind::Cividis,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ColorMapKind::Viridis => "viridis",
            ColorMapKind::Plasma => "plasma",
            ColorMapKind::Inferno => "inferno",
            ColorMapKind::Magma => "magma",
            ColorMapKind::Cividis => "cividis",
        }
    }

    /// Evenly spaced anchor colours, low to high.
    fn anchors(self) -> &'static [u32] {
        match self {
            ColorMapKind::Viridis => &[
                0x440154, 0x482878, 0x3e4989, 0x31688e, 0x26828e, 0x1f9e89, 0x35b779, 0x6ece58,
                0xfde725,
            ],
            ColorMapKind::Plasma => &[
                0x0d0887, 0x4b03a1, 0x7d03a8, 0xa82296, 0xcb4679, 0xe56b5d, 0xf89441, 0xfdc328,
                0xf0f921,
            ],
            ColorMapKind::Inferno => &[
                0x000004, 0x1b0c41, 0x4a0c6b, 0x781c6d, 0xa52c60, 0xcf4446, 0xed6925, 0xfb9b06,
                0xfcffa4,
            ],
            ColorMapKind::Magma => &[
                0x000004, 0x1c1044, 0x4f127b, 0x812581, 0xb5367a, 0xe55064, 0xfb8761, 0xfec287,
                0xfcfdbf,
            ],
            ColorMapKind::Cividis => &[
                0x00224e, 0x123570, 0x3b496c, 0x575d6d, 0x707173, 0x8a8678, 0xa59c74, 0xc3b369,
                0xfee838,
            ],
        }
    }

    /// Colour at `t ∈ [0, 1]` (clamped), blended between anchors in linear RGB.
    pub fn sample(self, t: f64) -> Color32 {
        let anchors = self.anchors();
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let pos = t * (anchors.len() - 1) as f64;
        let lo = (pos.floor() as usize).min(anchors.len() - 1);
        let hi = (lo + 1).min(anchors.len() - 1);
        let frac = (pos - lo as f64) as f32;

        let a = hex_to_linear(anchors[lo]);
        let b = hex_to_linear(anchors[hi]);
        let mixed: Srgb<u8> = Srgb::from_linear(a.mix(b, frac));
        Color32::from_rgb(mixed.red, mixed.green, mixed.blue)
    }
}

fn hex_to_linear(hex: u32) -> LinSrgb {
    let rgb = Srgb::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8);
    rgb.into_format::<f32>().into_linear()
}

// ---------------------------------------------------------------------------
// Scalar colour mapping: value → Color32
// ---------------------------------------------------------------------------

/// Maps scalar values over `[min, max]` onto a colour map.
#[derive(Debug, Clone, Copy)]
pub struct ScalarColorMap {
    pub kind: ColorMapKind,
    pub min: f64,
    pub max: f64,
    nan_color: Color32,
}

impl ScalarColorMap {
    pub fn new(kind: ColorMapKind, min: f64, max: f64) -> Self {
        ScalarColorMap {
            kind,
            min,
            max,
            nan_color: Color32::GRAY,
        }
    }

    /// Position of `value` inside the range; a flat range maps to the middle.
    pub fn normalise(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span.abs() < f64::EPSILON || !span.is_finite() {
            0.5
        } else {
            ((value - self.min) / span).clamp(0.0, 1.0)
        }
    }

    pub fn color_for(&self, value: f64) -> Color32 {
        if value.is_nan() {
            return self.nan_color;
        }
        self.kind.sample(self.normalise(value))
    }
}
