// Colors and the scalar-to-color mapping used by the heatmap.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb`.
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Darken by `0.7^k` per channel.
    pub fn darker(self, k: f64) -> Self {
        let f = 0.7f64.powf(k);
        let scale = |c: u8| (c as f64 * f).round().clamp(0.0, 255.0) as u8;
        Self::new(scale(self.r), scale(self.g), scale(self.b))
    }

    fn lerp(a: Rgb, b: Rgb, t: f64) -> Rgb {
        let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * t).round() as u8;
        Rgb::new(mix(a.r, b.r), mix(a.g, b.g), mix(a.b, b.b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Maps a normalized value in `[0, 1]` to a color. Out-of-range input is clamped.
pub trait ColorMap {
    fn color(&self, t: f64) -> Rgb;
}

impl<F> ColorMap for F
where
    F: Fn(f64) -> Rgb,
{
    fn color(&self, t: f64) -> Rgb {
        self(t)
    }
}

/// Perceptually uniform dark-blue to yellow ramp.
#[derive(Debug, Clone, Copy, Default)]
pub struct Viridis;

const VIRIDIS_STOPS: [Rgb; 9] = [
    Rgb::new(0x44, 0x01, 0x54),
    Rgb::new(0x47, 0x2d, 0x7b),
    Rgb::new(0x3b, 0x52, 0x8b),
    Rgb::new(0x2c, 0x72, 0x8e),
    Rgb::new(0x21, 0x91, 0x8c),
    Rgb::new(0x28, 0xae, 0x80),
    Rgb::new(0x5e, 0xc9, 0x62),
    Rgb::new(0xad, 0xdc, 0x30),
    Rgb::new(0xfd, 0xe7, 0x25),
];

impl ColorMap for Viridis {
    fn color(&self, t: f64) -> Rgb {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let segments = (VIRIDIS_STOPS.len() - 1) as f64;
        let pos = t * segments;
        let i = (pos.floor() as usize).min(VIRIDIS_STOPS.len() - 2);
        Rgb::lerp(VIRIDIS_STOPS[i], VIRIDIS_STOPS[i + 1], pos - i as f64)
    }
}
