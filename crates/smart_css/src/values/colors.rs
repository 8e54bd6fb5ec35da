//! Structured colors and their conversion to css text

use super::IntoCss;

/// A structured color
///
/// Whatever the variant, colors are written out in their hsl form (`hsl(0, 100%, 50%)`, or
/// `hsla(0, 100%, 50%, 0.5)` when not fully opaque).
#[derive(Clone, Copy, Debug, PartialEq)]
#[must_use]
pub enum Color {
    /// <https://developer.mozilla.org/en-US/docs/Web/CSS/color_value/rgb>
    Rgb {
        /// 0-255
        red: u8,
        /// 0-255
        green: u8,
        /// 0-255
        blue: u8,
        /// 0-1
        alpha: f32,
    },
    /// <https://developer.mozilla.org/en-US/docs/Web/CSS/color_value/hsl>
    Hsl {
        /// 0-360
        hue: u16,
        /// 0-100
        saturation: u8,
        /// 0-100
        lightness: u8,
        /// 0-1
        alpha: f32,
    },
}

impl Color {
    /// Set the alpha and return a new color, or None if alpha is out of range [0, 1]
    #[must_use]
    pub const fn with_alpha(self, alpha: f32) -> Option<Self> {
        if !(alpha >= 0.0 && alpha <= 1.0) {
            return None;
        }

        Some(match self {
            Self::Rgb {
                red,
                green,
                blue,
                alpha: _,
            } => Self::Rgb {
                red,
                green,
                blue,
                alpha,
            },
            Self::Hsl {
                hue,
                saturation,
                lightness,
                alpha: _,
            } => Self::Hsl {
                hue,
                saturation,
                lightness,
                alpha,
            },
        })
    }

    /// Rgb with opaque alpha. This cannot fail.
    #[inline]
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::Rgb {
            red,
            green,
            blue,
            alpha: 1.0,
        }
    }

    /// Rgb with alpha. Returns None if alpha is out of range [0, 1].
    #[inline]
    #[must_use]
    pub const fn rgba(red: u8, green: u8, blue: u8, alpha: f32) -> Option<Self> {
        Self::rgb(red, green, blue).with_alpha(alpha)
    }

    /// Hsl with opaque alpha. Constructs directly.
    #[inline]
    pub const fn hsl(hue: u16, saturation: u8, lightness: u8) -> Self {
        Self::Hsl {
            hue,
            saturation,
            lightness,
            alpha: 1.0,
        }
    }

    /// Hsl with a given alpha. Returns None if any component is out of range.
    /// Valid ranges: hue 0..=360, saturation 0..=100, lightness 0..=100, alpha 0.0..=1.0
    #[inline]
    #[must_use]
    pub const fn hsla(hue: u16, saturation: u8, lightness: u8, alpha: f32) -> Option<Self> {
        if hue > 360 {
            return None;
        }
        if saturation > 100 {
            return None;
        }
        if lightness > 100 {
            return None;
        }

        Self::hsl(hue, saturation, lightness).with_alpha(alpha)
    }

    /// Parse a `#rgb` or `#rrggbb` hex color, the leading `#` is optional.
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }

        let channel = |text: &str| u8::from_str_radix(text, 16).ok();
        match digits.len() {
            3 => {
                let mut expanded = [0_u8; 3];
                for (slot, digit) in expanded.iter_mut().zip(digits.chars()) {
                    *slot = channel(&format!("{digit}{digit}"))?;
                }
                let [red, green, blue] = expanded;
                Some(Self::rgb(red, green, blue))
            }
            6 => Some(Self::rgb(
                channel(digits.get(0..2)?)?,
                channel(digits.get(2..4)?)?,
                channel(digits.get(4..6)?)?,
            )),
            _ => None,
        }
    }

    /// The alpha channel
    #[must_use]
    pub const fn alpha(self) -> f32 {
        match self {
            Self::Rgb { alpha, .. } | Self::Hsl { alpha, .. } => alpha,
        }
    }

    /// Get the `(hue, saturation, lightness)` of this color, rounded to whole degrees and percents.
    #[must_use]
    pub fn to_hsl(self) -> (u16, u8, u8) {
        match self {
            Self::Hsl {
                hue,
                saturation,
                lightness,
                ..
            } => (hue, saturation, lightness),
            Self::Rgb {
                red, green, blue, ..
            } => rgb_to_hsl(red, green, blue),
        }
    }

    /// Render as `hsl(h, s%, l%)`, or `hsla(h, s%, l%, a)` when alpha is below 1.
    #[must_use]
    pub fn to_hsl_string(self) -> String {
        let (hue, saturation, lightness) = self.to_hsl();
        let alpha = self.alpha();
        let alpha = if alpha.is_finite() { alpha } else { 1.0 };
        let alpha = (alpha.clamp(0.0, 1.0) * 100.0).round() / 100.0;

        if alpha >= 1.0 {
            format!("hsl({hue}, {saturation}%, {lightness}%)")
        } else {
            format!("hsla({hue}, {saturation}%, {lightness}%, {alpha})")
        }
    }
}

/// Convert 8 bit rgb channels to rounded hsl components.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::float_cmp,
    reason = "Every component is clamped to its range before the cast, `max` is one of the channels"
)]
fn rgb_to_hsl(red: u8, green: u8, blue: u8) -> (u16, u8, u8) {
    let red = f64::from(red) / 255.0;
    let green = f64::from(green) / 255.0;
    let blue = f64::from(blue) / 255.0;

    let max = red.max(green).max(blue);
    let min = red.min(green).min(blue);
    let lightness = f64::midpoint(max, min);

    let (hue, saturation) = if max == min {
        (0.0, 0.0)
    } else {
        let delta = max - min;
        let saturation = if lightness > 0.5 {
            delta / (2.0 - max - min)
        } else {
            delta / (max + min)
        };
        let hue = if max == red {
            (green - blue) / delta + if green < blue { 6.0 } else { 0.0 }
        } else if max == green {
            (blue - red) / delta + 2.0
        } else {
            (red - green) / delta + 4.0
        };
        (hue / 6.0, saturation)
    };

    (
        (hue * 360.0).round().clamp(0.0, 360.0) as u16,
        (saturation * 100.0).round().clamp(0.0, 100.0) as u8,
        (lightness * 100.0).round().clamp(0.0, 100.0) as u8,
    )
}

impl IntoCss for Color {
    fn into_css(self) -> String {
        self.to_hsl_string()
    }
}
