//! Packed color words as transmitted to WS2812 LEDs, plus brightness correction.
//!
//! A [`ColorWord`] holds 24 bits in the chain's wire order (green, red, blue). Alpha is
//! only a composition input to [`blend_rgba`]; it is never stored.
//!
//! ```rust
//! use matrix_envoy::color::{blend_rgba, pack_rgb, ColorWord};
//!
//! let dim_gray = blend_rgba(50, 50, 50, 10);
//! assert_eq!(dim_gray, pack_rgb(1, 1, 1));
//! assert_eq!(blend_rgba(200, 100, 0, 0), ColorWord::BLACK);
//! ```

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use smart_leds::RGB8;

/// Predefined RGB color constants from the `smart_leds` crate.
///
/// Common colors include `RED`, `GREEN`, `BLUE`, `YELLOW`, `WHITE`, `BLACK`, `CYAN`, `MAGENTA`, `ORANGE`, `PURPLE`.
#[doc(inline)]
pub use smart_leds::colors;

const GREEN_SHIFT: u32 = 16;
const RED_SHIFT: u32 = 8;
const CHANNEL_MASK: u32 = 0xFF;
const WORD_MASK: u32 = 0x00FF_FFFF;

/// One LED's color packed as `0x00GGRRBB`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ColorWord(u32);

impl ColorWord {
    /// All channels off.
    pub const BLACK: Self = Self(0);

    /// Wrap a raw wire word. Bits above the low 24 are discarded.
    #[must_use]
    pub const fn from_raw(word: u32) -> Self {
        Self(word & WORD_MASK)
    }

    /// The raw `0x00GGRRBB` word.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Red channel.
    #[must_use]
    pub const fn red(self) -> u8 {
        ((self.0 >> RED_SHIFT) & CHANNEL_MASK) as u8
    }

    /// Green channel.
    #[must_use]
    pub const fn green(self) -> u8 {
        ((self.0 >> GREEN_SHIFT) & CHANNEL_MASK) as u8
    }

    /// Blue channel.
    #[must_use]
    pub const fn blue(self) -> u8 {
        (self.0 & CHANNEL_MASK) as u8
    }

    /// Whether every channel is zero.
    #[must_use]
    pub const fn is_black(self) -> bool {
        self.0 == 0
    }

    /// Scale every channel by `alpha / 255`.
    #[must_use]
    pub const fn scaled(self, alpha: u8) -> Self {
        blend_rgba(self.red(), self.green(), self.blue(), alpha)
    }

    /// Map every channel through a table built by [`generate_combo_table`].
    #[must_use]
    pub const fn corrected(self, combo_table: &[u8; 256]) -> Self {
        pack_rgb(
            combo_table[self.red() as usize],
            combo_table[self.green() as usize],
            combo_table[self.blue() as usize],
        )
    }

    /// Convert to the `smart_leds` color type.
    #[must_use]
    pub const fn to_rgb8(self) -> RGB8 {
        RGB8::new(self.red(), self.green(), self.blue())
    }
}

/// Pack three 8-bit channels into a [`ColorWord`] in GRB wire order.
#[must_use]
pub const fn pack_rgb(red: u8, green: u8, blue: u8) -> ColorWord {
    ColorWord(((green as u32) << GREEN_SHIFT) | ((red as u32) << RED_SHIFT) | blue as u32)
}

/// Scale each channel by `alpha / 255` with truncating integer math, then pack.
///
/// No output channel exceeds its input. `alpha = 255` leaves the color unchanged and
/// `alpha = 0` yields black.
#[must_use]
pub const fn blend_rgba(red: u8, green: u8, blue: u8, alpha: u8) -> ColorWord {
    pack_rgb(
        scale_channel(red, alpha),
        scale_channel(green, alpha),
        scale_channel(blue, alpha),
    )
}

const fn scale_channel(channel: u8, alpha: u8) -> u8 {
    // 255 * 255 / 255 = 255, so the quotient always fits
    ((channel as u16 * alpha as u16) / 255) as u8
}

impl From<RGB8> for ColorWord {
    fn from(color: RGB8) -> Self {
        pack_rgb(color.r, color.g, color.b)
    }
}

impl From<ColorWord> for RGB8 {
    fn from(color: ColorWord) -> Self {
        color.to_rgb8()
    }
}

impl From<Rgb888> for ColorWord {
    fn from(color: Rgb888) -> Self {
        pack_rgb(color.r(), color.g(), color.b())
    }
}

impl From<ColorWord> for Rgb888 {
    fn from(color: ColorWord) -> Self {
        Self::new(color.red(), color.green(), color.blue())
    }
}

/// Convert colors to [`ColorWord`] for rendering.
///
/// # Example
///
/// ```rust
/// use matrix_envoy::color::{pack_rgb, ToColorWord};
/// use embedded_graphics::pixelcolor::Rgb888;
/// use smart_leds::RGB8;
///
/// assert_eq!(RGB8::new(16, 32, 48).to_color_word(), pack_rgb(16, 32, 48));
/// assert_eq!(Rgb888::new(16, 32, 48).to_color_word(), pack_rgb(16, 32, 48));
/// ```
pub trait ToColorWord {
    /// Convert this color to a [`ColorWord`].
    #[must_use]
    fn to_color_word(self) -> ColorWord;
}

impl ToColorWord for ColorWord {
    #[inline(always)]
    fn to_color_word(self) -> ColorWord {
        self
    }
}

impl ToColorWord for RGB8 {
    #[inline(always)]
    fn to_color_word(self) -> ColorWord {
        ColorWord::from(self)
    }
}

impl ToColorWord for Rgb888 {
    #[inline(always)]
    fn to_color_word(self) -> ColorWord {
        ColorWord::from(self)
    }
}

// ============================================================================
// Gamma Correction
// ============================================================================

/// Gamma correction mode applied by the WS2812 transport at flush time.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gamma {
    /// Linear gamma (no correction). Gamma = 1.0
    Linear,
    /// Standard gamma 2.2 correction for perceived brightness.
    #[default]
    Gamma2_2,
}

/// Default gamma correction curve (`Gamma::Gamma2_2`).
pub const GAMMA_DEFAULT: Gamma = Gamma::Gamma2_2;

/// Gamma 2.2 lookup table for 8-bit values.
/// Pre-computed to avoid floating point math: corrected = (value/255)^2.2 * 255
const GAMMA_2_2_TABLE: [u8; 256] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 2, 2,
    3, 3, 3, 3, 3, 4, 4, 4, 4, 5, 5, 5, 5, 6, 6, 6, 6, 7, 7, 7, 8, 8, 8, 9, 9, 9, 10, 10, 11, 11,
    11, 12, 12, 13, 13, 13, 14, 14, 15, 15, 16, 16, 17, 17, 18, 18, 19, 19, 20, 20, 21, 22, 22, 23,
    23, 24, 25, 25, 26, 26, 27, 28, 28, 29, 30, 30, 31, 32, 33, 33, 34, 35, 35, 36, 37, 38, 39, 39,
    40, 41, 42, 43, 43, 44, 45, 46, 47, 48, 49, 49, 50, 51, 52, 53, 54, 55, 56, 57, 58, 59, 60, 61,
    62, 63, 64, 65, 66, 67, 68, 69, 70, 71, 73, 74, 75, 76, 77, 78, 79, 81, 82, 83, 84, 85, 87, 88,
    89, 90, 91, 93, 94, 95, 97, 98, 99, 100, 102, 103, 105, 106, 107, 109, 110, 111, 113, 114, 116,
    117, 119, 120, 121, 123, 124, 126, 127, 129, 130, 132, 133, 135, 137, 138, 140, 141, 143, 145,
    146, 148, 149, 151, 153, 154, 156, 158, 159, 161, 163, 165, 166, 168, 170, 172, 173, 175, 177,
    179, 181, 182, 184, 186, 188, 190, 192, 194, 196, 197, 199, 201, 203, 205, 207, 209, 211, 213,
    215, 217, 219, 221, 223, 225, 227, 229, 231, 234, 236, 238, 240, 242, 244, 246, 248, 251, 253,
    255,
];

/// Generate a combined gamma correction and brightness scaling lookup table.
///
/// `combo_table[input]` is the gamma-corrected input scaled by `max_brightness / 255`.
#[must_use]
pub const fn generate_combo_table(gamma: Gamma, max_brightness: u8) -> [u8; 256] {
    let mut result = [0u8; 256];
    let mut index = 0;
    while index < 256 {
        let corrected = match gamma {
            Gamma::Linear => index as u8,
            Gamma::Gamma2_2 => GAMMA_2_2_TABLE[index],
        };
        result[index] = scale_channel(corrected, max_brightness);
        index += 1;
    }
    result
}

// ============================================================================
// Current budget
// ============================================================================

/// Power budget used to cap brightness on the WS2812 transport.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Current {
    /// Limit brightness so the worst case (every LED full white) stays within this budget.
    ///
    /// A 128-LED matrix draws 7680 mA at full brightness (60 mA per LED); with
    /// [`MAX_CURRENT_DEFAULT`], brightness is capped at roughly 3%.
    Milliamps(u16),
    /// No limit: brightness stays at 100%.
    Unlimited,
}

impl Default for Current {
    fn default() -> Self {
        MAX_CURRENT_DEFAULT
    }
}

/// Default current budget (`Current::Milliamps(250)`).
pub const MAX_CURRENT_DEFAULT: Current = Current::Milliamps(250);

/// Worst-case draw of one LED at full white, in milliamps.
pub const LED_WORST_CASE_MA: u32 = 60;

impl Current {
    /// Maximum brightness that keeps `led_count` LEDs within this budget.
    ///
    /// Returns 255 (full brightness) for [`Current::Unlimited`].
    ///
    /// # Panics
    ///
    /// Panics if `led_count` is zero.
    #[must_use]
    pub const fn max_brightness(self, led_count: usize) -> u8 {
        let worst_case_ma = led_count as u32 * LED_WORST_CASE_MA;
        assert!(worst_case_ma > 0, "led_count must be positive");
        match self {
            Self::Milliamps(ma) => {
                let scale = (ma as u32 * 255) / worst_case_ma;
                if scale > 255 { 255 } else { scale as u8 }
            }
            Self::Unlimited => 255,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channels_round_trip_through_wire_order() {
        let color = pack_rgb(0x12, 0x34, 0x56);
        assert_eq!(color.raw(), 0x0034_1256);
        assert_eq!((color.red(), color.green(), color.blue()), (0x12, 0x34, 0x56));
    }

    #[test]
    fn blend_never_brightens() {
        for alpha in [0u8, 1, 10, 127, 128, 254, 255] {
            for channel in [0u8, 1, 50, 128, 200, 255] {
                let blended = blend_rgba(channel, channel, channel, alpha);
                assert!(blended.red() <= channel);
                assert!(blended.green() <= channel);
                assert!(blended.blue() <= channel);
            }
        }
    }

    #[test]
    fn blend_truncates() {
        // 50 * 10 / 255 = 1.96 -> 1
        assert_eq!(blend_rgba(50, 100, 150, 10), pack_rgb(1, 3, 5));
    }

    #[test]
    fn linear_table_at_full_brightness_is_identity() {
        let table = generate_combo_table(Gamma::Linear, 255);
        assert!(table.iter().enumerate().all(|(index, value)| usize::from(*value) == index));
    }

    #[test]
    fn combo_table_respects_brightness_cap() {
        let table = generate_combo_table(Gamma::Gamma2_2, 64);
        assert_eq!(table[0], 0);
        assert_eq!(table[255], 64);
        assert!(table.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn current_budget_limits_brightness() {
        assert_eq!(Current::Unlimited.max_brightness(128), 255);
        // 250 * 255 / (128 * 60) = 8.3 -> 8
        assert_eq!(Current::Milliamps(250).max_brightness(128), 8);
        assert_eq!(Current::Milliamps(u16::MAX).max_brightness(1), 255);
    }

    #[test]
    #[should_panic(expected = "led_count must be positive")]
    fn max_brightness_rejects_empty_chain() {
        let _ = Current::Milliamps(250).max_brightness(0);
    }

    #[test]
    fn corrected_maps_each_channel() {
        let table = generate_combo_table(Gamma::Linear, 127);
        let color = pack_rgb(255, 0, 2).corrected(&table);
        assert_eq!(color, pack_rgb(127, 0, 0));
    }
}
