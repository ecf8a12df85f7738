//! Brightness to panel color encoding.
//!
//! Commands carry a single-character color tag and a brightness percentage.
//! [`color_from_level`] turns the pair into the 16-bit RGB565 value the panel
//! driver consumes. Only one channel is ever lit: the illuminator drives pure
//! red, green or blue light.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::RgbColor;

/// Color type handed to the panel
pub type Color = Rgb565;

/// Color used to blank pixels (masks, dark centers)
pub const OFF: Color = Rgb565::BLACK;

/// Tag selecting the red channel
pub const RED_TAG: char = 'R';
/// Tag selecting the green channel
pub const GREEN_TAG: char = 'G';
/// Tag selecting the blue channel
pub const BLUE_TAG: char = 'B';

/// Color tag used when a command omits one
pub const DEFAULT_TAG: char = GREEN_TAG;

/// Highest brightness percentage
pub const MAX_LEVEL: i32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// Unknown tags fall back to green.
    const fn from_tag(tag: char) -> Self {
        match tag {
            RED_TAG => Self::Red,
            BLUE_TAG => Self::Blue,
            _ => Self::Green,
        }
    }
}

/// Scales a brightness percentage to an 8-bit channel intensity.
///
/// The level is clamped to `0..=100` first, then mapped linearly (truncating)
/// onto `0..=255`.
#[must_use]
pub const fn scale_level(level: i32) -> u8 {
    let clamped = if level < 0 {
        0
    } else if level > MAX_LEVEL {
        MAX_LEVEL
    } else {
        level
    };
    (clamped * 255 / MAX_LEVEL) as u8
}

/// Encodes a color tag and brightness percentage as a panel color.
///
/// `'R'`, `'G'` and `'B'` select a channel; any other tag renders green. The
/// 8-bit intensity is truncated to the channel width (5 bits for red and
/// blue, 6 bits for green), so e.g. full red packs to `0xF800`.
///
/// # Arguments
///
/// * `tag` - Color tag as received on the wire
/// * `level` - Brightness percentage, clamped to `0..=100`
#[must_use]
pub const fn color_from_level(tag: char, level: i32) -> Color {
    let value = scale_level(level);
    match Channel::from_tag(tag) {
        Channel::Red => Rgb565::new(value >> 3, 0, 0),
        Channel::Green => Rgb565::new(0, value >> 2, 0),
        Channel::Blue => Rgb565::new(0, 0, value >> 3),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::pixelcolor::IntoStorage;

    #[test]
    fn test_scale_level_endpoints() {
        assert_eq!(scale_level(0), 0);
        assert_eq!(scale_level(100), 255);
        assert_eq!(scale_level(50), 127);
        assert_eq!(scale_level(1), 2);
    }

    #[test]
    fn test_scale_level_clamps() {
        assert_eq!(scale_level(-20), 0);
        assert_eq!(scale_level(i32::MIN), 0);
        assert_eq!(scale_level(150), 255);
        assert_eq!(scale_level(i32::MAX), 255);
    }

    #[test]
    fn test_full_brightness_packing() {
        assert_eq!(color_from_level('R', 100).into_storage(), 0xF800);
        assert_eq!(color_from_level('G', 100).into_storage(), 0x07E0);
        assert_eq!(color_from_level('B', 100).into_storage(), 0x001F);
    }

    #[test]
    fn test_half_brightness_packing() {
        // 50% -> 127 -> truncated to the channel width
        assert_eq!(color_from_level('R', 50).into_storage(), (127 & 0xF8) << 8);
        assert_eq!(color_from_level('G', 50).into_storage(), (127 & 0xFC) << 3);
        assert_eq!(color_from_level('B', 50).into_storage(), 127 >> 3);
    }

    #[test]
    fn test_zero_level_is_off() {
        for tag in ['R', 'G', 'B', 'x'] {
            assert_eq!(color_from_level(tag, 0), OFF);
        }
    }

    #[test]
    fn test_unknown_tag_is_green() {
        for tag in ['Z', 'r', 'g', ' ', '\n', '9'] {
            assert_eq!(color_from_level(tag, 80), color_from_level('G', 80));
        }
    }

    #[test]
    fn test_over_range_matches_full() {
        assert_eq!(color_from_level('R', 150), color_from_level('R', 100));
        assert_eq!(color_from_level('B', -5), color_from_level('B', 0));
    }

    #[test]
    fn test_single_channel_lit() {
        let red = color_from_level('R', 100);
        assert_eq!((red.r(), red.g(), red.b()), (31, 0, 0));
        let green = color_from_level('G', 100);
        assert_eq!((green.r(), green.g(), green.b()), (0, 63, 0));
        let blue = color_from_level('B', 100);
        assert_eq!((blue.r(), blue.g(), blue.b()), (0, 0, 31));
    }
}
