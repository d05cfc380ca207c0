//! 24-bit color type and hex parsing.

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Squared Euclidean distance in RGB space.
    pub fn dist_sq(self, other: Rgb) -> i32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        dr * dr + dg * dg + db * db
    }
}

/// Parse `#RRGGBB` or `RRGGBB` (case-insensitive, surrounding whitespace ignored).
///
/// # Examples
///
/// ```
/// use tui_wireframe_types::{parse_hex_color, Rgb};
///
/// assert_eq!(parse_hex_color("#0e0e2c"), Some(Rgb::new(14, 14, 44)));
/// assert_eq!(parse_hex_color("8D0582"), Some(Rgb::new(141, 5, 130)));
/// assert_eq!(parse_hex_color("#12345"), None);
/// assert_eq!(parse_hex_color("zzzzzz"), None);
/// ```
pub fn parse_hex_color(s: &str) -> Option<Rgb> {
    let val = s.trim();
    let val = val.strip_prefix('#').unwrap_or(val);
    if val.len() != 6 || !val.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&val[i..i + 2], 16).ok();
    Some(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
}
