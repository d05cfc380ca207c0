//! Cell mask → glyph translation.

use crate::types::ASCII_RAMP;

/// Braille dot value for each mask bit.
///
/// Mask bits run down the left column (0-3) then the right column (4-7);
/// Braille numbers dots 1-2-3 / 4-5-6 down the columns with 7 and 8 on the
/// bottom row.
const BRAILLE_DOTS: [u32; 8] = [0x01, 0x02, 0x04, 0x40, 0x08, 0x10, 0x20, 0x80];

const BRAILLE_BASE: u32 = 0x2800;

/// Unicode Braille pattern showing every set sub-pixel. Empty → space.
pub fn braille(mask: u8) -> char {
    if mask == 0 {
        return ' ';
    }
    let dots: u32 = BRAILLE_DOTS
        .iter()
        .enumerate()
        .filter(|(i, _)| mask & (1u8 << *i) != 0)
        .map(|(_, d)| d)
        .sum();
    char::from_u32(BRAILLE_BASE + dots).unwrap_or(' ')
}

/// ASCII density glyph keyed by how many sub-pixels are set.
pub fn ascii(mask: u8) -> char {
    let density = mask.count_ones() as usize;
    ASCII_RAMP
        .get(density)
        .copied()
        .map(char::from)
        .unwrap_or('@')
}

/// Glyph for a mask in the selected style.
#[inline]
pub fn cell_glyph(mask: u8, use_braille: bool) -> char {
    if use_braille {
        braille(mask)
    } else {
        ascii(mask)
    }
}
