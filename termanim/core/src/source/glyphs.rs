//! Big Glyphs
//!
//! 5x5 bitmaps for scrolling text. Lookup is case-insensitive.

/// Rows in a big glyph
pub const GLYPH_HEIGHT: usize = 5;

/// Columns in a big glyph
pub const GLYPH_WIDTH: usize = 5;

/// Rows of a big glyph, top to bottom
pub type Glyph = [&'static str; GLYPH_HEIGHT];

const BLANK: Glyph = ["     "; GLYPH_HEIGHT];

/// Bitmap for `c`, if it has one
#[must_use]
pub fn big_glyph(c: char) -> Option<Glyph> {
    let glyph = match c.to_ascii_uppercase() {
        'A' => [" XXX ", "X   X", "XXXXX", "X   X", "X   X"],
        'B' => ["XXXX ", "X   X", "XXXXX", "X   X", "XXXX "],
        'C' => ["XXXXX", "X    ", "X    ", "X    ", "XXXXX"],
        'D' => ["XXXX ", "X   X", "X   X", "X   X", "XXXX "],
        'E' => ["XXXXX", "X    ", "XXXXX", "X    ", "XXXXX"],
        'F' => ["XXXXX", "X    ", "XXXXX", "X    ", "X    "],
        'G' => ["XXXXX", "X    ", "X  XX", "X   X", "XXXXX"],
        'H' => ["X   X", "X   X", "XXXXX", "X   X", "X   X"],
        'I' => ["XXXXX", "  X  ", "  X  ", "  X  ", "XXXXX"],
        'J' => ["XXXXX", "    X", "    X", "X   X", "XXXXX"],
        'K' => ["X   X", "X  X ", "XXX  ", "X  X ", "X   X"],
        'L' => ["X    ", "X    ", "X    ", "X    ", "XXXXX"],
        'M' => [" X X ", "X X X", "X X X", "X   X", "X   X"],
        'N' => ["X   X", "XX  X", "X X X", "X  XX", "X   X"],
        'O' => [" XXX ", "X   X", "X   X", "X   X", " XXX "],
        'P' => ["XXXX ", "X   X", "XXXX ", "X    ", "X    "],
        'Q' => [" XXX ", "X   X", "X   X", " XXX ", "XX   "],
        'R' => ["XXXX ", "X   X", "XXXX ", "X   X", "X   X"],
        'S' => ["XXXXX", "X    ", "XXXXX", "    X", "XXXXX"],
        'T' => ["XXXXX", "  X  ", "  X  ", "  X  ", "  X  "],
        'U' => ["X   X", "X   X", "X   X", "X   X", "XXXXX"],
        'V' => ["X   X", "X   X", "X   X", " X X ", "  X  "],
        'W' => ["X   X", "X   X", "X X X", "X X X", " X X "],
        'X' => ["X   X", " X X ", "  X  ", " X X ", "X   X"],
        'Y' => ["X   X", " X X ", "  X  ", "  X  ", "  X  "],
        'Z' => ["XXXXX", "   X ", "  X  ", " X   ", "XXXXX"],
        ' ' => BLANK,
        ',' => ["     ", "     ", "     ", "   X ", " XX  "],
        '.' => ["     ", "     ", "     ", "     ", "  X  "],
        '!' => ["  X  ", "  X  ", "  X  ", "     ", "  X  "],
        '?' => [" XXX ", "X   X", "   X ", "  X  ", "  X  "],
        _ => return None,
    };
    Some(glyph)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_glyph_is_five_by_five() {
        let supported = ('A'..='Z').chain([' ', ',', '.', '!', '?']);
        for c in supported {
            let glyph = big_glyph(c).unwrap();
            assert!(glyph.iter().all(|row| row.chars().count() == GLYPH_WIDTH), "{c:?}");
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(big_glyph('q'), big_glyph('Q'));
    }

    #[test]
    fn test_unsupported_glyphs() {
        for c in ['1', '#', 'é', '\n'] {
            assert!(big_glyph(c).is_none(), "{c:?}");
        }
    }
}
