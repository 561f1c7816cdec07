//! Text encodings for the standard Type1 fonts and PDF text strings.

/// Code points WinAnsiEncoding places in 0x80..=0x9F, indexed by `byte - 0x80`.
/// Unassigned slots are `None`.
const WIN_ANSI_HIGH: [Option<char>; 32] = [
    Some('\u{20AC}'), // euro sign
    None,
    Some('\u{201A}'),
    Some('\u{0192}'),
    Some('\u{201E}'),
    Some('\u{2026}'),
    Some('\u{2020}'),
    Some('\u{2021}'),
    Some('\u{02C6}'),
    Some('\u{2030}'),
    Some('\u{0160}'),
    Some('\u{2039}'),
    Some('\u{0152}'),
    None,
    Some('\u{017D}'),
    None,
    None,
    Some('\u{2018}'),
    Some('\u{2019}'),
    Some('\u{201C}'),
    Some('\u{201D}'),
    Some('\u{2022}'),
    Some('\u{2013}'),
    Some('\u{2014}'),
    Some('\u{02DC}'),
    Some('\u{2122}'),
    Some('\u{0161}'),
    Some('\u{203A}'),
    Some('\u{0153}'),
    None,
    Some('\u{017E}'),
    Some('\u{0178}'),
];

/// The WinAnsiEncoding byte for `c`, if the encoding has a glyph for it.
pub fn win_ansi_byte(c: char) -> Option<u8> {
    match c as u32 {
        0x20..=0x7E | 0xA0..=0xFF => Some(c as u8),
        _ => WIN_ANSI_HIGH
            .iter()
            .position(|slot| *slot == Some(c))
            .map(|i| 0x80 + i as u8),
    }
}

/// Encodes text for a WinAnsi Type1 font; characters it cannot show become `?`.
pub fn to_win_ansi(s: &str) -> Vec<u8> {
    s.chars().map(|c| win_ansi_byte(c).unwrap_or(b'?')).collect()
}

/// A PDF text string (document info, outlines): UTF-16BE with a byte order mark.
pub fn to_text_string(s: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(2 + s.len() * 2);
    out.extend_from_slice(&[0xFE, 0xFF]);
    for unit in s.encode_utf16() {
        out.extend_from_slice(&unit.to_be_bytes());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latin1_passes_through() {
        assert_eq!(to_win_ansi("Descripción"), b"Descripci\xf3n".to_vec());
        assert_eq!(to_win_ansi("Caño"), b"Ca\xf1o".to_vec());
    }

    #[test]
    fn test_typographic_characters_use_the_high_range() {
        assert_eq!(to_win_ansi("10 €"), b"10 \x80".to_vec());
        assert_eq!(to_win_ansi("1/2” – 3"), b"1/2\x94 \x96 3".to_vec());
        assert_eq!(to_win_ansi("“a” ‘b’ …"), b"\x93a\x94 \x91b\x92 \x85".to_vec());
        assert_eq!(win_ansi_byte('™'), Some(0x99));
        assert_eq!(win_ansi_byte('Ÿ'), Some(0x9F));
    }

    #[test]
    fn test_unrepresentable_characters_become_question_marks() {
        assert_eq!(to_win_ansi("日本"), b"??".to_vec());
        assert_eq!(to_win_ansi("a\u{1}b"), b"a?b".to_vec());
        // C1 controls share byte values with the typographic glyphs.
        assert_eq!(to_win_ansi("\u{80}\u{96}"), b"??".to_vec());
    }

    #[test]
    fn test_text_string_is_utf16_with_bom() {
        assert_eq!(to_text_string("A€"), vec![0xFE, 0xFF, 0x00, 0x41, 0x20, 0xAC]);
    }
}
