//! Standard (non-embedded) Type1 fonts
//!
//! Only the Helvetica family is supported. Glyph widths come from the Adobe
//! core font metrics, in 1/1000 em, for the printable ASCII range. Text is
//! encoded with WinAnsiEncoding; anything outside it is replaced with `?`.

use lopdf::{Dictionary, Object};

/// Helvetica widths for codes 32..=126
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0..9
    278, 278, 584, 584, 584, 556, 1015, // :..@
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // A..M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N..Z
    278, 278, 278, 469, 556, 333, // [..`
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // a..m
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // n..z
    334, 260, 334, 584, // {..~
];

/// Helvetica-Bold widths for codes 32..=126
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0..9
    333, 333, 584, 584, 584, 611, 975, // :..@
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, // A..M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N..Z
    333, 278, 333, 584, 556, 333, // [..`
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, // a..m
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, // n..z
    389, 280, 389, 584, // {..~
];

/// Width used for WinAnsi characters outside the ASCII table
const FALLBACK_WIDTH: u16 = 556;

/// One of the PDF standard fonts usable without embedding
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum StandardFont {
    #[default]
    Helvetica,
    HelveticaBold,
}

impl StandardFont {
    /// PostScript name written to the `BaseFont` entry
    pub fn base_font(self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Ascender height in 1/1000 em
    pub fn ascender(self) -> f32 {
        718.0
    }

    /// Descender depth in 1/1000 em (negative)
    pub fn descender(self) -> f32 {
        -207.0
    }

    /// Advance width of one character in 1/1000 em
    pub fn char_width(self, c: char) -> u16 {
        let table = match self {
            StandardFont::Helvetica => &HELVETICA_WIDTHS,
            StandardFont::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
        };

        match win_ansi_code(c) {
            Some(code) if (32..=126).contains(&code) => table[(code - 32) as usize],
            Some(_) => FALLBACK_WIDTH,
            None => table[(b'?' - 32) as usize],
        }
    }

    /// Width of `text` in points at `font_size`
    pub fn text_width_points(self, text: &str, font_size: f32) -> f32 {
        let units: u32 = text.chars().map(|c| self.char_width(c) as u32).sum();
        units as f32 * font_size / 1000.0
    }

    /// Font dictionary for the page `Resources`
    pub fn to_pdf_object(self) -> Dictionary {
        let mut dict = Dictionary::new();
        dict.set("Type", Object::Name(b"Font".to_vec()));
        dict.set("Subtype", Object::Name(b"Type1".to_vec()));
        dict.set("BaseFont", Object::Name(self.base_font().as_bytes().to_vec()));
        dict.set("Encoding", Object::Name(b"WinAnsiEncoding".to_vec()));
        dict
    }

    /// Encode text as an escaped PDF literal string, parentheses included
    pub fn encode_literal(self, text: &str) -> String {
        let mut out = String::with_capacity(text.len() + 2);
        out.push('(');
        for c in text.chars() {
            match win_ansi_code(c).unwrap_or(b'?') {
                b'(' => out.push_str("\\("),
                b')' => out.push_str("\\)"),
                b'\\' => out.push_str("\\\\"),
                code if (32..=126).contains(&code) => out.push(code as char),
                code => out.push_str(&format!("\\{code:03o}")),
            }
        }
        out.push(')');
        out
    }
}

/// Map a character to its WinAnsiEncoding byte
fn win_ansi_code(c: char) -> Option<u8> {
    let code = c as u32;
    match c {
        '\u{20AC}' => Some(0x80),
        '\u{2026}' => Some(0x85),
        '\u{2018}' => Some(0x91),
        '\u{2019}' => Some(0x92),
        '\u{201C}' => Some(0x93),
        '\u{201D}' => Some(0x94),
        '\u{2022}' => Some(0x95),
        '\u{2013}' => Some(0x96),
        '\u{2014}' => Some(0x97),
        '\t' => Some(b' '),
        _ if (32..=126).contains(&code) || (0xA0..=0xFF).contains(&code) => Some(code as u8),
        _ => None,
    }
}
