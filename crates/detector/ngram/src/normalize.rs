use once_cell::sync::Lazy;
use regex::{Captures, Regex};

// Tags standing for whole scripts after folding. Which code point is used
// does not matter as long as profiles are trained through the same folding.
const TAG_CYRILLIC_SUP: char = '\u{0500}';
const TAG_HEBREW: char = '\u{05d0}';
const TAG_ARABIC: char = '\u{0627}';
const TAG_DEVANAGARI: char = '\u{0905}';
const TAG_THAI: char = '\u{0e01}';
const TAG_LAO: char = '\u{0e81}';
const TAG_TIBETAN: char = '\u{0f40}';
const TAG_MYANMAR: char = '\u{1000}';
const TAG_GEORGIAN: char = '\u{10d0}';
const TAG_ETHIOPIC: char = '\u{1200}';
const TAG_HIRAGANA: char = '\u{3042}';
const TAG_KATAKANA: char = '\u{30a2}';
const TAG_HANGUL: char = '\u{ac00}';
const TAG_CJK: char = '\u{4e00}';

/// Fold a character into the reduced alphabet the profiles are built over.
///
/// ASCII letters and most Latin letters pass through; ASCII punctuation,
/// digits and controls become a space; scripts that identify a language at
/// the block level collapse to a single tag character per block.
pub fn normalize(ch: char) -> char {
    match ch as u32 {
        // Basic Latin outside the letter range
        0x0000..=0x0040 | 0x007b..=0x007f => ' ',
        // Latin-1 punctuation, signs and the two arithmetic operators
        0x00a0..=0x00bf | 0x00d7 | 0x00f7 => ' ',
        0x0500..=0x052f => TAG_CYRILLIC_SUP,
        0x0590..=0x05ff => TAG_HEBREW,
        0x0600..=0x06ff => TAG_ARABIC,
        0x0900..=0x097f => TAG_DEVANAGARI,
        0x0e00..=0x0e7f => TAG_THAI,
        0x0e80..=0x0eff => TAG_LAO,
        0x0f00..=0x0fff => TAG_TIBETAN,
        0x1000..=0x109f => TAG_MYANMAR,
        0x10a0..=0x10ff => TAG_GEORGIAN,
        0x1100..=0x11ff => TAG_HANGUL,
        0x1200..=0x137f => TAG_ETHIOPIC,
        0x3040..=0x309f => TAG_HIRAGANA,
        0x30a0..=0x30ff => TAG_KATAKANA,
        0x3130..=0x318f => TAG_HANGUL,
        0xac00..=0xd7af => TAG_HANGUL,
        // CJK Radicals Supplement through CJK Unified Ideographs Extension B
        0x2e80..=0x2fdf
        | 0x3000..=0x303f
        | 0x3190..=0x319f
        | 0x31c0..=0x31ef
        | 0x3300..=0x4dbf
        | 0x4e00..=0x9fff
        | 0xf900..=0xfaff
        | 0x20000..=0x2a6df => TAG_CJK,
        _ => ch,
    }
}

// Vietnamese vowels that take a diacritical mark, and the pre-composed form
// per (vowel, mark) pair. Row k corresponds to DMARK_CLASS[k]; within a row
// the column order matches TO_NORMALIZE_VI_CHARS.
const TO_NORMALIZE_VI_CHARS: &str = "AEIOUYaeiouy\
    \u{c2}\u{ca}\u{d4}\u{e2}\u{ea}\u{f4}\
    \u{102}\u{103}\u{1a0}\u{1a1}\u{1af}\u{1b0}";
const DMARK_CLASS: &str = "\u{300}\u{301}\u{303}\u{309}\u{323}";
const NORMALIZED_VI_CHARS: [&str; 5] = [
    "\u{c0}\u{c8}\u{cc}\u{d2}\u{d9}\u{1ef2}\u{e0}\u{e8}\u{ec}\u{f2}\u{f9}\u{1ef3}\
     \u{1ea6}\u{1ec0}\u{1ed2}\u{1ea7}\u{1ec1}\u{1ed3}\u{1eb0}\u{1eb1}\u{1edc}\u{1edd}\u{1eea}\u{1eeb}",
    "\u{c1}\u{c9}\u{cd}\u{d3}\u{da}\u{dd}\u{e1}\u{e9}\u{ed}\u{f3}\u{fa}\u{fd}\
     \u{1ea4}\u{1ebe}\u{1ed0}\u{1ea5}\u{1ebf}\u{1ed1}\u{1eae}\u{1eaf}\u{1eda}\u{1edb}\u{1ee8}\u{1ee9}",
    "\u{c3}\u{1ebc}\u{128}\u{d5}\u{168}\u{1ef8}\u{e3}\u{1ebd}\u{129}\u{f5}\u{169}\u{1ef9}\
     \u{1eaa}\u{1ec4}\u{1ed6}\u{1eab}\u{1ec5}\u{1ed7}\u{1eb4}\u{1eb5}\u{1ee0}\u{1ee1}\u{1eee}\u{1eef}",
    "\u{1ea2}\u{1eba}\u{1ec8}\u{1ece}\u{1ee6}\u{1ef6}\u{1ea3}\u{1ebb}\u{1ec9}\u{1ecf}\u{1ee7}\u{1ef7}\
     \u{1ea8}\u{1ec2}\u{1ed4}\u{1ea9}\u{1ec3}\u{1ed5}\u{1eb2}\u{1eb3}\u{1ede}\u{1edf}\u{1eec}\u{1eed}",
    "\u{1ea0}\u{1eb8}\u{1eca}\u{1ecc}\u{1ee4}\u{1ef4}\u{1ea1}\u{1eb9}\u{1ecb}\u{1ecd}\u{1ee5}\u{1ef5}\
     \u{1eac}\u{1ec6}\u{1ed8}\u{1ead}\u{1ec7}\u{1ed9}\u{1eb6}\u{1eb7}\u{1ee2}\u{1ee3}\u{1ef0}\u{1ef1}",
];

static ALPHABET_WITH_DMARK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        "([{TO_NORMALIZE_VI_CHARS}])([{DMARK_CLASS}])"
    ))
    .expect("invalid Vietnamese normalization pattern")
});

/// Rewrite decomposed Vietnamese vowel + combining mark sequences into their
/// pre-composed form, so both spellings feed identical grams to the index.
pub fn normalize_vi(text: &str) -> String {
    ALPHABET_WITH_DMARK
        .replace_all(text, |caps: &Captures| {
            let composed = caps.get(1).and_then(|base| {
                let mark = caps.get(2)?;
                let col = TO_NORMALIZE_VI_CHARS
                    .chars()
                    .position(|c| base.as_str().starts_with(c))?;
                let row = DMARK_CLASS
                    .chars()
                    .position(|c| mark.as_str().starts_with(c))?;
                NORMALIZED_VI_CHARS[row].chars().nth(col)
            });
            match composed {
                Some(ch) => ch.to_string(),
                None => caps[0].to_owned(),
            }
        })
        .into_owned()
}
