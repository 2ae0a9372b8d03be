use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

const COMBINING_TILDE: char = '\u{0303}';

// Accent ranks in root collation order; unlisted marks follow by code point.
const ACCENT_ORDER: [char; 14] = [
    '\u{0301}', // acute
    '\u{0300}', // grave
    '\u{0306}', // breve
    '\u{0302}', // circumflex
    '\u{030C}', // caron
    '\u{030A}', // ring
    '\u{0308}', // diaeresis
    '\u{030B}', // double acute
    '\u{0303}', // tilde
    '\u{0307}', // dot above
    '\u{0327}', // cedilla
    '\u{0328}', // ogonek
    '\u{0304}', // macron
    '\u{0338}', // stroke (ø, ł, đ, ħ)
];
const STROKE: char = '\u{0338}';

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum CharClass {
    Separator,
    Digit,
    Letter,
}

/// Spanish-style collation key, compared level by level:
/// base letters (with `ñ` as its own letter after `n`), then accents, then
/// expansions such as `ß` sorting after the spelled-out `ss`. Case never
/// matters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub(super) struct CollationKey {
    primary: Vec<(CharClass, u32)>,
    secondary: Vec<Vec<u32>>,
    tertiary: Vec<u8>,
}

impl CollationKey {
    pub(super) fn new(text: &str) -> Self {
        let mut key = Self {
            primary: Vec::with_capacity(text.len()),
            secondary: Vec::with_capacity(text.len()),
            tertiary: Vec::with_capacity(text.len()),
        };

        for character in text.to_lowercase().nfd() {
            if is_combining_mark(character) {
                key.push_mark(character);
                continue;
            }

            match latin_variant(character) {
                Some(Variant::Expansion(letters)) => {
                    for letter in letters.chars() {
                        key.push_base(letter_weight(letter), 1);
                    }
                }
                Some(Variant::Marked(base, mark)) => {
                    key.push_base(letter_weight(base), 0);
                    key.push_mark(mark);
                }
                None => key.push_base(primary_weight(character), 0),
            }
        }

        key
    }

    fn push_base(&mut self, weight: (CharClass, u32), tertiary: u8) {
        self.primary.push(weight);
        self.secondary.push(Vec::new());
        self.tertiary.push(tertiary);
    }

    fn push_mark(&mut self, mark: char) {
        let Some(last) = self.primary.last_mut() else {
            return;
        };
        if mark == COMBINING_TILDE && *last == letter_weight('n') {
            *last = enye_weight();
        } else if let Some(marks) = self.secondary.last_mut() {
            marks.push(accent_rank(mark));
        }
    }
}

enum Variant {
    Expansion(&'static str),
    Marked(char, char),
}

/// Latin letters with no canonical decomposition that still sort with a base
/// letter.
fn latin_variant(character: char) -> Option<Variant> {
    let variant = match character {
        'æ' => Variant::Expansion("ae"),
        'œ' => Variant::Expansion("oe"),
        'ß' => Variant::Expansion("ss"),
        'ĳ' => Variant::Expansion("ij"),
        'ø' => Variant::Marked('o', STROKE),
        'ł' => Variant::Marked('l', STROKE),
        'đ' => Variant::Marked('d', STROKE),
        'ħ' => Variant::Marked('h', STROKE),
        'ð' => Variant::Marked('d', '\u{0335}'),
        _ => return None,
    };
    Some(variant)
}

fn accent_rank(mark: char) -> u32 {
    ACCENT_ORDER
        .iter()
        .position(|candidate| *candidate == mark)
        .map(|index| index as u32 + 1)
        .unwrap_or(0x1_0000 + mark as u32)
}

fn primary_weight(character: char) -> (CharClass, u32) {
    if character == 'ñ' {
        return enye_weight();
    }
    if character.is_ascii_lowercase() {
        return letter_weight(character);
    }
    if character.is_numeric() {
        return (CharClass::Digit, character as u32);
    }
    if character.is_alphabetic() {
        // Letters outside the Latin alphabet sort after z, by code point.
        return (CharClass::Letter, 0x1_0000 + character as u32);
    }
    (CharClass::Separator, character as u32)
}

fn letter_weight(character: char) -> (CharClass, u32) {
    (CharClass::Letter, (character as u32 - 'a' as u32) * 2)
}

fn enye_weight() -> (CharClass, u32) {
    let (class, weight) = letter_weight('n');
    (class, weight + 1)
}
