/// Format-specifier tokenizer.
///
/// Specifiers are read right to left: an optional byte token, an optional
/// IEC `i` marker, a single prefix letter, and everything before that is
/// the numeric sub-format plus the preserved whitespace gap.
use crate::scale::ScaleMode;
use crate::unit::{Prefix, UnitTable};

/// A decoded format specifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FormatSpec<'a> {
    pub mode: ScaleMode,
    /// The `i` marker: force power-of-1024 factors and the IEC spellings
    /// regardless of the prefix letter's case.
    pub binary_forced: bool,
    /// Lowercase prefix letter: power-of-1000 factors and the
    /// power-of-1000 kilo spelling.
    pub decimal: bool,
    /// Emit spelled-out unit words instead of abbreviations.
    pub long_form: bool,
    /// Emit the byte unit after the prefix.
    pub byte_word: bool,
    /// Numeric sub-format (may be empty).
    pub numeric: &'a str,
    /// Whitespace between the number and the unit, verbatim.
    pub gap: &'a str,
}

/// The letters that may select a scale in a format specifier. `A` is
/// auto-exact, `S` auto-shortest; exa is reachable only through the auto
/// directives.
fn prefix_mode(letter: u8) -> Option<ScaleMode> {
    match letter.to_ascii_uppercase() {
        b'A' => Some(ScaleMode::AutoExact),
        b'S' => Some(ScaleMode::AutoShortest),
        b'K' => Some(ScaleMode::Explicit(Prefix::Kilo)),
        b'M' => Some(ScaleMode::Explicit(Prefix::Mega)),
        b'G' => Some(ScaleMode::Explicit(Prefix::Giga)),
        b'T' => Some(ScaleMode::Explicit(Prefix::Tera)),
        b'P' => Some(ScaleMode::Explicit(Prefix::Peta)),
        _ => None,
    }
}

/// Case-insensitive ASCII suffix strip, independent of the table's parse
/// policy: in a format specifier the letter case carries meaning, so the
/// structural tokens are matched here rather than through the table.
fn strip_ci<'a>(text: &'a str, token: &str) -> Option<&'a str> {
    if token.is_empty() || text.len() < token.len() {
        return None;
    }
    let split = text.len() - token.len();
    if !text.is_char_boundary(split) {
        return None;
    }
    let (head, tail) = text.split_at(split);
    tail.eq_ignore_ascii_case(token).then_some(head)
}

/// Decode `spec`. Never fails: unmatched trailing characters simply stay
/// in the numeric sub-format, where unknown characters are literals.
pub(crate) fn parse_spec<'a>(spec: &'a str, table: &UnitTable) -> FormatSpec<'a> {
    // The general specifier: auto-exact, binary, abbreviated, byte unit.
    if spec.is_empty() || spec == "G" || spec == "g" {
        return FormatSpec {
            mode: ScaleMode::AutoExact,
            binary_forced: true,
            decimal: false,
            long_form: false,
            byte_word: true,
            numeric: "",
            gap: "",
        };
    }

    let mut rest = spec;
    let mut byte_word = false;
    let mut long_form = false;

    // Trailing byte token. The spelled-out words and the lowercase
    // abbreviation select the unabbreviated output form; the exact-case
    // abbreviation keeps the abbreviated form.
    if let Some(head) = strip_ci(rest, table.byte_word(true)) {
        byte_word = true;
        long_form = true;
        rest = head;
    } else if let Some(head) = strip_ci(rest, table.byte_word(false)) {
        byte_word = true;
        long_form = true;
        rest = head;
    } else if let Some(head) = rest.strip_suffix(table.byte_abbrev()) {
        byte_word = true;
        rest = head;
    } else if let Some(head) = strip_ci(rest, table.byte_abbrev()) {
        byte_word = true;
        long_form = true;
        rest = head;
    }

    // The IEC marker counts only when a valid prefix letter precedes it;
    // otherwise the `i` stays put and falls through to the numeric part.
    let mut binary_forced = false;
    let tail = rest.as_bytes();
    if tail.len() >= 2 {
        let last = tail[tail.len() - 1];
        let prev = tail[tail.len() - 2];
        if (last == b'i' || last == b'I') && prefix_mode(prev).is_some() {
            binary_forced = true;
            rest = &rest[..rest.len() - 1];
        }
    }

    let mut mode = ScaleMode::Byte;
    let mut decimal = false;
    if let Some(&last) = rest.as_bytes().last() {
        if let Some(m) = prefix_mode(last) {
            mode = m;
            decimal = last.is_ascii_lowercase();
            rest = &rest[..rest.len() - 1];
        }
    }

    let numeric = rest.trim_end();
    let gap = &rest[numeric.len()..];

    FormatSpec {
        mode,
        binary_forced,
        decimal,
        long_form,
        byte_word,
        numeric,
        gap,
    }
}
