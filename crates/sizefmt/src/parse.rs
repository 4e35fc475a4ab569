/// Format-string engine — parsing direction.
///
/// Strips a trailing unit suffix (byte word, connector, prefix token) off
/// the input, parses what remains as an exact decimal literal, and scales
/// it back into the signed 64-bit byte domain with truncation toward
/// zero. No floating point is involved, so every representable value
/// round-trips losslessly.
use tracing::trace;

use crate::error::ParseError;
use crate::unit::{Prefix, UnitTable};

/// Interpretation of the undecorated SI prefix tokens (`K`, `M`, `kilo`,
/// ...) during parsing. Binary tokens (`Ki`, `kibi`, ...) are powers of
/// 1024 under every mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SiMode {
    /// SI tokens read as powers of 1024, the conventional interpretation.
    #[default]
    Binary,
    /// SI tokens read as powers of 1000 per the IEC recommendation.
    IecStandard,
}

/// Which unit spellings are recognized during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UnitForm {
    /// Accept abbreviations and spelled-out words.
    #[default]
    Any,
    /// Accept only abbreviations (`B`, `KiB`, `MB`, ...).
    AbbreviatedOnly,
    /// Accept only spelled-out words (`bytes`, `kibibytes`, ...).
    UnabbreviatedOnly,
}

/// Options threaded through [`ByteSize::parse_with`](crate::ByteSize::parse_with).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseOptions {
    pub si_mode: SiMode,
    pub unit_form: UnitForm,
}

impl ParseOptions {
    pub const fn new() -> Self {
        ParseOptions {
            si_mode: SiMode::Binary,
            unit_form: UnitForm::Any,
        }
    }

    /// Read SI prefixes as powers of 1000.
    pub const fn iec_standard(mut self) -> Self {
        self.si_mode = SiMode::IecStandard;
        self
    }

    pub const fn abbreviated_only(mut self) -> Self {
        self.unit_form = UnitForm::AbbreviatedOnly;
        self
    }

    pub const fn unabbreviated_only(mut self) -> Self {
        self.unit_form = UnitForm::UnabbreviatedOnly;
        self
    }
}

/// Parse `text` into a byte count.
///
/// An input that is empty after whitespace trimming parses as zero.
pub(crate) fn parse_size(
    text: &str,
    options: ParseOptions,
    table: &UnitTable,
) -> Result<i64, ParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }

    let suffix = strip_unit_suffix(trimmed, options, table);
    let literal = DecimalLiteral::parse(suffix.rest.trim_end()).ok_or_else(|| {
        ParseError::Malformed {
            text: text.to_owned(),
        }
    })?;
    let value = literal
        .scale(suffix.divisor)
        .ok_or_else(|| ParseError::Overflow {
            text: text.to_owned(),
        })?;

    trace!(value, text, "parsed byte size");
    Ok(value)
}

struct Suffix<'a> {
    rest: &'a str,
    divisor: u64,
}

/// Strip the unit suffix: byte word first, then the connector, then one
/// prefix token, longest tokens first so `Ki` wins over `K` and `kibi`
/// over the bare words.
fn strip_unit_suffix<'a>(text: &'a str, options: ParseOptions, table: &UnitTable) -> Suffix<'a> {
    let words = options.unit_form != UnitForm::AbbreviatedOnly;
    let abbrevs = options.unit_form != UnitForm::UnabbreviatedOnly;

    let mut rest = text;
    let mut byte_word_form = None;
    if words {
        for plural in [true, false] {
            if let Some(head) = table.strip_suffix_token(rest, table.byte_word(plural)) {
                rest = head;
                byte_word_form = Some(false); // spelled out
                break;
            }
        }
    }
    if byte_word_form.is_none() && abbrevs {
        if let Some(head) = table.strip_suffix_token(rest, table.byte_abbrev()) {
            rest = head;
            byte_word_form = Some(true); // abbreviated
        }
    }
    if let Some(abbreviated) = byte_word_form {
        if let Some(head) = table.strip_suffix_token(rest, table.connector(abbreviated)) {
            rest = head;
        }
    }

    let si_factor = |prefix: Prefix| match options.si_mode {
        SiMode::Binary => prefix.binary_factor(),
        SiMode::IecStandard => prefix.decimal_factor(),
    };

    // Binary tokens are firm powers of 1024 no matter the option; they
    // are also matched first, which settles the trailing-i ambiguity: a
    // bare `i` (or `Bi`) is never a unit and falls through to the number
    // parser.
    if abbrevs {
        for prefix in Prefix::DESCENDING {
            if let Some(head) = table.strip_suffix_token(rest, table.binary_abbrev(prefix)) {
                return Suffix {
                    rest: head,
                    divisor: prefix.binary_factor(),
                };
            }
        }
    }
    if words {
        for prefix in Prefix::DESCENDING {
            if let Some(head) = table.strip_suffix_token(rest, table.binary_word(prefix)) {
                return Suffix {
                    rest: head,
                    divisor: prefix.binary_factor(),
                };
            }
        }
        for prefix in Prefix::DESCENDING {
            if let Some(head) = table.strip_suffix_token(rest, table.si_word(prefix)) {
                return Suffix {
                    rest: head,
                    divisor: si_factor(prefix),
                };
            }
        }
    }
    if abbrevs {
        for prefix in Prefix::DESCENDING {
            if let Some(head) = table.strip_suffix_token(rest, table.si_abbrev(prefix, false)) {
                return Suffix {
                    rest: head,
                    divisor: si_factor(prefix),
                };
            }
            // The power-of-1000 kilo spelling is a separate slot; it only
            // matters under a case-sensitive table.
            if prefix == Prefix::Kilo {
                if let Some(head) = table.strip_suffix_token(rest, table.si_abbrev(prefix, true)) {
                    return Suffix {
                        rest: head,
                        divisor: si_factor(prefix),
                    };
                }
            }
        }
    }

    Suffix { rest, divisor: 1 }
}

/// An exact decimal literal: sign, integer digits, fraction digits.
///
/// Fraction digits beyond the 19th cannot move the truncated product for
/// any divisor in the 64-bit domain and are dropped.
struct DecimalLiteral {
    negative: bool,
    int: u128,
    int_overflow: bool,
    frac: Vec<u8>,
}

const FRAC_DIGIT_LIMIT: usize = 19;

impl DecimalLiteral {
    /// Grammar: `[+-]? (digit | ',')* ('.' digit*)?` with at least one
    /// digit and `,` only between digits. Returns `None` on mismatch.
    fn parse(text: &str) -> Option<DecimalLiteral> {
        let mut chars = text.chars().peekable();
        let mut negative = false;
        if let Some(&c) = chars.peek() {
            if c == '+' || c == '-' {
                negative = c == '-';
                chars.next();
            }
        }

        let mut int: u128 = 0;
        let mut int_overflow = false;
        let mut any_digit = false;
        let mut prev_was_digit = false;
        let mut in_fraction = false;
        let mut frac = Vec::new();

        for c in chars {
            match c {
                '0'..='9' => {
                    let d = (c as u8 - b'0') as u128;
                    any_digit = true;
                    prev_was_digit = true;
                    if in_fraction {
                        if frac.len() < FRAC_DIGIT_LIMIT {
                            frac.push(d as u8);
                        }
                    } else {
                        match int.checked_mul(10).and_then(|v| v.checked_add(d)) {
                            Some(v) => int = v,
                            None => int_overflow = true,
                        }
                    }
                }
                ',' if !in_fraction && prev_was_digit => {
                    // Group separators must sit between digits.
                    prev_was_digit = false;
                }
                '.' if !in_fraction && (prev_was_digit || !any_digit) => {
                    in_fraction = true;
                    prev_was_digit = false;
                }
                _ => return None,
            }
        }

        // At least one digit, and no dangling group separator ("1,").
        if !any_digit || (!in_fraction && !prev_was_digit) {
            return None;
        }

        Some(DecimalLiteral {
            negative,
            int,
            int_overflow,
            frac,
        })
    }

    /// `trunc(self * divisor)` into the signed 64-bit domain.
    fn scale(&self, divisor: u64) -> Option<i64> {
        if self.int_overflow {
            return None;
        }
        let divisor = divisor as u128;
        let int_part = self.int.checked_mul(divisor)?;

        // frac < 10^19 and divisor < 2^61, so the product fits u128.
        let mut frac_num: u128 = 0;
        for &d in &self.frac {
            frac_num = frac_num * 10 + d as u128;
        }
        let pow = 10u128.pow(self.frac.len() as u32);
        let frac_part = frac_num * divisor / pow;

        let magnitude = int_part.checked_add(frac_part)?;
        if self.negative {
            if magnitude > i64::MAX as u128 + 1 {
                return None;
            }
            Some((-(magnitude as i128)) as i64)
        } else {
            if magnitude > i64::MAX as u128 {
                return None;
            }
            Some(magnitude as i64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::UnitTableBuilder;

    fn parse(text: &str) -> Result<i64, ParseError> {
        parse_size(text, ParseOptions::new(), UnitTable::shared())
    }

    fn parse_iec(text: &str) -> Result<i64, ParseError> {
        parse_size(
            text,
            ParseOptions::new().iec_standard(),
            UnitTable::shared(),
        )
    }

    // ── grammar basics ───────────────────────────────────────────────────

    #[test]
    fn empty_input_is_zero() {
        assert_eq!(parse(""), Ok(0));
        assert_eq!(parse("   "), Ok(0));
    }

    #[test]
    fn bare_numbers_are_bytes() {
        assert_eq!(parse("0"), Ok(0));
        assert_eq!(parse("512"), Ok(512));
        assert_eq!(parse(" 512 "), Ok(512));
        assert_eq!(parse("512B"), Ok(512));
        assert_eq!(parse("512 B"), Ok(512));
        assert_eq!(parse("1 byte"), Ok(1));
        assert_eq!(parse("17 bytes"), Ok(17));
    }

    #[test]
    fn fractions_scale_exactly_and_truncate() {
        assert_eq!(parse("2.5KiB"), Ok(2560));
        assert_eq!(parse(".5 KiB"), Ok(512));
        assert_eq!(parse("1.9"), Ok(1));
        assert_eq!(parse("-1.9"), Ok(-1));
        assert_eq!(parse("2.50001 KiB"), Ok(2560));
    }

    #[test]
    fn group_separators_are_ignored() {
        assert_eq!(parse("2,560 MiB"), Ok(2_684_354_560));
        assert_eq!(parse("1,234,567"), Ok(1_234_567));
    }

    #[test]
    fn signs() {
        assert_eq!(parse("+1KiB"), Ok(1024));
        assert_eq!(parse("-1KiB"), Ok(-1024));
        assert_eq!(parse("-2560 MiB"), Ok(-2_684_354_560));
    }

    // ── unit tokens ──────────────────────────────────────────────────────

    #[test]
    fn binary_prefixes_are_firm_powers_of_1024() {
        assert_eq!(parse("1KiB"), Ok(1024));
        assert_eq!(parse_iec("1kiB"), Ok(1024));
        assert_eq!(parse_iec("1 kibibyte"), Ok(1024));
        assert_eq!(parse("1EiB"), Ok(1 << 60));
    }

    #[test]
    fn si_prefixes_follow_the_mode() {
        assert_eq!(parse("1kB"), Ok(1024));
        assert_eq!(parse_iec("1kB"), Ok(1000));
        assert_eq!(parse("5G"), Ok(5_368_709_120));
        assert_eq!(parse_iec("5G"), Ok(5_000_000_000));
        assert_eq!(parse("1 megabyte"), Ok(1_048_576));
        assert_eq!(parse_iec("1 megabyte"), Ok(1_000_000));
    }

    #[test]
    fn unit_matching_ignores_case_by_default() {
        for text in ["10kb", "10KB", "10Kb", "10kB"] {
            assert_eq!(parse(text), Ok(10_240), "input {text:?}");
        }
        assert_eq!(parse("2560MIB"), Ok(2_684_354_560));
        assert_eq!(parse("1 KILOBYTE"), Ok(1024));
    }

    #[test]
    fn trailing_i_without_prefix_is_malformed() {
        assert!(matches!(parse("5i"), Err(ParseError::Malformed { .. })));
        assert!(matches!(parse("5Bi"), Err(ParseError::Malformed { .. })));
        assert!(matches!(parse("i"), Err(ParseError::Malformed { .. })));
    }

    #[test]
    fn malformed_inputs() {
        for text in ["abc", "12xB", "--5", "5..2", "1,B", "1,", "B", "bytes", "5 5 B"] {
            assert!(
                matches!(parse(text), Err(ParseError::Malformed { .. })),
                "input {text:?}"
            );
        }
    }

    // ── range ────────────────────────────────────────────────────────────

    #[test]
    fn extremes_of_the_signed_domain() {
        assert_eq!(parse("9223372036854775807B"), Ok(i64::MAX));
        assert_eq!(parse("-9223372036854775808B"), Ok(i64::MIN));
        assert_eq!(parse("-8EiB"), Ok(i64::MIN));
    }

    #[test]
    fn out_of_range_is_overflow() {
        for text in [
            "9223372036854775808B",
            "-9223372036854775809B",
            "8EiB",
            "16 EiB",
            "99999999999999999999999999999999999999999",
        ] {
            assert!(
                matches!(parse(text), Err(ParseError::Overflow { .. })),
                "input {text:?}"
            );
        }
    }

    // ── options ──────────────────────────────────────────────────────────

    #[test]
    fn abbreviated_only_rejects_words() {
        let opts = ParseOptions::new().abbreviated_only();
        assert_eq!(parse_size("2 KiB", opts, UnitTable::shared()), Ok(2048));
        assert!(matches!(
            parse_size("2 kibibytes", opts, UnitTable::shared()),
            Err(ParseError::Malformed { .. })
        ));
    }

    #[test]
    fn unabbreviated_only_rejects_abbreviations() {
        let opts = ParseOptions::new().unabbreviated_only();
        assert_eq!(
            parse_size("2 kibibytes", opts, UnitTable::shared()),
            Ok(2048)
        );
        assert!(matches!(
            parse_size("2 KiB", opts, UnitTable::shared()),
            Err(ParseError::Malformed { .. })
        ));
    }

    #[test]
    fn case_sensitive_table_distinguishes_kilo_spellings() {
        let strict = UnitTableBuilder::new()
            .with_case_sensitive(true)
            .build()
            .unwrap();
        let opts = ParseOptions::new();
        // Both canonical spellings resolve; the factor comes from the
        // mode, not from the letter case.
        assert_eq!(parse_size("10kB", opts, &strict), Ok(10_240));
        assert_eq!(parse_size("10KB", opts, &strict), Ok(10_240));
        // A casing the table does not carry no longer matches.
        assert!(matches!(
            parse_size("10kb", opts, &strict),
            Err(ParseError::Malformed { .. })
        ));
        assert!(matches!(
            parse_size("10KIB", opts, &strict),
            Err(ParseError::Malformed { .. })
        ));
    }

    #[test]
    fn custom_byte_words() {
        let table = UnitTableBuilder::new()
            .with_byte_abbrev("o")
            .with_byte_words("octet", "octets")
            .build()
            .unwrap();
        let opts = ParseOptions::new();
        assert_eq!(parse_size("2560 Mio", opts, &table), Ok(2_684_354_560));
        assert_eq!(parse_size("3 octets", opts, &table), Ok(3));
    }
}
