/// Format-string engine — render direction.
///
/// Decodes a format specifier, drives the scale resolver, renders the
/// exact quotient and assembles number, whitespace gap, prefix, connector
/// and byte unit. The parsing direction lives in [`crate::parse`].
pub(crate) mod number;
pub(crate) mod spec;

use std::fmt;

use tracing::trace;

use crate::error::FormatError;
use crate::scale;
use crate::unit::UnitTable;

/// Render `value` through `spec_str` into `out`.
///
/// Write failures surface as [`FormatError::BufferTooSmall`]; only the
/// fixed-capacity writer used by the buffer variant can produce them.
pub(crate) fn write_size<W: fmt::Write>(
    out: &mut W,
    value: i64,
    spec_str: &str,
    table: &UnitTable,
) -> Result<(), FormatError> {
    let spec = spec::parse_spec(spec_str, table);

    let pattern = if spec.numeric.is_empty() {
        number::DEFAULT_PATTERN
    } else {
        number::parse_pattern(spec.numeric).ok_or_else(|| FormatError::InvalidSpec {
            spec: spec_str.to_owned(),
        })?
    };
    // An empty numeric sub-format implies the default single-space gap.
    let gap = if spec.numeric.is_empty() && spec.gap.is_empty() {
        " "
    } else {
        spec.gap
    };

    let magnitude = value.unsigned_abs();
    let decimal = spec.decimal && !spec.binary_forced;
    let (divisor, prefix) = scale::resolve(magnitude, spec.mode, decimal);
    let rendered = number::render(value < 0, magnitude, divisor, &pattern);

    let full = |_: fmt::Error| FormatError::BufferTooSmall;
    out.write_str(&rendered.text).map_err(full)?;
    out.write_str(gap).map_err(full)?;

    if let Some(p) = prefix {
        let prefix_text = if spec.binary_forced {
            if spec.long_form {
                table.binary_word(p)
            } else {
                table.binary_abbrev(p)
            }
        } else if spec.long_form {
            table.si_word(p)
        } else {
            table.si_abbrev(p, decimal)
        };
        out.write_str(prefix_text).map_err(full)?;
        if spec.byte_word {
            out.write_str(table.connector(!spec.long_form)).map_err(full)?;
        }
    }

    if spec.byte_word {
        let unit = if spec.long_form {
            table.byte_word(!rendered.is_one)
        } else {
            table.byte_abbrev()
        };
        out.write_str(unit).map_err(full)?;
    }

    trace!(value, spec = spec_str, "rendered byte size");
    Ok(())
}

/// Render into a fresh `String`.
pub(crate) fn render_string(
    value: i64,
    spec_str: &str,
    table: &UnitTable,
) -> Result<String, FormatError> {
    let mut out = String::with_capacity(spec_str.len() + 8);
    write_size(&mut out, value, spec_str, table)?;
    Ok(out)
}

/// Render into a caller-supplied byte buffer, reporting insufficient
/// space instead of allocating. Returns the number of bytes written.
pub(crate) fn render_into(
    buf: &mut [u8],
    value: i64,
    spec_str: &str,
    table: &UnitTable,
) -> Result<usize, FormatError> {
    let mut writer = SliceWriter { buf, len: 0 };
    write_size(&mut writer, value, spec_str, table)?;
    Ok(writer.len)
}

/// `fmt::Write` over a fixed byte slice; errors once the slice is full.
struct SliceWriter<'a> {
    buf: &'a mut [u8],
    len: usize,
}

impl fmt::Write for SliceWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self.len + s.len();
        if end > self.buf.len() {
            return Err(fmt::Error);
        }
        self.buf[self.len..end].copy_from_slice(s.as_bytes());
        self.len = end;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::{UnitTable, UnitTableBuilder};

    fn fmt(value: i64, spec: &str) -> String {
        render_string(value, spec, UnitTable::shared()).expect("format must succeed")
    }

    // ── default and wire specifiers ──────────────────────────────────────

    #[test]
    fn default_specifier_is_auto_exact_binary() {
        assert_eq!(fmt(2_684_354_560, ""), "2560 MiB");
        assert_eq!(fmt(2_684_354_560, "G"), "2560 MiB");
        assert_eq!(fmt(0, ""), "0 B");
        assert_eq!(fmt(1024, ""), "1 KiB");
    }

    #[test]
    fn wire_specifier_has_no_gap() {
        assert_eq!(fmt(2_684_354_560, "0AiB"), "2560MiB");
        assert_eq!(fmt(0, "0AiB"), "0B");
    }

    #[test]
    fn auto_exact_keeps_the_byte_fallback() {
        assert_eq!(fmt(1023, "AiB"), "1023 B");
        assert_eq!(fmt(0, "AiB"), "0 B");
    }

    #[test]
    fn auto_shortest_divides_fractionally() {
        assert_eq!(fmt(2_684_354_560, "#.0 SiB"), "2.5 GiB");
        assert_eq!(fmt(2_684_354_560, "0.## SiB"), "2.5 GiB");
    }

    // ── explicit prefixes and case ───────────────────────────────────────

    #[test]
    fn explicit_prefix_uppercase_is_power_of_1024() {
        assert_eq!(fmt(2_621_440, "0.0 MB"), "2.5 MB");
        assert_eq!(fmt(1024, "0 KB"), "1 KB");
    }

    #[test]
    fn explicit_prefix_lowercase_is_power_of_1000() {
        assert_eq!(fmt(2_500_000, "0.0 mB"), "2.5 MB");
        assert_eq!(fmt(1000, "0 kB"), "1 kB");
        assert_eq!(fmt(1024, "0 KB"), "1 KB");
    }

    #[test]
    fn iec_marker_forces_binary_spellings_and_factors() {
        // Lowercase letter would mean 1000, but the marker wins.
        assert_eq!(fmt(2_621_440, "0.0 miB"), "2.5 MiB");
        assert_eq!(fmt(5 << 30, "0 giB"), "5 GiB");
    }

    // ── unit words ───────────────────────────────────────────────────────

    #[test]
    fn spelled_out_units_pluralize() {
        assert_eq!(fmt(2048, "0 Kb"), "2 kilobytes");
        assert_eq!(fmt(1024, "0 Kb"), "1 kilobyte");
        assert_eq!(fmt(2048, "0 Kib"), "2 kibibytes");
        assert_eq!(fmt(512, "0 b"), "512 bytes");
        assert_eq!(fmt(1, "0 b"), "1 byte");
    }

    /// The singular/plural choice follows the quotient after rounding
    /// under the active numeric format.
    #[test]
    fn unit_word_follows_rounded_quotient() {
        // 1.01 kB rounds to "1" under a whole-number format.
        assert_eq!(fmt(1010, "0 kb"), "1 kilobyte");
        // With two decimals it stays 1.01, hence plural.
        assert_eq!(fmt(1010, "0.## kb"), "1.01 kilobytes");
        // 1.0 is exactly one.
        assert_eq!(fmt(1000, "0.0 kb"), "1.0 kilobyte");
    }

    #[test]
    fn negative_values_share_the_prefix_of_their_magnitude() {
        assert_eq!(fmt(-2_684_354_560, "AiB"), "-2560 MiB");
        assert_eq!(fmt(-2_684_354_560, "#.0 SiB"), "-2.5 GiB");
    }

    #[test]
    fn no_prefix_letter_means_unscaled() {
        assert_eq!(fmt(512, "0.0 B"), "512.0 B");
        assert_eq!(fmt(512, "#,##0"), "512");
        assert_eq!(fmt(1_234_567, "#,##0"), "1,234,567");
    }

    #[test]
    fn whitespace_gap_is_preserved_verbatim() {
        assert_eq!(fmt(1024, "0  KiB"), "1  KiB");
        assert_eq!(fmt(1024, "0KiB"), "1KiB");
    }

    #[test]
    fn invalid_numeric_pattern_is_rejected() {
        let err = render_string(1, "0.0.0 KiB", UnitTable::shared()).unwrap_err();
        assert_eq!(
            err,
            FormatError::InvalidSpec {
                spec: "0.0.0 KiB".to_owned()
            }
        );
    }

    // ── custom tables and the buffer variant ─────────────────────────────

    #[test]
    fn custom_table_spellings_and_connector() {
        let table = UnitTableBuilder::new()
            .with_byte_abbrev("o")
            .with_byte_words("octet", "octets")
            .with_connectors("", " ")
            .build()
            .unwrap();
        assert_eq!(
            render_string(2_684_354_560, "", &table).unwrap(),
            "2560 Mio"
        );
        // The spelled-out byte token comes from the table too.
        assert_eq!(
            render_string(2048, "0 Kioctet", &table).unwrap(),
            "2 kibi octets"
        );
    }

    #[test]
    fn buffer_variant_reports_insufficient_space() {
        let mut buf = [0u8; 32];
        let n = render_into(&mut buf, 2_684_354_560, "", UnitTable::shared()).unwrap();
        assert_eq!(&buf[..n], b"2560 MiB");

        let mut tiny = [0u8; 4];
        let err = render_into(&mut tiny, 2_684_354_560, "", UnitTable::shared()).unwrap_err();
        assert_eq!(err, FormatError::BufferTooSmall);
    }
}
