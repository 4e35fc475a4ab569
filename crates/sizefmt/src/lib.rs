/// sizefmt — format and parse human-readable byte sizes.
///
/// Converts between an integral count of bytes and text using binary
/// (IEC, `KiB`) and decimal (SI, `kB`) prefixes, abbreviated or spelled
/// out, driven by a compact format-string language. All arithmetic is
/// integer-exact, so every `i64` value round-trips through its textual
/// form without precision loss.
///
/// # Modules
///
/// - [`unit`] — prefix factors, unit spellings, and custom unit tables.
/// - [`parse`] — parse options (SI interpretation, accepted spellings).
/// - [`size`] — the [`ByteSize`] value and its parse/format surface.
/// - [`error`] — the error taxonomy.
///
/// # Format specifiers
///
/// Read right to left: an optional byte token (`B` abbreviated; `b`,
/// `byte`, `bytes` spelled out), an optional `i` marker forcing IEC
/// binary units, one prefix letter (`K M G T P`, or `A` = largest exact
/// factor, `S` = largest factor ≤ value; uppercase = powers of 1024,
/// lowercase = powers of 1000), and a numeric sub-format (`0`, `#`, `.`,
/// `,` grouping) in front. Whitespace between number and unit is kept
/// verbatim.
///
/// ```
/// use sizefmt::ByteSize;
///
/// let size = ByteSize::new(2_684_354_560);
/// assert_eq!(size.to_string(), "2560 MiB");
/// assert_eq!(size.format("#.0 SiB")?.as_str(), "2.5 GiB");
/// assert_eq!(size.format("0.0 sb")?.as_str(), "2.7 gigabytes");
/// assert_eq!(ByteSize::parse("5G")?.bytes(), 5_368_709_120);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub mod error;
pub mod parse;
pub mod size;
pub mod unit;

mod format;
mod scale;

pub use error::{FormatError, ParseError, TableError};
pub use parse::{ParseOptions, SiMode, UnitForm};
pub use size::ByteSize;
pub use unit::{Prefix, UnitTable, UnitTableBuilder};
