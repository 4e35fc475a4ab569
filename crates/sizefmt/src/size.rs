/// The byte-count value type and its public parse/format surface.
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{FormatError, ParseError};
use crate::format;
use crate::parse::{self, ParseOptions};
use crate::unit::UnitTable;

/// Specifier for the persisted string form: auto-exact, binary,
/// abbreviated, no separator, e.g. `2560MiB`.
const WIRE_SPEC: &str = "0AiB";

/// An integral count of bytes.
///
/// A thin wrapper over `i64`; negative counts are legal and denote
/// deltas. There is no internal scaling state: prefixes exist only in the
/// textual representations.
///
/// ```
/// use sizefmt::ByteSize;
///
/// let size = ByteSize::parse("2.5 GiB")?;
/// assert_eq!(size.bytes(), 2_684_354_560);
/// assert_eq!(size.to_string(), "2560 MiB");
/// assert_eq!(size.format("#.0 SiB")?.as_str(), "2.5 GiB");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ByteSize(i64);

impl ByteSize {
    pub const ZERO: ByteSize = ByteSize(0);
    pub const MIN: ByteSize = ByteSize(i64::MIN);
    pub const MAX: ByteSize = ByteSize(i64::MAX);

    pub const fn new(bytes: i64) -> ByteSize {
        ByteSize(bytes)
    }

    /// The raw byte count.
    pub const fn bytes(self) -> i64 {
        self.0
    }

    // Power-of-1024 constructors.
    pub const fn from_kib(n: i64) -> ByteSize {
        ByteSize(n * (1 << 10))
    }
    pub const fn from_mib(n: i64) -> ByteSize {
        ByteSize(n * (1 << 20))
    }
    pub const fn from_gib(n: i64) -> ByteSize {
        ByteSize(n * (1 << 30))
    }
    pub const fn from_tib(n: i64) -> ByteSize {
        ByteSize(n * (1 << 40))
    }
    pub const fn from_pib(n: i64) -> ByteSize {
        ByteSize(n * (1 << 50))
    }
    pub const fn from_eib(n: i64) -> ByteSize {
        ByteSize(n * (1 << 60))
    }

    // Power-of-1000 constructors.
    pub const fn from_kb(n: i64) -> ByteSize {
        ByteSize(n * 1_000)
    }
    pub const fn from_mb(n: i64) -> ByteSize {
        ByteSize(n * 1_000_000)
    }
    pub const fn from_gb(n: i64) -> ByteSize {
        ByteSize(n * 1_000_000_000)
    }
    pub const fn from_tb(n: i64) -> ByteSize {
        ByteSize(n * 1_000_000_000_000)
    }
    pub const fn from_pb(n: i64) -> ByteSize {
        ByteSize(n * 1_000_000_000_000_000)
    }
    pub const fn from_eb(n: i64) -> ByteSize {
        ByteSize(n * 1_000_000_000_000_000_000)
    }

    /// Parse a size with the default options and the shared unit table.
    ///
    /// Empty input parses as zero; see [`ParseOptions`] for the SI-mode
    /// and spelling switches.
    pub fn parse(text: &str) -> Result<ByteSize, ParseError> {
        ByteSize::parse_with(text, ParseOptions::new(), UnitTable::shared())
    }

    /// Parse a size with explicit options and unit table.
    pub fn parse_with(
        text: &str,
        options: ParseOptions,
        table: &UnitTable,
    ) -> Result<ByteSize, ParseError> {
        parse::parse_size(text, options, table).map(ByteSize)
    }

    /// Render through a format specifier with the shared unit table.
    pub fn format(self, spec: &str) -> Result<String, FormatError> {
        self.format_with(spec, UnitTable::shared())
    }

    /// Render through a format specifier with an explicit unit table.
    pub fn format_with(self, spec: &str, table: &UnitTable) -> Result<String, FormatError> {
        format::render_string(self.0, spec, table)
    }

    /// Render into a caller-supplied buffer without allocating the
    /// output; returns the number of bytes written, or
    /// [`FormatError::BufferTooSmall`].
    pub fn format_into(
        self,
        buf: &mut [u8],
        spec: &str,
        table: &UnitTable,
    ) -> Result<usize, FormatError> {
        format::render_into(buf, self.0, spec, table)
    }

    pub const fn checked_add(self, rhs: ByteSize) -> Option<ByteSize> {
        match self.0.checked_add(rhs.0) {
            Some(v) => Some(ByteSize(v)),
            None => None,
        }
    }

    pub const fn checked_sub(self, rhs: ByteSize) -> Option<ByteSize> {
        match self.0.checked_sub(rhs.0) {
            Some(v) => Some(ByteSize(v)),
            None => None,
        }
    }
}

impl fmt::Display for ByteSize {
    /// The default rendering: auto-exact, binary, abbreviated, e.g.
    /// `2560 MiB`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format::write_size(f, self.0, "", UnitTable::shared()).map_err(|_| fmt::Error)
    }
}

impl FromStr for ByteSize {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<ByteSize, ParseError> {
        ByteSize::parse(s)
    }
}

impl From<i64> for ByteSize {
    fn from(bytes: i64) -> ByteSize {
        ByteSize(bytes)
    }
}

impl From<ByteSize> for i64 {
    fn from(size: ByteSize) -> i64 {
        size.0
    }
}

impl Add for ByteSize {
    type Output = ByteSize;

    fn add(self, rhs: ByteSize) -> ByteSize {
        ByteSize(self.0 + rhs.0)
    }
}

impl AddAssign for ByteSize {
    fn add_assign(&mut self, rhs: ByteSize) {
        self.0 += rhs.0;
    }
}

impl Sub for ByteSize {
    type Output = ByteSize;

    fn sub(self, rhs: ByteSize) -> ByteSize {
        ByteSize(self.0 - rhs.0)
    }
}

impl SubAssign for ByteSize {
    fn sub_assign(&mut self, rhs: ByteSize) {
        self.0 -= rhs.0;
    }
}

impl Neg for ByteSize {
    type Output = ByteSize;

    fn neg(self) -> ByteSize {
        ByteSize(-self.0)
    }
}

impl Sum for ByteSize {
    fn sum<I: Iterator<Item = ByteSize>>(iter: I) -> ByteSize {
        iter.fold(ByteSize::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a ByteSize> for ByteSize {
    fn sum<I: Iterator<Item = &'a ByteSize>>(iter: I) -> ByteSize {
        iter.copied().sum()
    }
}

impl Serialize for ByteSize {
    /// Serializes as the wire string, e.g. `"2560MiB"`, using the shared
    /// table.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let text = format::render_string(self.0, WIRE_SPEC, UnitTable::shared())
            .map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&text)
    }
}

impl<'de> Deserialize<'de> for ByteSize {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<ByteSize, D::Error> {
        struct WireVisitor;

        impl de::Visitor<'_> for WireVisitor {
            type Value = ByteSize;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a byte size string such as \"2560MiB\"")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<ByteSize, E> {
                ByteSize::parse(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(WireVisitor)
    }
}
