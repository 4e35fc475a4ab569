/// Unit spellings and prefix factors.
///
/// [`UnitTable`] is the single source of unit text for both the formatter
/// and the parser: prefix spellings (abbreviated and spelled out), the
/// byte words, the prefix↔byte connector, and the case policy applied when
/// matching unit tokens in input text.
///
/// Tables are immutable. Customization goes through [`UnitTableBuilder`],
/// which validates on [`build`](UnitTableBuilder::build); the process-wide
/// English default is created once at first use via [`UnitTable::shared`]
/// and never mutated, so sharing it across threads needs no locking.
use compact_str::CompactString;
use once_cell::sync::Lazy;

use crate::error::TableError;

/// The six scaling prefixes, kilo through exa.
///
/// A prefix names a *position* in the factor ladder, not a factor: the
/// binary reading is an exact power of 1024 and the decimal reading an
/// exact power of 1000, selected by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prefix {
    Kilo,
    Mega,
    Giga,
    Tera,
    Peta,
    Exa,
}

impl Prefix {
    /// Scan order for automatic scale selection: largest factor first.
    pub(crate) const DESCENDING: [Prefix; 6] = [
        Prefix::Exa,
        Prefix::Peta,
        Prefix::Tera,
        Prefix::Giga,
        Prefix::Mega,
        Prefix::Kilo,
    ];

    /// Ladder position, 1 (kilo) through 6 (exa).
    const fn rank(self) -> u32 {
        match self {
            Prefix::Kilo => 1,
            Prefix::Mega => 2,
            Prefix::Giga => 3,
            Prefix::Tera => 4,
            Prefix::Peta => 5,
            Prefix::Exa => 6,
        }
    }

    pub(crate) const fn slot(self) -> usize {
        (self.rank() - 1) as usize
    }

    /// The exact power-of-1024 factor (Ki..Ei). Always 1024^n regardless
    /// of any parse or format option.
    pub const fn binary_factor(self) -> u64 {
        1u64 << (10 * self.rank())
    }

    /// The exact power-of-1000 factor (k..E).
    pub const fn decimal_factor(self) -> u64 {
        match self {
            Prefix::Kilo => 1_000,
            Prefix::Mega => 1_000_000,
            Prefix::Giga => 1_000_000_000,
            Prefix::Tera => 1_000_000_000_000,
            Prefix::Peta => 1_000_000_000_000_000,
            Prefix::Exa => 1_000_000_000_000_000_000,
        }
    }
}

// Default English spellings, kilo..exa order.
const BINARY_ABBREV: [&str; 6] = ["Ki", "Mi", "Gi", "Ti", "Pi", "Ei"];
const BINARY_WORD: [&str; 6] = ["kibi", "mebi", "gibi", "tebi", "pebi", "exbi"];
const SI_ABBREV: [&str; 6] = ["K", "M", "G", "T", "P", "E"];
const SI_WORD: [&str; 6] = ["kilo", "mega", "giga", "tera", "peta", "exa"];

/// Immutable table of unit spellings.
///
/// The abbreviated kilo spelling is stored twice: `K` for the
/// power-of-1024 reading and `k` for the power-of-1000 reading. Every
/// other abbreviated SI spelling is shared between the two readings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitTable {
    binary_abbrev: [CompactString; 6],
    binary_word: [CompactString; 6],
    si_abbrev: [CompactString; 6],
    decimal_kilo_abbrev: CompactString,
    si_word: [CompactString; 6],
    byte_abbrev: CompactString,
    byte_singular: CompactString,
    byte_plural: CompactString,
    connector_abbrev: CompactString,
    connector_word: CompactString,
    case_insensitive: bool,
}

static SHARED: Lazy<UnitTable> = Lazy::new(UnitTable::english);

impl UnitTable {
    /// The process-wide default table: English spellings, case-insensitive
    /// matching. Created on first use and never mutated afterwards.
    pub fn shared() -> &'static UnitTable {
        &SHARED
    }

    /// A fresh copy of the default English table.
    pub fn english() -> UnitTable {
        UnitTable {
            binary_abbrev: BINARY_ABBREV.map(CompactString::new),
            binary_word: BINARY_WORD.map(CompactString::new),
            si_abbrev: SI_ABBREV.map(CompactString::new),
            decimal_kilo_abbrev: CompactString::new("k"),
            si_word: SI_WORD.map(CompactString::new),
            byte_abbrev: CompactString::new("B"),
            byte_singular: CompactString::new("byte"),
            byte_plural: CompactString::new("bytes"),
            connector_abbrev: CompactString::new(""),
            connector_word: CompactString::new(""),
            case_insensitive: true,
        }
    }

    /// A fresh mutable copy of this table, for customization.
    pub fn to_builder(&self) -> UnitTableBuilder {
        UnitTableBuilder {
            table: self.clone(),
        }
    }

    /// Abbreviated binary spelling (`Ki`..`Ei`).
    pub fn binary_abbrev(&self, prefix: Prefix) -> &str {
        &self.binary_abbrev[prefix.slot()]
    }

    /// Spelled-out binary prefix (`kibi`..`exbi`).
    pub fn binary_word(&self, prefix: Prefix) -> &str {
        &self.binary_word[prefix.slot()]
    }

    /// Abbreviated SI-style spelling. Kilo has two conventional forms:
    /// `K` for the power-of-1024 reading, `k` for power-of-1000.
    pub fn si_abbrev(&self, prefix: Prefix, decimal: bool) -> &str {
        if decimal && prefix == Prefix::Kilo {
            &self.decimal_kilo_abbrev
        } else {
            &self.si_abbrev[prefix.slot()]
        }
    }

    /// Spelled-out SI prefix (`kilo`..`exa`).
    pub fn si_word(&self, prefix: Prefix) -> &str {
        &self.si_word[prefix.slot()]
    }

    /// The abbreviated byte unit (`B`); singular and plural share it.
    pub fn byte_abbrev(&self) -> &str {
        &self.byte_abbrev
    }

    /// The spelled-out byte unit.
    pub fn byte_word(&self, plural: bool) -> &str {
        if plural {
            &self.byte_plural
        } else {
            &self.byte_singular
        }
    }

    /// Text inserted between a prefix and the byte unit. Empty in the
    /// default table.
    pub fn connector(&self, abbreviated: bool) -> &str {
        if abbreviated {
            &self.connector_abbrev
        } else {
            &self.connector_word
        }
    }

    /// Whether unit tokens in input text match case-insensitively
    /// (ASCII-only folding; full Unicode normalization is out of scope).
    pub fn case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    /// Strip `token` from the end of `text` under this table's case
    /// policy. Returns the remaining head on a match.
    pub(crate) fn strip_suffix_token<'a>(&self, text: &'a str, token: &str) -> Option<&'a str> {
        if token.is_empty() || text.len() < token.len() {
            return None;
        }
        let split = text.len() - token.len();
        if !text.is_char_boundary(split) {
            return None;
        }
        let (head, tail) = text.split_at(split);
        let matched = if self.case_insensitive {
            tail.eq_ignore_ascii_case(token)
        } else {
            tail == token
        };
        matched.then_some(head)
    }
}

impl Default for UnitTable {
    fn default() -> Self {
        UnitTable::english()
    }
}

/// Mutable builder for a custom [`UnitTable`].
///
/// Starts from the English defaults; every `with_` setter replaces one
/// slot. [`build`](Self::build) validates that no prefix or byte-word slot
/// is empty and returns the immutable table.
#[derive(Debug, Clone)]
pub struct UnitTableBuilder {
    table: UnitTable,
}

impl UnitTableBuilder {
    pub fn new() -> Self {
        UnitTable::english().to_builder()
    }

    pub fn with_binary_abbrev(mut self, prefix: Prefix, s: impl Into<CompactString>) -> Self {
        self.table.binary_abbrev[prefix.slot()] = s.into();
        self
    }

    pub fn with_binary_word(mut self, prefix: Prefix, s: impl Into<CompactString>) -> Self {
        self.table.binary_word[prefix.slot()] = s.into();
        self
    }

    /// Set the abbreviated SI spelling used for the power-of-1024 reading
    /// (and, for every prefix except kilo, the power-of-1000 reading too).
    pub fn with_si_abbrev(mut self, prefix: Prefix, s: impl Into<CompactString>) -> Self {
        self.table.si_abbrev[prefix.slot()] = s.into();
        self
    }

    /// Set the abbreviated kilo spelling used for the power-of-1000
    /// reading (`k` in the default table).
    pub fn with_decimal_kilo_abbrev(mut self, s: impl Into<CompactString>) -> Self {
        self.table.decimal_kilo_abbrev = s.into();
        self
    }

    pub fn with_si_word(mut self, prefix: Prefix, s: impl Into<CompactString>) -> Self {
        self.table.si_word[prefix.slot()] = s.into();
        self
    }

    pub fn with_byte_abbrev(mut self, s: impl Into<CompactString>) -> Self {
        self.table.byte_abbrev = s.into();
        self
    }

    pub fn with_byte_words(
        mut self,
        singular: impl Into<CompactString>,
        plural: impl Into<CompactString>,
    ) -> Self {
        self.table.byte_singular = singular.into();
        self.table.byte_plural = plural.into();
        self
    }

    pub fn with_connectors(
        mut self,
        abbreviated: impl Into<CompactString>,
        spelled_out: impl Into<CompactString>,
    ) -> Self {
        self.table.connector_abbrev = abbreviated.into();
        self.table.connector_word = spelled_out.into();
        self
    }

    /// Require exact-case unit matching during parsing.
    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.table.case_insensitive = !case_sensitive;
        self
    }

    /// Validate and produce the immutable table.
    pub fn build(self) -> Result<UnitTable, TableError> {
        let t = &self.table;
        let slots: [(&str, &CompactString); 4] = [
            ("byte abbreviation", &t.byte_abbrev),
            ("singular byte word", &t.byte_singular),
            ("plural byte word", &t.byte_plural),
            ("decimal kilo abbreviation", &t.decimal_kilo_abbrev),
        ];
        for (name, value) in slots {
            if value.is_empty() {
                return Err(TableError::EmptyUnit { slot: name });
            }
        }
        for i in 0..6 {
            if t.binary_abbrev[i].is_empty() || t.binary_word[i].is_empty() {
                return Err(TableError::EmptyUnit {
                    slot: "binary prefix",
                });
            }
            if t.si_abbrev[i].is_empty() || t.si_word[i].is_empty() {
                return Err(TableError::EmptyUnit { slot: "SI prefix" });
            }
        }
        Ok(self.table)
    }
}

impl Default for UnitTableBuilder {
    fn default() -> Self {
        UnitTableBuilder::new()
    }
}
