/// Scale resolution: choosing the divisor for a magnitude.
use crate::unit::Prefix;

/// How the formatter chooses its divisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScaleMode {
    /// Factor 1, no prefix.
    Byte,
    /// A caller-named prefix, applied unconditionally.
    Explicit(Prefix),
    /// Largest factor that divides the magnitude with zero remainder.
    AutoExact,
    /// Largest factor not exceeding the magnitude; the quotient may be
    /// fractional.
    AutoShortest,
}

/// Resolve `magnitude` against `mode`, scanning the power-of-1000 factor
/// ladder when `decimal` is set and the power-of-1024 ladder otherwise.
/// The two ladders are never mixed within one resolution.
///
/// Callers pass `value.unsigned_abs()` so negative sizes select the same
/// prefix as their positive counterparts. Magnitude 0 always resolves to
/// byte/no-prefix. Only comparison and division happen here, so the
/// result cannot overflow.
pub(crate) fn resolve(magnitude: u64, mode: ScaleMode, decimal: bool) -> (u64, Option<Prefix>) {
    let factor = |prefix: Prefix| {
        if decimal {
            prefix.decimal_factor()
        } else {
            prefix.binary_factor()
        }
    };

    match mode {
        ScaleMode::Byte => (1, None),
        ScaleMode::Explicit(prefix) => (factor(prefix), Some(prefix)),
        ScaleMode::AutoExact => {
            for prefix in Prefix::DESCENDING {
                let f = factor(prefix);
                if f <= magnitude && magnitude % f == 0 {
                    return (f, Some(prefix));
                }
            }
            (1, None)
        }
        ScaleMode::AutoShortest => {
            for prefix in Prefix::DESCENDING {
                let f = factor(prefix);
                if f <= magnitude {
                    return (f, Some(prefix));
                }
            }
            (1, None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIB: u64 = 1 << 20;
    const GIB: u64 = 1 << 30;

    #[test]
    fn zero_resolves_to_byte() {
        assert_eq!(resolve(0, ScaleMode::AutoExact, false), (1, None));
        assert_eq!(resolve(0, ScaleMode::AutoShortest, false), (1, None));
        assert_eq!(resolve(0, ScaleMode::AutoShortest, true), (1, None));
    }

    #[test]
    fn auto_exact_picks_largest_factor_with_zero_remainder() {
        // 2.5 GiB is not a whole number of GiB, but is exactly 2560 MiB.
        let v = 2560 * MIB;
        assert_eq!(resolve(v, ScaleMode::AutoExact, false), (MIB, Some(Prefix::Mega)));
        assert_eq!(
            resolve(3 * GIB, ScaleMode::AutoExact, false),
            (GIB, Some(Prefix::Giga))
        );
    }

    #[test]
    fn auto_exact_falls_back_to_byte() {
        assert_eq!(resolve(1023, ScaleMode::AutoExact, false), (1, None));
        // Divisible by 10 but not by 1000: no decimal prefix qualifies.
        assert_eq!(resolve(2_684_354_560, ScaleMode::AutoExact, true), (1, None));
    }

    #[test]
    fn auto_shortest_allows_fractional_quotients() {
        let v = 2560 * MIB;
        assert_eq!(
            resolve(v, ScaleMode::AutoShortest, false),
            (GIB, Some(Prefix::Giga))
        );
    }

    #[test]
    fn auto_shortest_below_smallest_factor_is_byte() {
        assert_eq!(resolve(1023, ScaleMode::AutoShortest, false), (1, None));
        assert_eq!(resolve(999, ScaleMode::AutoShortest, true), (1, None));
        assert_eq!(
            resolve(1000, ScaleMode::AutoShortest, true),
            (1000, Some(Prefix::Kilo))
        );
    }

    #[test]
    fn explicit_ignores_magnitude() {
        assert_eq!(
            resolve(1, ScaleMode::Explicit(Prefix::Tera), false),
            (1 << 40, Some(Prefix::Tera))
        );
        assert_eq!(
            resolve(1, ScaleMode::Explicit(Prefix::Tera), true),
            (1_000_000_000_000, Some(Prefix::Tera))
        );
        assert_eq!(resolve(u64::MAX, ScaleMode::Byte, false), (1, None));
    }

    #[test]
    fn top_of_range_selects_exbi() {
        // i64::MAX magnitude: auto-shortest must reach the exa rung.
        let v = i64::MAX as u64;
        assert_eq!(
            resolve(v, ScaleMode::AutoShortest, false),
            (1 << 60, Some(Prefix::Exa))
        );
    }
}
