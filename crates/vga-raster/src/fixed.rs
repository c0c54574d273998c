//! Q16.16 fixed point and the sin(acos(x)) lookup table used by the circle
//! rasteriser.
//!
//! For a unit circle, `sin(acos(x))` is the height above the x axis at `x`.
//! The table samples it at 1024 points across `0..1`, so a circle step needs
//! one multiply and one shift instead of a trig call.

use std::sync::LazyLock;

/// Q16.16 fixed-point number: `value / 65536`.
pub type Fixed = i32;

/// 1.0 in Q16.16.
pub const FIXED_ONE: Fixed = 0x1_0000;

/// Entries in the sin(acos) table.
pub const SIN_ACOS_LEN: usize = 1024;

/// Shift from a Q16.16 fraction in `0..1` to a table index.
const INDEX_SHIFT: u32 = 6;

static SIN_ACOS: LazyLock<[Fixed; SIN_ACOS_LEN]> = LazyLock::new(|| {
    let mut table = [0; SIN_ACOS_LEN];
    for (i, entry) in table.iter_mut().enumerate() {
        let x = i as f64 / SIN_ACOS_LEN as f64;
        *entry = (x.acos().sin() * f64::from(FIXED_ONE)) as Fixed;
    }
    table
});

/// `sin(acos(i / 1024))` in Q16.16 for `i` in `0..1024`. Built on first use.
#[must_use]
pub fn sin_acos_table() -> &'static [Fixed; SIN_ACOS_LEN] {
    &SIN_ACOS
}

/// Table lookup for a Q16.16 fraction. `n >> 6` selects one of 1024
/// buckets; anything past the end reads the last entry.
#[must_use]
pub fn sin_acos(n: Fixed) -> Fixed {
    let index = (n.max(0) >> INDEX_SHIFT) as usize;
    SIN_ACOS[index.min(SIN_ACOS_LEN - 1)]
}

/// `1 / value` in Q16.16, truncated. `value` must be non-zero.
#[must_use]
pub fn reciprocal(value: u16) -> Fixed {
    (f64::from(FIXED_ONE) / f64::from(value)) as Fixed
}

/// Integer part of `value * f`.
#[must_use]
pub fn scale(value: u16, f: Fixed) -> isize {
    ((i64::from(value) * i64::from(f)) >> 16) as isize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_endpoints() {
        let table = sin_acos_table();
        assert_eq!(table[0], FIXED_ONE);
        // sin(acos(1023/1024)) ~= 0.0442
        assert!(table[SIN_ACOS_LEN - 1] > 2800 && table[SIN_ACOS_LEN - 1] < 3000);
    }

    #[test]
    fn table_is_monotonic_decreasing() {
        let table = sin_acos_table();
        assert!(table.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn midpoint_matches_trig() {
        // i = 512 -> x = 0.5 -> sin(acos(0.5)) = sqrt(3)/2
        let expected = ((3.0f64).sqrt() / 2.0 * 65536.0) as Fixed;
        assert_eq!(sin_acos_table()[512], expected);
    }

    #[test]
    fn lookup_clamps_past_end() {
        assert_eq!(sin_acos(FIXED_ONE), sin_acos_table()[SIN_ACOS_LEN - 1]);
        assert_eq!(sin_acos(FIXED_ONE * 4), sin_acos_table()[SIN_ACOS_LEN - 1]);
        assert_eq!(sin_acos(0), FIXED_ONE);
    }

    #[test]
    fn reciprocal_and_scale() {
        assert_eq!(reciprocal(1), FIXED_ONE);
        assert_eq!(reciprocal(2), FIXED_ONE / 2);
        assert_eq!(reciprocal(3), 21845);
        assert_eq!(scale(20, FIXED_ONE), 20);
        assert_eq!(scale(20, FIXED_ONE / 2), 10);
    }
}
