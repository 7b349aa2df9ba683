//! Asymmetric rise/decay smoothing.
//!
//! Meter-style displays look jittery if every value is drawn as-is and
//! sluggish if everything is averaged. The compromise used here: a rising
//! value passes through unchanged (instant attack), a falling value decays
//! as a truncated weighted blend of old and new.

/// Weight applied to the previous value on a falling signal
pub const DECAY_OLD_WEIGHT: u16 = 6;

/// Weight applied to the new value on a falling signal
pub const DECAY_NEW_WEIGHT: u16 = 5;

/// Divisor for the decay blend (sum of the weights)
pub const DECAY_DIVISOR: u16 = DECAY_OLD_WEIGHT + DECAY_NEW_WEIGHT;

/// Smooth a meter value: instant rise, weighted decay.
///
/// Integer truncation is intentional - bar heights are pixel counts, and
/// the truncated blend is what gives the characteristic slow fall. When
/// `new == old` the blend is exact and returns `old` unchanged.
pub fn smooth(old: u8, new: u8) -> u8 {
    if new > old {
        new
    } else {
        ((old as u16 * DECAY_OLD_WEIGHT + new as u16 * DECAY_NEW_WEIGHT) / DECAY_DIVISOR) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rising_passes_through() {
        assert_eq!(smooth(0, 255), 255);
        assert_eq!(smooth(10, 11), 11);
        assert_eq!(smooth(100, 200), 200);
    }

    #[test]
    fn test_equal_is_stable() {
        for v in [0u8, 1, 63, 127, 255] {
            assert_eq!(smooth(v, v), v);
        }
    }

    #[test]
    fn test_decay_example() {
        // (60*6 + 0*5) / 11 = 360 / 11 = 32 (truncated)
        assert_eq!(smooth(60, 0), 32);
    }

    #[test]
    fn test_decay_stays_between_new_and_old() {
        for old in 1..=255u8 {
            for new in 0..old {
                let s = smooth(old, new);
                assert!(s >= new, "smooth({old}, {new}) = {s} fell below new");
                assert!(s <= old, "smooth({old}, {new}) = {s} rose above old");
            }
        }
    }

    #[test]
    fn test_repeated_decay_reaches_zero() {
        // The truncated blend must not get stuck above the target
        let mut v = 255u8;
        for _ in 0..100 {
            v = smooth(v, 0);
        }
        assert_eq!(v, 0);
    }
}
