//! Integer hashes for per-cell rolls that don't need spatial coherence.

#[inline]
pub fn hash2(q: i32, r: i32, seed: u32) -> u32 {
    let mut h = (q as u32).wrapping_mul(0x85eb_ca6b)
        ^ (r as u32).wrapping_mul(0xc2b2_ae35)
        ^ seed.wrapping_mul(0x27d4_eb2d);
    h ^= h >> 16;
    h = h.wrapping_mul(0x7feb_352d);
    h ^= h >> 15;
    h = h.wrapping_mul(0x846c_a68b);
    h ^= h >> 16;
    h
}

/// Uniform in `[0, 1)`; 24 bits of the hash.
#[inline]
pub fn rand01(seed: u32, q: i32, r: i32, salt: u32) -> f32 {
    let h = hash2(q, r, (seed ^ salt).wrapping_add(0x9E37_79B9));
    ((h & 0x00FF_FFFF) as f32) / 16_777_216.0
}

/// Inclusive integer pick in `[lo, hi]`.
#[inline]
pub fn pick_in(seed: u32, q: i32, r: i32, salt: u32, lo: i32, hi: i32) -> i32 {
    if hi <= lo {
        return lo;
    }
    let span = (hi - lo + 1) as f32;
    (lo + (rand01(seed, q, r, salt) * span) as i32).min(hi)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rand01_stays_in_unit_interval() {
        for q in -50..50 {
            for r in -50..50 {
                let v = rand01(0xDEAD_BEEF, q, r, 7);
                assert!((0.0..1.0).contains(&v));
            }
        }
    }

    #[test]
    fn salts_give_independent_streams() {
        let same = (0..256)
            .filter(|&i| rand01(11, i, -i, 1) == rand01(11, i, -i, 2))
            .count();
        assert!(same < 4);
    }

    #[test]
    fn pick_in_covers_whole_range() {
        let mut seen = [false; 4];
        for q in 0..400 {
            let v = pick_in(3, q, 9, 0x51, 4, 7);
            assert!((4..=7).contains(&v));
            seen[(v - 4) as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
        assert_eq!(pick_in(3, 0, 0, 0, 5, 5), 5);
    }
}
