pub const DRILL_HIT_POINTS: u32 = 10;
pub const DRILL_MISS_PENALTY: u32 = 10;
pub const CHALLENGE_POINTS: u32 = 100;

/// Apply a signed delta, flooring at zero. Returns the delta actually applied.
pub fn apply_delta(score: &mut u32, delta: i64) -> i64 {
    let before = *score as i64;
    let after = (before + delta).clamp(0, u32::MAX as i64);
    *score = after as u32;
    after - before
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_penalty_floors_at_zero() {
        let mut score = 5;
        let applied = apply_delta(&mut score, -(DRILL_MISS_PENALTY as i64));
        assert_eq!(score, 0);
        assert_eq!(applied, -5);
    }

    #[test]
    fn test_award() {
        let mut score = 0;
        assert_eq!(apply_delta(&mut score, CHALLENGE_POINTS as i64), 100);
        assert_eq!(score, 100);
    }
}
