use crate::model::Point;
use std::f64::consts::TAU;

/// Evenly spaced positions on a circle of `radius` around the origin.
///
/// Entity `i` of `k` sits at angle `2π·i/k`, so a single entity lands at
/// angle 0. No randomness is involved.
pub fn ring_positions<S: AsRef<str>>(entities: &[S], radius: f64) -> Vec<Point> {
    let k = entities.len();
    (0..k).map(|i| Point::polar(radius, ring_angle(i, k))).collect()
}

/// Angle in radians of slot `index` on a ring of `count` slots.
pub fn ring_angle(index: usize, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    TAU * index as f64 / count as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_entity_at_angle_zero() {
        let pos = ring_positions(&["Staff"], 1.5);
        assert_eq!(pos, vec![Point::new(1.5, 0.0)]);
    }

    #[test]
    fn test_positions_on_circle() {
        let names = ["a", "b", "c", "d", "e", "f", "g"];
        for p in ring_positions(&names, 1.5) {
            assert!((p.norm() - 1.5).abs() < 1e-9);
        }
    }

    #[test]
    fn test_consecutive_angle_step() {
        let names = ["a", "b", "c", "d", "e"];
        let pos = ring_positions(&names, 1.5);
        let step = TAU / 5.0;
        for pair in pos.windows(2) {
            let a0 = pair[0].y.atan2(pair[0].x);
            let a1 = pair[1].y.atan2(pair[1].x);
            let diff = (a1 - a0).rem_euclid(TAU);
            assert!((diff - step).abs() < 1e-9, "step was {}", diff);
        }
    }

    #[test]
    fn test_deterministic() {
        let names = ["x", "y", "z"];
        assert_eq!(ring_positions(&names, 1.5), ring_positions(&names, 1.5));
    }
}
