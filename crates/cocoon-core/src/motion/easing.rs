//! Easing curves: progress in [0, 1] to eased progress in [0, 1].

use crate::config::EasingType;

impl EasingType {
    /// Eased value of `t`; input outside [0, 1] is clamped
    #[inline]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingType::None => {
                if t < 1.0 {
                    0.0
                } else {
                    1.0
                }
            }
            EasingType::Linear => t,
            EasingType::Cubic => cubic_ease_out(t),
            EasingType::Quintic => 1.0 - (1.0 - t).powi(5),
            EasingType::EaseOut if t >= 1.0 => 1.0,
            EasingType::EaseOut => 1.0 - 2.0_f64.powf(-10.0 * t),
        }
    }
}

/// `1 - (1-t)^3`, exact at both ends
#[inline]
pub fn cubic_ease_out(t: f64) -> f64 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURVES: [EasingType; 4] = [
        EasingType::Linear,
        EasingType::Cubic,
        EasingType::Quintic,
        EasingType::EaseOut,
    ];

    #[test]
    fn test_endpoints() {
        for easing in CURVES {
            assert_eq!(easing.apply(0.0), 0.0, "{:?}", easing);
            assert_eq!(easing.apply(1.0), 1.0, "{:?}", easing);
        }
        assert_eq!(EasingType::None.apply(0.99), 0.0);
        assert_eq!(EasingType::None.apply(1.0), 1.0);
    }

    #[test]
    fn test_cubic_values() {
        assert_eq!(cubic_ease_out(0.5), 0.875);
        assert_eq!(EasingType::Cubic.apply(0.5), 0.875);
        // input is clamped
        assert_eq!(EasingType::Cubic.apply(1.7), 1.0);
        assert_eq!(EasingType::Cubic.apply(-0.3), 0.0);
    }

    #[test]
    fn test_monotonic() {
        for easing in CURVES {
            let samples: Vec<f64> = (0..=20).map(|i| easing.apply(i as f64 / 20.0)).collect();
            assert!(
                samples.windows(2).all(|w| w[0] <= w[1]),
                "{:?} not monotonic",
                easing
            );
        }
    }
}
