use crate::{check_interval, error::Result};

/// An implementation of a time-decaying value
pub trait Decay {
    /// Calculate value at time `t`
    fn evaluate(&self, t: f64) -> f64;
}

/// A constant value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Constant {
    value: f64,
}

impl Constant {
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl Decay for Constant {
    fn evaluate(&self, _t: f64) -> f64 {
        self.value
    }
}

/// v(t) = s / t
///
/// With the default scale of `1.0` this is the harmonic schedule used for both the exploration
/// probability and the learning rate of the driving agent. It lies in `(0, 1]` for every `t >= 1`,
/// is strictly decreasing, and never reaches zero. `t = 0` is outside its domain.
#[derive(Debug, Clone, PartialEq)]
pub struct Reciprocal {
    scale: f64,
}

impl Reciprocal {
    /// **Errors** if `scale` is not in the interval `(0, 1]`
    pub fn new(scale: f64) -> Result<Self> {
        check_interval!(scale, f64::MIN_POSITIVE..=1.0)?;
        Ok(Self { scale })
    }
}

impl Default for Reciprocal {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl Decay for Reciprocal {
    fn evaluate(&self, t: f64) -> f64 {
        debug_assert!(t >= 1.0, "reciprocal decay is undefined for t < 1");
        self.scale / t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_decay() {
        let x = Constant::new(1.0);
        assert_eq!(x.evaluate(0.0), 1.0);
        assert_eq!(x.evaluate(1.0), 1.0);
        assert_eq!(x.evaluate(1e6), 1.0);
    }

    #[test]
    fn reciprocal_decay() {
        let x = Reciprocal::default();
        assert_eq!(x.evaluate(1.0), 1.0);
        assert_eq!(x.evaluate(4.0), 0.25);

        let half = Reciprocal::new(0.5).unwrap();
        assert_eq!(half.evaluate(2.0), 0.25);
    }

    #[test]
    fn reciprocal_strictly_decreasing_in_unit_interval() {
        let x = Reciprocal::default();
        let mut prev = f64::INFINITY;
        for t in 1..=10_000 {
            let v = x.evaluate(t as f64);
            assert!(v > 0.0 && v <= 1.0, "epsilon({t}) = {v} out of (0, 1]");
            assert!(v < prev, "epsilon({t}) did not decrease");
            prev = v;
        }
    }

    #[test]
    fn reciprocal_rejects_bad_scale() {
        assert!(Reciprocal::new(0.0).is_err());
        assert!(Reciprocal::new(-1.0).is_err());
        assert!(Reciprocal::new(1.5).is_err());
        assert!(Reciprocal::new(1.0).is_ok());
    }
}
