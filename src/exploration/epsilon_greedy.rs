use rand::Rng;

use crate::decay::{self, Decay};

use super::Choice;

/// Epsilon greedy exploration policy with time-decaying epsilon threshold
#[derive(Debug, Clone)]
pub struct EpsilonGreedy<D: Decay> {
    epsilon: D,
}

impl<D: Decay> EpsilonGreedy<D> {
    /// Initialize epsilon greedy policy with a decay strategy
    pub fn new(decay: D) -> Self {
        Self { epsilon: decay }
    }

    /// The exploration probability at timestep `t`
    pub fn epsilon(&self, t: u64) -> f64 {
        self.epsilon.evaluate(t as f64)
    }

    /// Invoke epsilon greedy policy for timestep `t`, drawing from `rng`
    ///
    /// Explores iff a uniform draw from `[0, 1)` falls below epsilon.
    pub fn choose<R: Rng + ?Sized>(&self, t: u64, rng: &mut R) -> Choice {
        if rng.gen::<f64>() < self.epsilon(t) {
            Choice::Explore
        } else {
            Choice::Exploit
        }
    }
}

impl Default for EpsilonGreedy<decay::Reciprocal> {
    fn default() -> Self {
        Self::new(decay::Reciprocal::default())
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn always_explores_at_first_timestep() {
        let policy = EpsilonGreedy::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            assert_eq!(policy.choose(1, &mut rng), Choice::Explore);
        }
    }

    #[test]
    fn constant_zero_never_explores() {
        let policy = EpsilonGreedy::new(decay::Constant::new(0.0));
        let mut rng = StdRng::seed_from_u64(7);
        for t in 1..1000 {
            assert_eq!(policy.choose(t, &mut rng), Choice::Exploit);
        }
    }

    #[test]
    fn exploration_becomes_rare() {
        let policy = EpsilonGreedy::default();
        let mut rng = StdRng::seed_from_u64(11);
        let explored = (10_000..20_000)
            .filter(|&t| policy.choose(t, &mut rng) == Choice::Explore)
            .count();
        // Expected count is sum(1/t) over the range, roughly 0.69
        assert!(explored < 10, "explored {explored} times late in the run");
        assert_eq!(policy.epsilon(4), 0.25);
    }
}
