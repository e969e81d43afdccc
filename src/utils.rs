use crate::error::{AllocationError, Result};

/// Largest n whose factorial fits in a u64
pub(crate) const FACTORIAL_LIMIT: usize = 20;

/// Exact factorials 0..=n, built per computation
#[derive(Debug, Clone)]
pub(crate) struct FactorialTable {
    facts: Vec<u64>,
}

impl FactorialTable {
    pub(crate) fn new(n: usize) -> Result<Self> {
        let mut facts = Vec::with_capacity(n + 1);
        facts.push(1u64);
        for i in 1..=n {
            let next = facts[i - 1]
                .checked_mul(i as u64)
                .ok_or(AllocationError::TooManyConsumers {
                    count: n,
                    limit: FACTORIAL_LIMIT,
                })?;
            facts.push(next);
        }
        Ok(Self { facts })
    }

    pub(crate) fn get(&self, n: usize) -> u64 {
        self.facts[n]
    }

    /// Probability that exactly a given set of `size` players arrives before
    /// a focal player among `n`: size! * (n - size - 1)! / n!
    pub(crate) fn shapley_weight(&self, size: usize, n: usize) -> f64 {
        // size! * (n - size - 1)! <= (n - 1)!, so the product cannot overflow
        let numerator = self.get(size) * self.get(n - size - 1);
        numerator as f64 / self.get(n) as f64
    }
}
