use crate::{
    characteristic::ResourceGame,
    coalition::{Coalition, CoalitionEnumerator},
    error::{AllocationError, Result},
    types::{Allocation, AllocationMapping, AllocationWarning, Consumer, Consumers},
    utils::{FACTORIAL_LIMIT, FactorialTable},
    validation::check_inputs,
};
use derive_builder::Builder;
use log::{debug, warn};

/// Exact Shapley allocation of a resource pool among consumers
#[derive(Debug, Clone, Builder)]
pub struct ShapleyAllocator {
    consumers: Consumers,
    pool: f64,
    /// Upper bound on consumers for exact enumeration
    #[builder(default = "FACTORIAL_LIMIT")]
    max_consumers: usize,
}

impl ShapleyAllocator {
    pub fn new(consumers: Consumers, pool: f64) -> Self {
        Self {
            consumers,
            pool,
            max_consumers: FACTORIAL_LIMIT,
        }
    }

    /// Compute the Shapley allocation for every consumer
    pub fn compute(&self) -> Result<Allocation> {
        check_inputs(&self.consumers, self.pool)?;

        let n_consumers = self.consumers.len();
        if n_consumers > self.max_consumers {
            return Err(AllocationError::TooManyConsumers {
                count: n_consumers,
                limit: self.max_consumers,
            });
        }
        if n_consumers == 0 {
            return Ok(Allocation::default());
        }

        let enumerator = CoalitionEnumerator::with_size(n_consumers)?;
        let factorials = FactorialTable::new(n_consumers)?;

        let demands: Vec<f64> = self.consumers.iter().map(|c| c.demand).collect();
        let game = ResourceGame::new(&demands, self.pool);

        debug!(
            "Evaluating {} coalitions for {} consumers (pool {})",
            enumerator.coalition_count(),
            n_consumers,
            self.pool
        );
        let values = game.coalition_values(&enumerator);
        let grand_value = values[Coalition::grand(n_consumers).index()];

        let raw = raw_shapley_values(&values, &enumerator, &factorials);

        match normalize(&raw, grand_value) {
            Some(scaled) => Ok(Allocation::new(to_mapping(&self.consumers, scaled))),
            None => {
                warn!(
                    "Raw Shapley values sum to zero for {n_consumers} consumers; allocating nothing"
                );
                let zeros = vec![0.0; n_consumers];
                Ok(Allocation::new(to_mapping(&self.consumers, zeros))
                    .with_warning(AllocationWarning::DegenerateShapleySum))
            }
        }
    }
}

/// Shapley allocation with default settings
pub fn allocate(consumers: &[Consumer], pool: f64) -> Result<Allocation> {
    ShapleyAllocator::new(consumers.to_vec(), pool).compute()
}

/// Weighted marginal contributions for every consumer, before normalization
fn raw_shapley_values(
    coalition_values: &[f64],
    enumerator: &CoalitionEnumerator,
    factorials: &FactorialTable,
) -> Vec<f64> {
    let n = enumerator.consumer_count();

    (0..n)
        .map(|focal| {
            enumerator
                .excluding(focal)
                .map(|without| {
                    let with_value = coalition_values[without.with(focal).index()];
                    let without_value = coalition_values[without.index()];
                    factorials.shapley_weight(without.size(), n) * (with_value - without_value)
                })
                .sum::<f64>()
        })
        .collect()
}

/// Scale `raw` so it sums to `target`, keeping ratios. None when the raw sum
/// is not positive.
fn normalize(raw: &[f64], target: f64) -> Option<Vec<f64>> {
    let raw_sum: f64 = raw.iter().sum();
    if raw_sum <= 0.0 {
        return None;
    }
    let scale = target / raw_sum;
    Some(raw.iter().map(|v| v * scale).collect())
}

fn to_mapping(consumers: &[Consumer], amounts: Vec<f64>) -> AllocationMapping {
    consumers
        .iter()
        .map(|c| c.id.clone())
        .zip(amounts)
        .collect()
}
