use crate::{
    error::Result,
    types::{Allocation, AllocationMapping, AllocationWarning, Consumer, Consumers},
    validation::check_inputs,
};
use derive_builder::Builder;
use log::{debug, warn};

/// Baseline allocation in proportion to each consumer's share of demand
#[derive(Debug, Clone, Builder)]
pub struct ProportionalAllocator {
    consumers: Consumers,
    pool: f64,
    /// Hand out full demands when they all fit in the pool
    #[builder(default = "false")]
    cap_at_demand: bool,
}

impl ProportionalAllocator {
    pub fn new(consumers: Consumers, pool: f64) -> Self {
        Self {
            consumers,
            pool,
            cap_at_demand: false,
        }
    }

    pub fn compute(&self) -> Result<Allocation> {
        check_inputs(&self.consumers, self.pool)?;

        let total_demand: f64 = self.consumers.iter().map(|c| c.demand).sum();

        if total_demand <= 0.0 {
            if !self.consumers.is_empty() {
                warn!("Total demand is zero; allocating nothing");
                return Ok(zero_allocation(&self.consumers)
                    .with_warning(AllocationWarning::ZeroTotalDemand));
            }
            return Ok(Allocation::default());
        }

        if self.cap_at_demand && total_demand <= self.pool {
            debug!("Total demand {total_demand} fits in pool {}", self.pool);
            let shares = self
                .consumers
                .iter()
                .map(|c| (c.id.clone(), c.demand))
                .collect();
            return Ok(Allocation::new(shares));
        }

        let fractions = demand_fractions(&self.consumers, total_demand);
        let shares = self
            .consumers
            .iter()
            .zip(fractions)
            .map(|(c, fraction)| (c.id.clone(), fraction * self.pool))
            .collect();
        Ok(Allocation::new(shares))
    }
}

/// Each consumer's fraction of total demand. When the plain sum overflows,
/// demands are rescaled by the largest one first.
fn demand_fractions(consumers: &[Consumer], total_demand: f64) -> Vec<f64> {
    if total_demand.is_finite() {
        return consumers.iter().map(|c| c.demand / total_demand).collect();
    }

    let largest = consumers.iter().map(|c| c.demand).fold(0.0, f64::max);
    debug!("Total demand overflows; rescaling by largest demand {largest}");
    let scaled_total: f64 = consumers.iter().map(|c| c.demand / largest).sum();
    consumers
        .iter()
        .map(|c| c.demand / largest / scaled_total)
        .collect()
}

/// Proportional allocation with default settings
pub fn allocate(consumers: &[Consumer], pool: f64) -> Result<Allocation> {
    ProportionalAllocator::new(consumers.to_vec(), pool).compute()
}

fn zero_allocation(consumers: &[Consumer]) -> Allocation {
    let shares: AllocationMapping = consumers.iter().map(|c| (c.id.clone(), 0.0)).collect();
    Allocation::new(shares)
}
