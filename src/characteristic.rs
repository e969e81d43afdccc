use crate::coalition::{Coalition, CoalitionEnumerator};

/// Resource-sharing game: a coalition is worth as much of its joint demand
/// as the whole pool can satisfy.
#[derive(Debug, Clone, Copy)]
pub struct ResourceGame<'a> {
    demands: &'a [f64],
    pool: f64,
}

impl<'a> ResourceGame<'a> {
    pub fn new(demands: &'a [f64], pool: f64) -> Self {
        Self { demands, pool }
    }

    pub fn player_count(&self) -> usize {
        self.demands.len()
    }

    pub fn pool(&self) -> f64 {
        self.pool
    }

    /// min(total member demand, pool); the empty coalition is worth 0
    pub fn value(&self, coalition: Coalition) -> f64 {
        let total_demand: f64 = coalition.members().map(|i| self.demands[i]).sum();
        total_demand.min(self.pool)
    }

    /// Value of the coalition of all consumers
    pub fn grand_value(&self) -> f64 {
        self.value(Coalition::grand(self.player_count()))
    }

    /// Value of every coalition, indexed by [`Coalition::index`]
    pub fn coalition_values(&self, enumerator: &CoalitionEnumerator) -> Vec<f64> {
        enumerator.all().map(|c| self.value(c)).collect()
    }
}
