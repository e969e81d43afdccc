use crate::types::{Allocation, Consumer, ConsumerId};

#[cfg(feature = "serde")]
use {
    serde::{Deserialize, Serialize},
    tabled::Tabled,
};

/// Fraction of demand a consumer received, capped at 1.
/// Zero-demand consumers count as fully satisfied.
pub fn satisfaction(allocated: f64, demand: f64) -> f64 {
    if demand <= 0.0 {
        return 1.0;
    }
    (allocated / demand).min(1.0)
}

/// Mean satisfaction over all consumers; 0 when there are none
pub fn average_satisfaction(consumers: &[Consumer], allocation: &Allocation) -> f64 {
    if consumers.is_empty() {
        return 0.0;
    }
    let total: f64 = consumers
        .iter()
        .map(|c| satisfaction(allocation.get(&c.id).unwrap_or(0.0), c.demand))
        .sum();
    total / consumers.len() as f64
}

/// One consumer's outcome under both policies
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize, Tabled))]
pub struct ComparisonRow {
    pub id: ConsumerId,
    pub demand: f64,
    #[cfg_attr(feature = "serde", tabled(display = "display_amount"))]
    pub shapley: f64,
    #[cfg_attr(feature = "serde", tabled(display = "display_amount"))]
    pub proportional: f64,
    #[cfg_attr(feature = "serde", tabled(display = "display_as_percent"))]
    pub shapley_satisfaction: f64,
    #[cfg_attr(feature = "serde", tabled(display = "display_as_percent"))]
    pub proportional_satisfaction: f64,
}

#[cfg(feature = "serde")]
fn display_amount(amount: &f64) -> String {
    format!("{amount:.2}")
}

#[cfg(feature = "serde")]
fn display_as_percent(ratio: &f64) -> String {
    format!("{:.2}%", ratio * 100.0)
}

/// Side-by-side rows in input order
pub fn compare(
    consumers: &[Consumer],
    shapley: &Allocation,
    proportional: &Allocation,
) -> Vec<ComparisonRow> {
    consumers
        .iter()
        .map(|c| {
            let shapley_share = shapley.get(&c.id).unwrap_or(0.0);
            let proportional_share = proportional.get(&c.id).unwrap_or(0.0);
            ComparisonRow {
                id: c.id.clone(),
                demand: c.demand,
                shapley: shapley_share,
                proportional: proportional_share,
                shapley_satisfaction: satisfaction(shapley_share, c.demand),
                proportional_satisfaction: satisfaction(proportional_share, c.demand),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{proportional, shapley};

    fn demo_consumers() -> Vec<Consumer> {
        vec![
            Consumer::new("vm-1", 10.0),
            Consumer::new("vm-2", 20.0),
            Consumer::new("vm-3", 30.0),
        ]
    }

    #[test]
    fn test_satisfaction() {
        assert_eq!(satisfaction(5.0, 10.0), 0.5);
        assert_eq!(satisfaction(12.0, 10.0), 1.0);
        assert_eq!(satisfaction(0.0, 0.0), 1.0);
    }

    #[test]
    fn test_average_satisfaction_demo() {
        let consumers = demo_consumers();
        let shapley = shapley::allocate(&consumers, 45.0).unwrap();
        let proportional = proportional::allocate(&consumers, 45.0).unwrap();

        // (2/3 + 17/24 + 29/36) / 3
        let expected_shapley = (2.0 / 3.0 + 17.0 / 24.0 + 29.0 / 36.0) / 3.0;
        assert!((average_satisfaction(&consumers, &shapley) - expected_shapley).abs() < 1e-9);
        assert!((average_satisfaction(&consumers, &proportional) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_average_satisfaction_empty() {
        assert_eq!(average_satisfaction(&[], &Allocation::default()), 0.0);
    }

    #[test]
    fn test_compare_keeps_input_order() {
        let consumers = vec![Consumer::new("zeta", 4.0), Consumer::new("alpha", 4.0)];
        let shapley = shapley::allocate(&consumers, 6.0).unwrap();
        let proportional = proportional::allocate(&consumers, 6.0).unwrap();

        let rows = compare(&consumers, &shapley, &proportional);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, "zeta");
        assert_eq!(rows[1].id, "alpha");
        assert!((rows[0].shapley - 3.0).abs() < 1e-12);
        assert_eq!(rows[0].proportional, 3.0);
        assert!((rows[0].proportional_satisfaction - 0.75).abs() < 1e-12);
    }
}
