use resource_shapley::{
    Consumer, ProportionalAllocatorBuilder, ShapleyAllocatorBuilder, average_satisfaction,
    compare, error::Result,
};

fn build_sample_inputs() -> (Vec<Consumer>, f64) {
    let consumers = vec![
        Consumer::new("VM1", 10.0),
        Consumer::new("VM2", 20.0),
        Consumer::new("VM3", 30.0),
    ];
    (consumers, 45.0)
}

fn main() -> Result<()> {
    let (consumers, pool) = build_sample_inputs();

    let shapley = ShapleyAllocatorBuilder::default()
        .consumers(consumers.clone())
        .pool(pool)
        .build()?
        .compute()?;
    let proportional = ProportionalAllocatorBuilder::default()
        .consumers(consumers.clone())
        .pool(pool)
        .build()?
        .compute()?;

    println!("Total resources: {pool}");
    println!(
        "{:>6}  {:>8}  {:>8}  {:>12}",
        "VM", "Demand", "Shapley", "Proportional"
    );
    for row in compare(&consumers, &shapley, &proportional) {
        println!(
            "{:>6}  {:>8.2}  {:>8.2}  {:>12.2}",
            row.id, row.demand, row.shapley, row.proportional
        );
    }

    println!(
        "Average demand satisfaction (Shapley): {:.2}%",
        average_satisfaction(&consumers, &shapley) * 100.0
    );
    println!(
        "Average demand satisfaction (Proportional): {:.2}%",
        average_satisfaction(&consumers, &proportional) * 100.0
    );

    Ok(())
}
