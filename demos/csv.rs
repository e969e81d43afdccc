use resource_shapley::{compare, consumers_from_csv, error::Result, proportional, shapley};
use tabled::{Table, settings::Style};

fn main() -> Result<()> {
    let consumers = consumers_from_csv("tests/cluster.csv")?;

    for pool in [8.0, 15.0, 30.0] {
        let shapley = shapley::allocate(&consumers, pool)?;
        let proportional = proportional::allocate(&consumers, pool)?;

        println!("pool {pool}");
        let table = Table::new(compare(&consumers, &shapley, &proportional))
            .with(Style::psql().remove_horizontals())
            .to_string();
        println!("{table}");
    }

    Ok(())
}
