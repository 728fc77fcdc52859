use barbershop_sim::shop::names::{load_names, read_csv_names};
use barbershop_sim::shop::{seeded_rng, CorpusError, CustomerGenerator, OrderGenerator};
use barbershop_sim::{BarbershopSimulation, ConsoleRenderer, ShopConfig};
use log::warn;
use std::path::Path;

/// Load the binary corpus, falling back to the CSV it is built from
fn load_corpus(path: &Path) -> Result<Vec<String>, CorpusError> {
    match load_names(path) {
        Err(CorpusError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
            let csv_path = path.with_extension("csv");
            warn!(
                "[Corpus] {} not found, reading {} instead",
                path.display(),
                csv_path.display()
            );
            read_csv_names(&csv_path)
        }
        result => result,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp(None)
        .init();

    let config = ShopConfig::default();
    config.validate()?;

    println!("Starting barbershop simulation");
    println!(
        "  {} barbers, {} seats, arrival rate {:.2}/min, {} min",
        config.num_barbers, config.waiting_room_size, config.arrival_rate, config.simulation_minutes
    );
    println!();

    // offset so customer and haircut draws are independent streams
    let customer_seed = config.random_seed.map(|seed| seed.wrapping_add(1));
    let order_seed = config.random_seed.map(|seed| seed.wrapping_add(2));

    let names = load_corpus(&config.names_path)?;
    let customers = CustomerGenerator::from_names(names, seeded_rng(customer_seed))?;
    let orders = OrderGenerator::new(customers, seeded_rng(order_seed));

    let mut simulation = BarbershopSimulation::new(config, orders)?;
    simulation.add_observer(Box::new(ConsoleRenderer::new()));
    simulation.run()?;

    Ok(())
}
