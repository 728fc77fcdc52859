//! Convert a CSV list of names into the fixed-width binary corpus.
//!
//! Usage: `names_to_bin [input.csv] [output.bin]`

use barbershop_sim::shop::names::{read_csv_names, save_names};
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp(None)
        .init();

    let mut args = std::env::args_os().skip(1);
    let input = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("customer_data/names.csv"));
    let output = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("customer_data/names.bin"));

    let names = read_csv_names(&input)?;
    save_names(&names, &output)?;

    log::info!("[Corpus] Wrote {} records", names.len());
    println!("Saved {} names to '{}'", names.len(), output.display());
    Ok(())
}
