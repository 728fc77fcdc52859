pub mod barber;
pub mod clock;
pub mod config;
pub mod error;
pub mod pool;
pub mod queue;
pub mod simulation;
pub mod stats;
pub mod types;

#[cfg(test)]
mod tests;
