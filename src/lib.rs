pub mod core;
pub mod render;
pub mod shop;

// Re-export commonly used types
pub use crate::core::config::{ConcurrencyMode, ShopConfig};
pub use crate::core::error::SimulationError;
pub use crate::core::simulation::{BarbershopSimulation, ShopObserver, ShopSnapshot};
pub use crate::core::stats::SimulationSummary;
pub use crate::core::types::{BarberId, BarberState};
pub use crate::render::ConsoleRenderer;
