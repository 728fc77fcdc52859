pub mod customer;
pub mod generator;
pub mod haircut;
pub mod names;
pub mod order;

pub use customer::Customer;
pub use generator::{seeded_rng, CustomerGenerator, OrderGenerator, OrderSource};
pub use haircut::HaircutKind;
pub use names::CorpusError;
pub use order::{Order, OrderView};
