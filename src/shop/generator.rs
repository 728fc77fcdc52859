use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use std::path::Path;

use super::customer::Customer;
use super::haircut::HaircutKind;
use super::names::{load_names, CorpusError};
use super::order::Order;

/// Supplies new arrivals to the simulation driver
pub trait OrderSource {
    /// Produce the next arriving order, or `None` when the source is exhausted
    fn next_order(&mut self) -> Option<Order>;
}

/// Seeded RNG when a seed is given, entropy-seeded otherwise
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Picks random customers from a name corpus
#[derive(Debug)]
pub struct CustomerGenerator {
    names: Vec<String>,
    rng: StdRng,
}

impl CustomerGenerator {
    pub fn from_names(names: Vec<String>, rng: StdRng) -> Result<Self, CorpusError> {
        if names.is_empty() {
            return Err(CorpusError::NoNames);
        }
        Ok(Self { names, rng })
    }

    /// Load the binary corpus at `path`
    pub fn load(path: impl AsRef<Path>, rng: StdRng) -> Result<Self, CorpusError> {
        Self::from_names(load_names(path)?, rng)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn generate_customer(&mut self) -> Customer {
        let name = self.names.choose(&mut self.rng).map(String::as_str).unwrap_or_default();
        Customer::new(name)
    }

    pub fn generate_customers(&mut self, count: usize) -> Vec<Customer> {
        (0..count).map(|_| self.generate_customer()).collect()
    }
}

/// Produces orders with a random customer and a random haircut
#[derive(Debug)]
pub struct OrderGenerator {
    customers: CustomerGenerator,
    rng: StdRng,
}

impl OrderGenerator {
    pub fn new(customers: CustomerGenerator, rng: StdRng) -> Self {
        Self { customers, rng }
    }

    pub fn generate_order(&mut self) -> Order {
        let customer = self.customers.generate_customer();
        let kind = random_kind(&mut self.rng);
        Order::new(customer, kind, &mut self.rng)
    }

    pub fn generate_orders(&mut self, count: usize) -> Vec<Order> {
        (0..count).map(|_| self.generate_order()).collect()
    }
}

impl OrderSource for OrderGenerator {
    fn next_order(&mut self) -> Option<Order> {
        Some(self.generate_order())
    }
}

/// Pre-built arrivals, handed out front to back
impl OrderSource for VecDeque<Order> {
    fn next_order(&mut self) -> Option<Order> {
        self.pop_front()
    }
}

fn random_kind<R: Rng + ?Sized>(rng: &mut R) -> HaircutKind {
    HaircutKind::ALL[rng.gen_range(0..HaircutKind::ALL.len())]
}
