use rand::Rng;
use rand_distr::{Distribution, Uniform};
use std::fmt;
use uuid::Uuid;

use super::customer::Customer;
use super::haircut::HaircutKind;

/// Maximum relative deviation of an order's duration from the haircut's base duration
pub const TIME_VARIANCE: f64 = 0.2;

/// A pending or in-service request for one haircut.
///
/// An order has exactly one owner at a time: the generator that created it,
/// then the waiting-room queue, then the barber serving it. It is not `Clone`;
/// observers see it through [`OrderView`].
#[derive(Debug)]
pub struct Order {
    id: Uuid,
    customer: Customer,
    kind: HaircutKind,
    duration: u32,
    /// Simulation minute at which the order entered the waiting room
    pub arrival_time: Option<u64>,
}

impl Order {
    /// Create an order with a duration drawn around the haircut's base duration
    pub fn new<R: Rng + ?Sized>(customer: Customer, kind: HaircutKind, rng: &mut R) -> Self {
        let duration = random_duration(kind, rng);
        Self::with_duration(customer, kind, duration)
    }

    /// Create an order with a fixed duration
    pub fn with_duration(customer: Customer, kind: HaircutKind, duration: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            customer,
            kind,
            duration,
            arrival_time: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    pub fn kind(&self) -> HaircutKind {
        self.kind
    }

    /// Service time in simulated minutes
    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn price(&self) -> f64 {
        self.kind.price()
    }

    /// Read-only copy for rendering
    pub fn view(&self) -> OrderView {
        OrderView {
            customer: self.customer.name().to_string(),
            kind: self.kind,
            duration: self.duration,
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Order({}, {}, {}m)", self.customer, self.kind, self.duration)
    }
}

/// Snapshot of an order's displayable fields
#[derive(Debug, Clone, PartialEq)]
pub struct OrderView {
    pub customer: String,
    pub kind: HaircutKind,
    pub duration: u32,
}

/// Draw `base ± 20%` uniformly and truncate to whole minutes
pub fn random_duration<R: Rng + ?Sized>(kind: HaircutKind, rng: &mut R) -> u32 {
    let base = kind.base_duration() as f64;
    let variation = base * TIME_VARIANCE;
    let spread = Uniform::new_inclusive(base - variation, base + variation);
    spread.sample(rng).max(0.0) as u32
}
