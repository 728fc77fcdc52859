//! Configuration for a barbershop run
//!
//! Every tunable of the simulation lives in [`ShopConfig`], which is built
//! once at startup and handed to the driver and the barber pool.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::error::SimulationError;

/// How barber loops are scheduled onto OS threads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConcurrencyMode {
    /// One scoped OS thread per barber
    Threads,
    /// A dedicated Rayon pool sized to the number of barbers
    Rayon,
}

impl Default for ConcurrencyMode {
    fn default() -> Self {
        ConcurrencyMode::Threads
    }
}

/// Configuration for one simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopConfig {
    /// Simulated opening time in minutes
    pub simulation_minutes: u64,
    /// Simulated minutes per wall-clock second
    pub time_descale: f64,
    /// Probability that a customer walks in during any one minute
    pub arrival_rate: f64,
    /// Waiting-room capacity
    pub waiting_room_size: usize,
    pub num_barbers: usize,
    /// Wage per barber in dollars per hour
    pub hourly_wage: f64,
    /// Simulated minutes an idle barber waits before polling again
    pub idle_slice_minutes: f64,
    pub concurrency_mode: ConcurrencyMode,
    /// Seed for arrivals and order generation; `None` seeds from entropy
    pub random_seed: Option<u64>,
    /// Binary name corpus
    pub names_path: PathBuf,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            simulation_minutes: hours_to_minutes(1),
            time_descale: 5.0,
            arrival_rate: 0.4,
            waiting_room_size: 5,
            num_barbers: 4,
            hourly_wage: 13.0,
            idle_slice_minutes: 0.1,
            concurrency_mode: ConcurrencyMode::default(),
            random_seed: None,
            names_path: PathBuf::from("customer_data/names.bin"),
        }
    }
}

impl ShopConfig {
    /// Create a configuration with the default shop: one hour, four barbers,
    /// five seats
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how long the shop stays open
    ///
    /// # Arguments
    /// * `minutes` - Simulated opening time; 0 opens and closes immediately
    ///
    /// # Returns
    /// A new configuration with the specified opening time
    pub fn with_simulation_minutes(mut self, minutes: u64) -> Self {
        self.simulation_minutes = minutes;
        self
    }

    /// Set the simulation pace
    ///
    /// # Arguments
    /// * `descale` - Simulated minutes per wall-clock second; must be positive
    ///
    /// # Returns
    /// A new configuration with the specified pace
    ///
    /// # Note
    /// The same pace applies to the clock tick and to barber service and idle pauses
    pub fn with_time_descale(mut self, descale: f64) -> Self {
        self.time_descale = descale;
        self
    }

    /// Set the per-minute arrival probability
    ///
    /// # Arguments
    /// * `rate` - Probability in `[0, 1]` that a customer walks in each minute
    ///
    /// # Returns
    /// A new configuration with the specified arrival rate
    pub fn with_arrival_rate(mut self, rate: f64) -> Self {
        self.arrival_rate = rate;
        self
    }

    /// Set the waiting-room capacity
    ///
    /// # Arguments
    /// * `size` - Number of seats; customers arriving to a full room are lost
    ///
    /// # Returns
    /// A new configuration with the specified capacity
    pub fn with_waiting_room_size(mut self, size: usize) -> Self {
        self.waiting_room_size = size;
        self
    }

    /// Set the number of barbers
    ///
    /// # Arguments
    /// * `count` - Barbers to start; each gets its own thread
    ///
    /// # Returns
    /// A new configuration with the specified staff
    pub fn with_num_barbers(mut self, count: usize) -> Self {
        self.num_barbers = count;
        self
    }

    /// Set the wage paid to every barber
    ///
    /// # Arguments
    /// * `wage` - Dollars per hour of service plus idle time
    ///
    /// # Returns
    /// A new configuration with the specified wage
    pub fn with_hourly_wage(mut self, wage: f64) -> Self {
        self.hourly_wage = wage;
        self
    }

    /// Set how long an idle barber waits between queue polls
    ///
    /// # Arguments
    /// * `minutes` - Simulated minutes per poll; each slice counts as idle time
    ///
    /// # Returns
    /// A new configuration with the specified idle slice
    pub fn with_idle_slice(mut self, minutes: f64) -> Self {
        self.idle_slice_minutes = minutes;
        self
    }

    /// Set how barber loops are scheduled
    ///
    /// # Arguments
    /// * `mode` - Scoped OS threads or a dedicated Rayon pool
    ///
    /// # Returns
    /// A new configuration with the specified concurrency mode
    pub fn with_concurrency(mut self, mode: ConcurrencyMode) -> Self {
        self.concurrency_mode = mode;
        self
    }

    /// Set the seed for arrivals and order generation
    ///
    /// # Arguments
    /// * `seed` - Fixed seed for reproducible runs, or `None` for entropy
    ///
    /// # Returns
    /// A new configuration with the specified seed
    pub fn with_random_seed(mut self, seed: Option<u64>) -> Self {
        self.random_seed = seed;
        self
    }

    /// Set the binary name corpus to load customers from
    pub fn with_names_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.names_path = path.into();
        self
    }

    /// Check that every field is usable
    ///
    /// # Returns
    /// `SimulationError::InvalidConfig` naming the first offending field
    pub fn validate(&self) -> Result<(), SimulationError> {
        let invalid = |msg: &str| Err(SimulationError::InvalidConfig(msg.to_string()));

        if self.num_barbers == 0 {
            return invalid("The shop needs at least one barber");
        }
        if self.waiting_room_size == 0 {
            return invalid("Waiting room size must be greater than 0");
        }
        if !self.time_descale.is_finite() || self.time_descale <= 0.0 {
            return invalid("Time descale must be a positive number");
        }
        if !(0.0..=1.0).contains(&self.arrival_rate) {
            return invalid("Arrival rate must be a probability between 0 and 1");
        }
        if !self.idle_slice_minutes.is_finite() || self.idle_slice_minutes <= 0.0 {
            return invalid("Idle slice must be a positive number of minutes");
        }
        if !self.hourly_wage.is_finite() || self.hourly_wage < 0.0 {
            return invalid("Hourly wage cannot be negative");
        }

        Ok(())
    }
}

/// Convert whole hours of opening time to simulated minutes
pub fn hours_to_minutes(hours: u64) -> u64 {
    hours * 60
}
