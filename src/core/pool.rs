use log::{debug, info};
use std::thread;

use super::barber::{Barber, ServiceContext};
use super::config::{ConcurrencyMode, ShopConfig};
use super::error::SimulationError;
use super::stats::StatsTracker;
use super::types::{BarberId, BarberState};

/// The shop's barbers and the threads that run them
#[derive(Debug)]
pub struct BarberPool {
    barbers: Vec<Barber>,
    mode: ConcurrencyMode,
}

/// Stops every barber when dropped, so a failed or panicking supervisor
/// never leaves a barber polling forever
struct StopOnDrop<'a>(&'a BarberPool);

impl Drop for StopOnDrop<'_> {
    fn drop(&mut self) {
        self.0.stop_all();
    }
}

impl BarberPool {
    /// `num_barbers` barbers named `Barber-1..`, all at the configured wage
    pub fn new(config: &ShopConfig) -> Self {
        let barbers = (1..=config.num_barbers)
            .map(|index| Barber::new(BarberId::numbered(index), config.hourly_wage))
            .collect();
        Self::from_barbers(barbers, config.concurrency_mode)
    }

    /// Wrap pre-built barbers, e.g. with individual wages
    pub fn from_barbers(barbers: Vec<Barber>, mode: ConcurrencyMode) -> Self {
        Self { barbers, mode }
    }

    /// Barbers in registration order
    pub fn barbers(&self) -> &[Barber] {
        &self.barbers
    }

    pub fn len(&self) -> usize {
        self.barbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.barbers.is_empty()
    }

    /// Add every barber to the statistics report
    pub fn register_with(&self, stats: &StatsTracker) {
        for barber in &self.barbers {
            stats.register_barber(barber.id(), barber.wage());
        }
    }

    /// True while any barber has an order in its seat
    pub fn any_serving(&self) -> bool {
        self.barbers.iter().any(Barber::is_serving)
    }

    /// Ask every barber to stop once the queue is drained
    pub fn stop_all(&self) {
        for barber in &self.barbers {
            barber.stop_working();
        }
    }

    /// True once every barber loop has exited
    pub fn all_stopped(&self) -> bool {
        self.barbers
            .iter()
            .all(|barber| barber.state() == BarberState::Stopped)
    }

    /// Run every barber on its own thread while `supervise` runs on the
    /// calling thread.
    ///
    /// When `supervise` returns, every barber is told to stop, and this call
    /// returns only after all of them have drained the queue and stopped.
    pub fn run<F, R>(&self, ctx: &ServiceContext<'_>, supervise: F) -> Result<R, SimulationError>
    where
        F: FnOnce(&Self) -> R,
    {
        info!("[Pool] Starting {} barbers ({:?})", self.barbers.len(), self.mode);
        let result = match self.mode {
            ConcurrencyMode::Threads => self.run_threads(ctx, supervise),
            ConcurrencyMode::Rayon => self.run_rayon(ctx, supervise),
        };
        debug!("[Pool] All barbers joined");
        result
    }

    fn run_threads<F, R>(&self, ctx: &ServiceContext<'_>, supervise: F) -> Result<R, SimulationError>
    where
        F: FnOnce(&Self) -> R,
    {
        thread::scope(|scope| {
            let _stop = StopOnDrop(self);
            for barber in &self.barbers {
                thread::Builder::new()
                    .name(barber.id().to_string())
                    .spawn_scoped(scope, move || barber.run(ctx))
                    .map_err(SimulationError::WorkerSpawn)?;
            }
            Ok(supervise(self))
        })
    }

    fn run_rayon<F, R>(&self, ctx: &ServiceContext<'_>, supervise: F) -> Result<R, SimulationError>
    where
        F: FnOnce(&Self) -> R,
    {
        // Every barber loop holds its thread for the whole run, so the pool
        // needs exactly one thread per barber.
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.barbers.len().max(1))
            .thread_name(pool_thread_name)
            .build()?;

        Ok(pool.in_place_scope(|scope| {
            let _stop = StopOnDrop(self);
            for barber in &self.barbers {
                scope.spawn(move |_| barber.run(ctx));
            }
            supervise(self)
        }))
    }
}

/// Rayon threads are not tied to one barber; barbers log their own ids
fn pool_thread_name(index: usize) -> String {
    format!("barber-pool-{}", index)
}
