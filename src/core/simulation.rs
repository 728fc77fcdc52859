use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand_distr::{Bernoulli, Distribution};

use super::barber::ServiceContext;
use super::clock::SimulationClock;
use super::config::ShopConfig;
use super::error::SimulationError;
use super::pool::BarberPool;
use super::queue::{OrderQueue, QueueFull};
use super::stats::{SimulationSummary, StatsTracker};
use super::types::{BarberId, BarberState};
use crate::shop::{seeded_rng, Order, OrderSource, OrderView};

/// Observer of the shop floor, called from the driver thread
pub trait ShopObserver {
    /// Called once per simulated minute, after the arrival for that minute
    fn on_tick(&mut self, snapshot: &ShopSnapshot);

    /// Called once after every barber has stopped
    fn on_finish(&mut self, _snapshot: &ShopSnapshot, _summary: &SimulationSummary) {}
}

/// One barber as seen by observers
#[derive(Debug, Clone, PartialEq)]
pub struct BarberView {
    pub id: BarberId,
    pub state: BarberState,
    pub order: Option<OrderView>,
}

/// Read-only picture of the shop at one instant
#[derive(Debug, Clone, PartialEq)]
pub struct ShopSnapshot {
    pub minute: u64,
    /// Formatted clock time
    pub time: String,
    pub barbers: Vec<BarberView>,
    /// Waiting orders, next to be served first
    pub queue: Vec<OrderView>,
}

impl ShopSnapshot {
    pub fn capture(clock: &SimulationClock, queue: &OrderQueue, pool: &BarberPool) -> Self {
        let queue = queue.snapshot();
        let barbers = pool
            .barbers()
            .iter()
            .map(|barber| BarberView {
                id: barber.id().clone(),
                state: barber.state(),
                order: barber.current_order(),
            })
            .collect();

        Self {
            minute: clock.current(),
            time: clock.format(),
            barbers,
            queue,
        }
    }
}

/// Offer `order` to the waiting room and record the outcome.
///
/// Returns true if the customer was admitted. A rejected order is dropped
/// and counted as lost.
pub fn admit(queue: &OrderQueue, stats: &StatsTracker, order: Order) -> bool {
    let order_id = order.id();
    match queue.try_enqueue(order) {
        Ok(queue_length) => {
            stats.record_new_customer(queue_length);
            debug!("[Shop] Admitted order {}, queue length {}", order_id, queue_length);
            true
        }
        Err(QueueFull(order)) => {
            stats.record_customer_lost();
            warn!("[Shop] Waiting room full, {} left with order {}", order.customer(), order_id);
            false
        }
    }
}

/// Drives one barbershop run: ticks the clock, admits arrivals, and shuts
/// the barbers down once time is up and all work has drained.
pub struct BarbershopSimulation<S: OrderSource> {
    config: ShopConfig,
    queue: OrderQueue,
    clock: SimulationClock,
    stats: StatsTracker,
    pool: BarberPool,
    source: S,
    arrivals: Bernoulli,
    rng: StdRng,
    observers: Vec<Box<dyn ShopObserver>>,
}

impl<S: OrderSource> BarbershopSimulation<S> {
    pub fn new(config: ShopConfig, source: S) -> Result<Self, SimulationError> {
        config.validate()?;
        let arrivals = Bernoulli::new(config.arrival_rate)
            .map_err(|err| SimulationError::InvalidConfig(err.to_string()))?;

        let pool = BarberPool::new(&config);
        let stats = StatsTracker::new();
        pool.register_with(&stats);

        Ok(Self {
            queue: OrderQueue::new(config.waiting_room_size),
            clock: SimulationClock::new(config.simulation_minutes, config.time_descale),
            rng: seeded_rng(config.random_seed),
            stats,
            pool,
            source,
            arrivals,
            observers: Vec::new(),
            config,
        })
    }

    pub fn add_observer(&mut self, observer: Box<dyn ShopObserver>) {
        self.observers.push(observer);
    }

    pub fn config(&self) -> &ShopConfig {
        &self.config
    }

    pub fn queue(&self) -> &OrderQueue {
        &self.queue
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn stats(&self) -> &StatsTracker {
        &self.stats
    }

    pub fn pool(&self) -> &BarberPool {
        &self.pool
    }

    /// Run until the clock expires and every admitted customer is served.
    ///
    /// Barbers that have stopped stay stopped, so a second call only
    /// re-reports the first run.
    pub fn run(&mut self) -> Result<SimulationSummary, SimulationError> {
        let Self {
            ref config,
            ref queue,
            ref clock,
            ref stats,
            ref pool,
            ref mut source,
            ref arrivals,
            ref mut rng,
            ref mut observers,
        } = *self;

        let ctx = ServiceContext {
            queue,
            clock,
            stats,
            time_descale: config.time_descale,
            idle_slice_minutes: config.idle_slice_minutes,
        };

        info!(
            "[Shop] Opening for {} min with {} barbers and {} seats",
            clock.total(),
            pool.len(),
            queue.capacity()
        );

        pool.run(&ctx, |pool| {
            // queue is checked before the barbers: a barber holds its seat
            // while popping, so an order is always visible in one of the two
            while clock.is_live() || !queue.is_empty() || pool.any_serving() {
                if clock.is_live() && arrivals.sample(rng) {
                    if let Some(mut order) = source.next_order() {
                        order.arrival_time = Some(clock.current());
                        admit(queue, stats, order);
                    }
                }

                let snapshot = ShopSnapshot::capture(clock, queue, pool);
                for observer in observers.iter_mut() {
                    observer.on_tick(&snapshot);
                }

                clock.tick();
            }
            info!("[Shop] Closing at {}, stopping barbers", clock.format());
        })?;

        let summary = stats.summary();
        let snapshot = ShopSnapshot::capture(clock, queue, pool);
        for observer in observers.iter_mut() {
            observer.on_finish(&snapshot, &summary);
        }

        info!(
            "[Shop] Served {} customers, lost {}",
            summary.customers_served, summary.customers_lost
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shop::{Customer, HaircutKind};
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Recorder {
        ticks: Arc<Mutex<Vec<ShopSnapshot>>>,
        finished: Arc<Mutex<Option<ShopSnapshot>>>,
    }

    impl ShopObserver for Recorder {
        fn on_tick(&mut self, snapshot: &ShopSnapshot) {
            self.ticks.lock().unwrap().push(snapshot.clone());
        }

        fn on_finish(&mut self, snapshot: &ShopSnapshot, _summary: &SimulationSummary) {
            *self.finished.lock().unwrap() = Some(snapshot.clone());
        }
    }

    fn fast_config() -> ShopConfig {
        ShopConfig::new()
            .with_time_descale(10_000.0)
            .with_random_seed(Some(3))
            .with_num_barbers(2)
    }

    fn order(name: &str, duration: u32) -> Order {
        Order::with_duration(Customer::new(name), HaircutKind::Normal, duration)
    }

    #[test]
    fn test_admit_counts_losses_once() {
        let queue = OrderQueue::new(2);
        let stats = StatsTracker::new();

        assert!(admit(&queue, &stats, order("A", 5)));
        assert!(admit(&queue, &stats, order("B", 5)));
        assert!(!admit(&queue, &stats, order("C", 5)));

        assert_eq!(queue.len(), 2);
        assert_eq!(stats.customers_lost(), 1);
        assert_eq!(stats.customers_admitted(), 2);
        assert_eq!(stats.peak_queue_length(), 2);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = fast_config().with_arrival_rate(2.0);
        assert!(BarbershopSimulation::new(config, VecDeque::<Order>::new()).is_err());
    }

    #[test]
    fn test_observers_see_every_tick_and_finish() {
        let recorder = Recorder::default();
        let ticks = Arc::clone(&recorder.ticks);
        let finished = Arc::clone(&recorder.finished);

        let config = fast_config().with_simulation_minutes(5).with_arrival_rate(0.0);
        let mut sim = BarbershopSimulation::new(config, VecDeque::<Order>::new()).unwrap();
        sim.add_observer(Box::new(recorder));
        sim.run().unwrap();

        let ticks = ticks.lock().unwrap();
        let minutes: Vec<_> = ticks.iter().map(|snapshot| snapshot.minute).collect();
        assert_eq!(minutes, vec![0, 1, 2, 3, 4]);
        assert_eq!(ticks[0].barbers.len(), 2);
        assert_eq!(ticks[0].time, "0 min");

        let finished = finished.lock().unwrap();
        let last = finished.as_ref().unwrap();
        assert!(last.queue.is_empty());
        assert!(last.barbers.iter().all(|barber| barber.state == BarberState::Stopped));
    }

    #[test]
    fn test_every_arrival_is_served_or_lost() {
        let script: VecDeque<Order> = (0..30).map(|i| order(&format!("C{}", i), 4)).collect();
        let config = fast_config()
            .with_simulation_minutes(30)
            .with_arrival_rate(1.0)
            .with_waiting_room_size(2)
            .with_num_barbers(1);

        let mut sim = BarbershopSimulation::new(config, script).unwrap();
        let summary = sim.run().unwrap();

        assert_eq!(summary.customers_served + summary.customers_lost, 30);
        assert_eq!(summary.customers_served, summary.customers_admitted);
        assert!(summary.peak_queue_length <= 2);
        assert!(sim.queue().is_empty());
        assert!(sim.pool().all_stopped());
    }
}
