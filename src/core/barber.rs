use log::{debug, info};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::thread;

use super::clock::{scaled, SimulationClock};
use super::queue::OrderQueue;
use super::stats::{CompletedHaircut, StatsTracker};
use super::types::{BarberId, BarberState};
use crate::shop::{Order, OrderView};

/// Shared resources a barber works against
#[derive(Debug, Clone, Copy)]
pub struct ServiceContext<'a> {
    pub queue: &'a OrderQueue,
    pub clock: &'a SimulationClock,
    pub stats: &'a StatsTracker,
    /// Simulated minutes per wall-clock second for service and idle pauses
    pub time_descale: f64,
    /// Simulated minutes an idle barber sleeps between polls
    pub idle_slice_minutes: f64,
}

/// A worker that serves orders from the shared queue until told to stop
/// and the queue is drained.
///
/// The barber keeps the order it is serving in its own seat, so observers
/// can see it without touching the queue.
#[derive(Debug)]
pub struct Barber {
    id: BarberId,
    wage: f64,
    working: AtomicBool,
    stopped: AtomicBool,
    seat: Mutex<Option<Order>>,
}

impl Barber {
    /// Create a barber that is already marked as working
    pub fn new(id: BarberId, wage: f64) -> Self {
        Self {
            id,
            wage,
            working: AtomicBool::new(true),
            stopped: AtomicBool::new(false),
            seat: Mutex::new(None),
        }
    }

    pub fn id(&self) -> &BarberId {
        &self.id
    }

    /// Hourly wage in dollars
    pub fn wage(&self) -> f64 {
        self.wage
    }

    pub fn start_working(&self) {
        self.working.store(true, Ordering::Release);
    }

    /// Ask the barber to stop once the queue is empty. Does not interrupt
    /// a haircut in progress.
    pub fn stop_working(&self) {
        self.working.store(false, Ordering::Release);
    }

    pub fn is_working(&self) -> bool {
        self.working.load(Ordering::Acquire)
    }

    pub fn is_serving(&self) -> bool {
        self.seat().is_some()
    }

    pub fn state(&self) -> BarberState {
        if self.stopped.load(Ordering::Acquire) {
            BarberState::Stopped
        } else if self.is_serving() {
            BarberState::Serving
        } else {
            BarberState::Idle
        }
    }

    pub fn current_order(&self) -> Option<OrderView> {
        self.seat().as_ref().map(Order::view)
    }

    /// Serve until stopped and the queue is empty.
    ///
    /// Blocks the calling thread. A barber that has already stopped returns
    /// immediately.
    pub fn run(&self, ctx: &ServiceContext<'_>) {
        if self.state() == BarberState::Stopped {
            debug!("[{}] Already stopped, not reopening", self.id);
            return;
        }
        info!("[{}] Chair open", self.id);

        while self.is_working() || !ctx.queue.is_empty() {
            if !self.serve_next(ctx) {
                debug!("[{}] Idle", self.id);
                thread::sleep(scaled(ctx.idle_slice_minutes, ctx.time_descale));
                ctx.stats.record_idle_time(&self.id, ctx.idle_slice_minutes);
            }
        }

        self.stopped.store(true, Ordering::Release);
        info!("[{}] Stopped", self.id);
    }

    /// Serve one order if one is waiting. Returns false when the queue was empty.
    pub fn serve_next(&self, ctx: &ServiceContext<'_>) -> bool {
        // The seat stays locked across the pop so the order is never in neither place.
        let (order_id, customer, kind, duration, arrival) = {
            let mut seat = self.seat();
            let order = match ctx.queue.try_dequeue() {
                Some(order) => order,
                None => return false,
            };
            let details = (
                order.id(),
                order.customer().name().to_string(),
                order.kind(),
                order.duration(),
                order.arrival_time,
            );
            *seat = Some(order);
            details
        };

        let wait = arrival
            .map(|arrived| ctx.clock.current().saturating_sub(arrived) as f64)
            .unwrap_or(0.0);
        ctx.stats.record_wait_time(wait);

        info!(
            "[{}] Serving {} ({}, {} min) order {}",
            self.id, customer, kind, duration, order_id
        );
        thread::sleep(scaled(duration as f64, ctx.time_descale));

        let service_minutes = duration as f64;
        ctx.stats.record_haircut(&self.id, service_minutes, kind.price(), kind);
        ctx.stats.record_work_time(&self.id, service_minutes);
        ctx.stats.record_completed(CompletedHaircut {
            barber: self.id.clone(),
            customer: customer.clone(),
            kind,
            duration,
            wait,
            finished_at: ctx.clock.current(),
        });

        let served = self.seat().take();
        info!("[{}] Finished {} order {}", self.id, customer, order_id);
        drop(served);
        true
    }

    fn seat(&self) -> MutexGuard<'_, Option<Order>> {
        self.seat.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shop::{Customer, HaircutKind};

    struct Shop {
        queue: OrderQueue,
        clock: SimulationClock,
        stats: StatsTracker,
    }

    impl Shop {
        fn new(capacity: usize) -> Self {
            Self {
                queue: OrderQueue::new(capacity),
                clock: SimulationClock::new(60, 10_000.0),
                stats: StatsTracker::new(),
            }
        }

        fn ctx(&self) -> ServiceContext<'_> {
            ServiceContext {
                queue: &self.queue,
                clock: &self.clock,
                stats: &self.stats,
                time_descale: 10_000.0,
                idle_slice_minutes: 0.1,
            }
        }
    }

    fn order(name: &str, kind: HaircutKind, duration: u32) -> Order {
        Order::with_duration(Customer::new(name), kind, duration)
    }

    #[test]
    fn test_new_barber_is_idle_and_working() {
        let barber = Barber::new(BarberId::numbered(1), 13.0);
        assert!(barber.is_working());
        assert_eq!(barber.state(), BarberState::Idle);
        assert!(barber.current_order().is_none());
    }

    #[test]
    fn test_stop_is_idempotent() {
        let barber = Barber::new(BarberId::numbered(1), 13.0);
        barber.stop_working();
        barber.stop_working();
        assert!(!barber.is_working());
        barber.start_working();
        barber.start_working();
        assert!(barber.is_working());
    }

    #[test]
    fn test_serve_next_records_stats() {
        let shop = Shop::new(3);
        let barber = Barber::new(BarberId::numbered(1), 13.0);

        let mut waiting = order("Ada", HaircutKind::BeardTrim, 9);
        waiting.arrival_time = Some(0);
        shop.queue.try_enqueue(waiting).unwrap();
        shop.clock.tick();
        shop.clock.tick();

        assert!(barber.serve_next(&shop.ctx()));
        assert!(!barber.serve_next(&shop.ctx()));
        assert_eq!(barber.state(), BarberState::Idle);

        let summary = shop.stats.summary();
        assert_eq!(summary.customers_served, 1);
        assert_eq!(summary.total_revenue, 10.0);
        assert_eq!(summary.average_wait, Some(2.0));
        assert_eq!(summary.barbers[0].service_minutes, 9.0);
        assert_eq!(summary.barbers[0].work_minutes, 9.0);
    }

    #[test]
    fn test_missing_arrival_waits_zero() {
        let shop = Shop::new(1);
        let barber = Barber::new(BarberId::numbered(1), 13.0);
        shop.clock.tick();
        shop.queue.try_enqueue(order("Ada", HaircutKind::Dry, 3)).unwrap();

        barber.serve_next(&shop.ctx());
        assert_eq!(shop.stats.summary().average_wait, Some(0.0));
    }

    #[test]
    fn test_stopped_barber_drains_then_stops() {
        let shop = Shop::new(5);
        let barber = Barber::new(BarberId::numbered(1), 13.0);
        for name in ["A", "B", "C"] {
            shop.queue.try_enqueue(order(name, HaircutKind::Dry, 2)).unwrap();
        }

        barber.stop_working();
        barber.run(&shop.ctx());

        assert!(shop.queue.is_empty());
        assert_eq!(barber.state(), BarberState::Stopped);
        assert_eq!(shop.stats.customers_served(), 3);
    }

    #[test]
    fn test_stopped_barber_does_not_reopen() {
        let shop = Shop::new(5);
        let barber = Barber::new(BarberId::numbered(1), 13.0);
        barber.stop_working();
        barber.run(&shop.ctx());
        assert_eq!(barber.state(), BarberState::Stopped);

        shop.queue.try_enqueue(order("Late", HaircutKind::Dry, 2)).unwrap();
        barber.start_working();
        barber.run(&shop.ctx());

        assert_eq!(shop.queue.len(), 1);
        assert_eq!(shop.stats.customers_served(), 0);
    }
}
