// Tests for coordinated shutdown across queue, barbers and pool
#[cfg(test)]
mod tests {
    use crate::core::{
        barber::ServiceContext,
        clock::SimulationClock,
        config::{ConcurrencyMode, ShopConfig},
        pool::BarberPool,
        queue::OrderQueue,
        simulation::admit,
        stats::StatsTracker,
    };
    use crate::shop::{Customer, HaircutKind, Order};
    use std::thread;
    use std::time::Duration;

    struct Floor {
        queue: OrderQueue,
        clock: SimulationClock,
        stats: StatsTracker,
    }

    impl Floor {
        fn new(capacity: usize) -> Self {
            Self {
                queue: OrderQueue::new(capacity),
                clock: SimulationClock::new(0, 10_000.0),
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

    fn order(i: usize) -> Order {
        Order::with_duration(Customer::new(format!("C{}", i)), HaircutKind::BeardTrim, 5)
    }

    #[test]
    fn test_stop_mid_run_drains_queue() {
        let floor = Floor::new(20);
        let pool = BarberPool::new(&ShopConfig::new().with_num_barbers(3));
        pool.register_with(&floor.stats);

        pool.run(&floor.ctx(), |pool| {
            // let the barbers go idle first
            thread::sleep(Duration::from_millis(5));
            for i in 0..15 {
                assert!(admit(&floor.queue, &floor.stats, order(i)));
            }
            pool.stop_all();
            pool.stop_all();
        })
        .unwrap();

        assert!(floor.queue.is_empty());
        assert!(pool.all_stopped());
        assert_eq!(floor.stats.customers_served(), 15);
        assert_eq!(floor.stats.completed().len(), 15);
    }

    #[test]
    fn test_rayon_pool_matches_threads() {
        let mut served = Vec::new();
        for mode in [ConcurrencyMode::Threads, ConcurrencyMode::Rayon] {
            let floor = Floor::new(12);
            for i in 0..12 {
                floor.queue.try_enqueue(order(i)).unwrap();
            }
            let pool = BarberPool::new(&ShopConfig::new().with_num_barbers(4).with_concurrency(mode));
            pool.run(&floor.ctx(), |_| ()).unwrap();
            served.push(floor.stats.summary().customers_served);
        }
        assert_eq!(served, vec![12, 12]);
    }

    #[test]
    fn test_idle_time_accumulates_while_waiting() {
        let floor = Floor::new(1);
        let pool = BarberPool::new(&ShopConfig::new().with_num_barbers(2));
        pool.register_with(&floor.stats);

        pool.run(&floor.ctx(), |_| thread::sleep(Duration::from_millis(10)))
            .unwrap();

        let summary = floor.stats.summary();
        assert_eq!(summary.customers_served, 0);
        assert!(summary.barbers.iter().all(|barber| barber.idle_minutes > 0.0));
        assert_eq!(summary.overall_utilization, 0.0);
    }
}
