use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::shop::{Order, OrderView};

/// Admission refused because the waiting room was full. Carries the
/// rejected order back to the caller, which drops it.
#[derive(Debug)]
pub struct QueueFull(pub Order);

impl fmt::Display for QueueFull {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Waiting room full, turned away {}", self.0.customer())
    }
}

/// Bounded waiting room shared by the driver and every barber.
///
/// All operations take the same lock and never block beyond it. Orders are
/// pushed and popped at the same end, so under load the most recent arrival
/// is served first.
#[derive(Debug)]
pub struct OrderQueue {
    orders: Mutex<Vec<Order>>,
    capacity: usize,
}

impl OrderQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            orders: Mutex::new(Vec::with_capacity(capacity)),
            capacity,
        }
    }

    /// Admit `order` if there is room. Returns the queue length after the push.
    pub fn try_enqueue(&self, order: Order) -> Result<usize, QueueFull> {
        let mut orders = self.lock();
        if orders.len() >= self.capacity {
            return Err(QueueFull(order));
        }
        orders.push(order);
        Ok(orders.len())
    }

    /// Take the next order to serve, if any. Never waits for one to arrive.
    pub fn try_dequeue(&self) -> Option<Order> {
        self.lock().pop()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Waiting orders, next to be served first
    pub fn snapshot(&self) -> Vec<OrderView> {
        self.lock().iter().rev().map(Order::view).collect()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Order>> {
        self.orders.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shop::{Customer, HaircutKind};
    use std::sync::Arc;
    use std::thread;

    fn order(name: &str, duration: u32) -> Order {
        Order::with_duration(Customer::new(name), HaircutKind::Normal, duration)
    }

    #[test]
    fn test_rejects_when_full() {
        let queue = OrderQueue::new(2);
        assert_eq!(queue.try_enqueue(order("A", 5)).unwrap(), 1);
        assert_eq!(queue.try_enqueue(order("B", 5)).unwrap(), 2);

        let rejected = queue.try_enqueue(order("C", 5)).unwrap_err();
        assert_eq!(rejected.0.customer().name(), "C");
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_pops_most_recent_first() {
        let queue = OrderQueue::new(3);
        queue.try_enqueue(order("A", 10)).unwrap();
        queue.try_enqueue(order("B", 5)).unwrap();

        let names: Vec<_> = queue.snapshot().into_iter().map(|view| view.customer).collect();
        assert_eq!(names, vec!["B", "A"]);

        assert_eq!(queue.try_dequeue().unwrap().customer().name(), "B");
        assert_eq!(queue.try_dequeue().unwrap().customer().name(), "A");
        assert!(queue.try_dequeue().is_none());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_dequeued_order_keeps_its_id() {
        let queue = OrderQueue::new(2);
        let waiting = order("A", 5);
        let id = waiting.id();
        queue.try_enqueue(waiting).unwrap();
        assert_eq!(queue.try_dequeue().unwrap().id(), id);
    }

    #[test]
    fn test_concurrent_use_respects_capacity() {
        let queue = Arc::new(OrderQueue::new(4));
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let queue = Arc::clone(&queue);
                thread::spawn(move || {
                    for j in 0..200 {
                        if (i + j) % 3 == 0 {
                            queue.try_dequeue();
                        } else {
                            let _ = queue.try_enqueue(order("X", 1));
                        }
                        assert!(queue.len() <= queue.capacity());
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert!(queue.len() <= 4);
    }
}
