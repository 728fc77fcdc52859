//! Console rendering of the shop floor

use crate::core::simulation::{ShopObserver, ShopSnapshot};
use crate::core::stats::SimulationSummary;
use crate::shop::OrderView;

/// Prints the shop state every tick and the summary at the end
#[derive(Debug, Clone)]
pub struct ConsoleRenderer {
    /// Characters per service minute in queue bars
    bar_scale: f64,
}

impl ConsoleRenderer {
    pub fn new() -> Self {
        Self { bar_scale: 1.0 }
    }

    /// Set how many `#` characters each service minute gets in queue bars
    pub fn with_bar_scale(mut self, scale: f64) -> Self {
        self.bar_scale = scale;
        self
    }

    pub fn render(&self, snapshot: &ShopSnapshot) -> String {
        let mut out = format!("Time: {}\n", snapshot.time);

        for barber in &snapshot.barbers {
            match &barber.order {
                Some(order) => out.push_str(&format!(
                    "{}: serving {} ({}, {} min)\n",
                    barber.id, order.customer, order.kind, order.duration
                )),
                None => out.push_str(&format!("{}: {}\n", barber.id, barber.state)),
            }
        }

        out.push_str("Waiting room:\n");
        if snapshot.queue.is_empty() {
            out.push_str("Queue Empty\n");
        }
        for order in &snapshot.queue {
            out.push_str(&self.queue_line(order));
        }
        out
    }

    fn queue_line(&self, order: &OrderView) -> String {
        let bar = "#".repeat((order.duration as f64 * self.bar_scale) as usize);
        format!(
            "{:10} | {:14} | {} ({}m)\n",
            order.customer,
            order.kind.label(),
            bar,
            order.duration
        )
    }
}

impl Default for ConsoleRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ShopObserver for ConsoleRenderer {
    fn on_tick(&mut self, snapshot: &ShopSnapshot) {
        println!("{}", self.render(snapshot));
    }

    fn on_finish(&mut self, snapshot: &ShopSnapshot, summary: &SimulationSummary) {
        println!("{}", self.render(snapshot));
        println!("{}", summary);
    }
}
