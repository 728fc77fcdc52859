//! Run statistics shared by the driver and all barbers.
//!
//! Every recording method takes one lock for its whole update and cannot
//! fail. Counters only grow during a run; [`StatsTracker::summary`] derives
//! the report afterwards.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::types::BarberId;
use crate::shop::HaircutKind;

/// One served order, in completion order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletedHaircut {
    pub barber: BarberId,
    pub customer: String,
    pub kind: HaircutKind,
    pub duration: u32,
    /// Minutes between admission and the start of service
    pub wait: f64,
    /// Simulation minute at which service ended
    pub finished_at: u64,
}

#[derive(Debug, Clone)]
struct BarberTally {
    id: BarberId,
    wage: f64,
    haircuts: u64,
    service_minutes: f64,
    idle_minutes: f64,
    work_minutes: f64,
}

impl BarberTally {
    fn new(id: BarberId, wage: f64) -> Self {
        Self {
            id,
            wage,
            haircuts: 0,
            service_minutes: 0.0,
            idle_minutes: 0.0,
            work_minutes: 0.0,
        }
    }
}

#[derive(Debug, Default)]
struct Ledger {
    barbers: Vec<BarberTally>,
    peak_queue_length: usize,
    customers_admitted: u64,
    customers_lost: u64,
    total_revenue: f64,
    wait_times: Vec<f64>,
    distribution: BTreeMap<HaircutKind, u64>,
    completed: Vec<CompletedHaircut>,
}

impl Ledger {
    fn tally_mut(&mut self, barber: &BarberId) -> &mut BarberTally {
        let index = match self.barbers.iter().position(|tally| &tally.id == barber) {
            Some(index) => index,
            None => {
                self.barbers.push(BarberTally::new(barber.clone(), 0.0));
                self.barbers.len() - 1
            }
        };
        &mut self.barbers[index]
    }
}

/// Thread-safe collector for every run statistic
#[derive(Debug, Default)]
pub struct StatsTracker {
    ledger: Mutex<Ledger>,
}

impl StatsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a barber to the report with its hourly wage. Barbers that record
    /// without registering are reported with a zero wage.
    pub fn register_barber(&self, barber: &BarberId, wage: f64) {
        self.lock().tally_mut(barber).wage = wage;
    }

    /// Count an admitted customer and track the longest queue seen
    pub fn record_new_customer(&self, queue_length: usize) {
        let mut ledger = self.lock();
        ledger.customers_admitted += 1;
        ledger.peak_queue_length = ledger.peak_queue_length.max(queue_length);
    }

    /// Count a customer turned away by a full waiting room
    pub fn record_customer_lost(&self) {
        self.lock().customers_lost += 1;
    }

    /// Record minutes between admission and start of service
    pub fn record_wait_time(&self, minutes: f64) {
        self.lock().wait_times.push(minutes);
    }

    /// Record a finished haircut
    ///
    /// # Arguments
    /// * `barber` - Barber that served it
    /// * `service_minutes` - Simulated service time
    /// * `revenue` - Price charged in dollars
    /// * `kind` - Haircut kind, for the distribution
    pub fn record_haircut(&self, barber: &BarberId, service_minutes: f64, revenue: f64, kind: HaircutKind) {
        let mut ledger = self.lock();
        let tally = ledger.tally_mut(barber);
        tally.haircuts += 1;
        tally.service_minutes += service_minutes;
        ledger.total_revenue += revenue;
        *ledger.distribution.entry(kind).or_insert(0) += 1;
    }

    /// Add idle minutes to a barber's tally
    pub fn record_idle_time(&self, barber: &BarberId, minutes: f64) {
        self.lock().tally_mut(barber).idle_minutes += minutes;
    }

    /// Add worked minutes to a barber's tally
    pub fn record_work_time(&self, barber: &BarberId, minutes: f64) {
        self.lock().tally_mut(barber).work_minutes += minutes;
    }

    /// Append a served order to the service log
    pub fn record_completed(&self, haircut: CompletedHaircut) {
        self.lock().completed.push(haircut);
    }

    /// Longest waiting-room length seen right after an admission
    pub fn peak_queue_length(&self) -> usize {
        self.lock().peak_queue_length
    }

    pub fn customers_lost(&self) -> u64 {
        self.lock().customers_lost
    }

    pub fn customers_admitted(&self) -> u64 {
        self.lock().customers_admitted
    }

    /// Haircuts finished across all barbers
    pub fn customers_served(&self) -> u64 {
        self.lock().barbers.iter().map(|tally| tally.haircuts).sum()
    }

    /// Served orders in the order they finished
    pub fn completed(&self) -> Vec<CompletedHaircut> {
        self.lock().completed.clone()
    }

    /// Derive the end-of-run report
    pub fn summary(&self) -> SimulationSummary {
        let ledger = self.lock();

        let barbers: Vec<BarberSummary> = ledger.barbers.iter().map(BarberSummary::from_tally).collect();
        let customers_served: u64 = barbers.iter().map(|barber| barber.haircuts).sum();
        let total_wages: f64 = barbers.iter().map(|barber| barber.wages).sum();

        let overall_service: f64 = barbers.iter().map(|barber| barber.service_minutes).sum();
        let overall_idle: f64 = barbers.iter().map(|barber| barber.idle_minutes).sum();

        let (average_wait, max_wait) = if ledger.wait_times.is_empty() {
            (None, None)
        } else {
            let total: f64 = ledger.wait_times.iter().sum();
            let max = ledger.wait_times.iter().copied().fold(f64::MIN, f64::max);
            (Some(total / ledger.wait_times.len() as f64), Some(max))
        };

        SimulationSummary {
            customers_served,
            customers_admitted: ledger.customers_admitted,
            customers_lost: ledger.customers_lost,
            peak_queue_length: ledger.peak_queue_length,
            total_revenue: ledger.total_revenue,
            total_wages,
            profit: ledger.total_revenue - total_wages,
            average_wait,
            max_wait,
            overall_utilization: percent(overall_service, overall_service + overall_idle),
            average_idle_per_barber: ratio(overall_idle, barbers.len() as f64),
            average_revenue_per_customer: ratio(ledger.total_revenue, customers_served as f64),
            haircut_distribution: ledger.distribution.clone(),
            barbers,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Ledger> {
        self.ledger.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Per-barber figures of the final report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarberSummary {
    pub id: BarberId,
    pub haircuts: u64,
    pub service_minutes: f64,
    pub idle_minutes: f64,
    pub work_minutes: f64,
    /// Percent of service + idle time spent serving
    pub utilization: f64,
    pub idle_ratio: f64,
    pub average_service: f64,
    pub wages: f64,
}

impl BarberSummary {
    fn from_tally(tally: &BarberTally) -> Self {
        let active = tally.service_minutes + tally.idle_minutes;
        Self {
            id: tally.id.clone(),
            haircuts: tally.haircuts,
            service_minutes: tally.service_minutes,
            idle_minutes: tally.idle_minutes,
            work_minutes: tally.work_minutes,
            utilization: percent(tally.service_minutes, active),
            idle_ratio: percent(tally.idle_minutes, active),
            average_service: ratio(tally.service_minutes, tally.haircuts as f64),
            // paid by the whole minute
            wages: tally.wage * active.round() / 60.0,
        }
    }
}

/// End-of-run report. Money in dollars, times in simulated minutes,
/// utilization figures in percent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationSummary {
    pub customers_served: u64,
    pub customers_admitted: u64,
    pub customers_lost: u64,
    pub peak_queue_length: usize,
    pub total_revenue: f64,
    pub total_wages: f64,
    pub profit: f64,
    pub average_wait: Option<f64>,
    pub max_wait: Option<f64>,
    pub barbers: Vec<BarberSummary>,
    pub overall_utilization: f64,
    pub average_idle_per_barber: f64,
    pub average_revenue_per_customer: f64,
    pub haircut_distribution: BTreeMap<HaircutKind, u64>,
}

impl fmt::Display for SimulationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Simulation Summary ===")?;
        writeln!(f)?;
        writeln!(f, "Total Customers Served: {}", self.customers_served)?;
        writeln!(f, "Customers Admitted: {}", self.customers_admitted)?;
        writeln!(f, "Customers Lost: {}", self.customers_lost)?;
        writeln!(f, "Peak Queue Length: {}", self.peak_queue_length)?;

        writeln!(f)?;
        writeln!(f, "Total Revenue: ${:.2}", self.total_revenue)?;
        writeln!(f, "Total Wages: ${:.2}", self.total_wages)?;
        writeln!(f, "Profit: ${:.2}", self.profit)?;

        if let (Some(average), Some(max)) = (self.average_wait, self.max_wait) {
            writeln!(f)?;
            writeln!(f, "Average Customer Wait Time: {:.2} min", average)?;
            writeln!(f, "Maximum Customer Wait Time: {:.2} min", max)?;
        }

        writeln!(f)?;
        writeln!(f, "Per-Barber Stats:")?;
        for barber in &self.barbers {
            writeln!(
                f,
                "{}: Haircuts={}, Service={:.0} min, Idle={:.0} min, Utilization={:.2}%, \
                 Idle Ratio={:.2}%, Avg Service={:.2} min, Wages=${:.2}",
                barber.id,
                barber.haircuts,
                barber.service_minutes,
                barber.idle_minutes,
                barber.utilization,
                barber.idle_ratio,
                barber.average_service,
                barber.wages,
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Shop-Level Metrics:")?;
        writeln!(f, "Overall Barber Utilization: {:.2}%", self.overall_utilization)?;
        writeln!(f, "Average Idle Time per Barber: {:.2} min", self.average_idle_per_barber)?;
        writeln!(f, "Average Revenue per Customer Served: ${:.2}", self.average_revenue_per_customer)?;

        writeln!(f)?;
        writeln!(f, "Haircut Distribution:")?;
        for (kind, count) in &self.haircut_distribution {
            writeln!(f, "{}: {}", kind, count)?;
        }
        Ok(())
    }
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

fn percent(part: f64, whole: f64) -> f64 {
    ratio(part, whole) * 100.0
}
