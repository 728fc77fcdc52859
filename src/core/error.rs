use std::fmt;
use std::io;

/// Faults that end a simulation run.
///
/// Expected outcomes such as a full waiting room or an empty queue are not
/// errors; only bad configuration and platform thread failures are.
#[derive(Debug)]
pub enum SimulationError {
    /// A configuration value is out of range
    InvalidConfig(String),
    /// The OS refused to start a barber thread
    WorkerSpawn(io::Error),
    /// The rayon pool for the barbers could not be built
    ThreadPool(String),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            SimulationError::WorkerSpawn(err) => write!(f, "Failed to spawn barber thread: {}", err),
            SimulationError::ThreadPool(msg) => write!(f, "Failed to build barber pool: {}", msg),
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimulationError::WorkerSpawn(err) => Some(err),
            _ => None,
        }
    }
}

impl From<rayon::ThreadPoolBuildError> for SimulationError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        SimulationError::ThreadPool(err.to_string())
    }
}
