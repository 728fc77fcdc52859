use serde::{Deserialize, Serialize};

/// Identifier of one barber in the pool
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BarberId {
    pub(crate) id: String,
}

impl BarberId {
    /// Create a barber ID from any name
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// The conventional name of the `index`-th barber, counting from 1
    pub fn numbered(index: usize) -> Self {
        Self::new(format!("Barber-{}", index))
    }

    /// Get the raw ID string
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl std::fmt::Display for BarberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// Lifecycle of a barber's service loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BarberState {
    /// Waiting for an order (or not yet started)
    Idle,
    /// Cutting hair
    Serving,
    /// Loop has exited; terminal
    Stopped,
}

impl std::fmt::Display for BarberState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BarberState::Idle => write!(f, "idle"),
            BarberState::Serving => write!(f, "serving"),
            BarberState::Stopped => write!(f, "stopped"),
        }
    }
}
