use std::fmt;

/// A walk-in customer, identified only by name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    name: String,
}

impl Customer {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
