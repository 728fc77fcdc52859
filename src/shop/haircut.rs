use serde::{Deserialize, Serialize};
use std::fmt;

/// Services offered by the shop, each with a fixed price and a base duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HaircutKind {
    Normal,
    Dry,
    NormalWash,
    BeardTrim,
    BeardShave,
    HairBeard,
    KidsCut,
}

impl HaircutKind {
    /// Every catalog entry, in menu order
    pub const ALL: [HaircutKind; 7] = [
        HaircutKind::Normal,
        HaircutKind::Dry,
        HaircutKind::NormalWash,
        HaircutKind::BeardTrim,
        HaircutKind::BeardShave,
        HaircutKind::HairBeard,
        HaircutKind::KidsCut,
    ];

    /// Human-readable menu label
    pub fn label(&self) -> &'static str {
        match self {
            HaircutKind::Normal => "Normal Haircut",
            HaircutKind::Dry => "Dry Haircut",
            HaircutKind::NormalWash => "Haircut + Wash",
            HaircutKind::BeardTrim => "Beard Trim",
            HaircutKind::BeardShave => "Beard Shave",
            HaircutKind::HairBeard => "Hair + Beard",
            HaircutKind::KidsCut => "Kids Haircut",
        }
    }

    /// Price in dollars
    pub fn price(&self) -> f64 {
        match self {
            HaircutKind::Normal => 15.0,
            HaircutKind::Dry => 10.0,
            HaircutKind::NormalWash => 17.0,
            HaircutKind::BeardTrim => 10.0,
            HaircutKind::BeardShave => 12.0,
            HaircutKind::HairBeard => 25.0,
            HaircutKind::KidsCut => 12.0,
        }
    }

    /// Nominal service time in minutes
    pub fn base_duration(&self) -> u32 {
        match self {
            HaircutKind::Normal => 20,
            HaircutKind::Dry => 15,
            HaircutKind::NormalWash => 30,
            HaircutKind::BeardTrim => 10,
            HaircutKind::BeardShave => 15,
            HaircutKind::HairBeard => 40,
            HaircutKind::KidsCut => 15,
        }
    }
}

impl fmt::Display for HaircutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_values() {
        assert_eq!(HaircutKind::HairBeard.price(), 25.0);
        assert_eq!(HaircutKind::HairBeard.base_duration(), 40);
        assert_eq!(HaircutKind::BeardTrim.label(), "Beard Trim");
        assert_eq!(HaircutKind::NormalWash.to_string(), "Haircut + Wash");
    }

    #[test]
    fn test_all_durations_positive() {
        for kind in HaircutKind::ALL {
            assert!(kind.base_duration() > 0, "{} has no duration", kind);
            assert!(kind.price() > 0.0);
        }
    }
}
