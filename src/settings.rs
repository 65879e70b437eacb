//! Tunable limits for the solver.

use serde::{Deserialize, Serialize};

/// Numerical limits applied by [`RodCalculator`](crate::RodCalculator).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    /// Smallest pivot magnitude accepted during elimination.
    pub pivot_tolerance: f64,
    /// Largest number of rods a calculation accepts.
    pub max_rods: usize,
    /// Displacement magnitude below which a free node counts as stationary.
    pub stationary_tolerance: f64,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            pivot_tolerance: 1.0e-15,
            max_rods: 1_000,
            stationary_tolerance: 1.0e-10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_settings_fill_in_defaults() {
        let settings: SolverSettings =
            serde_json::from_str(r#"{"max_rods": 10}"#).expect("settings parse");
        assert_eq!(settings.max_rods, 10);
        assert_eq!(settings.pivot_tolerance, 1.0e-15);
        assert_eq!(settings.stationary_tolerance, 1.0e-10);
    }
}
