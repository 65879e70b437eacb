#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Finite element analysis of axially loaded rod chains.
//!
//! Rods are joined end to end, so rod `p` always spans node `p` to node
//! `p + 1`. Either end of the chain may be anchored. Loads are concentrated
//! forces at the nodes and uniformly distributed loads along the rods.
//! [`RodCalculator::calculate`] assembles the stiffness system, applies the
//! anchors, solves it by Gaussian elimination with partial pivoting and
//! recovers rod forces and nodal stresses.
//!
//! # Examples
//! ```
//! use rodchain::RodCalculator;
//!
//! let mut calculator = RodCalculator::new(2);
//! calculator.set_rod(1, 1.0, 0.01, 200.0e9, 0.0, 250.0e6)?;
//! calculator.set_force(2, 5_000.0)?;
//!
//! let solution = calculator.calculate(true, false)?;
//! assert!(solution.displacements[1] > 0.0);
//! assert!((solution.rod_forces[0] - 5_000.0).abs() < 1.0e-6);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod calculator;
mod errors;
mod linalg;
mod project;
mod rod;
mod settings;
mod solution;

pub use calculator::RodCalculator;
pub use errors::{CalculationError, EditError, ProjectError, RodPropertyError};
pub use project::RodSystem;
pub use rod::{Rod, DEFAULT_ALLOWABLE_STRESS};
pub use settings::SolverSettings;
pub use solution::{NodeStatus, Solution, StressCheck};
