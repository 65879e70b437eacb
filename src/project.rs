//! Serialisable problem definitions.

use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::calculator::RodCalculator;
use crate::errors::ProjectError;
use crate::rod::Rod;
use crate::settings::SolverSettings;
use crate::solution::Solution;

/// Everything needed to rebuild and analyse a rod chain.
///
/// # Examples
/// ```
/// use rodchain::RodSystem;
///
/// let system = RodSystem::from_json_str(
///     r#"{
///         "left_anchor": true,
///         "rods": [{ "length": 1.0, "area": 1.0, "elastic_modulus": 1.0 }],
///         "node_forces": [0.0, 4.0]
///     }"#,
/// )?;
/// let solution = system.calculate()?;
/// assert_eq!(solution.displacements, vec![0.0, 4.0]);
/// # Ok::<(), rodchain::ProjectError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RodSystem {
    /// Whether the first node is held.
    #[serde(default)]
    pub left_anchor: bool,
    /// Whether the last node is held.
    #[serde(default)]
    pub right_anchor: bool,
    /// Rods from left to right.
    pub rods: Vec<Rod>,
    /// Concentrated force at every node; empty means no nodal forces.
    #[serde(default)]
    pub node_forces: Vec<f64>,
    /// Solver limits; defaults apply when omitted.
    #[serde(default)]
    pub settings: SolverSettings,
}

impl RodSystem {
    /// Parse a project from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::Json`] for malformed input.
    pub fn from_json_str(json: &str) -> Result<Self, ProjectError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Render the project as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::Json`] if serialisation fails.
    pub fn to_json_string(&self) -> Result<String, ProjectError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a project file.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::Io`] when the file cannot be read and
    /// [`ProjectError::Json`] when its contents are malformed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProjectError> {
        let path = path.as_ref();
        let system = Self::from_json_str(&fs::read_to_string(path)?)?;
        info!(
            "loaded {} rods from {}",
            system.rods.len(),
            path.display()
        );
        Ok(system)
    }

    /// Write the project to a file, replacing any existing contents.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::Io`] when the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ProjectError> {
        let path = path.as_ref();
        fs::write(path, self.to_json_string()?)?;
        info!("saved {} rods to {}", self.rods.len(), path.display());
        Ok(())
    }

    /// Number of nodes implied by the rods.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.rods.len() + 1
    }

    /// Build a calculator populated with these rods and forces.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::ForceCountMismatch`] when `node_forces` is neither
    /// empty nor one entry per node.
    pub fn calculator(&self) -> Result<RodCalculator, ProjectError> {
        let node_count = self.node_count();
        if !self.node_forces.is_empty() && self.node_forces.len() != node_count {
            return Err(ProjectError::ForceCountMismatch {
                expected: node_count,
                found: self.node_forces.len(),
            });
        }

        let mut calculator = RodCalculator::with_settings(node_count, self.settings);
        for (index, rod) in self.rods.iter().enumerate() {
            calculator.set_rod(
                index + 1,
                rod.length,
                rod.area,
                rod.elastic_modulus,
                rod.distributed_load,
                rod.allowable_stress,
            )?;
        }
        for (index, force) in self.node_forces.iter().enumerate() {
            calculator.set_force(index + 1, *force)?;
        }
        Ok(calculator)
    }

    /// Build a calculator and analyse it with the stored anchors.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError`] when the calculator cannot be built or the
    /// calculation fails.
    pub fn calculate(&self) -> Result<Solution, ProjectError> {
        let solution = self
            .calculator()?
            .calculate(self.left_anchor, self.right_anchor)?;
        Ok(solution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CalculationError;

    fn two_rod_system() -> RodSystem {
        RodSystem {
            left_anchor: true,
            right_anchor: false,
            rods: vec![
                Rod::new(1.0, 2.0, 3.0, 0.5, 150.0e6),
                Rod::new(2.0, 1.0, 4.0, 0.0, 200.0e6),
            ],
            node_forces: vec![0.0, 1.0, -2.0],
            settings: SolverSettings::default(),
        }
    }

    #[test]
    fn json_round_trip_preserves_fields() {
        let system = two_rod_system();
        let json = system.to_json_string().expect("serialises");
        let parsed = RodSystem::from_json_str(&json).expect("parses");
        assert_eq!(parsed, system);
    }

    #[test]
    fn saved_project_can_be_loaded() {
        let system = two_rod_system();
        let path = std::env::temp_dir().join(format!(
            "rodchain-project-{}.json",
            std::process::id()
        ));
        system.save(&path).expect("project saved");
        let loaded = RodSystem::load(&path).expect("project loaded");
        std::fs::remove_file(&path).expect("temporary file removed");
        assert_eq!(loaded, system);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let error = RodSystem::load("/nonexistent/rodchain/project.json")
            .expect_err("file does not exist");
        assert!(matches!(error, ProjectError::Io(_)));
    }

    #[test]
    fn malformed_json_is_rejected() {
        let error = RodSystem::from_json_str("{ \"rods\": 3 }").expect_err("rods must be a list");
        assert!(matches!(error, ProjectError::Json(_)));
    }

    #[test]
    fn calculator_mirrors_project() {
        let calculator = two_rod_system().calculator().expect("calculator built");
        assert_eq!(calculator.node_count(), 3);
        assert_eq!(calculator.rod_count(), 2);
        assert_eq!(calculator.rod_length(1), Some(2.0));
        assert_eq!(calculator.force(2), Some(-2.0));
    }

    #[test]
    fn force_count_must_match_nodes() {
        let system = RodSystem {
            node_forces: vec![1.0, 2.0],
            ..two_rod_system()
        };
        let error = system.calculator().expect_err("one force short");
        assert!(matches!(
            error,
            ProjectError::ForceCountMismatch {
                expected: 3,
                found: 2
            }
        ));
    }

    #[test]
    fn empty_force_list_means_unloaded_nodes() {
        let system = RodSystem {
            node_forces: Vec::new(),
            ..two_rod_system()
        };
        let calculator = system.calculator().expect("calculator built");
        assert_eq!(calculator.force(0), Some(0.0));
        assert_eq!(calculator.force(2), Some(0.0));
    }

    #[test]
    fn calculation_errors_are_forwarded() {
        let system = RodSystem {
            left_anchor: false,
            ..two_rod_system()
        };
        let error = system.calculate().expect_err("no anchors");
        assert!(matches!(
            error,
            ProjectError::Calculation(CalculationError::MissingAnchor)
        ));
    }
}
