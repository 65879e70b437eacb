//! Axial rod element.

use serde::{Deserialize, Serialize};

use crate::errors::RodPropertyError;

/// Allowable stress assumed when a project omits one, in pascals.
pub const DEFAULT_ALLOWABLE_STRESS: f64 = 200.0e6;

/// A straight elastic rod carrying axial load only.
///
/// Rod `p` (0-based) always connects node `p` to node `p + 1`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rod {
    /// Length in metres.
    pub length: f64,
    /// Cross-sectional area in square metres.
    pub area: f64,
    /// Elastic modulus in pascals.
    pub elastic_modulus: f64,
    /// Uniformly distributed axial load in newtons per metre.
    #[serde(default)]
    pub distributed_load: f64,
    /// Allowable stress in pascals. Not used by the solver.
    #[serde(default = "default_allowable_stress")]
    pub allowable_stress: f64,
}

/// Serde default for [`Rod::allowable_stress`].
fn default_allowable_stress() -> f64 {
    DEFAULT_ALLOWABLE_STRESS
}

impl Rod {
    /// Create a rod from its geometric, material and loading properties.
    ///
    /// # Examples
    /// ```
    /// use rodchain::Rod;
    ///
    /// let rod = Rod::new(2.0, 0.5, 8.0e9, 0.0, 250.0e6);
    /// assert_eq!(rod.stiffness(), 2.0e9);
    /// ```
    #[must_use]
    pub const fn new(
        length: f64,
        area: f64,
        elastic_modulus: f64,
        distributed_load: f64,
        allowable_stress: f64,
    ) -> Self {
        Self {
            length,
            area,
            elastic_modulus,
            distributed_load,
            allowable_stress,
        }
    }

    /// Axial stiffness `E·A/L` in newtons per metre.
    #[must_use]
    pub fn stiffness(&self) -> f64 {
        self.elastic_modulus * self.area / self.length
    }

    /// Half of the total distributed load, `q·L/2`.
    ///
    /// The same value is added to the load vector at both end nodes.
    #[must_use]
    pub fn equivalent_nodal_load(&self) -> f64 {
        self.distributed_load * self.length / 2.0
    }

    /// Axial stress for the given internal force.
    #[must_use]
    pub fn stress(&self, axial_force: f64) -> f64 {
        axial_force / self.area
    }

    /// Check that length, area and modulus are finite and strictly positive and
    /// that the distributed load is finite.
    ///
    /// # Errors
    ///
    /// Returns the first offending property in the order length, area, modulus,
    /// distributed load.
    pub fn validate(&self) -> Result<(), RodPropertyError> {
        if !is_positive(self.length) {
            return Err(RodPropertyError::NonPositiveLength {
                length: self.length,
            });
        }
        if !is_positive(self.area) {
            return Err(RodPropertyError::NonPositiveArea { area: self.area });
        }
        if !is_positive(self.elastic_modulus) {
            return Err(RodPropertyError::NonPositiveElasticModulus {
                elastic_modulus: self.elastic_modulus,
            });
        }
        if !self.distributed_load.is_finite() {
            return Err(RodPropertyError::NonFiniteDistributedLoad {
                distributed_load: self.distributed_load,
            });
        }
        Ok(())
    }
}

/// Finite and strictly greater than zero.
fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
