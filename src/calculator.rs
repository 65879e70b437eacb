//! Assembly, solution and post-processing for a chain of axial rods.

use log::{debug, trace, warn};
use nalgebra::{DMatrix, DVector};

use crate::errors::{CalculationError, EditError};
use crate::linalg::solve_partial_pivoting;
use crate::rod::Rod;
use crate::settings::SolverSettings;
use crate::solution::{Solution, StressCheck};

/// Finite element model of rods joined end to end.
///
/// Setters address rods and nodes with 1-based numbers, the way they are shown
/// to users. Accessors and result vectors use 0-based indices.
#[derive(Clone, Debug)]
pub struct RodCalculator {
    /// Rod `p` connects node `p` with node `p + 1`.
    rods: Vec<Rod>,
    /// Concentrated axial force at each node in newtons.
    forces: Vec<f64>,
    /// Numerical limits for the solver.
    settings: SolverSettings,
}

impl RodCalculator {
    /// Create a chain with `node_count` nodes and `node_count - 1` blank rods.
    ///
    /// # Examples
    /// ```
    /// use rodchain::RodCalculator;
    ///
    /// let calculator = RodCalculator::new(4);
    /// assert_eq!(calculator.node_count(), 4);
    /// assert_eq!(calculator.rod_count(), 3);
    /// ```
    #[must_use]
    pub fn new(node_count: usize) -> Self {
        Self::with_settings(node_count, SolverSettings::default())
    }

    /// Create a chain that uses the supplied solver settings.
    #[must_use]
    pub fn with_settings(node_count: usize, settings: SolverSettings) -> Self {
        Self {
            rods: vec![Rod::default(); node_count.saturating_sub(1)],
            forces: vec![0.0; node_count],
            settings,
        }
    }

    /// Return the number of nodes in the chain.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.forces.len()
    }

    /// Return the number of rods in the chain.
    #[must_use]
    pub fn rod_count(&self) -> usize {
        self.rods.len()
    }

    /// Return the solver settings in use.
    #[must_use]
    pub fn settings(&self) -> &SolverSettings {
        &self.settings
    }

    /// Set every property of a rod.
    ///
    /// `rod` is 1-based and must satisfy `1 <= rod < node_count`.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::UnknownRod`] when `rod` is out of range. The chain is
    /// left unchanged in that case.
    ///
    /// # Examples
    /// ```
    /// use rodchain::{EditError, RodCalculator};
    ///
    /// let mut calculator = RodCalculator::new(3);
    /// calculator
    ///     .set_rod(2, 1.5, 0.01, 200.0e9, 0.0, 160.0e6)
    ///     .expect("second rod exists");
    /// assert_eq!(calculator.rod_length(1), Some(1.5));
    ///
    /// let error = calculator
    ///     .set_rod(3, 1.0, 1.0, 1.0, 0.0, 1.0)
    ///     .expect_err("only two rods");
    /// assert_eq!(error, EditError::UnknownRod(3));
    /// ```
    pub fn set_rod(
        &mut self,
        rod: usize,
        length: f64,
        area: f64,
        elastic_modulus: f64,
        distributed_load: f64,
        allowable_stress: f64,
    ) -> Result<(), EditError> {
        if rod == 0 || rod > self.rods.len() {
            warn!("ignoring properties for rod {rod}: chain has {} rods", self.rods.len());
            return Err(EditError::UnknownRod(rod));
        }
        self.rods[rod - 1] = Rod::new(
            length,
            area,
            elastic_modulus,
            distributed_load,
            allowable_stress,
        );
        Ok(())
    }

    /// Set the concentrated force at a node.
    ///
    /// `node` is 1-based and must satisfy `1 <= node <= node_count`.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::UnknownNode`] when `node` is out of range. The chain is
    /// left unchanged in that case.
    pub fn set_force(&mut self, node: usize, force: f64) -> Result<(), EditError> {
        if node == 0 || node > self.forces.len() {
            warn!("ignoring force for node {node}: chain has {} nodes", self.forces.len());
            return Err(EditError::UnknownNode(node));
        }
        self.forces[node - 1] = force;
        Ok(())
    }

    /// Retrieve a rod by 0-based index.
    #[must_use]
    pub fn rod(&self, index: usize) -> Option<&Rod> {
        self.rods.get(index)
    }

    /// Retrieve the length of a rod by 0-based index.
    #[must_use]
    pub fn rod_length(&self, index: usize) -> Option<f64> {
        self.rods.get(index).map(|rod| rod.length)
    }

    /// Retrieve the cross-sectional area of a rod by 0-based index.
    #[must_use]
    pub fn rod_area(&self, index: usize) -> Option<f64> {
        self.rods.get(index).map(|rod| rod.area)
    }

    /// Retrieve the concentrated force at a node by 0-based index.
    #[must_use]
    pub fn force(&self, index: usize) -> Option<f64> {
        self.forces.get(index).copied()
    }

    /// Position of every node along the chain axis, starting at zero.
    #[must_use]
    pub fn node_coordinates(&self) -> Vec<f64> {
        let mut coordinates = Vec::with_capacity(self.node_count());
        if self.forces.is_empty() {
            return coordinates;
        }
        let mut x = 0.0;
        coordinates.push(x);
        for rod in &self.rods {
            x += rod.length;
            coordinates.push(x);
        }
        coordinates
    }

    /// Analyse the chain with the given supports.
    ///
    /// Node 0 is held when `left_anchor` is set and the last node when
    /// `right_anchor` is set. The calculator itself is not modified, so repeated
    /// calls with the same configuration give identical results.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError`] when the chain is empty, unsupported, too
    /// large, has a rod with invalid properties, or leads to a singular system.
    ///
    /// # Examples
    /// ```
    /// use rodchain::RodCalculator;
    ///
    /// let mut calculator = RodCalculator::new(3);
    /// calculator.set_rod(1, 1.0, 1.0, 1.0, 0.0, 100.0)?;
    /// calculator.set_rod(2, 1.0, 1.0, 1.0, 0.0, 100.0)?;
    /// calculator.set_force(2, 10.0)?;
    ///
    /// let solution = calculator.calculate(true, false)?;
    /// assert_eq!(solution.displacements, vec![0.0, 10.0, 10.0]);
    /// assert_eq!(solution.rod_forces, vec![10.0, 0.0]);
    /// assert_eq!(solution.node_stresses, vec![10.0, 5.0, 0.0]);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn calculate(
        &self,
        left_anchor: bool,
        right_anchor: bool,
    ) -> Result<Solution, CalculationError> {
        debug!(
            "calculating {} nodes, {} rods (left anchor: {left_anchor}, right anchor: {right_anchor})",
            self.node_count(),
            self.rod_count()
        );
        self.check_preconditions(left_anchor, right_anchor)?;

        let stiffness = self.build_stiffness_matrix();
        let load = self.build_load_vector();

        let mut constrained_stiffness = stiffness.clone();
        let mut constrained_load = load.clone();
        let last = self.node_count() - 1;
        if left_anchor {
            debug!("anchoring node 1");
            Self::apply_anchor(&mut constrained_stiffness, &mut constrained_load, 0);
        }
        if right_anchor {
            debug!("anchoring node {}", last + 1);
            Self::apply_anchor(&mut constrained_stiffness, &mut constrained_load, last);
        }

        let displacements = solve_partial_pivoting(
            &constrained_stiffness,
            &constrained_load,
            self.settings.pivot_tolerance,
        )?;
        debug!("displacements: {:?}", displacements.as_slice());

        let rod_forces = self.rod_forces(&displacements);
        debug!("rod forces: {rod_forces:?}");
        let node_stresses = self.node_stresses(&rod_forces);
        debug!("node stresses: {node_stresses:?}");
        let reactions =
            Self::support_reactions(&stiffness, &load, &displacements, left_anchor, right_anchor);

        Ok(Solution {
            displacements: displacements.iter().copied().collect(),
            rod_forces,
            node_stresses,
            reactions,
            left_anchor,
            right_anchor,
        })
    }

    /// Compare each nodal stress with the allowable stress of the adjoining rods.
    ///
    /// A node between two rods uses the smaller of their allowable stresses.
    #[must_use]
    pub fn stress_checks(&self, solution: &Solution) -> Vec<StressCheck> {
        solution
            .node_stresses
            .iter()
            .enumerate()
            .map(|(node, stress)| {
                let left = node.checked_sub(1).and_then(|index| self.rods.get(index));
                let right = self.rods.get(node);
                let allowable = left
                    .into_iter()
                    .chain(right)
                    .map(|rod| rod.allowable_stress)
                    .fold(f64::INFINITY, f64::min);
                StressCheck {
                    stress: stress.abs(),
                    allowable,
                }
            })
            .collect()
    }

    /// Reject configurations that cannot be solved before assembling anything.
    fn check_preconditions(
        &self,
        left_anchor: bool,
        right_anchor: bool,
    ) -> Result<(), CalculationError> {
        if self.rods.is_empty() {
            return Err(CalculationError::NoRods);
        }
        if self.rods.len() > self.settings.max_rods {
            return Err(CalculationError::TooManyRods {
                count: self.rods.len(),
                limit: self.settings.max_rods,
            });
        }
        if !left_anchor && !right_anchor {
            return Err(CalculationError::MissingAnchor);
        }
        for (index, rod) in self.rods.iter().enumerate() {
            trace!(
                "rod {}: L={} A={} E={} q={}",
                index + 1,
                rod.length,
                rod.area,
                rod.elastic_modulus,
                rod.distributed_load
            );
            rod.validate()
                .map_err(|source| CalculationError::InvalidRodProperty {
                    rod: index + 1,
                    source,
                })?;
        }
        if let Some((index, force)) = self
            .forces
            .iter()
            .enumerate()
            .find(|(_, force)| !force.is_finite())
        {
            return Err(CalculationError::NonFiniteForce {
                node: index + 1,
                force: *force,
            });
        }
        Ok(())
    }

    /// Assemble the global stiffness matrix from the two-node bar stencil.
    fn build_stiffness_matrix(&self) -> DMatrix<f64> {
        let n = self.node_count();
        let mut matrix = DMatrix::zeros(n, n);
        for (p, rod) in self.rods.iter().enumerate() {
            let k = rod.stiffness();
            trace!("stiffness of rod {}: {k}", p + 1);
            matrix[(p, p)] += k;
            matrix[(p, p + 1)] -= k;
            matrix[(p + 1, p)] -= k;
            matrix[(p + 1, p + 1)] += k;
        }
        matrix
    }

    /// Assemble nodal forces plus half of each rod's distributed load at both ends.
    fn build_load_vector(&self) -> DVector<f64> {
        let mut load = DVector::from_column_slice(&self.forces);
        for (p, rod) in self.rods.iter().enumerate() {
            let half = rod.equivalent_nodal_load();
            load[p] += half;
            load[p + 1] += half;
        }
        debug!("load vector: {:?}", load.as_slice());
        load
    }

    /// Fix the displacement of `node` to zero without changing the system size.
    fn apply_anchor(matrix: &mut DMatrix<f64>, load: &mut DVector<f64>, node: usize) {
        matrix.row_mut(node).fill(0.0);
        matrix.column_mut(node).fill(0.0);
        matrix[(node, node)] = 1.0;
        load[node] = 0.0;
    }

    /// Internal axial force `EA/L·(u₂ − u₁) − qL/2` of every rod.
    fn rod_forces(&self, displacements: &DVector<f64>) -> Vec<f64> {
        self.rods
            .iter()
            .enumerate()
            .map(|(p, rod)| {
                let elongation = displacements[p + 1] - displacements[p];
                rod.stiffness() * elongation - rod.equivalent_nodal_load()
            })
            .collect()
    }

    /// Stress at each node; interior nodes average the two adjoining rods.
    fn node_stresses(&self, rod_forces: &[f64]) -> Vec<f64> {
        let rod_stresses: Vec<f64> = self
            .rods
            .iter()
            .zip(rod_forces)
            .map(|(rod, force)| rod.stress(*force))
            .collect();
        let last = self.node_count() - 1;
        (0..self.node_count())
            .map(|node| {
                if node == 0 {
                    rod_stresses[0]
                } else if node == last {
                    rod_stresses[last - 1]
                } else {
                    (rod_stresses[node - 1] + rod_stresses[node]) / 2.0
                }
            })
            .collect()
    }

    /// Residual `K·u − b` of the unconstrained system at the anchored nodes.
    fn support_reactions(
        stiffness: &DMatrix<f64>,
        load: &DVector<f64>,
        displacements: &DVector<f64>,
        left_anchor: bool,
        right_anchor: bool,
    ) -> Vec<f64> {
        let residual = stiffness * displacements - load;
        let last = residual.len() - 1;
        residual
            .iter()
            .enumerate()
            .map(|(node, value)| {
                if (node == 0 && left_anchor) || (node == last && right_anchor) {
                    *value
                } else {
                    0.0
                }
            })
            .collect()
    }
}
