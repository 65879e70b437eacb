//! Results of a rod chain calculation.

use serde::{Deserialize, Serialize};

/// Complete, consistent output of [`RodCalculator::calculate`](crate::RodCalculator::calculate).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    /// Axial displacement of every node in metres.
    pub displacements: Vec<f64>,
    /// Internal axial force of every rod in newtons, tension positive.
    pub rod_forces: Vec<f64>,
    /// Axial stress reported at every node in pascals.
    pub node_stresses: Vec<f64>,
    /// Support reaction at every node in newtons, zero away from anchors.
    pub reactions: Vec<f64>,
    /// Whether node 0 was held.
    pub left_anchor: bool,
    /// Whether the last node was held.
    pub right_anchor: bool,
}

/// Classification of a node after the calculation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeStatus {
    /// The node is a support.
    Anchored,
    /// The node is free but its displacement is negligible.
    Stationary,
    /// The node moved.
    Free,
}

/// Comparison of a nodal stress with the allowable stress of the rods at that node.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StressCheck {
    /// Magnitude of the nodal stress in pascals.
    pub stress: f64,
    /// Allowable stress in pascals.
    pub allowable: f64,
}

impl StressCheck {
    /// Whether the stress magnitude stays within the allowable value.
    #[must_use]
    pub fn is_within_limit(&self) -> bool {
        self.stress <= self.allowable
    }

    /// Ratio of allowable to actual stress, infinite for an unstressed node.
    #[must_use]
    pub fn factor_of_safety(&self) -> f64 {
        if self.stress == 0.0 {
            f64::INFINITY
        } else {
            self.allowable / self.stress
        }
    }
}

impl Solution {
    /// Number of nodes covered by the solution.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.displacements.len()
    }

    /// Number of rods covered by the solution.
    #[must_use]
    pub fn rod_count(&self) -> usize {
        self.rod_forces.len()
    }

    /// Whether the 0-based node is one of the anchored ends.
    #[must_use]
    pub fn is_anchored(&self, node: usize) -> bool {
        let last = self.node_count().saturating_sub(1);
        (node == 0 && self.left_anchor) || (node == last && self.right_anchor)
    }

    /// Classify a 0-based node, or `None` when it does not exist.
    ///
    /// # Examples
    /// ```
    /// use rodchain::{NodeStatus, RodCalculator};
    ///
    /// let mut calculator = RodCalculator::new(2);
    /// calculator.set_rod(1, 1.0, 1.0, 1.0, 0.0, 1.0).expect("rod exists");
    /// calculator.set_force(2, 1.0).expect("node exists");
    /// let solution = calculator.calculate(true, false).expect("chain is anchored");
    ///
    /// assert_eq!(solution.node_status(0, 1.0e-10), Some(NodeStatus::Anchored));
    /// assert_eq!(solution.node_status(1, 1.0e-10), Some(NodeStatus::Free));
    /// assert_eq!(solution.node_status(2, 1.0e-10), None);
    /// ```
    #[must_use]
    pub fn node_status(&self, node: usize, tolerance: f64) -> Option<NodeStatus> {
        let displacement = *self.displacements.get(node)?;
        let status = if self.is_anchored(node) {
            NodeStatus::Anchored
        } else if displacement.abs() < tolerance {
            NodeStatus::Stationary
        } else {
            NodeStatus::Free
        };
        Some(status)
    }

    /// Largest nodal stress magnitude, zero for an empty solution.
    #[must_use]
    pub fn max_abs_stress(&self) -> f64 {
        self.node_stresses
            .iter()
            .fold(0.0, |max, stress| f64::max(max, stress.abs()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Solution {
        Solution {
            displacements: vec![0.0, 1.0e-12, 2.0e-3],
            rod_forces: vec![5.0, -8.0],
            node_stresses: vec![5.0, -1.5, -8.0],
            reactions: vec![-3.0, 0.0, 0.0],
            left_anchor: true,
            right_anchor: false,
        }
    }

    #[test]
    fn classifies_nodes() {
        let solution = sample();
        assert_eq!(solution.node_status(0, 1.0e-10), Some(NodeStatus::Anchored));
        assert_eq!(
            solution.node_status(1, 1.0e-10),
            Some(NodeStatus::Stationary)
        );
        assert_eq!(solution.node_status(2, 1.0e-10), Some(NodeStatus::Free));
        assert_eq!(solution.node_status(3, 1.0e-10), None);
    }

    #[test]
    fn right_anchor_marks_last_node() {
        let solution = Solution {
            left_anchor: false,
            right_anchor: true,
            ..sample()
        };
        assert!(!solution.is_anchored(0));
        assert!(solution.is_anchored(2));
    }

    #[test]
    fn peak_stress_uses_magnitude() {
        assert_eq!(sample().max_abs_stress(), 8.0);
    }

    #[test]
    fn stress_check_limits() {
        let check = StressCheck {
            stress: 100.0,
            allowable: 250.0,
        };
        assert!(check.is_within_limit());
        assert_eq!(check.factor_of_safety(), 2.5);

        let unstressed = StressCheck {
            stress: 0.0,
            allowable: 250.0,
        };
        assert!(unstressed.factor_of_safety().is_infinite());

        let exceeded = StressCheck {
            stress: 300.0,
            allowable: 250.0,
        };
        assert!(!exceeded.is_within_limit());
    }
}
