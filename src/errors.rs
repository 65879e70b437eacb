//! Error types produced while configuring or analysing rod chains.

use thiserror::Error;

/// Error returned when a rod chain calculation fails.
///
/// A failed calculation never yields partial results.
#[derive(Debug, Error, PartialEq)]
pub enum CalculationError {
    /// Returned when the calculator holds no rods.
    #[error("there are no rods to analyse")]
    NoRods,
    /// Returned when neither end of the chain is anchored.
    #[error("the chain must be anchored on at least one end")]
    MissingAnchor,
    /// Returned when the chain exceeds the configured rod limit.
    #[error("{count} rods exceed the limit of {limit}")]
    TooManyRods {
        /// Number of rods in the chain.
        count: usize,
        /// Configured maximum number of rods.
        limit: usize,
    },
    /// Returned when a rod property is not physically meaningful.
    #[error("rod {rod} has invalid properties: {source}")]
    InvalidRodProperty {
        /// 1-based number of the offending rod.
        rod: usize,
        /// Description of the invalid property.
        #[source]
        source: RodPropertyError,
    },
    /// Returned when a concentrated nodal force is NaN or infinite.
    #[error("node {node} has a non-finite force ({force})")]
    NonFiniteForce {
        /// 1-based number of the offending node.
        node: usize,
        /// Rejected force in newtons.
        force: f64,
    },
    /// Returned when elimination meets a pivot below the tolerance.
    #[error("system of equations is singular (pivot {pivot:e} in row {row})")]
    SingularSystem {
        /// 0-based row at which elimination stopped.
        row: usize,
        /// Magnitude of the rejected pivot.
        pivot: f64,
    },
}

/// Error describing why a rod property was rejected.
///
/// Every variant carries the rejected value so callers can echo it back to users.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum RodPropertyError {
    /// Returned when the length is zero, negative or not finite.
    #[error("length must be positive (received {length})")]
    NonPositiveLength {
        /// Rejected length in metres.
        length: f64,
    },
    /// Returned when the cross-sectional area is zero, negative or not finite.
    #[error("area must be positive (received {area})")]
    NonPositiveArea {
        /// Rejected area in square metres.
        area: f64,
    },
    /// Returned when the elastic modulus is zero, negative or not finite.
    #[error("elastic modulus must be positive (received {elastic_modulus})")]
    NonPositiveElasticModulus {
        /// Rejected elastic modulus in pascals.
        elastic_modulus: f64,
    },
    /// Returned when the distributed load is NaN or infinite.
    #[error("distributed load must be finite (received {distributed_load})")]
    NonFiniteDistributedLoad {
        /// Rejected distributed load in newtons per metre.
        distributed_load: f64,
    },
}

/// Error returned when a setter addresses a rod or node that does not exist.
///
/// The calculator is left untouched, so ignoring this error reproduces the
/// tolerant behaviour expected while a form is still being rebuilt.
///
/// # Examples
///
/// ```
/// use rodchain::{EditError, RodCalculator};
///
/// let mut calculator = RodCalculator::new(3);
/// let error = calculator
///     .set_force(0, 10.0)
///     .expect_err("node numbers start at one");
/// assert_eq!(error, EditError::UnknownNode(0));
/// ```
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum EditError {
    /// Returned when a 1-based rod number is out of range.
    #[error("rod {0} does not exist in this chain")]
    UnknownRod(usize),
    /// Returned when a 1-based node number is out of range.
    #[error("node {0} does not exist in this chain")]
    UnknownNode(usize),
}

/// Error returned while reading, writing or applying a project file.
#[derive(Debug, Error)]
pub enum ProjectError {
    /// The project file could not be read or written.
    #[error("project file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    /// The project file is not valid JSON for a rod system.
    #[error("project file is malformed: {0}")]
    Json(#[from] serde_json::Error),
    /// The number of nodal forces does not match the number of nodes.
    #[error("expected {expected} nodal forces, found {found}")]
    ForceCountMismatch {
        /// Number of nodes in the chain.
        expected: usize,
        /// Number of forces listed in the project.
        found: usize,
    },
    /// Applying the project to a calculator failed.
    #[error(transparent)]
    Edit(#[from] EditError),
    /// The project was loaded but could not be analysed.
    #[error(transparent)]
    Calculation(#[from] CalculationError),
}
