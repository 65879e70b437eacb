//! Dense linear solver used for the assembled stiffness system.

use nalgebra::{DMatrix, DVector};

use crate::errors::CalculationError;

/// Solve `matrix · x = rhs` by Gaussian elimination with partial pivoting.
///
/// The pivot for each column is the entry of largest magnitude among the rows
/// not yet eliminated; ties keep the upper row. Each pivot row is normalised
/// before the rows below it are reduced, followed by back substitution.
///
/// # Errors
///
/// Returns [`CalculationError::SingularSystem`] when a pivot magnitude is below
/// `tolerance` or is not a number.
pub(crate) fn solve_partial_pivoting(
    matrix: &DMatrix<f64>,
    rhs: &DVector<f64>,
    tolerance: f64,
) -> Result<DVector<f64>, CalculationError> {
    let size = rhs.len();
    debug_assert_eq!(matrix.shape(), (size, size));

    let mut augmented = matrix.clone().insert_column(size, 0.0);
    augmented.set_column(size, rhs);

    for col in 0..size {
        let mut pivot_row = col;
        for row in col + 1..size {
            if augmented[(row, col)].abs() > augmented[(pivot_row, col)].abs() {
                pivot_row = row;
            }
        }
        if pivot_row != col {
            augmented.swap_rows(col, pivot_row);
        }

        let pivot = augmented[(col, col)];
        if !(pivot.abs() >= tolerance) {
            return Err(CalculationError::SingularSystem {
                row: col,
                pivot: pivot.abs(),
            });
        }

        for j in col..=size {
            augmented[(col, j)] /= pivot;
        }

        for row in col + 1..size {
            let factor = augmented[(row, col)];
            if factor == 0.0 {
                continue;
            }
            for j in col..=size {
                augmented[(row, j)] -= factor * augmented[(col, j)];
            }
        }
    }

    let mut solution = DVector::zeros(size);
    for row in (0..size).rev() {
        let mut value = augmented[(row, size)];
        for j in row + 1..size {
            value -= augmented[(row, j)] * solution[j];
        }
        solution[row] = value;
    }
    Ok(solution)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn solves_small_dense_system() {
        let matrix = DMatrix::from_row_slice(3, 3, &[2.0, 1.0, -1.0, -3.0, -1.0, 2.0, -2.0, 1.0, 2.0]);
        let rhs = DVector::from_vec(vec![8.0, -11.0, -3.0]);
        let solution = solve_partial_pivoting(&matrix, &rhs, 1.0e-15).expect("regular system");
        assert_relative_eq!(solution[0], 2.0, epsilon = 1.0e-12);
        assert_relative_eq!(solution[1], 3.0, epsilon = 1.0e-12);
        assert_relative_eq!(solution[2], -1.0, epsilon = 1.0e-12);
    }

    #[test]
    fn zero_leading_entry_requires_row_swap() {
        let matrix = DMatrix::from_row_slice(2, 2, &[0.0, 1.0, 1.0, 0.0]);
        let rhs = DVector::from_vec(vec![3.0, 4.0]);
        let solution = solve_partial_pivoting(&matrix, &rhs, 1.0e-15).expect("regular system");
        assert_eq!(solution[0], 4.0);
        assert_eq!(solution[1], 3.0);
    }

    #[test]
    fn singular_matrix_is_rejected() {
        let matrix = DMatrix::from_row_slice(2, 2, &[1.0, -1.0, -1.0, 1.0]);
        let rhs = DVector::from_vec(vec![1.0, 0.0]);
        let error = solve_partial_pivoting(&matrix, &rhs, 1.0e-15).expect_err("singular");
        assert!(matches!(
            error,
            CalculationError::SingularSystem { row: 1, .. }
        ));
    }

    #[test]
    fn nan_pivot_is_rejected() {
        let matrix = DMatrix::from_row_slice(1, 1, &[f64::NAN]);
        let rhs = DVector::from_vec(vec![1.0]);
        let error = solve_partial_pivoting(&matrix, &rhs, 1.0e-15).expect_err("NaN pivot");
        assert!(matches!(
            error,
            CalculationError::SingularSystem { row: 0, .. }
        ));
    }

    #[test]
    fn empty_system_has_empty_solution() {
        let solution = solve_partial_pivoting(&DMatrix::zeros(0, 0), &DVector::zeros(0), 1.0e-15)
            .expect("empty system");
        assert_eq!(solution.len(), 0);
    }
}
