//! Fixtures useful for testing functions and solvers that consume them.
//!
//! [`TightFrame`] provides random linear operators satisfying `At(A(x)) = nu
//! x`, which is the assumption of the closed-form proximal operators.
//!
//! # References
//!
//! \[1\] [Proximal Splitting Methods in Signal
//! Processing](https://arxiv.org/abs/0912.3522)

#![allow(unused)]

use approx::abs_diff_eq;
use nalgebra::{DMatrix, DVector};
use rand::Rng;
use rand_distr::StandardNormal;

/// Tight frame given by stacking `k` random orthonormal bases of dimension
/// `n` on top of each other.
///
/// The resulting `kn x n` matrix `A` satisfies `At A = k I`, so the frame
/// bound is `k`.
#[derive(Debug, Clone)]
pub struct TightFrame {
    matrix: DMatrix<f64>,
    bound: f64,
}

impl TightFrame {
    /// Random orthonormal basis (a tight frame with bound 1).
    pub fn orthonormal<R: Rng>(n: usize, rng: &mut R) -> Self {
        Self::union_of_bases(n, 1, rng)
    }

    /// Union of `k` random orthonormal bases.
    pub fn union_of_bases<R: Rng>(n: usize, k: usize, rng: &mut R) -> Self {
        assert!(n > 0, "n must be greater than zero");
        assert!(k > 0, "k must be greater than zero");

        let mut matrix = DMatrix::zeros(k * n, n);

        for b in 0..k {
            let gaussian = DMatrix::from_fn(n, n, |_, _| rng.sample::<f64, _>(StandardNormal));
            let q = gaussian.qr().q();
            matrix.rows_mut(b * n, n).copy_from(&q);
        }

        Self {
            matrix,
            bound: k as f64,
        }
    }

    /// The frame as a matrix.
    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    /// The frame bound `nu`.
    pub fn bound(&self) -> f64 {
        self.bound
    }

    /// Unwraps the matrix.
    pub fn into_matrix(self) -> DMatrix<f64> {
        self.matrix
    }

    /// Tests if `At A = nu I` holds within the tolerance `eps`.
    pub fn is_tight(&self, eps: f64) -> bool {
        let n = self.matrix.ncols();
        let gram = self.matrix.transpose() * &self.matrix;
        let expected = DMatrix::identity(n, n) * self.bound;

        abs_diff_eq!(gram, expected, epsilon = eps)
    }
}

/// Random vector with standard normal coordinates.
pub fn random_vector<R: Rng>(n: usize, rng: &mut R) -> DVector<f64> {
    DVector::from_fn(n, |_, _| rng.sample::<f64, _>(StandardNormal))
}
