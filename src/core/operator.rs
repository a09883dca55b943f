//! Linear operators mapping the input space of a function to its measurement
//! space.

use nalgebra::{DMatrix, DVector, RealField};

use super::base::FunctionError;

/// A linear map `A` applied to points of a function.
///
/// Implementations must be linear. Nothing verifies this at runtime, nor that
/// an operator used as adjoint is the true adjoint of the forward operator.
pub trait LinearOperator<T: RealField + Copy> {
    /// Applies the operator to given vector.
    fn apply(&self, x: &DVector<T>) -> Result<DVector<T>, FunctionError>;

    /// Returns the dimension of the output for an input of dimension
    /// `input_dim`.
    ///
    /// The default implementation applies the operator to a zero vector.
    fn output_dim(&self, input_dim: usize) -> Result<usize, FunctionError> {
        self.apply(&DVector::zeros(input_dim)).map(|ax| ax.len())
    }
}

/// The identity map `A(x) = x`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl<T: RealField + Copy> LinearOperator<T> for Identity {
    fn apply(&self, x: &DVector<T>) -> Result<DVector<T>, FunctionError> {
        Ok(x.clone())
    }

    fn output_dim(&self, input_dim: usize) -> Result<usize, FunctionError> {
        Ok(input_dim)
    }
}

impl<T: RealField + Copy> LinearOperator<T> for DMatrix<T> {
    fn apply(&self, x: &DVector<T>) -> Result<DVector<T>, FunctionError> {
        if self.ncols() != x.len() {
            return Err(FunctionError::InvalidDimensionality {
                expected: self.ncols(),
                actual: x.len(),
            });
        }

        Ok(self * x)
    }

    fn output_dim(&self, input_dim: usize) -> Result<usize, FunctionError> {
        if self.ncols() != input_dim {
            return Err(FunctionError::InvalidDimensionality {
                expected: self.ncols(),
                actual: input_dim,
            });
        }

        Ok(self.nrows())
    }
}

/// Operator given by a closure.
///
/// ```rust
/// use proxima::nalgebra as na;
/// use proxima::{FnOperator, LinearOperator};
///
/// // Reverses the order of coordinates. It is a permutation, so it is a
/// // tight frame with bound 1.
/// let reverse = FnOperator::new(|x: &na::DVector<f64>| {
///     na::DVector::from_iterator(x.len(), x.iter().rev().copied())
/// });
///
/// let y = reverse.apply(&na::dvector![1.0, 2.0, 3.0]).unwrap();
/// assert_eq!(y, na::dvector![3.0, 2.0, 1.0]);
/// ```
#[derive(Clone)]
pub struct FnOperator<F> {
    f: F,
}

impl<F> FnOperator<F> {
    /// Wraps given closure.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<T, F> LinearOperator<T> for FnOperator<F>
where
    T: RealField + Copy,
    F: Fn(&DVector<T>) -> DVector<T>,
{
    fn apply(&self, x: &DVector<T>) -> Result<DVector<T>, FunctionError> {
        Ok((self.f)(x))
    }
}
