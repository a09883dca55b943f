//! Tools for checking derivative-based operations.

use nalgebra::{convert, DVector, RealField};

use crate::core::FunctionError;

/// Square root of double precision machine epsilon. This value is a standard
/// constant for epsilons in approximating first-order derivate-based concepts.
pub const EPSILON_SQRT: f64 = 0.000000014901161193847656;

/// Approximates the gradient of `f` in given point by forward differences.
///
/// The parameter `x` is mutable to allow temporary mutations avoiding
/// unnecessary allocations, but after this function ends, the content of the
/// vector is exactly the same as before.
///
/// This is mostly useful for verifying analytic gradients, for example that
/// [`NormL2::grad`](crate::Function::grad) is the gradient of the squared
/// norm.
pub fn gradient<T, F>(f: F, x: &mut DVector<T>) -> Result<DVector<T>, FunctionError>
where
    T: RealField + Copy,
    F: Fn(&DVector<T>) -> Result<T, FunctionError>,
{
    let eps: T = convert(EPSILON_SQRT);
    let fx = f(x)?;

    let mut grad = DVector::zeros(x.len());

    for j in 0..x.len() {
        let xj = x[j];

        // Scale the step by the magnitude of x_j to keep enough good digits in
        // f(x + e_j * step) - f(x), but never go below the unit magnitude.
        let step = eps * xj.abs().max(T::one()) * T::one().copysign(xj);

        x[j] = xj + step;
        let fxj = f(x);

        // Restore the original value before propagating a possible error.
        x[j] = xj;

        grad[j] = (fxj? - fx) / step;
    }

    Ok(grad)
}
