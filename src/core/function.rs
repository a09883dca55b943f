use nalgebra::{DVector, RealField};

use super::base::{Capabilities, FunctionError, Operation};

/// The trait for defining objective functions consumed by proximal-splitting
/// solvers.
///
/// ## Defining a function
///
/// A function is any type that implements [`Function`]. Only
/// [`eval`](Function::eval) is required. [`grad`](Function::grad) and
/// [`prox`](Function::prox) are optional and fail with
/// [`FunctionError::Unimplemented`] unless overridden, in which case
/// [`capabilities`](Function::capabilities) must report them.
///
/// ```rust
/// use proxima::nalgebra as na;
/// use proxima::{Capabilities, Function, FunctionError};
///
/// // Squared Euclidean distance to the origin, scaled by one half.
/// struct HalfSquaredNorm;
///
/// impl Function for HalfSquaredNorm {
///     type Field = f64;
///
///     fn eval(&self, x: &na::DVector<f64>) -> Result<f64, FunctionError> {
///         Ok(0.5 * x.norm_squared())
///     }
///
///     fn grad(&self, x: &na::DVector<f64>) -> Result<na::DVector<f64>, FunctionError> {
///         Ok(x.clone())
///     }
///
///     fn prox(&self, x: &na::DVector<f64>, step: f64) -> Result<na::DVector<f64>, FunctionError> {
///         Ok(x / (1.0 + step))
///     }
///
///     fn capabilities(&self) -> Capabilities {
///         Capabilities::eval_only().with_grad().with_prox()
///     }
/// }
///
/// let f = HalfSquaredNorm;
/// let x = na::dvector![3.0, 4.0];
/// assert_eq!(f.eval(&x).unwrap(), 12.5);
/// assert_eq!(f.prox(&x, 1.0).unwrap(), na::dvector![1.5, 2.0]);
/// ```
pub trait Function {
    /// Type of the scalar, usually f32 or f64.
    type Field: RealField + Copy;

    /// Calculates the function value in given point.
    fn eval(&self, x: &DVector<Self::Field>) -> Result<Self::Field, FunctionError>;

    /// Calculates the gradient in given point. The result has the same shape
    /// as `x`.
    ///
    /// Only gradient-based solvers call this method. Non-smooth functions may
    /// leave it undefined.
    fn grad(&self, _x: &DVector<Self::Field>) -> Result<DVector<Self::Field>, FunctionError> {
        Err(FunctionError::Unimplemented(Operation::Grad))
    }

    /// Calculates the proximal operator of the function scaled by `step` in
    /// given point, that is
    ///
    /// ```text
    /// prox(x, T) = argmin_z 1/2 ||x - z||^2 + T f(z)
    /// ```
    ///
    /// The step must be positive. The result has the same shape as `x`.
    fn prox(
        &self,
        _x: &DVector<Self::Field>,
        _step: Self::Field,
    ) -> Result<DVector<Self::Field>, FunctionError> {
        Err(FunctionError::Unimplemented(Operation::Prox))
    }

    /// Reports which optional operations are supported.
    fn capabilities(&self) -> Capabilities {
        Capabilities::eval_only()
    }
}
