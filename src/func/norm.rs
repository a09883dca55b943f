//! Parameters shared by norm-based functions.
//!
//! A norm function penalizes the (weighted) residual between a linear
//! transformation of the point and a measurement:
//!
//! ```text
//! w . (A(x) - y)
//! ```
//!
//! All parameters are fixed at construction by [`NormBuilder`] and never
//! change afterwards.

use std::fmt;
use std::sync::Arc;

use getset::{CopyGetters, Getters};
use log::{debug, warn};
use nalgebra::{convert, DMatrix, DVector, RealField};

use crate::core::{Elementwise, FunctionError, Identity, LinearOperator};

/// Shared, immutable linear operator.
pub type SharedOperator<T> = Arc<dyn LinearOperator<T> + Send + Sync>;

/// Parameters of a norm function.
#[derive(Clone, CopyGetters, Getters)]
pub struct Norm<T: RealField + Copy> {
    /// Regularization parameter λ. Should be non-negative.
    #[getset(get_copy = "pub")]
    lambda: T,
    /// Weights of the coordinates of the residual. Default: 1.
    #[getset(get = "pub")]
    weight: Elementwise<T>,
    /// Measurements subtracted from the transformed point. Default: 0.
    #[getset(get = "pub")]
    measurement: Elementwise<T>,
    forward: SharedOperator<T>,
    adjoint: SharedOperator<T>,
    /// Whether the forward operator is a tight frame, that is, `At(A(x)) = nu
    /// x`. Default: true.
    #[getset(get_copy = "pub")]
    is_tight_frame: bool,
    /// Bound `nu` on the norm of the forward operator, `||A(x)||^2 <= nu
    /// ||x||^2`. Default: 1.
    #[getset(get_copy = "pub")]
    frame_bound: T,
}

impl<T: RealField + Copy> Norm<T> {
    /// Starts building the parameters with given regularization parameter.
    pub fn builder(lambda: T) -> NormBuilder<T> {
        NormBuilder::new(lambda)
    }

    /// Forward operator `A`.
    pub fn forward(&self) -> &(dyn LinearOperator<T> + Send + Sync) {
        self.forward.as_ref()
    }

    /// Adjoint operator `At`.
    pub fn adjoint(&self) -> &(dyn LinearOperator<T> + Send + Sync) {
        self.adjoint.as_ref()
    }

    /// Computes the residual `A(x) - y`.
    pub fn residual(&self, x: &DVector<T>) -> Result<DVector<T>, FunctionError> {
        let ax = self.forward.apply(x)?;
        self.measurement.sub_from(ax)
    }
}

impl<T: RealField + Copy> fmt::Debug for Norm<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Norm")
            .field("lambda", &self.lambda)
            .field("weight", &self.weight)
            .field("measurement", &self.measurement)
            .field("is_tight_frame", &self.is_tight_frame)
            .field("frame_bound", &self.frame_bound)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Norm`] parameters.
///
/// ```rust
/// use proxima::nalgebra as na;
/// use proxima::func::Norm;
///
/// let a = na::dmatrix![1.0, 0.0; 0.0, -1.0];
///
/// let params = Norm::builder(0.5)
///     .with_measurement(na::dvector![1.0, 2.0])
///     .with_matrix(a)
///     .build();
///
/// assert_eq!(params.lambda(), 0.5);
/// assert!(params.is_tight_frame());
/// ```
pub struct NormBuilder<T: RealField + Copy> {
    lambda: T,
    weight: Elementwise<T>,
    measurement: Elementwise<T>,
    forward: Option<SharedOperator<T>>,
    adjoint: Option<SharedOperator<T>>,
    is_tight_frame: bool,
    frame_bound: T,
}

impl<T: RealField + Copy> NormBuilder<T> {
    fn new(lambda: T) -> Self {
        Self {
            lambda,
            weight: Elementwise::Scalar(T::one()),
            measurement: Elementwise::Scalar(T::zero()),
            forward: None,
            adjoint: None,
            is_tight_frame: true,
            frame_bound: T::one(),
        }
    }

    /// Sets weights of the residual, either a scalar or a vector.
    pub fn with_weight(mut self, weight: impl Into<Elementwise<T>>) -> Self {
        self.weight = weight.into();
        self
    }

    /// Sets the measurements, either a scalar or a vector.
    pub fn with_measurement(mut self, measurement: impl Into<Elementwise<T>>) -> Self {
        self.measurement = measurement.into();
        self
    }

    /// Sets the forward operator.
    ///
    /// Unless [`with_adjoint`](NormBuilder::with_adjoint) is called too, the
    /// operator is assumed to be self-adjoint and is used as its own adjoint.
    pub fn with_operator<A>(mut self, forward: A) -> Self
    where
        A: LinearOperator<T> + Send + Sync + 'static,
    {
        self.forward = Some(Arc::new(forward));
        self
    }

    /// Sets the adjoint of the forward operator.
    pub fn with_adjoint<A>(mut self, adjoint: A) -> Self
    where
        A: LinearOperator<T> + Send + Sync + 'static,
    {
        self.adjoint = Some(Arc::new(adjoint));
        self
    }

    /// Sets the forward operator to a matrix and the adjoint to its
    /// transpose.
    pub fn with_matrix(mut self, a: DMatrix<T>) -> Self {
        self.adjoint = Some(Arc::new(a.transpose()));
        self.forward = Some(Arc::new(a));
        self
    }

    /// Declares whether the forward operator is a tight frame.
    pub fn with_tight_frame(mut self, is_tight_frame: bool) -> Self {
        self.is_tight_frame = is_tight_frame;
        self
    }

    /// Sets the bound on the norm of the forward operator.
    pub fn with_frame_bound(mut self, frame_bound: T) -> Self {
        self.frame_bound = frame_bound;
        self
    }

    /// Resolves the defaults and builds the parameters.
    pub fn build(self) -> Norm<T> {
        if self.lambda < T::zero() {
            warn!("negative regularization parameter: {}", self.lambda);
        }

        if self.is_tight_frame && !(self.frame_bound > T::zero() && self.frame_bound.is_finite()) {
            warn!(
                "tight frame with invalid bound {}, proximal operator is not well defined",
                self.frame_bound
            );
        }

        let forward: SharedOperator<T> = match self.forward {
            Some(forward) => forward,
            None => {
                debug!("no forward operator given, using identity");
                Arc::new(Identity)
            }
        };

        let adjoint = match self.adjoint {
            Some(adjoint) => adjoint,
            None => {
                debug!("no adjoint operator given, assuming self-adjoint forward operator");
                Arc::clone(&forward)
            }
        };

        Norm {
            lambda: self.lambda,
            weight: self.weight,
            measurement: self.measurement,
            forward,
            adjoint,
            is_tight_frame: self.is_tight_frame,
            frame_bound: self.frame_bound,
        }
    }
}

/// Returns the constant two in the field.
pub(crate) fn two<T: RealField + Copy>() -> T {
    convert(2.0)
}
