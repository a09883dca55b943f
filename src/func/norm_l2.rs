//! Weighted L2-norm penalty.
//!
//! The function is
//!
//! ```text
//! f(x) = lambda ||w . (A(x) - y)||_2
//! ```
//!
//! where `w` are weights, `y` measurements and `A` a linear operator (see
//! [`Norm`] for the parameters and their defaults).
//!
//! The gradient and the proximal operator use the squared form of the norm,
//! which is what proximal-gradient solvers built around this function expect:
//!
//! ```text
//! grad(x)    = 2 lambda At(w^2 . (A(x) - y))
//! prox(x, T) = (x + 2 gamma At(y . w^2)) / (1 + 2 gamma nu w^2),  gamma = lambda T
//! ```
//!
//! The closed form of the proximal operator is valid only if `A` is a tight
//! frame (`At(A(x)) = nu x`). For other operators the proximal operator fails
//! with [`FunctionError::UnsupportedConfiguration`].
//!
//! ```rust
//! use proxima::nalgebra as na;
//! use proxima::func::{Norm, NormL2};
//! use proxima::Function;
//!
//! let f = NormL2::new(Norm::builder(1.0).with_measurement(na::dvector![1.0, 0.0]).build());
//! let x = na::dvector![0.0, 0.0];
//!
//! assert_eq!(f.eval(&x).unwrap(), 1.0);
//! assert_eq!(f.prox(&x, 1.0).unwrap(), na::dvector![2.0 / 3.0, 0.0]);
//! ```

use std::ops::Deref;

use log::debug;
use nalgebra::{DVector, RealField};

use super::norm::{two, Norm};
use crate::core::{Capabilities, Elementwise, Function, FunctionError, Operation};

/// Weighted L2-norm function. See [module](self) documentation for more
/// details.
#[derive(Debug, Clone)]
pub struct NormL2<T: RealField + Copy> {
    params: Norm<T>,
}

impl<T: RealField + Copy> NormL2<T> {
    /// Initializes the function with given parameters.
    pub fn new(params: Norm<T>) -> Self {
        Self { params }
    }

    /// Initializes the plain (unweighted, untransformed) norm `lambda ||x||_2`.
    pub fn with_lambda(lambda: T) -> Self {
        Self::new(Norm::builder(lambda).build())
    }

    /// Unwraps the parameters.
    pub fn into_params(self) -> Norm<T> {
        self.params
    }
}

impl<T: RealField + Copy> From<Norm<T>> for NormL2<T> {
    fn from(params: Norm<T>) -> Self {
        Self::new(params)
    }
}

impl<T: RealField + Copy> Deref for NormL2<T> {
    type Target = Norm<T>;

    fn deref(&self) -> &Self::Target {
        &self.params
    }
}

impl<T: RealField + Copy> Function for NormL2<T> {
    type Field = T;

    fn eval(&self, x: &DVector<T>) -> Result<T, FunctionError> {
        let r = self.residual(x)?;
        let wr = self.weight().mul(&r)?;
        Ok(self.lambda() * wr.norm())
    }

    fn grad(&self, x: &DVector<T>) -> Result<DVector<T>, FunctionError> {
        let r = self.residual(x)?;
        let w2r = self.weight().squared().mul(&r)?;
        let g = self.adjoint().apply(&w2r)?;
        check_dim(x, &g)?;
        Ok(g * (two::<T>() * self.lambda()))
    }

    fn prox(&self, x: &DVector<T>, step: T) -> Result<DVector<T>, FunctionError> {
        if !self.is_tight_frame() {
            debug!("proximal operator requested for a non-tight frame");
            return Err(FunctionError::UnsupportedConfiguration {
                operation: Operation::Prox,
                reason: "no closed form for a non-tight frame",
            });
        }

        let gamma = self.lambda() * step;
        let w2 = self.weight().squared();

        let numerator = if self.measurement().is_zero() {
            x.clone()
        } else {
            // y . w^2 lives in the measurement space.
            let yw2 = match self.measurement().mul_elementwise(&w2)? {
                Elementwise::Scalar(s) => {
                    DVector::from_element(self.forward().output_dim(x.len())?, s)
                }
                Elementwise::Vector(v) => v,
            };

            let shift = self.adjoint().apply(&yw2)?;
            check_dim(x, &shift)?;

            x + shift * (two::<T>() * gamma)
        };

        let scale = two::<T>() * gamma * self.frame_bound();
        let denominator = w2.to_vector(x.len())?.map(|w2i| T::one() + scale * w2i);

        Ok(numerator.component_div(&denominator))
    }

    fn capabilities(&self) -> Capabilities {
        let caps = Capabilities::eval_only().with_grad();

        if self.is_tight_frame() {
            caps.with_prox()
        } else {
            caps
        }
    }
}

fn check_dim<T: RealField + Copy>(x: &DVector<T>, v: &DVector<T>) -> Result<(), FunctionError> {
    if x.len() == v.len() {
        Ok(())
    } else {
        Err(FunctionError::InvalidDimensionality {
            expected: x.len(),
            actual: v.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_abs_diff_eq;
    use nalgebra::{dmatrix, dvector};
    use rand::{rngs::StdRng, SeedableRng};

    use crate::core::FnOperator;
    use crate::derivatives;
    use crate::testing::*;

    #[test]
    fn zero_lambda_is_exact_identity() {
        let mut rng = StdRng::seed_from_u64(3);
        let frame = TightFrame::union_of_bases(4, 2, &mut rng);

        let f = NormL2::new(
            Norm::builder(0.0)
                .with_weight(0.7)
                .with_measurement(random_vector(8, &mut rng))
                .with_matrix(frame.matrix().clone())
                .with_frame_bound(frame.bound())
                .build(),
        );

        for _ in 0..10 {
            let x = random_vector(4, &mut rng);

            assert_eq!(f.eval(&x).unwrap(), 0.0);
            assert!(f.grad(&x).unwrap().iter().all(|gi| *gi == 0.0));

            for step in [0.1, 1.0, 100.0] {
                assert_eq!(f.prox(&x, step).unwrap(), x);
            }
        }
    }

    #[test]
    fn plain_norm() {
        let lambda = 1.5;
        let f = NormL2::with_lambda(lambda);

        let x = dvector![3.0, -4.0, 0.0];
        assert_abs_diff_eq!(f.eval(&x).unwrap(), lambda * 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(f.grad(&x).unwrap(), &x * (2.0 * lambda), epsilon = 1e-12);
    }

    #[test]
    fn measurement_offset() {
        let f = NormL2::new(Norm::builder(1.0).with_measurement(dvector![1.0, 0.0]).build());
        let x = dvector![0.0, 0.0];

        assert_eq!(f.eval(&x).unwrap(), 1.0);
        assert_eq!(f.grad(&x).unwrap(), dvector![-2.0, 0.0]);
        assert_eq!(f.prox(&x, 1.0).unwrap(), dvector![2.0 / 3.0, 0.0]);
    }

    #[test]
    fn non_tight_frame_has_no_prox() {
        let mut rng = StdRng::seed_from_u64(5);
        let f = NormL2::new(
            Norm::builder(1.0)
                .with_matrix(dmatrix![1.0, 2.0; 0.0, 1.0])
                .with_tight_frame(false)
                .build(),
        );

        assert!(!f.capabilities().supports(Operation::Prox));
        assert!(f.capabilities().supports(Operation::Grad));

        for step in [0.0, 0.5, 1.0, 10.0] {
            let x = random_vector(2, &mut rng);
            assert!(matches!(
                f.prox(&x, step),
                Err(FunctionError::UnsupportedConfiguration {
                    operation: Operation::Prox,
                    ..
                })
            ));
        }

        // Other operations still work.
        assert_eq!(f.eval(&dvector![0.0, 0.0]).unwrap(), 0.0);
    }

    #[test]
    fn zero_step_is_identity() {
        let mut rng = StdRng::seed_from_u64(7);
        let f = NormL2::new(
            Norm::builder(2.0)
                .with_weight(dvector![1.0, 0.5, 2.0])
                .with_measurement(dvector![1.0, -1.0, 3.0])
                .build(),
        );

        for _ in 0..10 {
            let x = random_vector(3, &mut rng);
            assert_eq!(f.prox(&x, 0.0).unwrap(), x);
        }
    }

    #[test]
    fn prox_moves_monotonically_to_measurement() {
        let y = dvector![1.0, -2.0];
        let f = NormL2::new(Norm::builder(1.0).with_measurement(y.clone()).build());
        let x = dvector![0.0, 0.0];

        let mut last = (&x - &y).norm();
        for step in [0.01, 0.1, 0.5, 1.0, 5.0, 50.0, 1000.0] {
            let z = f.prox(&x, step).unwrap();
            let dist = (&z - &y).norm();
            assert!(dist < last, "step {}: {} >= {}", step, dist, last);
            last = dist;
        }

        assert!(last < 1e-2);
    }

    #[test]
    fn prox_decreases_residual_for_tight_frames() {
        let mut rng = StdRng::seed_from_u64(19);

        for frame in [
            TightFrame::orthonormal(4, &mut rng),
            TightFrame::union_of_bases(4, 3, &mut rng),
        ] {
            assert!(frame.is_tight(1e-10));

            let y = random_vector(frame.matrix().nrows(), &mut rng);
            let f = NormL2::new(
                Norm::builder(1.0)
                    .with_weight(0.8)
                    .with_measurement(y.clone())
                    .with_matrix(frame.matrix().clone())
                    .with_frame_bound(frame.bound())
                    .build(),
            );
            let x = random_vector(4, &mut rng);

            let mut last = (frame.matrix() * &x - &y).norm();
            for step in [0.01, 0.1, 0.5, 1.0, 5.0, 50.0, 1000.0] {
                let z = f.prox(&x, step).unwrap();
                let residual = (frame.matrix() * &z - &y).norm();
                assert!(
                    residual <= last + 1e-12,
                    "bound {}, step {}: {} > {}",
                    frame.bound(),
                    step,
                    residual,
                    last
                );
                last = residual;
            }
        }
    }

    #[test]
    fn zero_measurement_shrinks_towards_origin() {
        let mut rng = StdRng::seed_from_u64(23);
        let frame = TightFrame::union_of_bases(3, 2, &mut rng);
        let f = NormL2::new(
            Norm::builder(0.5)
                .with_weight(dvector![1.0, 2.0, 0.0])
                .with_matrix(frame.matrix().clone())
                .with_frame_bound(frame.bound())
                .build(),
        );
        assert!(f.measurement().is_zero());

        let x = dvector![1.0, -1.0, 4.0];
        let z = f.prox(&x, 2.0).unwrap();

        // gamma = 1, nu = 2, so z = x / (1 + 4 w^2).
        assert_abs_diff_eq!(z, dvector![1.0 / 5.0, -1.0 / 17.0, 4.0], epsilon = 1e-12);
    }

    #[test]
    fn parameters_round_trip() {
        let params = Norm::builder(0.25).with_weight(3.0).build();
        let f = NormL2::from(params);

        assert_eq!(f.lambda(), 0.25);
        assert_abs_diff_eq!(f.eval(&dvector![0.0, 2.0]).unwrap(), 1.5, epsilon = 1e-12);

        let params = f.into_params();
        assert_eq!(params.weight(), &Elementwise::Scalar(3.0));
        assert_eq!(params.lambda(), 0.25);
    }

    #[test]
    fn zero_weight_passes_through() {
        let f = NormL2::new(
            Norm::builder(1.0)
                .with_weight(dvector![0.0, 1.0])
                .with_measurement(dvector![5.0, 5.0])
                .build(),
        );
        let x = dvector![3.0, 3.0];

        let z = f.prox(&x, 2.0).unwrap();
        assert_eq!(z[0], 3.0);
        assert_abs_diff_eq!(z[1], (3.0 + 2.0 * 2.0 * 5.0) / (1.0 + 2.0 * 2.0), epsilon = 1e-12);

        assert_eq!(f.grad(&x).unwrap()[0], 0.0);
        assert_eq!(f.eval(&x).unwrap(), 2.0);
    }

    #[test]
    fn prox_is_minimizer_for_tight_frame() {
        let mut rng = StdRng::seed_from_u64(11);
        let frame = TightFrame::union_of_bases(5, 3, &mut rng);
        assert!(frame.is_tight(1e-10));

        let lambda = 0.8;
        let f = NormL2::new(
            Norm::builder(lambda)
                .with_weight(1.3)
                .with_measurement(random_vector(15, &mut rng))
                .with_matrix(frame.matrix().clone())
                .with_frame_bound(frame.bound())
                .build(),
        );

        for step in [0.1, 1.0, 7.0] {
            let x = random_vector(5, &mut rng);
            let z = f.prox(&x, step).unwrap();

            // Optimality condition of 1/2 ||x - z||^2 + T f(z) in the squared
            // form used by the gradient.
            let optimality = (&z - &x) + f.grad(&z).unwrap() * step;
            assert_abs_diff_eq!(optimality.norm(), 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn prox_is_minimizer_for_weighted_identity() {
        let mut rng = StdRng::seed_from_u64(13);
        let f = NormL2::new(
            Norm::builder(1.7)
                .with_weight(dvector![0.0, 0.5, 1.0, 2.0])
                .with_measurement(random_vector(4, &mut rng))
                .build(),
        );

        let x = random_vector(4, &mut rng);
        let z = f.prox(&x, 0.3).unwrap();
        let optimality = (&z - &x) + f.grad(&z).unwrap() * 0.3;
        assert_abs_diff_eq!(optimality.norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn grad_of_squared_norm() {
        let mut rng = StdRng::seed_from_u64(17);
        let a = dmatrix![1.0, 2.0, 0.0; 0.0, 1.0, -1.0; 3.0, 0.0, 1.0; 1.0, 1.0, 1.0];
        let w = dvector![1.0, 0.5, 2.0, 0.0];
        let y = dvector![1.0, -1.0, 0.5, 2.0];
        let lambda = 0.6;

        let f = NormL2::new(
            Norm::builder(lambda)
                .with_weight(w.clone())
                .with_measurement(y.clone())
                .with_matrix(a.clone())
                .with_tight_frame(false)
                .build(),
        );

        let squared = |x: &DVector<f64>| {
            let r = &a * x - &y;
            Ok(lambda * r.component_mul(&w).norm_squared())
        };

        for _ in 0..5 {
            let mut x = random_vector(3, &mut rng);
            let expected = derivatives::gradient(&squared, &mut x).unwrap();
            assert_abs_diff_eq!(f.grad(&x).unwrap(), expected, epsilon = 1e-5);
        }
    }

    #[test]
    fn dimension_changing_operator_with_scalar_parameters() {
        // A(x) = [x; x] is a tight frame with bound 2.
        let stack = FnOperator::new(|x: &DVector<f64>| {
            DVector::from_iterator(2 * x.len(), x.iter().chain(x.iter()).copied())
        });
        let sum = FnOperator::new(|y: &DVector<f64>| {
            let n = y.len() / 2;
            y.rows(0, n) + y.rows(n, n)
        });

        let f = NormL2::new(
            Norm::builder(1.0)
                .with_measurement(1.0)
                .with_operator(stack)
                .with_adjoint(sum)
                .with_frame_bound(2.0)
                .build(),
        );

        let x = dvector![1.0, 3.0];
        let z = f.prox(&x, 0.5).unwrap();

        // gamma = 0.5, so (x + At(1)) / (1 + 2) with At(1) = 2.
        assert_abs_diff_eq!(z, dvector![1.0, 5.0 / 3.0], epsilon = 1e-12);

        let optimality = (&z - &x) + f.grad(&z).unwrap() * 0.5;
        assert_abs_diff_eq!(optimality.norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn incompatible_shapes() {
        let f = NormL2::new(
            Norm::builder(1.0)
                .with_measurement(dvector![1.0, 2.0, 3.0])
                .build(),
        );
        let x = dvector![1.0, 2.0];

        assert!(matches!(
            f.eval(&x),
            Err(FunctionError::InvalidDimensionality { .. })
        ));
        assert!(matches!(
            f.grad(&x),
            Err(FunctionError::InvalidDimensionality { .. })
        ));
        assert!(matches!(
            f.prox(&x, 1.0),
            Err(FunctionError::InvalidDimensionality { .. })
        ));
    }

    #[test]
    fn shareable_between_threads() {
        fn assert_send_sync<F: Send + Sync>(_: &F) {}

        let f = NormL2::with_lambda(1.0);
        assert_send_sync(&f);

        let x = dvector![1.0, 2.0];
        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| assert_abs_diff_eq!(f.eval(&x).unwrap(), 5f64.sqrt(), epsilon = 1e-12));
            }
        });
    }
}
