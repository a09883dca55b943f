#![allow(clippy::many_single_char_names)]
#![warn(missing_docs)]

//! # Proxima
//!
//! Objective functions for iterative proximal-splitting solvers.
//!
//! A solver minimizing a sum of functions accesses each of them through three
//! primitive operations: pointwise evaluation, gradient and proximal operator.
//! This library defines the contract of these operations ([`Function`]) and
//! provides functions implementing it with exact closed-form numerics.
//!
//! ## Functions
//!
//! * [L2-norm](func::norm_l2) -- Weighted, linearly-transformed L2-norm
//!   penalty `lambda ||w . (A(x) - y)||_2` with closed-form proximal operator
//!   for tight frames.
//!
//! ## Problem
//!
//! The proximal operator of a function *f* scaled by a step *T* is
//!
//! ```text
//! prox(x, T) = argmin_z 1/2 ||x - z||^2 + T f(z)
//! ```
//!
//! Proximal solvers (forward-backward splitting, Douglas-Rachford, ...) only
//! need this operator for the non-smooth terms of the objective and the
//! gradient for the smooth ones. Not every function supports every operation,
//! so each function reports its [`Capabilities`] and a solver can check them
//! when it is configured (see [`FunctionSet::require`]).
//!
//! ## Usage
//!
//! ```rust
//! // Proxima is based on `nalgebra` crate.
//! use proxima::nalgebra as na;
//! use proxima::func::{Norm, NormL2};
//! use proxima::Function;
//!
//! // f(x) = 2 ||x - y||_2 with y = (1, 0).
//! let f = NormL2::new(
//!     Norm::builder(2.0)
//!         .with_measurement(na::dvector![1.0, 0.0])
//!         .build(),
//! );
//!
//! let x = na::dvector![0.0, 0.0];
//!
//! let value = f.eval(&x).expect("shapes match");
//! let grad = f.grad(&x).expect("shapes match");
//! let prox = f.prox(&x, 0.5).expect("identity is a tight frame");
//!
//! assert_eq!(value, 2.0);
//! assert_eq!(grad, na::dvector![-4.0, 0.0]);
//! assert_eq!(prox, na::dvector![2.0 / 3.0, 0.0]);
//! ```
//!
//! A simple forward-backward iteration then looks like this:
//!
//! ```rust
//! # use proxima::nalgebra as na;
//! # use proxima::func::{Norm, NormL2};
//! # use proxima::Function;
//! let smooth = NormL2::new(Norm::builder(1.0).with_measurement(na::dvector![1.0, 2.0]).build());
//! let regularizer = NormL2::with_lambda(0.1);
//!
//! let step = 0.25;
//! let mut x = na::dvector![0.0, 0.0];
//!
//! for _ in 0..100 {
//!     let g = smooth.grad(&x).unwrap();
//!     x = regularizer.prox(&(&x - g * step), step).unwrap();
//! }
//!
//! assert!((x - na::dvector![1.0, 2.0] / 1.1).norm() < 1e-6);
//! ```
//!
//! ## License
//!
//! Licensed under MIT.

mod core;
pub mod derivatives;
pub mod func;
pub mod objective;

pub use crate::core::*;
pub use objective::{BoxedFunction, FunctionSet, ObjectiveError};

#[cfg(feature = "testing")]
pub mod testing;

#[cfg(not(feature = "testing"))]
pub(crate) mod testing;

pub use nalgebra;
