//! Collection of objective functions.
//!
//! * [L2-norm](norm_l2) -- Weighted, linearly-transformed L2-norm penalty with
//!   closed-form proximal operator for tight frames.
//!
//! Parameters shared by norm functions are described in [`Norm`].

pub mod norm;
pub mod norm_l2;

pub use norm::{Norm, NormBuilder};
pub use norm_l2::NormL2;
