//! Core abstractions and types for Proxima.
//!
//! *Users* are mainly interested in the [`Function`] trait and the
//! [operators](LinearOperator) that can be plugged into concrete functions.
//!
//! Solver *developers* are interested in [`Capabilities`] for checking at
//! configuration time that every function supports the operations the solver
//! is going to call.

mod base;
mod elementwise;
mod function;
mod operator;

pub use base::*;
pub use elementwise::*;
pub use function::*;
pub use operator::*;
