//! Composite objectives made of several functions.
//!
//! Proximal-splitting solvers minimize a sum of functions, each of which is
//! accessed only through the [`Function`] operations. Since not every function
//! supports every operation, [`FunctionSet::require`] lets a solver check at
//! configuration time that the operations it needs are available, rather than
//! failing at the first iteration.
//!
//! ```rust
//! use proxima::func::{Norm, NormL2};
//! use proxima::nalgebra as na;
//! use proxima::{Capabilities, FunctionSet, ObjectiveError, Operation};
//!
//! let mut set = FunctionSet::new();
//! set.push(NormL2::with_lambda(1.0));
//! set.push(NormL2::new(
//!     Norm::builder(0.5)
//!         .with_matrix(na::dmatrix![1.0, 1.0; 0.0, 1.0])
//!         .with_tight_frame(false)
//!         .build(),
//! ));
//!
//! // A gradient-based solver can use both functions.
//! assert!(set.require(Capabilities::eval_only().with_grad()).is_ok());
//!
//! // A proximal solver cannot.
//! assert!(matches!(
//!     set.require(Capabilities::eval_only().with_prox()),
//!     Err(ObjectiveError::MissingCapability { index: 1, operation: Operation::Prox })
//! ));
//! ```

use log::debug;
use nalgebra::{DVector, RealField};
use thiserror::Error;

use crate::core::{Capabilities, Function, FunctionError, Operation};

/// Boxed function that can be shared between solver threads.
pub type BoxedFunction<T> = Box<dyn Function<Field = T> + Send + Sync>;

/// Error when composing or evaluating an objective.
#[derive(Debug, Error)]
pub enum ObjectiveError {
    /// A function does not support an operation required by the solver.
    #[error("function #{index} does not support operation `{operation}`")]
    MissingCapability {
        /// Position of the function in the set.
        index: usize,
        /// The missing operation.
        operation: Operation,
    },
    /// Error that occurred when evaluating a function.
    #[error("{0}")]
    Function(#[from] FunctionError),
}

/// Ordered collection of functions whose sum is the objective.
pub struct FunctionSet<T: RealField + Copy> {
    functions: Vec<BoxedFunction<T>>,
}

impl<T: RealField + Copy> FunctionSet<T> {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self {
            functions: Vec::new(),
        }
    }

    /// Appends a function to the set.
    pub fn push<F>(&mut self, f: F)
    where
        F: Function<Field = T> + Send + Sync + 'static,
    {
        self.functions.push(Box::new(f));
    }

    /// Get the number of functions.
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Determine whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Iterates over the functions in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &(dyn Function<Field = T> + Send + Sync)> {
        self.functions.iter().map(|f| &**f)
    }

    /// Checks that every function supports the required operations.
    pub fn require(&self, required: Capabilities) -> Result<(), ObjectiveError> {
        for (index, f) in self.functions.iter().enumerate() {
            if let Some(operation) = f.capabilities().missing(required) {
                debug!("function #{} does not support `{}`", index, operation);
                return Err(ObjectiveError::MissingCapability { index, operation });
            }
        }

        Ok(())
    }

    /// Evaluates the objective, that is, the sum of all function values.
    pub fn eval(&self, x: &DVector<T>) -> Result<T, ObjectiveError> {
        let mut total = T::zero();

        for f in &self.functions {
            total += f.eval(x)?;
        }

        Ok(total)
    }
}

impl<T: RealField + Copy> Default for FunctionSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: RealField + Copy> FromIterator<BoxedFunction<T>> for FunctionSet<T> {
    fn from_iter<I: IntoIterator<Item = BoxedFunction<T>>>(iter: I) -> Self {
        Self {
            functions: iter.into_iter().collect(),
        }
    }
}
