use std::fmt;

use thiserror::Error;

/// Operation of the [`Function`](super::function::Function) contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Pointwise evaluation.
    Eval,
    /// Gradient.
    Grad,
    /// Proximal operator.
    Prox,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Eval => "eval",
            Operation::Grad => "grad",
            Operation::Prox => "prox",
        };

        f.write_str(name)
    }
}

/// Set of operations a function supports besides the mandatory evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    grad: bool,
    prox: bool,
}

impl Capabilities {
    /// Only evaluation is supported.
    pub fn eval_only() -> Self {
        Self::default()
    }

    /// Adds support for the gradient.
    pub fn with_grad(mut self) -> Self {
        self.grad = true;
        self
    }

    /// Adds support for the proximal operator.
    pub fn with_prox(mut self) -> Self {
        self.prox = true;
        self
    }

    /// Determines whether given operation is supported.
    pub fn supports(&self, op: Operation) -> bool {
        match op {
            Operation::Eval => true,
            Operation::Grad => self.grad,
            Operation::Prox => self.prox,
        }
    }

    /// Returns the first operation from `required` that is not supported.
    pub fn missing(&self, required: Capabilities) -> Option<Operation> {
        [Operation::Grad, Operation::Prox]
            .into_iter()
            .find(|&op| required.supports(op) && !self.supports(op))
    }
}

/// Error encountered while evaluating a function or one of its operators.
#[derive(Debug, Error)]
pub enum FunctionError {
    /// The operation is not defined by the function.
    #[error("operation `{0}` is not implemented by the function")]
    Unimplemented(Operation),
    /// The operation is defined, but not for the current parameters of the
    /// function. This is permanent and retrying will not help.
    #[error("operation `{operation}` is not supported: {reason}")]
    UnsupportedConfiguration {
        /// The requested operation.
        operation: Operation,
        /// Why the configuration is not supported.
        reason: &'static str,
    },
    /// Shapes of the operands are not compatible.
    #[error("invalid dimensionality (expected {expected}, got {actual})")]
    InvalidDimensionality {
        /// Expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },
    /// A custom error raised by a user-supplied operator.
    #[error("{0}")]
    Custom(Box<dyn std::error::Error + Send + Sync>),
}
