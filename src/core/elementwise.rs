//! Parameters that are either a scalar or a vector, broadcast against the
//! operand of the function.

use nalgebra::{DVector, RealField};

use super::base::FunctionError;

/// Elementwise parameter of a function, such as weights or measurements.
///
/// A scalar applies to every coordinate of the operand. A vector must have
/// exactly the same length as the operand.
#[derive(Debug, Clone, PartialEq)]
pub enum Elementwise<T: RealField + Copy> {
    /// The same value for all coordinates.
    Scalar(T),
    /// One value per coordinate.
    Vector(DVector<T>),
}

impl<T: RealField + Copy> Elementwise<T> {
    /// Determines whether the parameter is zero in all coordinates.
    pub fn is_zero(&self) -> bool {
        match self {
            Elementwise::Scalar(s) => s.is_zero(),
            Elementwise::Vector(v) => v.iter().all(|vi| vi.is_zero()),
        }
    }

    /// Squares every coordinate.
    pub fn squared(&self) -> Self {
        match self {
            Elementwise::Scalar(s) => Elementwise::Scalar(*s * *s),
            Elementwise::Vector(v) => Elementwise::Vector(v.component_mul(v)),
        }
    }

    /// Multiplies two parameters coordinate-wise. The result is a scalar if
    /// both parameters are scalars.
    pub fn mul_elementwise(&self, other: &Self) -> Result<Self, FunctionError> {
        match (self, other) {
            (Elementwise::Scalar(a), Elementwise::Scalar(b)) => {
                Ok(Elementwise::Scalar(*a * *b))
            }
            (Elementwise::Scalar(_), Elementwise::Vector(v)) => {
                Ok(Elementwise::Vector(self.mul(v)?))
            }
            (Elementwise::Vector(v), _) => Ok(Elementwise::Vector(other.mul(v)?)),
        }
    }

    /// Multiplies given vector by the parameter coordinate-wise.
    pub fn mul(&self, v: &DVector<T>) -> Result<DVector<T>, FunctionError> {
        match self {
            Elementwise::Scalar(s) => Ok(v * *s),
            Elementwise::Vector(p) => {
                check_dim(p, v.len())?;
                Ok(v.component_mul(p))
            }
        }
    }

    /// Subtracts the parameter from given vector coordinate-wise.
    pub fn sub_from(&self, v: DVector<T>) -> Result<DVector<T>, FunctionError> {
        match self {
            Elementwise::Scalar(s) => Ok(v.add_scalar(-*s)),
            Elementwise::Vector(p) => {
                check_dim(p, v.len())?;
                Ok(v - p)
            }
        }
    }

    /// Materializes the parameter as a vector of length `n`.
    pub fn to_vector(&self, n: usize) -> Result<DVector<T>, FunctionError> {
        match self {
            Elementwise::Scalar(s) => Ok(DVector::from_element(n, *s)),
            Elementwise::Vector(p) => {
                check_dim(p, n)?;
                Ok(p.clone())
            }
        }
    }
}

fn check_dim<T: RealField + Copy>(p: &DVector<T>, n: usize) -> Result<(), FunctionError> {
    if p.len() == n {
        Ok(())
    } else {
        Err(FunctionError::InvalidDimensionality {
            expected: n,
            actual: p.len(),
        })
    }
}

impl<T: RealField + Copy> From<T> for Elementwise<T> {
    fn from(s: T) -> Self {
        Elementwise::Scalar(s)
    }
}

impl<T: RealField + Copy> From<DVector<T>> for Elementwise<T> {
    fn from(v: DVector<T>) -> Self {
        Elementwise::Vector(v)
    }
}

impl<T: RealField + Copy> From<Vec<T>> for Elementwise<T> {
    fn from(v: Vec<T>) -> Self {
        Elementwise::Vector(DVector::from_vec(v))
    }
}
