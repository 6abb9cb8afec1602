//! Validation of records crossing the adapter boundary.

use crate::error::Result;

/// A record that can check its own invariants after decoding.
///
/// Adapters call this on every decoded response so that downstream code only
/// ever sees closed, known shapes.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

impl<T: Validate> Validate for Vec<T> {
    fn validate(&self) -> Result<()> {
        self.iter().try_for_each(Validate::validate)
    }
}

impl<T: Validate> Validate for Option<T> {
    fn validate(&self) -> Result<()> {
        match self {
            Some(inner) => inner.validate(),
            None => Ok(()),
        }
    }
}

impl Validate for () {
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}
