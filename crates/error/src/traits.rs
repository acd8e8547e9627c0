//! # Error Traits
//!
//! Conversion traits for error handling.

use crate::{AppError, Result};

/// Trait for adding context to optional values.
pub trait Context<T> {
    /// Turn a missing value into a not found error.
    fn or_not_found<C: ToString>(self, what: C) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn or_not_found<C: ToString>(self, what: C) -> Result<T> { self.ok_or_else(|| AppError::not_found(what)) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_or_not_found() {
        let missing: Option<i32> = None;
        let err = missing.or_not_found("Match 3").unwrap_err();
        assert_eq!(err.code(), "NOT_FOUND");
        assert_eq!(err.message(), "Match 3");
        assert_eq!(Some(5).or_not_found("x").unwrap(), 5);
    }
}
