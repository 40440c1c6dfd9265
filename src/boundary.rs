//! Fault containment for calls coming in from Explorer.
//!
//! Every host-facing operation runs through [`guard`]. A panic never unwinds
//! across the COM boundary; it is reported as [`ShellError::Unexpected`].

use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::error::{Result, ShellError};

pub fn guard<T>(operation: &'static str, f: impl FnOnce() -> Result<T>) -> Result<T> {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => {
            tracing::debug!(target: "shellext::boundary", operation, error = %err, hresult = err.hresult(), "Operation failed");
            Err(err)
        }
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            tracing::error!(target: "shellext::boundary", operation, panic = %message, "Operation panicked");
            Err(ShellError::Unexpected(message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passes_values_and_errors_through() {
        assert_eq!(guard("ok", || Ok(7)), Ok(7));
        assert_eq!(
            guard::<()>("err", || Err(ShellError::OutOfMemory)),
            Err(ShellError::OutOfMemory)
        );
    }

    #[test]
    fn test_panic_becomes_unexpected() {
        let result = guard::<()>("panics", || panic!("selection went away"));
        assert_eq!(
            result,
            Err(ShellError::Unexpected("selection went away".to_string()))
        );
    }
}
