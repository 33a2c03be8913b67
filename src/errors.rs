use thiserror::Error;

/// Errors surfaced by the calculation engine.
///
/// Domain non-events (a body that never rises, an eclipse that does not happen) are **not**
/// errors: they are reported through the status enums and `Option` returns of the modules
/// that produce them. Only genuine failures live here.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AlmagestError {
    #[error("{solver} failed to converge after {iterations} iterations")]
    ConvergenceFailure {
        solver: &'static str,
        iterations: usize,
    },
}
