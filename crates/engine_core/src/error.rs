//! Errors raised by engine primitives.

use thiserror::Error;

/// Misuse of the transform stack. Reaching this is a logic fault in drawing code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StackError {
    /// `pop` was called with only the base transform left.
    #[error("transform stack popped past its base (depth {depth})")]
    Unbalanced { depth: usize },
}
