use std::fmt;

/// Node storage could not be obtained from the global allocator.
///
/// The tree is left exactly as it was before the failing call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("failed to allocate {size} bytes for a tree node")]
pub struct AllocError {
    pub size: usize,
}

/// [`AllocError`] raised by an insert, together with the key that could not
/// be linked in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertError<T> {
    pub error: AllocError,
    pub rejected: T,
}

impl<T> fmt::Display for InsertError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

impl<T: fmt::Debug> std::error::Error for InsertError<T> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// A broken structural invariant reported by [`AvlTree::verify`].
///
/// [`AvlTree::verify`]: crate::AvlTree::verify
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerifyError {
    #[error("cached height {cached} does not match the actual subtree height {actual}")]
    HeightMismatch { cached: u32, actual: u32 },
    #[error("node balance factor {balance} is outside [-1, 1]")]
    Unbalanced { balance: i32 },
    #[error("in-order sequence is not strictly increasing at position {position}")]
    OutOfOrder { position: usize },
}
