//! Result type aliases for the Veris engine.

use crate::VerisError;

/// A specialized `Result` type for Veris operations.
pub type VerisResult<T> = Result<T, VerisError>;

/// A boxed future returning a `VerisResult`.
pub type BoxFuture<'a, T> =
    std::pin::Pin<Box<dyn std::future::Future<Output = VerisResult<T>> + Send + 'a>>;
