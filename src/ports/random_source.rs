//! Random source port - entropy for session tokens.

/// Failure to read entropy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Random source failure: {0}")]
pub struct RandomSourceError(String);

impl RandomSourceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Port for a cryptographically secure byte source.
pub trait RandomSource: Send + Sync {
    /// Fill `dest` completely with random bytes.
    ///
    /// # Errors
    ///
    /// Returns `RandomSourceError` if the source cannot supply enough bytes.
    fn fill(&self, dest: &mut [u8]) -> Result<(), RandomSourceError>;
}
