//! Session token value object and generator.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::ValidationError;
use crate::ports::{RandomSource, RandomSourceError};

/// Number of characters in every session token.
pub const TOKEN_LENGTH: usize = 32;

/// Identifier of one estimation session.
///
/// Always exactly [`TOKEN_LENGTH`] characters. Parsing checks the length
/// only, so a malformed token is rejected before any store round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionToken(String);

impl SessionToken {
    /// Parses a caller-supplied token.
    pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let actual = value.chars().count();
        if actual != TOKEN_LENGTH {
            return Err(ValidationError::invalid_length("token", TOKEN_LENGTH, actual));
        }
        Ok(Self(value))
    }

    /// Generates a fresh token from the given entropy source.
    pub fn generate(source: &dyn RandomSource) -> Result<Self, TokenError> {
        generate_token(source, TOKEN_LENGTH).map(Self)
    }

    /// Returns the token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionToken {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SessionToken {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<SessionToken> for String {
    fn from(token: SessionToken) -> Self {
        token.0
    }
}

/// Failures while generating a token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Invalid token length provided: {0}, must be greater than zero")]
    InvalidLength(usize),

    #[error("Unable to generate token: {0}")]
    RandomSource(String),
}

impl From<RandomSourceError> for TokenError {
    fn from(err: RandomSourceError) -> Self {
        TokenError::RandomSource(err.to_string())
    }
}

/// Generates a hex token of exactly `length` characters.
///
/// Reads `length` random bytes, which hex-encode to `2 * length`
/// characters, and keeps the first `length` of them.
pub fn generate_token(source: &dyn RandomSource, length: usize) -> Result<String, TokenError> {
    if length == 0 {
        return Err(TokenError::InvalidLength(length));
    }

    let mut bytes = vec![0u8; length];
    source.fill(&mut bytes)?;

    let mut token = hex::encode(bytes);
    token.truncate(length);
    Ok(token)
}
