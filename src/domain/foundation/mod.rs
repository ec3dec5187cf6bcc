//! Foundation module - Shared domain primitives.
//!
//! Contains the session token, the error taxonomy and the validation
//! helpers that form the vocabulary of the estimation domain.

mod errors;
mod token;

pub use errors::{require_non_empty, ErrorKind, ValidationError};
pub use token::{generate_token, SessionToken, TokenError, TOKEN_LENGTH};
