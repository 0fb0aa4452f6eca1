use std::fmt;

use crate::domain::report::{DraftError, SignupError};
use crate::domain::resolution::ResolveError;

// Top-level error surfaced by the client flows.
#[derive(Debug)]
pub enum ClientError {
    Draft(DraftError),
    Signup(SignupError),
    Resolve(ResolveError),
    // A candidate answered 2xx but the body did not match the contract.
    UnexpectedBody(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Draft(err) => write!(f, "{err}"),
            ClientError::Signup(err) => write!(f, "{err}"),
            ClientError::Resolve(err) => write!(f, "{err}"),
            ClientError::UnexpectedBody(message) => {
                write!(f, "unexpected response body: {message}")
            }
        }
    }
}

impl std::error::Error for ClientError {}

impl From<DraftError> for ClientError {
    fn from(err: DraftError) -> Self {
        ClientError::Draft(err)
    }
}

impl From<SignupError> for ClientError {
    fn from(err: SignupError) -> Self {
        ClientError::Signup(err)
    }
}

impl From<ResolveError> for ClientError {
    fn from(err: ResolveError) -> Self {
        ClientError::Resolve(err)
    }
}
