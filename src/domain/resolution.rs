use std::fmt;

use serde_json::Value;

// How non-2xx replies are treated while walking the candidate list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Policy {
    // Keep trying other candidates; any reachable host may have the data.
    Read,
    // A reached server's answer is definitive. A validation error must not
    // be masked by a later host's network failure.
    Submit,
}

// Failure captured for a single candidate attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttemptError {
    Timeout,
    Connect(String),
    Status { status: u16, message: String },
    Decode(String),
}

impl fmt::Display for AttemptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptError::Timeout => write!(f, "request timed out"),
            AttemptError::Connect(message) => write!(f, "connection failed: {message}"),
            AttemptError::Status { status, message } => {
                if message.is_empty() {
                    write!(f, "HTTP {status}")
                } else {
                    write!(f, "HTTP {status}: {message}")
                }
            }
            AttemptError::Decode(message) => write!(f, "response decode error: {message}"),
        }
    }
}

// Successful resolution: which base answered and its parsed body.
#[derive(Clone, Debug)]
pub struct Resolved {
    pub base_url: String,
    pub body: Value,
}

// Aggregated failure across every attempted base, in attempt order.
// `definitive` marks the case where a live server rejected the request,
// as opposed to no server being reachable at all.
#[derive(Clone, Debug)]
pub struct ResolveError {
    pub attempted: Vec<String>,
    pub last_error: AttemptError,
    pub definitive: bool,
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.definitive {
            // The server answered; the attempt trail adds nothing useful.
            return write!(f, "{}", self.last_error);
        }
        write!(f, "{}\n\nTried:", self.last_error)?;
        for base in &self.attempted {
            write!(f, "\n- {base}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ResolveError {}
