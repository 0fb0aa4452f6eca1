use std::time::Duration;

use serde_json::Value;

use crate::domain::ports::{ApiRequest, Transport, TransportError};
use crate::domain::resolution::{AttemptError, Policy, Resolved, ResolveError};

// Walks candidate bases in order until one yields a usable reply. The loop
// is a single pass: one bounded attempt per candidate, success
// short-circuits, and nothing is retained across calls.
pub struct Resolver<T> {
    pub transport: T,
    pub timeout: Duration,
}

impl<T: Transport> Resolver<T> {
    pub fn new(transport: T, timeout: Duration) -> Self {
        Self { transport, timeout }
    }

    // Total latency is bounded by timeout x candidates.len(); attempts are
    // strictly sequential, never raced.
    pub async fn resolve(
        &self,
        candidates: &[String],
        request: &ApiRequest,
        policy: Policy,
    ) -> Result<Resolved, ResolveError> {
        let mut attempted = Vec::with_capacity(candidates.len());
        let mut last_error: Option<AttemptError> = None;

        for base in candidates {
            attempted.push(base.clone());
            let url = format!("{}{}", base, request.path);
            tracing::debug!(%url, "trying candidate");

            match self.transport.send(&url, request, self.timeout).await {
                Ok(reply) if reply.is_success() => match reply.json() {
                    Ok(body) => {
                        tracing::debug!(base = %base, "candidate answered");
                        return Ok(Resolved {
                            base_url: base.clone(),
                            body,
                        });
                    }
                    Err(err) => {
                        let error = AttemptError::Decode(err.to_string());
                        // The server was reached even though the body was
                        // unusable; under Submit that is still terminal.
                        if policy == Policy::Submit {
                            return Err(ResolveError {
                                attempted,
                                last_error: error,
                                definitive: true,
                            });
                        }
                        last_error = Some(error);
                    }
                },
                Ok(reply) => {
                    let error = AttemptError::Status {
                        status: reply.status,
                        message: flatten_error_body(&reply.body),
                    };
                    if policy == Policy::Submit {
                        // A live server rejected the request. Later hosts
                        // cannot improve on that answer.
                        return Err(ResolveError {
                            attempted,
                            last_error: error,
                            definitive: true,
                        });
                    }
                    tracing::debug!(base = %base, error = %error, "candidate rejected request");
                    last_error = Some(error);
                }
                Err(TransportError::Timeout) => {
                    tracing::debug!(base = %base, "candidate timed out");
                    last_error = Some(AttemptError::Timeout);
                }
                Err(TransportError::Connect(message)) => {
                    tracing::debug!(base = %base, %message, "candidate unreachable");
                    last_error = Some(AttemptError::Connect(message));
                }
            }
        }

        Err(ResolveError {
            attempted,
            last_error: last_error
                .unwrap_or_else(|| AttemptError::Connect("no candidates to try".to_string())),
            definitive: false,
        })
    }
}

// Flatten a field-error map like {"username": ["already taken"]} into
// readable "field: message" lines. Non-object bodies degrade gracefully
// to their text or to an empty string.
fn flatten_error_body(body: &[u8]) -> String {
    let Ok(value) = serde_json::from_slice::<Value>(body) else {
        return String::new();
    };
    match value {
        Value::Object(map) => {
            let mut parts = Vec::with_capacity(map.len());
            for (field, entry) in map {
                let rendered = match entry {
                    Value::Array(items) => items
                        .iter()
                        .map(render_message)
                        .collect::<Vec<_>>()
                        .join(", "),
                    Value::String(text) => text,
                    other => other.to_string(),
                };
                parts.push(format!("{field}: {rendered}"));
            }
            parts.join("\n")
        }
        Value::String(text) => text,
        _ => String::new(),
    }
}

fn render_message(item: &Value) -> String {
    match item {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
