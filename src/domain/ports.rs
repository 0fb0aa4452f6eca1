use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

// Body attached to an outgoing request. Multipart stays transport-agnostic
// here; the adapter turns it into whatever its HTTP crate wants.
#[derive(Clone, Debug)]
pub enum Payload {
    Empty,
    Json(Value),
    Multipart(Vec<FormPart>),
}

#[derive(Clone, Debug)]
pub enum FormPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        content_type: String,
        bytes: Vec<u8>,
    },
}

// One request the resolver wants issued against each candidate base in turn.
// The path is joined to the base URL at attempt time.
#[derive(Clone, Debug)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub payload: Payload,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            payload: Payload::Empty,
        }
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            payload: Payload::Empty,
        }
    }

    pub fn post_json(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            payload: Payload::Json(body),
        }
    }

    pub fn post_multipart(path: impl Into<String>, parts: Vec<FormPart>) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            payload: Payload::Multipart(parts),
        }
    }
}

// Raw reply from one candidate: status plus undecoded body bytes.
#[derive(Clone, Debug)]
pub struct HttpReply {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

// Network-level failure reaching a candidate; no server was heard from.
#[derive(Clone, Debug)]
pub enum TransportError {
    Timeout,
    Connect(String),
}

// Port for issuing one bounded HTTP request. Implemented over reqwest in
// the adapters and by scripted fakes in use-case tests.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(
        &self,
        url: &str,
        request: &ApiRequest,
        timeout: Duration,
    ) -> Result<HttpReply, TransportError>;
}
