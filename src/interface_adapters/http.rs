use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::domain::ports::{
    ApiRequest, FormPart, HttpReply, Method, Payload, Transport, TransportError,
};

// Transport port implementation over a shared reqwest client. The
// per-attempt deadline is applied per request so each candidate gets the
// same bounded budget.
#[derive(Clone, Default)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(
        &self,
        url: &str,
        request: &ApiRequest,
        timeout: Duration,
    ) -> Result<HttpReply, TransportError> {
        let builder = match request.method {
            Method::Get => self.http.get(url),
            Method::Post => self.http.post(url),
        };
        let builder = match &request.payload {
            Payload::Empty => builder,
            Payload::Json(body) => builder.json(body),
            // Content-Type with the multipart boundary is set by reqwest.
            Payload::Multipart(parts) => builder.multipart(multipart_form(parts)),
        };

        let response = builder
            .timeout(timeout)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(map_reqwest_error)?
            .to_vec();
        Ok(HttpReply { status, body })
    }
}

fn multipart_form(parts: &[FormPart]) -> reqwest::multipart::Form {
    let mut form = reqwest::multipart::Form::new();
    for part in parts {
        form = match part {
            FormPart::Text { name, value } => form.text(name.clone(), value.clone()),
            FormPart::File {
                name,
                file_name,
                content_type,
                bytes,
            } => {
                let file = reqwest::multipart::Part::bytes(bytes.clone())
                    .file_name(file_name.clone());
                // Fall back to an untyped part when the label is not a
                // parseable MIME type; the upload still goes through.
                let file = file
                    .mime_str(content_type)
                    .unwrap_or_else(|_| {
                        reqwest::multipart::Part::bytes(bytes.clone())
                            .file_name(file_name.clone())
                    });
                form.part(name.clone(), file)
            }
        };
    }
    form
}

// Keep timeouts distinct from connection failures so the resolver can
// report them separately.
fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Connect(err.to_string())
    }
}
