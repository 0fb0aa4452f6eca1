use serde_json::Value;

use crate::domain::errors::ClientError;
use crate::domain::ports::{ApiRequest, Transport};
use crate::domain::report::{Report, ReportPage};
use crate::domain::resolution::Policy;
use crate::use_cases::resolve::Resolver;

// Read flows try every candidate: any reachable host may have the data.

// Fetch one page of community reports. Returns the base that answered
// alongside the page so callers can tell the operator where data came from.
pub async fn list_reports<T: Transport>(
    resolver: &Resolver<T>,
    candidates: &[String],
    page: u32,
) -> Result<(String, ReportPage), ClientError> {
    let path = if page <= 1 {
        "/api/reports/".to_string()
    } else {
        format!("/api/reports/?page={page}")
    };
    let resolved = resolver
        .resolve(candidates, &ApiRequest::get(path), Policy::Read)
        .await?;
    let page = decode::<ReportPage>(resolved.body)?;
    Ok((resolved.base_url, page))
}

// Fetch a single report by id.
pub async fn get_report<T: Transport>(
    resolver: &Resolver<T>,
    candidates: &[String],
    id: u64,
) -> Result<(String, Report), ClientError> {
    let resolved = resolver
        .resolve(
            candidates,
            &ApiRequest::get(format!("/api/reports/{id}/")),
            Policy::Read,
        )
        .await?;
    let report = decode::<Report>(resolved.body)?;
    Ok((resolved.base_url, report))
}

// Ask the backend to create its demo reports. Dev helper; the backend
// answers with a human-readable detail line either way.
pub async fn seed_reports<T: Transport>(
    resolver: &Resolver<T>,
    candidates: &[String],
) -> Result<(String, String), ClientError> {
    let resolved = resolver
        .resolve(candidates, &ApiRequest::post("/api/seed/"), Policy::Submit)
        .await?;
    let detail = resolved
        .body
        .get("detail")
        .and_then(Value::as_str)
        .unwrap_or("seeded")
        .to_string();
    Ok((resolved.base_url, detail))
}

fn decode<D: serde::de::DeserializeOwned>(body: Value) -> Result<D, ClientError> {
    serde_json::from_value(body).map_err(|err| ClientError::UnexpectedBody(err.to_string()))
}
