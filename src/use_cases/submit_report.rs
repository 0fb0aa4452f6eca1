use serde_json::json;

use crate::domain::errors::ClientError;
use crate::domain::ports::{ApiRequest, FormPart, Transport};
use crate::domain::report::{Attachment, Report, ReportDraft};
use crate::domain::resolution::Policy;
use crate::use_cases::resolve::Resolver;

// Validate a draft and create it on the backend. Submission uses the
// stop-on-server-reply policy: once any host answers, its verdict stands.
pub async fn submit_report<T: Transport>(
    resolver: &Resolver<T>,
    candidates: &[String],
    draft: &ReportDraft,
) -> Result<(String, Report), ClientError> {
    draft.validate()?;

    // Multipart only when a binary rides along; plain JSON otherwise.
    let request = if draft.has_binary() {
        ApiRequest::post_multipart("/api/reports/", multipart_parts(draft))
    } else {
        ApiRequest::post_json("/api/reports/", json_body(draft))
    };

    let resolved = resolver.resolve(candidates, &request, Policy::Submit).await?;
    let report = serde_json::from_value(resolved.body)
        .map_err(|err| ClientError::UnexpectedBody(err.to_string()))?;
    Ok((resolved.base_url, report))
}

fn multipart_parts(draft: &ReportDraft) -> Vec<FormPart> {
    let mut parts = vec![
        text("name", &draft.name),
        text("title", draft.category.as_str()),
        text("body", &draft.description),
        text("location", &draft.location),
    ];
    if let Some((lat, lng)) = draft.coords {
        parts.push(text("lat", &lat.to_string()));
        parts.push(text("lng", &lng.to_string()));
    }
    if let Some(photo) = &draft.photo {
        parts.push(file("image", photo.file_name.clone(), photo));
    }
    if let Some(voice) = &draft.voice {
        parts.push(file("voice", voice.file_name.clone(), voice));
    }
    parts
}

fn json_body(draft: &ReportDraft) -> serde_json::Value {
    let mut body = json!({
        "name": draft.name,
        "title": draft.category.as_str(),
        "body": draft.description,
        "location": draft.location,
        "image_url": "",
    });
    if let Some((lat, lng)) = draft.coords {
        body["coords"] = json!({"lat": lat, "lng": lng});
    }
    body
}

fn text(name: &str, value: &str) -> FormPart {
    FormPart::Text {
        name: name.to_string(),
        value: value.to_string(),
    }
}

fn file(name: &str, file_name: String, attachment: &Attachment) -> FormPart {
    FormPart::File {
        name: name.to_string(),
        file_name,
        content_type: attachment.content_type.clone(),
        bytes: attachment.bytes.clone(),
    }
}
