use serde_json::{Value, json};

use crate::domain::errors::ClientError;
use crate::domain::ports::{ApiRequest, FormPart, Transport};
use crate::domain::report::{AuthSession, SignupForm};
use crate::domain::resolution::Policy;
use crate::use_cases::resolve::Resolver;

// Auth flows are writes against a live server: a 400 with a field-error
// map is a definitive answer, so they resolve under the submit policy.

pub async fn signup<T: Transport>(
    resolver: &Resolver<T>,
    candidates: &[String],
    form: &SignupForm,
) -> Result<(String, AuthSession), ClientError> {
    form.validate()?;

    let request = if form.avatar.is_some() {
        ApiRequest::post_multipart("/api/auth/signup/", multipart_parts(form))
    } else {
        ApiRequest::post_json("/api/auth/signup/", json_body(form))
    };

    let resolved = resolver.resolve(candidates, &request, Policy::Submit).await?;
    let session = session_from(resolved.body)?;
    Ok((resolved.base_url, session))
}

pub async fn login<T: Transport>(
    resolver: &Resolver<T>,
    candidates: &[String],
    username: &str,
    password: &str,
) -> Result<(String, AuthSession), ClientError> {
    let request = ApiRequest::post_json(
        "/api/auth/login/",
        json!({"username": username, "password": password}),
    );

    let resolved = resolver.resolve(candidates, &request, Policy::Submit).await?;
    let session = session_from(resolved.body)?;
    Ok((resolved.base_url, session))
}

// The auth endpoints reply with the token alongside the profile fields.
fn session_from(body: Value) -> Result<AuthSession, ClientError> {
    let token = body
        .get("token")
        .and_then(Value::as_str)
        .ok_or_else(|| ClientError::UnexpectedBody("missing token field".to_string()))?
        .to_string();
    Ok(AuthSession {
        token,
        profile: body,
    })
}

fn multipart_parts(form: &SignupForm) -> Vec<FormPart> {
    let mut parts = vec![
        text("first_name", &form.first_name),
        text("last_name", &form.last_name),
        text("username", &form.username),
        text("email", &form.email),
        text("password", &form.password),
        text("confirm_password", &form.confirm_password),
    ];
    if let Some(phone) = &form.phone_number {
        parts.push(text("phone_number", phone));
    }
    if let Some((lat, lng)) = form.coords {
        parts.push(text("lat", &lat.to_string()));
        parts.push(text("lng", &lng.to_string()));
    }
    if let Some(avatar) = &form.avatar {
        parts.push(FormPart::File {
            name: "avatar".to_string(),
            file_name: avatar.file_name.clone(),
            content_type: avatar.content_type.clone(),
            bytes: avatar.bytes.clone(),
        });
    }
    parts
}

fn json_body(form: &SignupForm) -> Value {
    let mut body = json!({
        "first_name": form.first_name,
        "last_name": form.last_name,
        "username": form.username,
        "email": form.email,
        "password": form.password,
        "confirm_password": form.confirm_password,
    });
    if let Some(phone) = &form.phone_number {
        body["phone_number"] = json!(phone);
    }
    if let Some((lat, lng)) = form.coords {
        body["lat"] = json!(lat);
        body["lng"] = json!(lng);
    }
    body
}

fn text(name: &str, value: &str) -> FormPart {
    FormPart::Text {
        name: name.to_string(),
        value: value.to_string(),
    }
}
