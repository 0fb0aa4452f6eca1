use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// Issue categories a report can be filed under.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    Pothole,
    Garbage,
    Streetlight,
}

impl Category {
    pub fn parse(tag: &str) -> Option<Category> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "pothole" => Some(Category::Pothole),
            "garbage" => Some(Category::Garbage),
            "streetlight" => Some(Category::Streetlight),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Pothole => "pothole",
            Category::Garbage => "garbage",
            Category::Streetlight => "streetlight",
        }
    }
}

// Community report as served by the backend.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Report {
    pub id: u64,
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub shares: u64,
    #[serde(default)]
    pub created_at: Option<String>,
}

// One page of the reports listing, in the backend's page envelope.
#[derive(Clone, Debug, Deserialize)]
pub struct ReportPage {
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<Report>,
}

// Binary captured on-device and uploaded alongside a report or profile.
#[derive(Clone, Debug)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

// A report as composed on the client, before submission.
#[derive(Clone, Debug)]
pub struct ReportDraft {
    pub name: String,
    pub category: Category,
    pub description: String,
    pub location: String,
    pub coords: Option<(f64, f64)>,
    pub photo: Option<Attachment>,
    pub voice: Option<Attachment>,
}

// A draft needs enough detail to act on: a real description or a voice note.
const MIN_DESCRIPTION_LEN: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DraftError {
    // Needs a description of at least MIN_DESCRIPTION_LEN chars or a voice note.
    MissingDetails,
    // A photo locks location at capture time; coordinates must come with it.
    MissingCoordinates,
}

impl fmt::Display for DraftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DraftError::MissingDetails => {
                write!(f, "provide a description of at least {MIN_DESCRIPTION_LEN} characters or a voice note")
            }
            DraftError::MissingCoordinates => {
                write!(f, "a report with a photo must carry the coordinates locked at capture")
            }
        }
    }
}

impl std::error::Error for DraftError {}

impl ReportDraft {
    pub fn validate(&self) -> Result<(), DraftError> {
        let has_text = self.description.trim().chars().count() >= MIN_DESCRIPTION_LEN;
        if !has_text && self.voice.is_none() {
            return Err(DraftError::MissingDetails);
        }
        if self.photo.is_some() && self.coords.is_none() {
            return Err(DraftError::MissingCoordinates);
        }
        Ok(())
    }

    pub fn has_binary(&self) -> bool {
        self.photo.is_some() || self.voice.is_some()
    }
}

// Signup form mirroring the backend's account fields.
#[derive(Clone, Debug, Default)]
pub struct SignupForm {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub password: String,
    pub confirm_password: String,
    pub coords: Option<(f64, f64)>,
    pub avatar: Option<Attachment>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignupError {
    MissingField(&'static str),
    PasswordMismatch,
}

impl fmt::Display for SignupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignupError::MissingField(field) => write!(f, "{field} is required"),
            SignupError::PasswordMismatch => write!(f, "passwords do not match"),
        }
    }
}

impl std::error::Error for SignupError {}

impl SignupForm {
    pub fn validate(&self) -> Result<(), SignupError> {
        let required = [
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("username", &self.username),
            ("email", &self.email),
            ("password", &self.password),
            ("confirm_password", &self.confirm_password),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(SignupError::MissingField(field));
            }
        }
        if self.password != self.confirm_password {
            return Err(SignupError::PasswordMismatch);
        }
        Ok(())
    }
}

// Token plus the raw profile body returned by the auth endpoints. The
// caller decides what to do with it; nothing is persisted here.
#[derive(Clone, Debug)]
pub struct AuthSession {
    pub token: String,
    pub profile: Value,
}
