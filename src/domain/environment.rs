use std::fmt;

// Closed set of client platforms the app ships on. Only the android
// emulator class carries a fixed host alias for the dev machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Platform {
    Android,
    Ios,
}

impl Platform {
    pub fn parse(tag: &str) -> Option<Platform> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "android" => Some(Platform::Android),
            "ios" => Some(Platform::Ios),
            _ => None,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Android => write!(f, "android"),
            Platform::Ios => write!(f, "ios"),
        }
    }
}

// Runtime inputs for candidate building. All of them are passed in
// explicitly so the construction stays pure and testable.
#[derive(Clone, Debug)]
pub struct RuntimeEnv {
    // Explicit base URL override; when set, discovery is skipped entirely.
    pub api_url_override: Option<String>,
    pub platform: Platform,
    // Free-form connection string advertised by dev tooling ("host:port"
    // or a bare host); only an IPv4 dotted-quad prefix is used.
    pub dev_host: Option<String>,
}
