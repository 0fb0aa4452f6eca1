use std::net::Ipv4Addr;

use crate::domain::environment::{Platform, RuntimeEnv};

// Fixed alias android emulators map to the host machine's loopback.
pub const EMULATOR_ALIAS: &str = "http://10.0.2.2:8000";
// Final fallback tried when no other candidate answers.
pub const LOOPBACK: &str = "http://127.0.0.1:8000";
// Development backend port shared by every guessed host.
const BACKEND_PORT: u16 = 8000;

// Build the ordered candidate base URLs for the current runtime.
// A non-empty override wins outright; otherwise the emulator alias, the
// detected LAN host, and loopback are listed in that priority order.
// The result is deduplicated and never empty.
pub fn build_candidates(env: &RuntimeEnv) -> Vec<String> {
    if let Some(override_url) = env.api_url_override.as_deref() {
        let trimmed = override_url.trim();
        if !trimmed.is_empty() {
            return vec![trimmed.trim_end_matches('/').to_string()];
        }
    }

    let mut list = Vec::new();
    if env.platform == Platform::Android {
        list.push(EMULATOR_ALIAS.to_string());
    }
    if let Some(host) = env.dev_host.as_deref().and_then(ipv4_host) {
        list.push(format!("http://{host}:{BACKEND_PORT}"));
    }
    list.push(LOOPBACK.to_string());

    dedupe_preserving_order(list)
}

// Extract the host part of a dev connection string when it is a dotted quad.
// Anything else (hostnames, IPv6, garbage) is ignored rather than guessed at.
fn ipv4_host(raw: &str) -> Option<&str> {
    let host = raw.split(':').next()?.trim();
    host.parse::<Ipv4Addr>().ok()?;
    Some(host)
}

fn dedupe_preserving_order(list: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(list.len());
    for base in list {
        if !unique.contains(&base) {
            unique.push(base);
        }
    }
    unique
}
