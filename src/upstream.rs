use std::time::Duration;

use serde::Deserialize;

/// Shared client for third-party APIs. Every outbound call gets a hard timeout.
pub fn http_client(timeout_secs: u64) -> anyhow::Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(concat!("pantry/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Pulls `message` out of a JSON error body, falling back to the raw text.
pub fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(e) => e.message,
        Err(_) => body.chars().take(512).collect(),
    }
}
