// API module - thin ureq wrapper around the Artisan Alley server

use anyhow::{anyhow, Result};
use serde_json::Value;

/// Default server when ALLEY_SERVER_URL is not set.
const DEFAULT_SERVER_URL: &str = "http://localhost:4000";

pub struct ApiClient {
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn from_env(token: Option<String>) -> Self {
        let base_url = std::env::var("ALLEY_SERVER_URL")
            .unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string());
        Self { base_url, token }
    }

    fn request(&self, method: &str, path: &str) -> ureq::Request {
        let mut request = ureq::request(method, &format!("{}{}", self.base_url, path));
        if let Some(token) = &self.token {
            request = request.set("Authorization", &format!("Bearer {}", token));
        }
        request
    }

    pub fn get(&self, path: &str) -> Result<Value> {
        read_response(self.request("GET", path).call())
    }

    pub fn post(&self, path: &str, body: Value) -> Result<Value> {
        read_response(self.request("POST", path).send_json(body))
    }
}

/// Unwraps a response body, surfacing the server's `message` field on errors.
fn read_response(result: Result<ureq::Response, ureq::Error>) -> Result<Value> {
    match result {
        Ok(response) => Ok(response.into_json()?),
        Err(ureq::Error::Status(code, response)) => {
            let message = response
                .into_json::<Value>()
                .ok()
                .and_then(|v| v.get("message").and_then(Value::as_str).map(String::from))
                .unwrap_or_else(|| "unknown error".to_string());
            Err(anyhow!("server returned {}: {}", code, message))
        }
        Err(e) => Err(anyhow!("request failed: {}", e)),
    }
}
