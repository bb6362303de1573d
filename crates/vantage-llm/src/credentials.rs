use std::path::Path;

use secrecy::SecretString;
use tracing::{error, info};

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Wraps the API credential (redacted in Debug).
#[derive(Clone)]
pub struct ApiKey(pub SecretString);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(SecretString::from(key.into()))
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey([REDACTED])")
    }
}

/// Read the API credential from a key=value env file, read once at startup.
///
/// A missing file logs an error and leaves the credential unset; requests
/// then go out with an empty bearer token and fail through the lenient
/// response path. Falls back to the process environment when the file is
/// absent or does not contain the key.
pub fn load_api_key(env_path: &Path) -> Option<ApiKey> {
    match std::fs::read_to_string(env_path) {
        Ok(contents) => {
            for line in contents.lines() {
                if let Some((key, value)) = line.split_once('=') {
                    if key.trim() == API_KEY_VAR {
                        info!(path = %env_path.display(), "found API key");
                        return Some(ApiKey::new(value.trim()));
                    }
                }
            }
            error!(path = %env_path.display(), "env file does not set {API_KEY_VAR}");
        }
        Err(_) => {
            error!(
                path = %env_path.display(),
                "env file not found; create one containing {API_KEY_VAR}=<key>"
            );
        }
    }

    match std::env::var(API_KEY_VAR) {
        Ok(value) if !value.is_empty() => {
            info!("using {API_KEY_VAR} from the process environment");
            Some(ApiKey::new(value))
        }
        _ => None,
    }
}
